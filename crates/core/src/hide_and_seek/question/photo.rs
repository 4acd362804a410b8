use crate::hide_and_seek::catalog::Answer;
use crate::hide_and_seek::constraint::Region;
use crate::position::Position;

/// "Send us a photo of {subject}." The photo arrives out of band; only the
/// ask is recorded.
pub struct PhotoQuestion {
    pub anchor: Position,
    pub subject: String,
}

impl PhotoQuestion {
    pub fn derive(&self, _answer: Answer) -> (Region, String) {
        let label = format!("Send us a photo of {}.", self.subject);
        (Region::Advisory, label)
    }
}
