use crate::hide_and_seek::catalog::Answer;
use crate::hide_and_seek::constraint::Region;
use crate::position::Position;

/// "We just moved. Are we warmer or colder?" Needs the seeker's position
/// before and after the move, in that order.
///
/// No closed region is derived and the result is never intersected with
/// earlier constraints; the colored endpoint marker and the connecting
/// segment are the whole output.
pub struct ThermometerQuestion {
    pub start: Position,
    pub end: Position,
}

impl ThermometerQuestion {
    pub fn derive(&self, answer: Answer) -> (Region, String) {
        let word = match answer {
            Answer::Closer => "warmer",
            _ => "colder",
        };
        let label = format!("We just moved. Are we warmer or colder? ({word})");
        (Region::Advisory, label)
    }
}
