use crate::hide_and_seek::GameError;
use crate::hide_and_seek::catalog::{Answer, MatchingPrompt};
use crate::hide_and_seek::constraint::Region;
use crate::position::Position;

/// "Is your nearest X the same as ours?" and the directional variants.
pub struct MatchingQuestion {
    pub anchor: Position,
    pub prompt: MatchingPrompt,
}

impl MatchingQuestion {
    pub fn derive(&self, answer: Answer) -> (Region, String) {
        let region = match self.half_plane(answer) {
            Ok(region) => region,
            Err(GameError::AmbiguousDetail) => {
                // yes/no against free text stays an advisory, never a region
                tracing::debug!(prompt = %self.prompt.text, "matching prompt is not directional, keeping advisory");
                Region::Advisory
            }
            Err(_) => Region::Advisory,
        };

        let label = format!("{} ({answer})", self.prompt.text);
        (region, label)
    }

    fn half_plane(&self, answer: Answer) -> Result<Region, GameError> {
        let axis = self.prompt.axis.ok_or(GameError::AmbiguousDetail)?;
        let side = answer
            .cardinal()
            .filter(|side| side.axis() == axis)
            .ok_or(GameError::AmbiguousDetail)?;

        Ok(Region::HalfPlane {
            anchor: self.anchor.latlng(),
            axis,
            side,
        })
    }
}
