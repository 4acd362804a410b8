use crate::hide_and_seek::catalog::Answer;
use crate::hide_and_seek::constraint::Region;
use crate::position::Position;

/// "Are you closer to {landmark} than us?"
///
/// Landmarks are free text the engine has no coordinates for, so the answer
/// stays an advisory in the history rather than becoming a region.
pub struct MeasuringQuestion {
    pub anchor: Position,
    pub landmark: String,
}

impl MeasuringQuestion {
    pub fn derive(&self, answer: Answer) -> (Region, String) {
        let word = match answer {
            Answer::Closer => "closer",
            _ => "farther",
        };
        let label = format!("Are you closer to {} than us? ({word})", self.landmark);
        (Region::Advisory, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measuring_is_advisory() {
        let question = MeasuringQuestion {
            anchor: Position::new(52.95, -1.16),
            landmark: "Nottingham Castle".into(),
        };
        let (region, label) = question.derive(Answer::Farther);

        assert_eq!(region, Region::Advisory);
        assert_eq!(label, "Are you closer to Nottingham Castle than us? (farther)");
    }
}
