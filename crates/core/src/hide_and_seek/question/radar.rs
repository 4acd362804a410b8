use crate::hide_and_seek::catalog::Answer;
use crate::hide_and_seek::constraint::Region;
use crate::position::Position;
use crate::spatial;

/// "Are you within {distance} of us?"
pub struct RadarQuestion {
    pub center: Position,
    /// Raw seeker-entered text; parsed (with the one-mile fallback) at
    /// derivation time so the constraint records exactly what was asked.
    pub distance_text: String,
}

impl RadarQuestion {
    pub fn derive(&self, answer: Answer) -> (Region, String) {
        let radius = spatial::parse_distance(&self.distance_text);
        let center = self.center.latlng();

        let (region, word) = match answer {
            Answer::No => (Region::DiskExclusion { center, radius }, "no"),
            _ => (Region::DiskInclusion { center, radius }, "yes"),
        };

        let label = format!("Are you within {} of us? ({word})", self.distance_text);
        (region, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::types::Meters;
    use approx::assert_relative_eq;

    fn nottingham() -> Position {
        Position::new(52.95, -1.16)
    }

    #[test]
    fn test_miss_excludes_the_disk() {
        let question = RadarQuestion {
            center: nottingham(),
            distance_text: "1 mi".into(),
        };
        let (region, label) = question.derive(Answer::No);

        let Region::DiskExclusion { center, radius } = region else {
            panic!("expected a disk exclusion, got {region:?}");
        };
        assert_relative_eq!(radius.get(), 1609.34);
        assert_eq!(center, nottingham().latlng());
        assert_eq!(label, "Are you within 1 mi of us? (no)");

        // two miles out stays consistent, half a mile out does not
        let far = spatial::destination(nottingham().point(), 90.0, Meters::from_miles(2.0));
        let near = spatial::destination(nottingham().point(), 90.0, Meters::from_miles(0.5));
        assert!(region.permits(far.into()));
        assert!(!region.permits(near.into()));
    }

    #[test]
    fn test_hit_boundary_radius_is_exact() {
        let question = RadarQuestion {
            center: nottingham(),
            distance_text: "5 mi".into(),
        };
        let (region, _) = question.derive(Answer::Yes);

        let Region::DiskInclusion { radius, .. } = region else {
            panic!("expected a disk inclusion, got {region:?}");
        };
        assert_relative_eq!(radius.get(), 5.0 * 1609.34);

        let inside = spatial::destination(nottingham().point(), 10.0, Meters::from_miles(3.0));
        let outside = spatial::destination(nottingham().point(), 10.0, Meters::from_miles(8.0));
        assert!(region.permits(inside.into()));
        assert!(!region.permits(outside.into()));
    }

    #[test]
    fn test_unparsable_distance_falls_back_to_one_mile() {
        let question = RadarQuestion {
            center: nottingham(),
            distance_text: "about a furlong".into(),
        };
        let (region, _) = question.derive(Answer::No);

        let Region::DiskExclusion { radius, .. } = region else {
            panic!("expected a disk exclusion");
        };
        assert_relative_eq!(radius.get(), 1609.34);
    }
}
