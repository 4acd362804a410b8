//! Derived facts about where the hider can be, and the append-only set the
//! round accumulates them in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hide_and_seek::catalog::{Answer, QuestionKind};
use crate::hide_and_seek::question::Anchors;
use crate::hide_and_seek::state::GameConfig;
use crate::shape::types::{CardinalSide, LatLng, Meters, SplitAxis};
use crate::shape::{ShapeCategory, ShapeGeometry, ShapeRecord};
use crate::spatial;

/// The geometric/logical fact a resolved question pins down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "region", rename_all = "snake_case")]
pub enum Region {
    /// Hider is outside the disk (radar miss).
    DiskExclusion { center: LatLng, radius: Meters },
    /// Hider is inside the disk (radar hit); rendering shades the complement.
    DiskInclusion { center: LatLng, radius: Meters },
    /// Hider is on `side` of the anchor's split line.
    HalfPlane {
        anchor: LatLng,
        axis: SplitAxis,
        side: CardinalSide,
    },
    /// Kept for the history panel; constrains nothing.
    Advisory,
}

impl Region {
    /// Whether a candidate hider location is consistent with this fact.
    /// Boundary points count as consistent.
    pub fn permits(&self, point: LatLng) -> bool {
        match self {
            Region::DiskExclusion { center, radius } => {
                spatial::haversine_distance(point.to_point(), center.to_point()) > radius.get()
            }
            Region::DiskInclusion { center, radius } => {
                spatial::haversine_distance(point.to_point(), center.to_point()) <= radius.get()
            }
            Region::HalfPlane { anchor, side, .. } => match side {
                CardinalSide::North => point.lat >= anchor.lat,
                CardinalSide::South => point.lat <= anchor.lat,
                CardinalSide::East => point.lng >= anchor.lng,
                CardinalSide::West => point.lng <= anchor.lng,
            },
            Region::Advisory => true,
        }
    }
}

/// One resolved question. Never mutated after it enters the set; the answer
/// is final before a `Constraint` exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Constraint {
    pub kind: QuestionKind,
    pub anchors: Anchors,
    /// Raw detail text as entered (distance, landmark, prompt).
    pub detail: String,
    pub answer: Answer,
    pub region: Region,
    /// Full question phrasing plus answer, for popups and the history panel.
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl Constraint {
    pub fn permits(&self, point: LatLng) -> bool {
        self.region.permits(point)
    }

    /// Renderable records for this fact. Re-derivable at any time, which is
    /// what lets the set redraw after a shape clear.
    pub fn render_shapes(&self, config: &GameConfig) -> Vec<ShapeRecord> {
        match self.region {
            Region::DiskExclusion { center, radius } => vec![ShapeRecord::new(
                ShapeGeometry::Disk { center, radius },
                ShapeCategory::Excluded,
                self.label.clone(),
            )],

            Region::DiskInclusion { center, radius } => vec![
                // everything beyond the boundary is shaded out
                ShapeRecord::new(
                    ShapeGeometry::Annulus {
                        center,
                        inner: radius,
                        outer: config.outer_bound,
                    },
                    ShapeCategory::Excluded,
                    self.label.clone(),
                ),
                ShapeRecord::new(
                    ShapeGeometry::CircleOutline { center, radius },
                    ShapeCategory::Boundary,
                    self.label.clone(),
                ),
            ],

            Region::HalfPlane { anchor, axis, side } => vec![ShapeRecord::new(
                ShapeGeometry::HalfPlane {
                    anchor,
                    axis,
                    shaded: side.opposite(),
                },
                ShapeCategory::Excluded,
                self.label.clone(),
            )],

            Region::Advisory => self.advisory_shapes(),
        }
    }

    fn advisory_shapes(&self) -> Vec<ShapeRecord> {
        if let (QuestionKind::Thermometer, Some((start, end))) = (self.kind, self.anchors.pair()) {
            let tone = match self.answer {
                Answer::Closer => ShapeCategory::Warmer,
                _ => ShapeCategory::Colder,
            };
            return vec![
                ShapeRecord::new(
                    ShapeGeometry::Marker { at: end.latlng() },
                    tone,
                    self.label.clone(),
                ),
                ShapeRecord::new(
                    ShapeGeometry::Segment {
                        from: start.latlng(),
                        to: end.latlng(),
                        dashed: true,
                    },
                    ShapeCategory::Info,
                    self.label.clone(),
                ),
            ];
        }

        // every other advisory gets a marker where it was asked from
        vec![ShapeRecord::new(
            ShapeGeometry::Marker {
                at: self.anchors.primary().latlng(),
            },
            ShapeCategory::Info,
            self.label.clone(),
        )]
    }
}

/// Append-only log of resolved questions plus the renderable working set
/// derived from them. Clearing shapes and clearing the log are independent.
#[derive(Clone, Debug, Default)]
pub struct ConstraintSet {
    log: Vec<Constraint>,
    shapes: Vec<ShapeRecord>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        ConstraintSet::default()
    }

    /// Append the fact and materialize its shapes for the renderer.
    pub fn append(&mut self, constraint: Constraint, config: &GameConfig) {
        self.shapes.extend(constraint.render_shapes(config));
        self.log.push(constraint);
    }

    /// Insertion order.
    pub fn all(&self) -> &[Constraint] {
        &self.log
    }

    /// Most recent first, for the history panel.
    pub fn history(&self) -> impl Iterator<Item = &Constraint> {
        self.log.iter().rev()
    }

    pub fn shapes(&self) -> &[ShapeRecord] {
        &self.shapes
    }

    /// Drop rendered geometry, keep the question log.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    pub fn clear_all(&mut self) {
        self.shapes.clear();
        self.log.clear();
    }

    /// Rebuild the renderable set from the log, e.g. after a shape clear.
    pub fn redraw(&mut self, config: &GameConfig) {
        self.shapes = self
            .log
            .iter()
            .flat_map(|constraint| constraint.render_shapes(config))
            .collect();
    }

    /// Whether `point` is consistent with every constraint so far.
    pub fn permits(&self, point: LatLng) -> bool {
        self.log.iter().all(|constraint| constraint.permits(point))
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use approx::assert_relative_eq;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn radar_miss(radius_miles: f64) -> Constraint {
        Constraint {
            kind: QuestionKind::Radar,
            anchors: Anchors::Single(Position::new(52.95, -1.16)),
            detail: format!("{radius_miles} mi"),
            answer: Answer::No,
            region: Region::DiskExclusion {
                center: LatLng::new(52.95, -1.16),
                radius: Meters::from_miles(radius_miles),
            },
            label: format!("Are you within {radius_miles} mi of us? (no)"),
            created_at: Utc::now(),
        }
    }

    fn matching_south() -> Constraint {
        Constraint {
            kind: QuestionKind::Matching,
            anchors: Anchors::Single(Position::new(52.95, -1.16)),
            detail: "Are you north or south of us?".into(),
            answer: Answer::South,
            region: Region::HalfPlane {
                anchor: LatLng::new(52.95, -1.16),
                axis: SplitAxis::Latitude,
                side: CardinalSide::South,
            },
            label: "Are you north or south of us? (south)".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_radar_hit_renders_annulus_and_outline() {
        let constraint = Constraint {
            kind: QuestionKind::Radar,
            anchors: Anchors::Single(Position::new(52.95, -1.16)),
            detail: "5 mi".into(),
            answer: Answer::Yes,
            region: Region::DiskInclusion {
                center: LatLng::new(52.95, -1.16),
                radius: Meters::from_miles(5.0),
            },
            label: "Are you within 5 mi of us? (yes)".into(),
            created_at: Utc::now(),
        };

        let shapes = constraint.render_shapes(&config());
        assert_eq!(shapes.len(), 2);

        let ShapeGeometry::Annulus { inner, outer, .. } = shapes[0].geometry else {
            panic!("expected an annulus first");
        };
        assert_relative_eq!(inner.get(), 5.0 * 1609.34);
        assert_relative_eq!(outer.get(), 50_000.0);
        assert_eq!(shapes[0].category, ShapeCategory::Excluded);

        let ShapeGeometry::CircleOutline { radius, .. } = shapes[1].geometry else {
            panic!("expected the boundary outline second");
        };
        assert_relative_eq!(radius.get(), 5.0 * 1609.34);
        assert_eq!(shapes[1].category, ShapeCategory::Boundary);
    }

    #[test]
    fn test_half_plane_shades_the_far_side() {
        let shapes = matching_south().render_shapes(&config());
        assert_eq!(shapes.len(), 1);
        assert_eq!(
            shapes[0].geometry,
            ShapeGeometry::HalfPlane {
                anchor: LatLng::new(52.95, -1.16),
                axis: SplitAxis::Latitude,
                shaded: CardinalSide::North,
            }
        );
    }

    #[test]
    fn test_thermometer_renders_marker_and_dashed_segment() {
        let start = Position::new(52.95, -1.16);
        let end = Position::new(52.96, -1.15);
        let constraint = Constraint {
            kind: QuestionKind::Thermometer,
            anchors: Anchors::Pair { start, end },
            detail: String::new(),
            answer: Answer::Closer,
            region: Region::Advisory,
            label: "We just moved. Are we warmer or colder? (warmer)".into(),
            created_at: Utc::now(),
        };

        let shapes = constraint.render_shapes(&config());
        assert_eq!(shapes.len(), 2);
        assert_eq!(
            shapes[0].geometry,
            ShapeGeometry::Marker { at: end.latlng() }
        );
        assert_eq!(shapes[0].category, ShapeCategory::Warmer);
        assert_eq!(
            shapes[1].geometry,
            ShapeGeometry::Segment {
                from: start.latlng(),
                to: end.latlng(),
                dashed: true,
            }
        );
    }

    #[test]
    fn test_set_intersects_constraints() {
        let mut set = ConstraintSet::new();
        set.append(radar_miss(1.0), &config());
        set.append(matching_south(), &config());

        // south of the anchor and out of the excluded disk
        assert!(set.permits(LatLng::new(52.90, -1.16)));
        // south but inside the disk
        assert!(!set.permits(LatLng::new(52.945, -1.16)));
        // outside the disk but north
        assert!(!set.permits(LatLng::new(53.05, -1.16)));
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut set = ConstraintSet::new();
        set.append(radar_miss(1.0), &config());
        set.append(matching_south(), &config());

        let kinds: Vec<_> = set.history().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![QuestionKind::Matching, QuestionKind::Radar]);
        assert_eq!(set.all()[0].kind, QuestionKind::Radar);
    }

    #[test]
    fn test_clear_shapes_keeps_log_and_is_idempotent() {
        let mut set = ConstraintSet::new();
        set.append(radar_miss(1.0), &config());
        assert_eq!(set.shapes().len(), 1);

        set.clear_shapes();
        assert!(set.shapes().is_empty());
        assert_eq!(set.len(), 1);

        // second clear is a no-op
        set.clear_shapes();
        assert!(set.shapes().is_empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_redraw_rebuilds_from_log() {
        let mut set = ConstraintSet::new();
        set.append(radar_miss(1.0), &config());
        set.append(matching_south(), &config());
        let before = set.shapes().to_vec();

        set.clear_shapes();
        set.redraw(&config());
        assert_eq!(set.shapes(), &before[..]);
    }

    #[test]
    fn test_clear_all_empties_both() {
        let mut set = ConstraintSet::new();
        set.append(radar_miss(1.0), &config());
        set.clear_all();
        assert!(set.is_empty());
        assert!(set.shapes().is_empty());
        set.clear_all();
        assert!(set.is_empty());
    }
}
