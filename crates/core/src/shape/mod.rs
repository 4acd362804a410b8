use serde::{Deserialize, Serialize};

use crate::shape::types::{CardinalSide, LatLng, Meters, SplitAxis};

pub mod geojson;
pub mod types;

/// Color/category hook for the renderer. The renderer owns the palette; we
/// only say what a shape means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeCategory {
    /// Shaded area the hider cannot be in.
    Excluded,
    /// Unfilled boundary circle on the hider side of a radar hit.
    Boundary,
    Warmer,
    Colder,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Disk {
        center: LatLng,
        radius: Meters,
    },
    Annulus {
        center: LatLng,
        inner: Meters,
        outer: Meters,
    },
    CircleOutline {
        center: LatLng,
        radius: Meters,
    },
    HalfPlane {
        anchor: LatLng,
        axis: SplitAxis,
        /// The side that gets shaded, i.e. the side the hider is NOT on.
        shaded: CardinalSide,
    },
    Marker {
        at: LatLng,
    },
    Segment {
        from: LatLng,
        to: LatLng,
        dashed: bool,
    },
}

/// One drawable fact handed to the map surface. Descriptive only; the
/// collaborator owns marker/layer lifecycles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub geometry: ShapeGeometry,
    pub category: ShapeCategory,
    pub label: String,
}

impl ShapeRecord {
    pub fn new(geometry: ShapeGeometry, category: ShapeCategory, label: impl Into<String>) -> Self {
        ShapeRecord {
            geometry,
            category,
            label: label.into(),
        }
    }
}
