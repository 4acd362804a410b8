use serde::{Deserialize, Serialize};

pub const METERS_PER_MILE: f64 = 1609.34;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Meters(pub f64);

impl Meters {
    pub fn new(meters: f64) -> Self {
        Meters(meters)
    }

    pub fn from_miles(miles: f64) -> Self {
        Meters(miles * METERS_PER_MILE)
    }

    pub fn from_kilometers(km: f64) -> Self {
        Meters(km * 1000.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn as_miles(self) -> f64 {
        self.0 / METERS_PER_MILE
    }
}

/// Latitude/longitude in decimal degrees, the coordinate form the render
/// surface speaks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    pub fn to_point(self) -> geo::Point {
        geo::Point::new(self.lng, self.lat)
    }
}

impl From<geo::Point> for LatLng {
    fn from(point: geo::Point) -> Self {
        LatLng {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

/// Which coordinate a directional question splits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitAxis {
    Latitude,
    Longitude,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalSide {
    North,
    South,
    East,
    West,
}

impl CardinalSide {
    pub fn axis(self) -> SplitAxis {
        match self {
            CardinalSide::North | CardinalSide::South => SplitAxis::Latitude,
            CardinalSide::East | CardinalSide::West => SplitAxis::Longitude,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalSide::North => CardinalSide::South,
            CardinalSide::South => CardinalSide::North,
            CardinalSide::East => CardinalSide::West,
            CardinalSide::West => CardinalSide::East,
        }
    }
}
