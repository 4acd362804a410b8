//! Pure geographic math: haversine distances, bearings, ring sampling and
//! distance-text parsing.
//!
//! Everything here is stateless; the constraint engine and the GeoJSON
//! emitter are the only consumers.

use geo::{Bearing, Destination, Distance, Haversine, Point};

use crate::shape::types::{METERS_PER_MILE, Meters};

/// Haversine distance between two points in meters.
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    Haversine.distance(p1, p2)
}

/// Initial bearing from `from` to `to` in degrees clockwise from north.
pub fn initial_bearing(from: Point, to: Point) -> f64 {
    Haversine.bearing(from, to)
}

/// Point reached by travelling `distance` from `origin` along `bearing_deg`.
pub fn destination(origin: Point, bearing_deg: f64, distance: Meters) -> Point {
    Haversine.destination(origin, bearing_deg, distance.get())
}

/// Closed ring of `samples` evenly spaced points around `center`.
pub fn circle_ring(center: Point, radius: Meters, samples: usize) -> geo::LineString {
    let mut coords = Vec::with_capacity(samples + 1);
    for i in 0..samples {
        let bearing = i as f64 * 360.0 / samples as f64;
        let p = destination(center, bearing, radius);
        coords.push(geo::coord! { x: p.x(), y: p.y() });
    }
    coords.push(coords[0]);
    geo::LineString::new(coords)
}

pub fn disk_polygon(center: Point, radius: Meters, samples: usize) -> geo::Polygon {
    geo::Polygon::new(circle_ring(center, radius, samples), vec![])
}

/// Filled ring between `inner` and `outer`, both sampled at the same density
/// so the rendered shape reads as one annulus.
pub fn annulus_polygon(center: Point, inner: Meters, outer: Meters, samples: usize) -> geo::Polygon {
    // interior ring wound opposite the exterior
    let mut hole = circle_ring(center, inner, samples);
    hole.0.reverse();
    geo::Polygon::new(circle_ring(center, outer, samples), vec![hole])
}

/// Meters per degree at the equator, good enough for screen-extent boxes.
pub fn degrees_to_meters_approx(degrees: f64) -> f64 {
    degrees * 111_320.0
}

pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / 111_320.0
}

/// Parse a seeker-entered distance like "3 mi", "500m" or "2 km" into meters.
///
/// Unrecognized input falls back to exactly one mile. That fallback is
/// load-bearing: it fixes the radius a malformed radar question resolves to,
/// so do not change it without changing what players are told.
pub fn parse_distance(text: &str) -> Meters {
    parse_distance_strict(text).unwrap_or(Meters(METERS_PER_MILE))
}

fn parse_distance_strict(text: &str) -> Option<Meters> {
    let text = text.trim().to_ascii_lowercase();
    // the preset distance list uses vulgar fractions
    let text = text.replace('\u{00bd}', "0.5").replace('\u{00bc}', "0.25");

    let (number, scale) = if let Some(v) = text.strip_suffix("mi") {
        (v, METERS_PER_MILE)
    } else if let Some(v) = text.strip_suffix("km") {
        (v, 1000.0)
    } else if let Some(v) = text.strip_suffix('m') {
        (v, 1.0)
    } else {
        (text.as_str(), 1.0)
    };

    let value: f64 = number.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then(|| Meters(value * scale))
}
