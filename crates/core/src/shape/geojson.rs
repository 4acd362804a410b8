//! GeoJSON emission for the map surface.
//!
//! The renderer draws features as-is and never computes geometry itself, so
//! every closed region leaves here as sampled polygon rings.

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, json};

use crate::shape::types::{CardinalSide, LatLng, Meters};
use crate::shape::{ShapeGeometry, ShapeRecord};
use crate::spatial;

/// Convert one shape record into a feature. `samples` is the ring sampling
/// density; `extent` bounds shapes that are unbounded on one side.
pub fn feature(record: &ShapeRecord, samples: usize, extent: Meters) -> Feature {
    let value = match &record.geometry {
        ShapeGeometry::Disk { center, radius } => {
            let polygon = spatial::disk_polygon(center.to_point(), *radius, samples);
            Value::Polygon(vec![ring_positions(polygon.exterior())])
        }

        ShapeGeometry::Annulus {
            center,
            inner,
            outer,
        } => {
            let polygon = spatial::annulus_polygon(center.to_point(), *inner, *outer, samples);
            let mut rings = vec![ring_positions(polygon.exterior())];
            rings.extend(polygon.interiors().iter().map(ring_positions));
            Value::Polygon(rings)
        }

        ShapeGeometry::CircleOutline { center, radius } => Value::LineString(ring_positions(
            &spatial::circle_ring(center.to_point(), *radius, samples),
        )),

        ShapeGeometry::HalfPlane { anchor, shaded, .. } => {
            Value::Polygon(vec![half_plane_ring(*anchor, *shaded, extent)])
        }

        ShapeGeometry::Marker { at } => Value::Point(vec![at.lng, at.lat]),

        ShapeGeometry::Segment { from, to, .. } => Value::LineString(vec![
            vec![from.lng, from.lat],
            vec![to.lng, to.lat],
        ]),
    };

    let mut properties = Map::new();
    properties.insert("category".into(), json!(record.category));
    properties.insert("label".into(), json!(record.label));
    if let ShapeGeometry::Segment { from, to, dashed } = record.geometry {
        properties.insert("dashed".into(), json!(dashed));
        properties.insert(
            "bearing".into(),
            json!(spatial::initial_bearing(from.to_point(), to.to_point())),
        );
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn feature_collection(
    shapes: &[ShapeRecord],
    samples: usize,
    extent: Meters,
) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: shapes
            .iter()
            .map(|record| feature(record, samples, extent))
            .collect(),
        foreign_members: None,
    }
}

fn ring_positions(ring: &geo::LineString) -> Vec<Vec<f64>> {
    ring.0.iter().map(|coord| vec![coord.x, coord.y]).collect()
}

/// Axis-aligned box covering the shaded side out to `extent`. Equator-scale
/// degree approximation is plenty at screen extents.
fn half_plane_ring(anchor: LatLng, shaded: CardinalSide, extent: Meters) -> Vec<Vec<f64>> {
    let d = spatial::meters_to_degrees_approx(extent.get());
    let (min_lat, max_lat, min_lng, max_lng) = match shaded {
        CardinalSide::North => (anchor.lat, (anchor.lat + d).min(90.0), anchor.lng - d, anchor.lng + d),
        CardinalSide::South => ((anchor.lat - d).max(-90.0), anchor.lat, anchor.lng - d, anchor.lng + d),
        CardinalSide::East => (anchor.lat - d, anchor.lat + d, anchor.lng, anchor.lng + d),
        CardinalSide::West => (anchor.lat - d, anchor.lat + d, anchor.lng - d, anchor.lng),
    };

    vec![
        vec![min_lng, min_lat],
        vec![max_lng, min_lat],
        vec![max_lng, max_lat],
        vec![min_lng, max_lat],
        vec![min_lng, min_lat],
    ]
}
