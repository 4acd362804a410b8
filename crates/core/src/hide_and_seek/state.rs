use crate::shape::types::{LatLng, Meters};

/// Per-round tunables. Defaults match the Nottingham ruleset the app
/// shipped with.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    /// Hide-phase countdown in seconds.
    pub hide_time_secs: u32,
    /// Point count for sampled circles and annulus rings.
    pub ring_samples: usize,
    /// Outer bound for unbounded shaded regions (radar-hit complements,
    /// half-plane extents).
    pub outer_bound: Meters,
    /// Most cards a hider can hold.
    pub hand_limit: usize,
    /// Where the map opens before the first fix arrives.
    pub map_center: LatLng,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            hide_time_secs: 60 * 60,
            ring_samples: 64,
            outer_bound: Meters::from_kilometers(50.0),
            hand_limit: 6,
            // Nottingham city centre
            map_center: LatLng::new(52.9548, -1.1581),
        }
    }
}
