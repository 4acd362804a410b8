//! Position samples and the provider seam.
//!
//! The engine never talks to platform geolocation directly; a host app
//! implements [`PositionProvider`] and forwards each sample (or error) into
//! the game. Provider failure is a persistent degraded status, not a fatal
//! one: questions can still be anchored against a map-clicked point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shape::types::LatLng;

/// One GPS fix. Immutable once recorded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
    /// Accuracy radius in meters, when the platform reports one.
    pub accuracy: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Position {
            lat,
            lng,
            accuracy: None,
            timestamp: None,
        }
    }

    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn latlng(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.lng, self.lat)
    }
}

/// Options forwarded to the platform watch call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    pub maximum_age_ms: u32,
    pub timeout_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        WatchOptions {
            high_accuracy: true,
            maximum_age_ms: 1000,
            timeout_ms: 10_000,
        }
    }
}

/// Handle to an in-flight platform watch. `clear` consumes the handle, so a
/// watch can only ever be released once.
pub trait PositionWatch {
    fn clear(self: Box<Self>);
}

pub trait PositionProvider {
    fn watch(&mut self, options: WatchOptions) -> Result<Box<dyn PositionWatch>, String>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ProviderStatus {
    #[default]
    Idle,
    Active {
        accuracy: Option<f64>,
    },
    /// Degraded, not fatal: manual anchoring stays available.
    Unavailable {
        message: String,
    },
}

/// Owns the watch handle and the last known fix. At most one watch is in
/// flight per session.
#[derive(Default)]
pub struct PositionTracker {
    watch: Option<Box<dyn PositionWatch>>,
    last_known: Option<Position>,
    status: ProviderStatus,
}

impl PositionTracker {
    pub fn new() -> Self {
        PositionTracker::default()
    }

    pub fn start(&mut self, provider: &mut dyn PositionProvider, options: WatchOptions) {
        if self.watch.is_some() {
            return;
        }
        match provider.watch(options) {
            Ok(handle) => {
                tracing::info!("starting position watch");
                self.watch = Some(handle);
            }
            Err(message) => {
                tracing::warn!(%message, "position provider unavailable");
                self.status = ProviderStatus::Unavailable { message };
            }
        }
    }

    /// Feed one sample or error from the provider.
    pub fn handle_sample(&mut self, sample: Result<Position, String>) {
        match sample {
            Ok(position) => {
                self.status = ProviderStatus::Active {
                    accuracy: position.accuracy,
                };
                self.last_known = Some(position);
            }
            Err(message) => {
                // keep the last fix; callers may still anchor against it
                tracing::warn!(%message, "position sample failed");
                self.status = ProviderStatus::Unavailable { message };
            }
        }
    }

    /// Stop sampling. `Option::take` guarantees the underlying handle is
    /// released exactly once no matter how often this is called.
    pub fn stop(&mut self) {
        if let Some(handle) = self.watch.take() {
            tracing::info!("stopping position watch");
            handle.clear();
        }
    }

    pub fn watching(&self) -> bool {
        self.watch.is_some()
    }

    pub fn last_known(&self) -> Option<&Position> {
        self.last_known.as_ref()
    }

    pub fn status(&self) -> &ProviderStatus {
        &self.status
    }
}
