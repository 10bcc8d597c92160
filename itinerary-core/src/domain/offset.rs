use serde::{Deserialize, Serialize};

/// A resolved UTC offset in hours for one airport at one instant, daylight
/// saving included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetHours(f64);

impl OffsetHours {
    pub fn new(hours: f64) -> Self {
        Self(hours)
    }

    /// Combines the service's raw and DST offsets, both in seconds.
    pub fn from_offset_seconds(raw: f64, dst: f64) -> Self {
        Self((raw + dst) / 3600.0)
    }

    pub fn into_inner(self) -> f64 {
        self.0
    }
}

/// Identity of a single resolver call. The same airport appearing at two
/// instants in an itinerary yields two keys; its offset may differ across a
/// DST transition between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OffsetKey {
    pub airport: String,
    pub timestamp: i64,
}
