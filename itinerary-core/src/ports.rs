use async_trait::async_trait;

use crate::{Coordinates, OffsetHours, ResolveError};

/// The external timezone lookup: maps an airport's coordinates and an epoch
/// timestamp to the UTC offset (DST included) in effect at that instant.
/// Implementations must not mutate shared state; each call stands alone.
#[async_trait]
pub trait OffsetResolver: Send + Sync {
    async fn resolve(
        &self,
        coordinates: Coordinates,
        timestamp: i64,
    ) -> Result<OffsetHours, ResolveError>;
}

/// Receives discrete progress ticks during aggregation. Delivery is
/// best-effort; implementations must tolerate the consumer having gone away
/// and must never block the calculation.
pub trait ProgressSink: Send + Sync {
    fn report(&self, tick: u32);
}
