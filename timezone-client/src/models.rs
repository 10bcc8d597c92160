use itinerary_core::{OffsetHours, ResolveError, resolve_error::InvalidOffsetSnafu};
use serde::Deserialize;

/// The service's response body. Both offsets arrive as numeric strings in
/// seconds; anything non-numeric is a lookup failure, never a sentinel.
#[derive(Debug, Deserialize)]
pub struct TimezoneResponse {
    #[serde(rename = "rawOffset")]
    pub raw_offset: String,
    #[serde(rename = "dstOffset")]
    pub dst_offset: String,
}

impl TimezoneResponse {
    pub fn total_offset_hours(&self) -> Result<OffsetHours, ResolveError> {
        let raw = parse_offset_seconds("rawOffset", &self.raw_offset)?;
        let dst = parse_offset_seconds("dstOffset", &self.dst_offset)?;

        Ok(OffsetHours::from_offset_seconds(raw, dst))
    }
}

fn parse_offset_seconds(field: &'static str, value: &str) -> Result<f64, ResolveError> {
    value.parse().ok().ok_or_else(|| {
        InvalidOffsetSnafu {
            field,
            value: value.to_owned(),
        }
        .build()
    })
}
