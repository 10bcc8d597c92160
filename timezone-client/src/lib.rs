#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! HTTP adapter for the timezone-by-coordinates lookup service, implementing
//! the [`OffsetResolver`](itinerary_core::OffsetResolver) port.

mod client;
mod models;

pub use client::*;
pub use models::*;
