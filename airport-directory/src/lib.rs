#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Read-only lookup table over an OpenFlights-style airport data file,
//! keyed by each airport's display label.

mod directory;
pub mod error;

pub use directory::*;
pub use error::*;
