use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Renders the `lat,lon` pair the timezone service expects as its
    /// `location` query parameter.
    pub fn location_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AirportCode(String);

impl AirportCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for AirportCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single airport entry from the directory. Immutable once loaded;
/// per-calculation offset state lives in the calculation run, never here.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub name: String,
    pub city: String,
    pub country: String,
    pub code: Option<AirportCode>,
    pub coordinates: Coordinates,
}

impl Airport {
    /// The identifier the directory keys lookups by, and the text the
    /// suggestion UI writes back into its input field.
    pub fn display_label(&self) -> String {
        match &self.code {
            Some(code) => format!("{code} \u{2014} {}", self.name),
            None => self.name.clone(),
        }
    }
}
