use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use itinerary_core::{Airport, AirportCode, Coordinates};
use serde::Deserialize;
use snafu::ResultExt;

use crate::error::{Result, error::IoSnafu};

/// Marks an absent IATA code in the data file.
const MISSING_CODE: &str = "\\N";

/// One row of the data file: `name,city,country,code,latitude,longitude`,
/// with string fields optionally double-quoted.
#[derive(Debug, Deserialize)]
struct AirportRecord {
    name: String,
    city: String,
    country: String,
    code: String,
    latitude: f64,
    longitude: f64,
}

impl From<AirportRecord> for Airport {
    fn from(v: AirportRecord) -> Self {
        let code = match v.code.as_str() {
            "" | MISSING_CODE => None,
            code => Some(AirportCode::new(code)),
        };
        Airport {
            name: v.name,
            city: v.city,
            country: v.country,
            code,
            coordinates: Coordinates {
                latitude: v.latitude,
                longitude: v.longitude,
            },
        }
    }
}

/// The airport lookup table. Loaded once, then shared read-only across any
/// number of concurrent calculations.
#[derive(Debug, Default, Clone)]
pub struct AirportDirectory {
    airports: Vec<Arc<Airport>>,
    by_label: HashMap<String, Arc<Airport>>,
}

impl AirportDirectory {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path).context(IoSnafu)?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::Fields)
            .from_reader(file);

        let mut airports = Vec::new();
        for record in reader.into_deserialize::<AirportRecord>() {
            airports.push(record?.into());
        }

        Ok(Self::from_airports(airports))
    }

    pub fn from_airports(airports: Vec<Airport>) -> Self {
        let airports: Vec<Arc<Airport>> = airports.into_iter().map(Arc::new).collect();
        let by_label = airports
            .iter()
            .map(|a| (a.display_label(), a.clone()))
            .collect();

        Self { airports, by_label }
    }

    pub fn lookup(&self, identifier: &str) -> Option<&Arc<Airport>> {
        self.by_label.get(identifier)
    }

    /// All airports in file order, for suggestion listings.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Airport>> {
        self.airports.iter()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}
