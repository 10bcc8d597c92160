/// The outcome of a successful calculation run. Input-shape problems ride
/// along here instead of failing the run: a negative flight total marks the
/// summary implausible, and airports the directory could not match are
/// listed so callers can warn about the degraded precision.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    pub flight_hours: f64,
    pub layover_hours: f64,
    pub unresolved_airports: Vec<String>,
}

impl TripSummary {
    pub fn trip_hours(&self) -> f64 {
        self.flight_hours + self.layover_hours
    }

    /// A negative flight total indicates reversed dates or similarly bad
    /// input rather than a calculation fault; the numbers are still exposed.
    pub fn is_implausible(&self) -> bool {
        self.flight_hours < 0.0
    }

    pub fn has_unresolved_airports(&self) -> bool {
        !self.unresolved_airports.is_empty()
    }
}
