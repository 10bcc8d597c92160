use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{Error, OffsetHours, error::error::EmptyItinerarySnafu};

/// One side of a flight leg as the user entered it: an airport identifier
/// string plus the local civil date and time at that airport. The identifier
/// is resolved against the directory during aggregation so that an
/// unrecognized airport can degrade the calculation instead of failing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegEndpoint {
    pub airport: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl LegEndpoint {
    pub fn local_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Hours since local midnight as a decimal number.
    pub fn decimal_hours(&self) -> f64 {
        self.time.hour() as f64 + self.time.minute() as f64 / 60.0
    }

    /// The timestamp handed to the offset resolver: the local datetime's
    /// epoch seconds read as if it were UTC. The service only uses it to
    /// select which timezone rules applied at that instant.
    pub fn resolver_timestamp(&self) -> i64 {
        self.local_datetime().and_utc().timestamp()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightLeg {
    pub departure: LegEndpoint,
    pub arrival: LegEndpoint,
}

impl FlightLeg {
    /// Calendar days between departure and arrival date. Zero or negative
    /// values are legitimate input; timezone crossing can put the arrival
    /// wall-clock on an earlier day.
    pub fn days_passed(&self) -> i64 {
        (self.arrival.date - self.departure.date).num_days()
    }

    /// The leg's flight duration in hours, in a timezone-independent frame:
    /// both endpoints' clock readings are shifted to what they would read at
    /// UTC+0 and the calendar-day delta supplies the 24-hour multiples.
    ///
    /// A `None` offset means that side's airport was not matched in the
    /// directory; its local reading is used unadjusted. The result may be
    /// negative, which the aggregator surfaces as an implausible-input tag
    /// rather than rejecting here.
    pub fn flight_hours(
        &self,
        departure_offset: Option<OffsetHours>,
        arrival_offset: Option<OffsetHours>,
    ) -> f64 {
        let departure_utc =
            self.departure.decimal_hours() - departure_offset.map_or(0.0, |o| o.into_inner());
        let arrival_utc =
            self.arrival.decimal_hours() - arrival_offset.map_or(0.0, |o| o.into_inner());

        arrival_utc - departure_utc + 24.0 * self.days_passed() as f64
    }
}

/// An ordered sequence of at least one flight leg. Leg *i*'s arrival
/// connects to leg *i + 1*'s departure for layover accounting; airport
/// contiguity between them is deliberately not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary(Vec<FlightLeg>);

impl Itinerary {
    pub fn new(legs: Vec<FlightLeg>) -> Result<Self, Error> {
        if legs.is_empty() {
            EmptyItinerarySnafu.fail()
        } else {
            Ok(Self(legs))
        }
    }

    pub fn legs(&self) -> &[FlightLeg] {
        &self.0
    }

    pub fn num_legs(&self) -> usize {
        self.0.len()
    }
}
