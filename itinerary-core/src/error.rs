use snafu::{Location, Snafu};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("An itinerary must contain at least one leg"))]
    EmptyItinerary {
        #[snafu(implicit)]
        location: Location,
    },
}

/// Failures of the offset resolver port.
///
/// Variants carry plain data rather than transport-library error types so
/// that resolver implementations stay swappable behind the port.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ResolveError {
    #[snafu(display("Timezone lookup transport error: {message}"))]
    Transport {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
    #[snafu(display(
        "Timezone lookup failed, status: '{status}', url: '{url}', body: '{body}'"
    ))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: u16,
        body: String,
    },
    #[snafu(display("Timezone lookup returned a non-numeric '{field}' field: '{value}'"))]
    InvalidOffset {
        #[snafu(implicit)]
        location: Location,
        field: &'static str,
        value: String,
    },
}
