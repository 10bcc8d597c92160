use snafu::{Location, Snafu};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Offset lookup failed for airport '{airport}'"))]
    Lookup {
        #[snafu(implicit)]
        location: Location,
        airport: String,
        #[snafu(source)]
        error: itinerary_core::ResolveError,
    },
    #[snafu(display(
        "Timed out awaiting offsets for leg '{departure}' to '{arrival}'"
    ))]
    Timeout {
        #[snafu(implicit)]
        location: Location,
        departure: String,
        arrival: String,
    },
    #[snafu(display("An offset resolver task terminated abnormally"))]
    Join {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: tokio::task::JoinError,
    },
    #[snafu(display("Invalid itinerary"))]
    Itinerary {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: itinerary_core::Error,
    },
    #[snafu(display("Failed to load the airport directory"))]
    Directory {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: airport_directory::Error,
    },
    #[snafu(display("Failed to construct the timezone client"))]
    BuildResolver {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: itinerary_core::ResolveError,
    },
    #[snafu(display("Failed to read the itinerary file '{path}'"))]
    ItineraryFile {
        #[snafu(implicit)]
        location: Location,
        path: String,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to parse the itinerary file '{path}'"))]
    ItineraryFormat {
        #[snafu(implicit)]
        location: Location,
        path: String,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("The calculation terminated without delivering a result"))]
    ResultChannelClosed {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: tokio::sync::oneshot::error::RecvError,
    },
}
