use std::sync::Arc;

use airport_directory::AirportDirectory;
use engine::TripCalculator;
use itinerary_core::{Airport, AirportCode, Coordinates, FlightLeg, Itinerary, LegEndpoint};
use serde_json::json;
use timezone_client::{ApiClientConfig, TimezoneClient};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestHelper {
    pub mock_server: MockServer,
    pub directory: Arc<AirportDirectory>,
    pub calculator: TripCalculator,
}

pub async fn helper(airports: Vec<Airport>) -> TestHelper {
    let mock_server = MockServer::start().await;
    let directory = Arc::new(AirportDirectory::from_airports(airports));
    let calculator = calculator_for(&mock_server, directory.clone());

    TestHelper {
        mock_server,
        directory,
        calculator,
    }
}

pub fn calculator_for(
    mock_server: &MockServer,
    directory: Arc<AirportDirectory>,
) -> TripCalculator {
    let client = TimezoneClient::new(ApiClientConfig {
        url: mock_server.uri(),
        key: "test-key".into(),
    })
    .unwrap();

    TripCalculator::new(directory, Arc::new(client))
}

pub fn airport(code: &str, name: &str, latitude: f64, longitude: f64) -> Airport {
    Airport {
        name: name.into(),
        city: "Test City".into(),
        country: "Test Country".into(),
        code: Some(AirportCode::new(code)),
        coordinates: Coordinates {
            latitude,
            longitude,
        },
    }
}

pub fn alpha() -> Airport {
    airport("AAA", "Alpha Airport", 10.0, 20.0)
}

pub fn bravo() -> Airport {
    airport("BBB", "Bravo Airport", 30.0, 40.0)
}

pub fn charlie() -> Airport {
    airport("CCC", "Charlie Airport", -50.0, 60.5)
}

pub fn leg(departure: (&str, &str, &str), arrival: (&str, &str, &str)) -> FlightLeg {
    FlightLeg {
        departure: endpoint(departure),
        arrival: endpoint(arrival),
    }
}

fn endpoint((airport, date, time): (&str, &str, &str)) -> LegEndpoint {
    LegEndpoint {
        airport: airport.into(),
        date: date.parse().unwrap(),
        time: time.parse().unwrap(),
    }
}

pub fn itinerary(legs: Vec<FlightLeg>) -> Itinerary {
    Itinerary::new(legs).unwrap()
}

/// Mounts an offset response for one airport, matched by its `location`
/// query parameter.
pub async fn mock_offset(
    mock_server: &MockServer,
    airport: &Airport,
    raw_seconds: i64,
    dst_seconds: i64,
) {
    Mock::given(method("GET"))
        .and(query_param(
            "location",
            airport.coordinates.location_param(),
        ))
        .respond_with(offset_response(raw_seconds, dst_seconds))
        .mount(mock_server)
        .await;
}

pub fn offset_response(raw_seconds: i64, dst_seconds: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "rawOffset": raw_seconds.to_string(),
        "dstOffset": dst_seconds.to_string(),
    }))
}

/// Answers every lookup with a zero offset.
pub async fn mock_zero_offsets(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(offset_response(0, 0))
        .mount(mock_server)
        .await;
}
