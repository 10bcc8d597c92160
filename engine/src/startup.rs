use std::path::Path;
use std::sync::Arc;

use airport_directory::AirportDirectory;
use itinerary_core::{FlightLeg, Itinerary, TripSummary};
use snafu::ResultExt;
use timezone_client::TimezoneClient;
use tracing::{info, warn};

use crate::error::error::{
    BuildResolverSnafu, DirectorySnafu, ItineraryFileSnafu, ItineraryFormatSnafu, ItinerarySnafu,
    ResultChannelClosedSnafu,
};
use crate::{Result, Settings, TripCalculator};

pub struct App {
    calculator: TripCalculator,
    itinerary_path: std::path::PathBuf,
}

impl App {
    pub fn build(settings: &Settings) -> Result<App> {
        let directory =
            AirportDirectory::from_file(&settings.airports_path).context(DirectorySnafu)?;
        info!("loaded {} airports", directory.len());

        let resolver =
            TimezoneClient::new(settings.timezone_api.clone()).context(BuildResolverSnafu)?;

        let calculator = TripCalculator::new(Arc::new(directory), Arc::new(resolver))
            .with_leg_timeout(settings.leg_timeout);

        Ok(App {
            calculator,
            itinerary_path: settings.itinerary_path.clone(),
        })
    }

    pub async fn run(self) -> Result<()> {
        let itinerary = read_itinerary(&self.itinerary_path)?;

        let mut handle = self.calculator.spawn(itinerary);
        while let Some(tick) = handle.progress.recv().await {
            tracing::debug!("calculation progress: {tick}");
        }

        let summary = handle.result.await.context(ResultChannelClosedSnafu)??;
        render_summary(&summary);

        Ok(())
    }
}

fn read_itinerary(path: &Path) -> Result<Itinerary> {
    let path_display = path.display().to_string();
    let contents = std::fs::read_to_string(path).context(ItineraryFileSnafu {
        path: path_display.clone(),
    })?;

    let legs: Vec<FlightLeg> = serde_json::from_str(&contents).context(ItineraryFormatSnafu {
        path: path_display,
    })?;

    Itinerary::new(legs).context(ItinerarySnafu)
}

fn render_summary(summary: &TripSummary) {
    info!(
        "calculation finished, flight: {}, layover: {}",
        summary.flight_hours, summary.layover_hours
    );

    println!("Flight time:  {}", format_hours_minutes(summary.flight_hours));
    println!("Layover time: {}", format_hours_minutes(summary.layover_hours));
    println!("Trip time:    {}", format_hours_minutes(summary.trip_hours()));

    if summary.is_implausible() {
        warn!("negative flight total, check the itinerary's dates and times");
    }
    for airport in &summary.unresolved_airports {
        warn!("airport '{airport}' was not matched, its times were used unadjusted");
    }
}

fn format_hours_minutes(hours: f64) -> String {
    let whole_hours = hours.trunc() as i64;
    let minutes = ((hours - hours.trunc()) * 60.0).round() as i64;
    format!("{whole_hours}h {minutes}min")
}
