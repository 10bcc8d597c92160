use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use airport_directory::AirportDirectory;
use chrono::NaiveDateTime;
use itinerary_core::{
    Airport, FlightLeg, Itinerary, LegEndpoint, OffsetHours, OffsetKey, OffsetResolver,
    ProgressSink, ResolveError, TripSummary,
};
use snafu::ResultExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::timeout;
use tracing::{instrument, warn};

use crate::error::error::{JoinSnafu, LookupSnafu, TimeoutSnafu};
use crate::{ChannelProgress, Error, Result};

/// Progress steps published per leg; after leg `n` completes, ticks
/// `(n - 1) * STEPS ..= n * STEPS` are emitted, so a full run ends exactly
/// at `num_legs * STEPS`.
const PROGRESS_STEPS: u32 = 10;

/// How long one leg may wait for both of its offsets, cumulatively.
const DEFAULT_LEG_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct TripCalculator {
    directory: Arc<AirportDirectory>,
    resolver: Arc<dyn OffsetResolver>,
    leg_timeout: Duration,
}

/// Caller-side view of a calculation running on a worker task. Ticks arrive
/// on `progress` while the run is live; exactly one result is delivered on
/// `result`. Dropping the handle leaves the task running detached; its
/// state is all run-local, so nothing shared can be affected.
pub struct CalculationHandle {
    pub progress: mpsc::UnboundedReceiver<u32>,
    pub result: oneshot::Receiver<Result<TripSummary>>,
    task: JoinHandle<()>,
}

impl CalculationHandle {
    /// Stops the calculation. No further ticks or result delivery occur.
    pub fn abort(&self) {
        self.task.abort();
    }
}

impl TripCalculator {
    pub fn new(directory: Arc<AirportDirectory>, resolver: Arc<dyn OffsetResolver>) -> Self {
        Self {
            directory,
            resolver,
            leg_timeout: DEFAULT_LEG_TIMEOUT,
        }
    }

    pub fn with_leg_timeout(mut self, leg_timeout: Duration) -> Self {
        self.leg_timeout = leg_timeout;
        self
    }

    /// Runs the calculation off the submitting context. The submitter never
    /// blocks; progress and the result cross back over the handle's
    /// channels.
    pub fn spawn(&self, itinerary: Itinerary) -> CalculationHandle {
        let (progress_sender, progress) = mpsc::unbounded_channel();
        let (result_sender, result) = oneshot::channel();
        let calculator = self.clone();

        let task = tokio::spawn(async move {
            let progress = ChannelProgress::new(progress_sender);
            let summary = calculator.calculate(itinerary, &progress).await;
            // Best effort, the submitter may no longer be listening.
            let _ = result_sender.send(summary);
        });

        CalculationHandle {
            progress,
            result,
            task,
        }
    }

    #[instrument(skip_all, fields(app.num_legs = itinerary.num_legs()))]
    pub async fn calculate(
        &self,
        itinerary: Itinerary,
        progress: &dyn ProgressSink,
    ) -> Result<TripSummary> {
        let mut run = CalculationRun::new(self);
        let result = run.execute(&itinerary, progress).await;
        if result.is_err() {
            run.abort_pending();
        }
        result
    }
}

enum OffsetSlot {
    Pending(JoinHandle<Result<OffsetHours, ResolveError>>),
    Resolved(OffsetHours),
}

/// Offset state for a single calculation, keyed by (airport, timestamp).
/// Nothing is ever written back onto the shared [`Airport`] entries, so
/// concurrent calculations over the same directory cannot observe each
/// other's resolutions.
struct CalculationRun<'a> {
    calculator: &'a TripCalculator,
    offsets: HashMap<OffsetKey, OffsetSlot>,
    abort_handles: Vec<AbortHandle>,
}

impl<'a> CalculationRun<'a> {
    fn new(calculator: &'a TripCalculator) -> Self {
        Self {
            calculator,
            offsets: HashMap::new(),
            abort_handles: Vec::new(),
        }
    }

    async fn execute(
        &mut self,
        itinerary: &Itinerary,
        progress: &dyn ProgressSink,
    ) -> Result<TripSummary> {
        // Start every lookup up front so different legs resolve
        // concurrently; the fold below still consumes them strictly in
        // itinerary order, which the layover accounting depends on.
        for leg in itinerary.legs() {
            self.spawn_lookups(leg);
        }

        let mut flight_hours = 0.0;
        let mut layover_hours = 0.0;
        let mut unresolved_airports: Vec<String> = Vec::new();
        let mut previous_arrival: Option<NaiveDateTime> = None;

        for (index, leg) in itinerary.legs().iter().enumerate() {
            let (departure_offset, arrival_offset) =
                self.leg_offsets(leg, &mut unresolved_airports).await?;

            flight_hours += leg.flight_hours(departure_offset, arrival_offset);

            // Layover is perceived in local wall-clock terms: the previous
            // arrival and this departure are compared as entered, without
            // re-applying offsets.
            if let Some(previous) = previous_arrival {
                let minutes = (leg.departure.local_datetime() - previous).num_minutes();
                layover_hours += minutes as f64 / 60.0;
            }
            previous_arrival = Some(leg.arrival.local_datetime());

            let completed = index as u32 + 1;
            for tick in (completed - 1) * PROGRESS_STEPS..=completed * PROGRESS_STEPS {
                progress.report(tick);
            }
        }

        Ok(TripSummary {
            flight_hours,
            layover_hours,
            unresolved_airports,
        })
    }

    /// Issues this leg's resolver calls. A leg with an unmatched airport on
    /// either side resolves nothing: it will fall back to raw local
    /// readings, so requesting the matched side's offset would be wasted.
    fn spawn_lookups(&mut self, leg: &FlightLeg) {
        let calculator = self.calculator;
        let departure_airport = calculator.directory.lookup(&leg.departure.airport);
        let arrival_airport = calculator.directory.lookup(&leg.arrival.airport);

        if let (Some(departure_airport), Some(arrival_airport)) =
            (departure_airport, arrival_airport)
        {
            for (airport, endpoint) in [
                (departure_airport.clone(), &leg.departure),
                (arrival_airport.clone(), &leg.arrival),
            ] {
                let key = OffsetKey {
                    airport: endpoint.airport.clone(),
                    timestamp: endpoint.resolver_timestamp(),
                };
                if !self.offsets.contains_key(&key) {
                    let slot = OffsetSlot::Pending(self.spawn_resolve(&airport, key.timestamp));
                    self.offsets.insert(key, slot);
                }
            }
        }
    }

    fn spawn_resolve(
        &mut self,
        airport: &Arc<Airport>,
        timestamp: i64,
    ) -> JoinHandle<Result<OffsetHours, ResolveError>> {
        let resolver = self.calculator.resolver.clone();
        let coordinates = airport.coordinates;
        let handle = tokio::spawn(async move { resolver.resolve(coordinates, timestamp).await });
        self.abort_handles.push(handle.abort_handle());
        handle
    }

    async fn leg_offsets(
        &mut self,
        leg: &FlightLeg,
        unresolved_airports: &mut Vec<String>,
    ) -> Result<(Option<OffsetHours>, Option<OffsetHours>)> {
        let calculator = self.calculator;
        let departure_airport = calculator.directory.lookup(&leg.departure.airport).cloned();
        let arrival_airport = calculator.directory.lookup(&leg.arrival.airport).cloned();

        match (departure_airport, arrival_airport) {
            (Some(departure_airport), Some(arrival_airport)) => {
                // Both lookups for the leg run under a single timer; the
                // tasks were spawned earlier, so awaiting them one after the
                // other collects results without serializing the requests.
                let awaited = timeout(calculator.leg_timeout, async {
                    let departure = self.await_offset(&leg.departure, &departure_airport).await?;
                    let arrival = self.await_offset(&leg.arrival, &arrival_airport).await?;
                    Ok::<_, Error>((departure, arrival))
                })
                .await;

                match awaited {
                    Ok(offsets) => {
                        let (departure, arrival) = offsets?;
                        Ok((Some(departure), Some(arrival)))
                    }
                    Err(_) => TimeoutSnafu {
                        departure: leg.departure.airport.clone(),
                        arrival: leg.arrival.airport.clone(),
                    }
                    .fail(),
                }
            }
            // When either side is unmatched the whole leg falls back to raw
            // local readings; the summary names the airports at fault.
            (departure_airport, arrival_airport) => {
                for (airport, endpoint) in [
                    (departure_airport, &leg.departure),
                    (arrival_airport, &leg.arrival),
                ] {
                    if airport.is_none() {
                        warn!(
                            "airport '{}' not found in the directory, using its local time unadjusted",
                            endpoint.airport
                        );
                        unresolved_airports.push(endpoint.airport.clone());
                    }
                }
                Ok((None, None))
            }
        }
    }

    async fn await_offset(
        &mut self,
        endpoint: &LegEndpoint,
        airport: &Arc<Airport>,
    ) -> Result<OffsetHours> {
        let key = OffsetKey {
            airport: endpoint.airport.clone(),
            timestamp: endpoint.resolver_timestamp(),
        };

        let slot = match self.offsets.remove(&key) {
            Some(slot) => slot,
            // Every key is spawned up front, but resolving late is still
            // correct should a fresh key ever get here.
            None => OffsetSlot::Pending(self.spawn_resolve(airport, key.timestamp)),
        };

        let offset = match slot {
            OffsetSlot::Resolved(offset) => offset,
            OffsetSlot::Pending(handle) => handle
                .await
                .context(JoinSnafu)?
                .with_context(|_| LookupSnafu {
                    airport: key.airport.clone(),
                })?,
        };

        self.offsets.insert(key, OffsetSlot::Resolved(offset));
        Ok(offset)
    }

    /// Abandons whatever is still in flight. Aborting an already completed
    /// task is a no-op.
    fn abort_pending(&self) {
        for handle in &self.abort_handles {
            handle.abort();
        }
    }
}
