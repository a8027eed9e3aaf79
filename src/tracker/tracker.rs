use chrono::Utc;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::error::{PollError, TrackerError};
use super::poll::poll_once;
use super::types::{PollOutcome, TrackerMode, TrackerStatus};
use crate::feed::FeedClient;
use crate::flight::{FlightState, MatchRules};
use crate::geo::{bearing_degrees, DEFAULT_BEARING_DEG};
use crate::route::Route;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct Shared {
    status: TrackerStatus,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Owns the single current flight status and the worker that refreshes it.
pub struct Tracker {
    route: Arc<Route>,
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl Tracker {
    pub fn new(route: Route) -> Self {
        let flight = FlightState::searching(&route);
        Self {
            route: Arc::new(route),
            shared: Arc::new(StdMutex::new(Shared {
                status: TrackerStatus {
                    mode: TrackerMode::Idle,
                    flight,
                    outcome: PollOutcome::Searching,
                    message: None,
                    eta: Default::default(),
                    marker_bearing_deg: DEFAULT_BEARING_DEG,
                    polled_at: None,
                    updated_at: None,
                },
            })),
            worker: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn status(&self) -> TrackerStatus {
        self.shared.lock().unwrap().status.clone()
    }

    /// Publishes the outcome of one poll cycle.
    pub fn apply(&self, result: Result<FlightState, PollError>) {
        publish(&self.shared, &self.route, result);
    }

    /// Spawns the polling worker. The first poll happens immediately.
    pub fn start(
        &mut self,
        client: Arc<FeedClient>,
        rules: MatchRules,
        every: Duration,
    ) -> Result<(), TrackerError> {
        if self.worker.is_some() {
            return Err(TrackerError::AlreadyRunning);
        }

        let shared = self.shared.clone();
        let route = self.route.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        let join = tokio::spawn(async move {
            run_poll_loop(shared, route, client, rules, every, stop_rx).await;
        });

        self.worker = Some(WorkerHandle { stop_tx, join });

        {
            let mut locked = self.shared.lock().unwrap();
            locked.status.mode = TrackerMode::Running {
                start: Utc::now(),
                interval_secs: every.as_secs(),
            };
        }

        info!("Tracker started, polling every {}", humantime::format_duration(every));
        Ok(())
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
            info!("Tracker stopped");
        }
        let mut locked = self.shared.lock().unwrap();
        let status = &mut locked.status;
        status.mode = TrackerMode::Idle;
        status.flight = status.flight.clone().stale();
    }
}

async fn run_poll_loop(
    shared: Arc<StdMutex<Shared>>,
    route: Arc<Route>,
    client: Arc<FeedClient>,
    rules: MatchRules,
    every: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut stop_rx => return,
        }

        let result = tokio::select! {
            result = poll_once(&client, &rules, &route) => result,
            _ = &mut stop_rx => return,
        };
        publish(&shared, &route, result);
    }
}

fn publish(shared: &StdMutex<Shared>, route: &Route, result: Result<FlightState, PollError>) {
    let now = Utc::now();
    let mut locked = shared.lock().unwrap();
    let status = &mut locked.status;

    let (flight, outcome, message) = match result {
        Ok(flight) => {
            status.marker_bearing_deg = match (status.flight.position, flight.position) {
                (prev, Some(next)) if prev != Some(next) => bearing_degrees(prev, next),
                _ => status.marker_bearing_deg,
            };
            status.updated_at = Some(now);
            (flight, PollOutcome::Live, None)
        }
        Err(err) => {
            let outcome = match &err {
                PollError::Fetch(e) => {
                    warn!("Poll failed: {}", e);
                    PollOutcome::FetchFailed
                }
                PollError::NoMatchingFlight => {
                    debug!("Tracked flight not in snapshot");
                    PollOutcome::NotTracked
                }
            };
            let previous = status.flight.clone().stale();
            (previous, outcome, Some(err.user_message().to_string()))
        }
    };

    status.eta = flight.eta(route);
    status.flight = flight;
    status.outcome = outcome;
    status.message = message;
    status.polled_at = Some(now);
}
