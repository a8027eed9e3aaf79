use log::debug;

use crate::feed::{FeedClient, RawAircraftState};
use crate::flight::{build_flight_state, select_tracked_flight, FlightState, MatchRules};
use crate::route::Route;

use super::PollError;

/// One complete cycle: fetch a snapshot, select the flight, build its state.
pub async fn poll_once(
    client: &FeedClient,
    rules: &MatchRules,
    route: &Route,
) -> Result<FlightState, PollError> {
    let states = client.fetch_states().await?;
    derive_state(&states, rules, route)
}

/// Selection and derivation over an already fetched snapshot.
pub fn derive_state(
    states: &[RawAircraftState],
    rules: &MatchRules,
    route: &Route,
) -> Result<FlightState, PollError> {
    let record = select_tracked_flight(states, rules).ok_or(PollError::NoMatchingFlight)?;
    let state = build_flight_state(record, route).ok_or(PollError::NoMatchingFlight)?;
    debug!(
        "Selected {} out of {} records, progress {:.3}",
        state.callsign.as_deref().unwrap_or("?"),
        states.len(),
        state.progress_fraction
    );
    Ok(state)
}
