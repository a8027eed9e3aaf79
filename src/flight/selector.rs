use log::debug;
use serde::Deserialize;

use crate::feed::RawAircraftState;

/// Callsign fragments that identify the tracked flight outright.
pub const TRACKED_IDENTIFIERS: [&str; 2] = ["BG202", "BBC202"];
/// ICAO code of the operating carrier, used for the fallback match.
pub const CARRIER_PREFIX: &str = "BBC";
/// Records below this barometric altitude are never the tracked flight.
pub const CRUISE_ALTITUDE_M: f64 = 6000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub identifiers: Vec<String>,
    pub carrier_prefix: String,
    pub min_altitude_m: f64,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            identifiers: TRACKED_IDENTIFIERS.iter().map(|s| s.to_string()).collect(),
            carrier_prefix: CARRIER_PREFIX.to_string(),
            min_altitude_m: CRUISE_ALTITUDE_M,
        }
    }
}

impl MatchRules {
    /// Airborne, located, and at or above the cruise threshold. A missing
    /// altitude counts as zero; a missing ground flag counts as airborne.
    fn is_candidate(&self, state: &RawAircraftState) -> bool {
        if state.on_ground.unwrap_or(false) {
            return false;
        }
        if state.latitude.is_none() || state.longitude.is_none() {
            return false;
        }
        state.baro_altitude_m.unwrap_or(0.0) >= self.min_altitude_m
    }

    fn is_exact(&self, callsign: &str) -> bool {
        self.identifiers
            .iter()
            .any(|id| !id.is_empty() && callsign.contains(id.as_str()))
    }

    fn is_fallback(&self, callsign: &str) -> bool {
        !self.carrier_prefix.is_empty() && callsign.starts_with(self.carrier_prefix.as_str())
    }
}

/// Picks the tracked flight out of a bulk snapshot in a single pass.
///
/// An exact identifier match ends the scan immediately. Otherwise the first
/// carrier-prefix match in feed order is kept; later prefix matches never
/// replace it.
pub fn select_tracked_flight<'a>(
    states: &'a [RawAircraftState],
    rules: &MatchRules,
) -> Option<&'a RawAircraftState> {
    let mut fallback: Option<&RawAircraftState> = None;

    for state in states {
        if !rules.is_candidate(state) {
            continue;
        }
        let Some(callsign) = state.trimmed_callsign() else {
            continue;
        };

        if rules.is_exact(callsign) {
            debug!("Exact match on callsign {}", callsign);
            return Some(state);
        }
        if fallback.is_none() && rules.is_fallback(callsign) {
            debug!("Latched fallback match on callsign {}", callsign);
            fallback = Some(state);
        }
    }

    fallback
}
