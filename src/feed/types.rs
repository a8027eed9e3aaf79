use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FeedError;

/// Query rectangle sent to the state feed as `lamin,lomin,lamax,lomax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lamin: f64,
    pub lomin: f64,
    pub lamax: f64,
    pub lomax: f64,
}

impl BoundingBox {
    /// Covers the London -> Dhaka corridor.
    pub const LONDON_DHAKA: BoundingBox = BoundingBox {
        lamin: 20.0,
        lomin: -10.0,
        lamax: 60.0,
        lomax: 95.0,
    };

    pub fn query(&self) -> [(&'static str, f64); 4] {
        [
            ("lamin", self.lamin),
            ("lomin", self.lomin),
            ("lamax", self.lamax),
            ("lomax", self.lomax),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::LONDON_DHAKA
    }
}

/// Body of a bulk state query. `states` is null when nothing is in the box.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatesResponse {
    #[serde(default)]
    pub states: Option<Vec<Value>>,
}

impl StatesResponse {
    pub fn records(&self) -> Vec<RawAircraftState> {
        self.states
            .iter()
            .flatten()
            .map(RawAircraftState::from_value)
            .collect()
    }
}

/// One state vector as delivered by the feed. Every field is optional; a
/// record that is not even an array decodes to all `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAircraftState {
    pub icao24: Option<String>,
    pub callsign: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude_m: Option<f64>,
    pub on_ground: Option<bool>,
    pub velocity_mps: Option<f64>,
    pub true_track_deg: Option<f64>,
}

impl RawAircraftState {
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_array() else {
            return Self::default();
        };
        let text = |i: usize| fields.get(i).and_then(Value::as_str).map(String::from);
        let number = |i: usize| fields.get(i).and_then(Value::as_f64);

        Self {
            icao24: text(0),
            callsign: text(1),
            longitude: number(5),
            latitude: number(6),
            baro_altitude_m: number(7),
            on_ground: fields.get(8).and_then(Value::as_bool),
            velocity_mps: number(9),
            true_track_deg: number(10),
        }
    }

    /// Callsign without the feed's padding; `None` when blank.
    pub fn trimmed_callsign(&self) -> Option<&str> {
        self.callsign
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Decodes a raw feed body into state records.
pub fn parse_states(body: &[u8]) -> Result<Vec<RawAircraftState>, FeedError> {
    let response: StatesResponse = serde_json::from_slice(body)?;
    Ok(response.records())
}
