use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::flight::{Eta, FlightState};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub enum TrackerMode {
    Idle,
    Running {
        start: DateTime<Utc>,
        interval_secs: u64,
    },
}

/// Result of the most recent poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PollOutcome {
    Searching,
    Live,
    NotTracked,
    FetchFailed,
}

/// Everything the display layer needs, replaced as a whole after each cycle.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackerStatus {
    pub mode: TrackerMode,
    pub flight: FlightState,
    pub outcome: PollOutcome,
    pub message: Option<String>,
    pub eta: Eta,
    pub marker_bearing_deg: f64,
    pub polled_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
