use thiserror::Error;

use crate::feed::FeedError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker already running")]
    AlreadyRunning,
}

/// Why a poll cycle produced no live flight state.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FeedError),
    #[error("no matching flight in snapshot")]
    NoMatchingFlight,
}

impl PollError {
    /// Text shown to the end user; the two conditions must stay distinct.
    pub fn user_message(&self) -> &'static str {
        match self {
            PollError::Fetch(_) => "Failed to fetch flight data",
            PollError::NoMatchingFlight => "Flight not currently tracked",
        }
    }
}
