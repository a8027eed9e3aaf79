mod error;
mod poll;
mod tracker;
mod types;

pub use error::{PollError, TrackerError};
pub use poll::poll_once;
pub use tracker::{Tracker, DEFAULT_POLL_INTERVAL};
pub use types::{PollOutcome, TrackerMode, TrackerStatus};
