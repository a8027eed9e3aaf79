mod client;
mod error;
mod types;

pub use client::{FeedClient, DEFAULT_FEED_URL};
pub use error::FeedError;
pub use types::{parse_states, BoundingBox, RawAircraftState};
