mod eta;
mod selector;
mod state;

pub use eta::{estimate_eta, Eta};
pub use selector::{select_tracked_flight, MatchRules};
pub use state::{build_flight_state, FlightState};
