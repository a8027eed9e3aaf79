pub mod error;
pub mod flight;
pub mod route;
pub mod tracker;
