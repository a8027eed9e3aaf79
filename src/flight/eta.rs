use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::{haversine_distance_km, GeoPoint};

pub const MPH_TO_KMH: f64 = 1.60934;

/// Remaining flight time. All zero means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Eta {
    pub hours: u32,
    pub minutes: u32,
}

impl Eta {
    /// Splits fractional hours into whole hours and rounded minutes, carrying
    /// a rounded 60 into the hour.
    pub fn from_hours(remaining_hours: f64) -> Self {
        if !remaining_hours.is_finite() || remaining_hours <= 0.0 {
            return Self::default();
        }

        let whole = remaining_hours.trunc();
        let mut hours = whole as u32;
        let mut minutes = ((remaining_hours - whole) * 60.0).round() as u32;
        if minutes >= 60 {
            hours += 1;
            minutes -= 60;
        }
        Self { hours, minutes }
    }

    pub fn is_unknown(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

pub fn estimate_eta(current: Option<GeoPoint>, speed_mph: f64, arrival: GeoPoint) -> Eta {
    let Some(current) = current else {
        return Eta::default();
    };
    // also rejects NaN
    if !(speed_mph > 0.0) {
        return Eta::default();
    }

    let speed_kmh = speed_mph * MPH_TO_KMH;
    Eta::from_hours(haversine_distance_km(current, arrival) / speed_kmh)
}
