use serde::Serialize;
use utoipa::ToSchema;

use crate::feed::RawAircraftState;
use crate::flight::{estimate_eta, Eta};
use crate::geo::{haversine_distance_km, GeoPoint};
use crate::route::{region_for_longitude, Route};

pub const METERS_TO_FEET: f64 = 3.28084;
pub const MPS_TO_MPH: f64 = 2.23694;
pub const UNKNOWN_CALLSIGN: &str = "Unknown";

/// Display-ready state of the tracked flight for one poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FlightState {
    pub position: Option<GeoPoint>,
    pub altitude_feet: u32,
    pub speed_mph: u32,
    pub progress_fraction: f64,
    pub region_label: String,
    pub is_live: bool,
    pub callsign: Option<String>,
    pub on_ground: Option<bool>,
    pub heading_deg: Option<f64>,
    pub icao24: Option<String>,
}

impl FlightState {
    /// Placeholder shown before the flight has been located.
    pub fn searching(route: &Route) -> Self {
        Self {
            position: None,
            altitude_feet: 0,
            speed_mph: 0,
            progress_fraction: 0.0,
            region_label: region_for_longitude(route.departure.longitude).to_string(),
            is_live: false,
            callsign: None,
            on_ground: None,
            heading_deg: None,
            icao24: None,
        }
    }

    /// Same state, no longer backed by this cycle's feed data.
    pub fn stale(self) -> Self {
        Self {
            is_live: false,
            ..self
        }
    }

    pub fn eta(&self, route: &Route) -> Eta {
        estimate_eta(self.position, self.speed_mph as f64, route.arrival)
    }
}

/// Converts a selected feed record into display units.
///
/// Returns `None` if the record has no position, which the selector never
/// lets through.
pub fn build_flight_state(record: &RawAircraftState, route: &Route) -> Option<FlightState> {
    let position = GeoPoint::new(record.latitude?, record.longitude?);

    let callsign = record
        .trimmed_callsign()
        .unwrap_or(UNKNOWN_CALLSIGN)
        .to_string();

    Some(FlightState {
        position: Some(position),
        altitude_feet: to_display_unit(record.baro_altitude_m, METERS_TO_FEET),
        speed_mph: to_display_unit(record.velocity_mps, MPS_TO_MPH),
        progress_fraction: progress_fraction(route, position),
        region_label: region_for_longitude(position.longitude).to_string(),
        is_live: true,
        callsign: Some(callsign),
        on_ground: record.on_ground,
        heading_deg: record.true_track_deg,
        icao24: record.icao24.clone(),
    })
}

fn to_display_unit(value: Option<f64>, factor: f64) -> u32 {
    // `as` saturates, negatives land on 0
    value.map(|v| (v * factor).round() as u32).unwrap_or(0)
}

fn progress_fraction(route: &Route, current: GeoPoint) -> f64 {
    let total = route.total_distance_km();
    if total <= 0.0 {
        return 0.0;
    }
    (haversine_distance_km(route.departure, current) / total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(lat: f64, lon: f64) -> RawAircraftState {
        RawAircraftState {
            icao24: Some("70c0cd".into()),
            callsign: Some("BG202   ".into()),
            longitude: Some(lon),
            latitude: Some(lat),
            baro_altitude_m: Some(10668.0),
            on_ground: Some(false),
            velocity_mps: Some(250.0),
            true_track_deg: Some(101.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_unit_conversion() {
        let state = build_flight_state(&record_at(36.0, 60.0), &Route::default()).unwrap();
        assert_eq!(state.altitude_feet, 35000);
        assert_eq!(state.speed_mph, 559);
        assert_eq!(state.callsign.as_deref(), Some("BG202"));
        assert_eq!(state.heading_deg, Some(101.5));
        assert_eq!(state.on_ground, Some(false));
        assert!(state.is_live);
        assert!(state.position.is_some());
    }

    #[test]
    fn test_missing_numbers_become_zero() {
        let record = RawAircraftState {
            baro_altitude_m: None,
            velocity_mps: None,
            callsign: None,
            ..record_at(36.0, 60.0)
        };
        let state = build_flight_state(&record, &Route::default()).unwrap();
        assert_eq!(state.altitude_feet, 0);
        assert_eq!(state.speed_mph, 0);
        assert_eq!(state.callsign.as_deref(), Some(UNKNOWN_CALLSIGN));
    }

    #[test]
    fn test_blank_callsign_is_unknown() {
        let record = RawAircraftState {
            callsign: Some("   ".into()),
            ..record_at(36.0, 60.0)
        };
        let state = build_flight_state(&record, &Route::default()).unwrap();
        assert_eq!(state.callsign.as_deref(), Some(UNKNOWN_CALLSIGN));
    }

    #[test]
    fn test_negative_altitude_clamps() {
        let record = RawAircraftState {
            baro_altitude_m: Some(-30.0),
            ..record_at(36.0, 60.0)
        };
        let state = build_flight_state(&record, &Route::default()).unwrap();
        assert_eq!(state.altitude_feet, 0);
    }

    #[test]
    fn test_progress_at_endpoints() {
        let route = Route::default();

        let at_departure = build_flight_state(&record_at(51.47, -0.4543), &route).unwrap();
        assert_eq!(at_departure.progress_fraction, 0.0);

        let at_arrival = build_flight_state(&record_at(23.8103, 90.4125), &route).unwrap();
        assert!((at_arrival.progress_fraction - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_is_clamped() {
        let route = Route::default();
        let positions = [
            (23.8103, 90.4125),
            (10.0, 120.0),
            (-33.9, 151.2),
            (51.47, -0.4543),
            (64.1, -21.9),
            (36.0, 60.0),
        ];
        for (lat, lon) in positions {
            let state = build_flight_state(&record_at(lat, lon), &route).unwrap();
            assert!(
                (0.0..=1.0).contains(&state.progress_fraction),
                "progress {} at ({lat}, {lon})",
                state.progress_fraction
            );
        }
        // well past Dhaka
        let beyond = build_flight_state(&record_at(13.7, 100.7), &route).unwrap();
        assert_eq!(beyond.progress_fraction, 1.0);
    }

    #[test]
    fn test_region_follows_longitude() {
        let route = Route::default();
        let cases = [(5.0, "Western Europe"), (65.0, "Central Asia"), (91.0, "Bangladesh")];
        for (lon, region) in cases {
            let state = build_flight_state(&record_at(40.0, lon), &route).unwrap();
            assert_eq!(state.region_label, region);
        }
    }

    #[test]
    fn test_unlocated_record() {
        let record = RawAircraftState {
            longitude: None,
            ..record_at(36.0, 60.0)
        };
        assert!(build_flight_state(&record, &Route::default()).is_none());
    }

    #[test]
    fn test_searching_and_stale() {
        let route = Route::default();
        let searching = FlightState::searching(&route);
        assert!(!searching.is_live);
        assert!(searching.position.is_none());
        assert_eq!(searching.region_label, "Western Europe");

        let live = build_flight_state(&record_at(36.0, 60.0), &route).unwrap();
        let stale = live.clone().stale();
        assert!(!stale.is_live);
        assert_eq!(stale.position, live.position);
        assert_eq!(stale.callsign, live.callsign);
    }
}
