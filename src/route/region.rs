/// A longitude bucket: every longitude strictly below `upper_lon` and not
/// claimed by an earlier band belongs to `name`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBand {
    pub upper_lon: f64,
    pub name: &'static str,
}

/// Ascending exclusive upper bounds along the London -> Dhaka corridor.
/// Latitude is deliberately ignored.
pub const REGION_BANDS: [RegionBand; 6] = [
    RegionBand {
        upper_lon: 10.0,
        name: "Western Europe",
    },
    RegionBand {
        upper_lon: 25.0,
        name: "Central Europe",
    },
    RegionBand {
        upper_lon: 40.0,
        name: "Eastern Europe",
    },
    RegionBand {
        upper_lon: 55.0,
        name: "Middle East",
    },
    RegionBand {
        upper_lon: 75.0,
        name: "Central Asia",
    },
    RegionBand {
        upper_lon: 88.0,
        name: "Northern India",
    },
];

/// Region for longitudes past the last band.
pub const FINAL_REGION: &str = "Bangladesh";

pub fn region_for_longitude(longitude: f64) -> &'static str {
    REGION_BANDS
        .iter()
        .find(|band| longitude < band.upper_lon)
        .map(|band| band.name)
        .unwrap_or(FINAL_REGION)
}
