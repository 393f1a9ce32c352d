//! Real Calgary locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. The locator map centers on
//! downtown Calgary, so these are the facilities and intersections a user
//! would actually route between.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Hospitals and health centres
// ============================================================================

pub const HOSPITALS: &[Location] = &[
    Location::new("Foothills Medical Centre", 51.0646, -114.1340),
    Location::new("Alberta Children's Hospital", 51.0731, -114.1472),
    Location::new("Peter Lougheed Centre", 51.0775, -113.9833),
    Location::new("Rockyview General Hospital", 50.9840, -114.0925),
    Location::new("South Health Campus", 50.8785, -113.9537),
    Location::new("Sheldon M. Chumir Health Centre", 51.0392, -114.0725),
];

// ============================================================================
// Reference points
// ============================================================================

/// Calgary City Hall, a central "user marker" position.
pub const CITY_HALL: Location = Location::new("Calgary City Hall", 51.0460, -114.0572);

/// The original map's startup view centre.
pub const MAP_CENTRE: Location = Location::new("Map centre", 51.049999, -114.066666);

// ============================================================================
// Downtown signalized intersections (along the 4 St / 5 Ave corridors)
// ============================================================================

pub const DOWNTOWN_SIGNALS: &[Location] = &[
    Location::new("5 Ave & 4 St SW", 51.0487, -114.0717),
    Location::new("6 Ave & 4 St SW", 51.0478, -114.0718),
    Location::new("4 Ave & 4 St SW", 51.0497, -114.0716),
    Location::new("5 Ave & 2 St SW", 51.0484, -114.0664),
    Location::new("9 Ave & 1 St SE", 51.0445, -114.0604),
];

/// Signal coordinates as (lat, lng) pairs.
pub fn signal_coords() -> Vec<(f64, f64)> {
    DOWNTOWN_SIGNALS.iter().map(Location::coords).collect()
}
