use serde::Serialize;

pub const DEFAULT_LATITUDE: f64 = -34.6037;
pub const DEFAULT_LONGITUDE: f64 = -58.3816;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Coordinate::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

/// Holds the one selected coordinate of a form session.
///
/// Map clicks only replace the stored value when it actually moved, so a
/// surface can use the returned flag to skip redrawing the marker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationState {
    current: Coordinate,
}

impl LocationState {
    pub fn new() -> Self {
        LocationState::default()
    }

    /// Returns `true` when the stored coordinate changed.
    pub fn on_map_click(&mut self, lat: f64, lon: f64) -> bool {
        if lat != self.current.lat || lon != self.current.lon {
            self.current = Coordinate::new(lat, lon);
            true
        } else {
            false
        }
    }

    pub fn on_manual_update(&mut self, lat: f64, lon: f64) {
        self.current = Coordinate::new(lat, lon);
    }

    pub fn current(&self) -> Coordinate {
        self.current
    }
}
