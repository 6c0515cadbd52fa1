use super::error::{ProximityError, Result};

/// A latitude/longitude pair in decimal degrees.
///
/// Construction goes through [`Coordinate::new`], so every value in circulation
/// lies within `[-90, 90]` x `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(ProximityError::InvalidCoordinate { lat, lng });
        }

        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}
