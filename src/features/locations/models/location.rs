use serde::Serialize;
use sqlx::FromRow;

use crate::modules::proximity::{Coordinate, ProximityError};

/// A postal location with its centroid coordinates
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Location {
    pub zip: i32,
    pub city: String,
    pub region: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn coordinate(&self) -> Result<Coordinate, ProximityError> {
        Coordinate::new(self.lat, self.lng)
    }
}
