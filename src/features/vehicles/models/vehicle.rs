use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::modules::proximity::{Coordinate, ProximityError, VehiclePosition};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub designator: String,
    pub current_location: i32,
    pub carrying: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A vehicle joined with the coordinates of its current location
#[derive(Debug, Clone, FromRow)]
pub struct VehicleLocation {
    pub designator: String,
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<VehicleLocation> for VehiclePosition {
    type Error = ProximityError;

    fn try_from(row: VehicleLocation) -> Result<Self, Self::Error> {
        Ok(VehiclePosition {
            coord: Coordinate::new(row.lat, row.lng)?,
            designator: row.designator,
        })
    }
}
