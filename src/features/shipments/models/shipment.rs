use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::modules::proximity::{Coordinate, ProximityError, ShipmentCargo, ShipmentOrigin};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shipment {
    pub id: Uuid,
    pub pickup: i32,
    pub delivery: i32,
    pub weight: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shipment joined with the coordinates of its pickup location
#[derive(Debug, Clone, FromRow)]
pub struct ShipmentPickup {
    pub id: Uuid,
    pub pickup: i32,
    pub delivery: i32,
    pub weight: i32,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
}

impl ShipmentPickup {
    pub fn pickup_coordinate(&self) -> Result<Coordinate, ProximityError> {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn to_origin(&self) -> Result<ShipmentOrigin, ProximityError> {
        Ok(ShipmentOrigin {
            pickup: self.pickup,
            delivery: self.delivery,
            pickup_coord: self.pickup_coordinate()?,
        })
    }

    pub fn into_cargo(self) -> Result<ShipmentCargo, ProximityError> {
        Ok(ShipmentCargo {
            pickup_coord: self.pickup_coordinate()?,
            pickup: self.pickup,
            delivery: self.delivery,
            weight: self.weight,
            description: self.description,
        })
    }
}
