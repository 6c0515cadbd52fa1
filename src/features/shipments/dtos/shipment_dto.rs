use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::shipments::models::Shipment;

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShipmentDto {
    #[validate(range(min = 1, max = 99999, message = "pickup must be a valid zip"))]
    #[schema(example = 60601)]
    pub pickup: i32,

    #[validate(range(min = 1, max = 99999, message = "delivery must be a valid zip"))]
    #[schema(example = 64101)]
    pub delivery: i32,

    #[validate(range(min = 0, max = 1000, message = "weight must be between 0 and 1000"))]
    #[schema(example = 420)]
    pub weight: i32,

    #[serde(default)]
    #[validate(length(max = 1000, message = "description must not exceed 1000 characters"))]
    #[schema(example = "Machine parts")]
    pub description: String,
}

/// Pickup and delivery are immutable, so only these fields are accepted
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateShipmentDto {
    #[validate(range(min = 0, max = 1000, message = "weight must be between 0 and 1000"))]
    pub weight: Option<i32>,

    #[validate(length(max = 1000, message = "description must not exceed 1000 characters"))]
    pub description: Option<String>,
}

impl UpdateShipmentDto {
    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShipmentResponseDto {
    pub id: Uuid,
    pub pickup: i32,
    pub delivery: i32,
    pub weight: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shipment> for ShipmentResponseDto {
    fn from(shipment: Shipment) -> Self {
        Self {
            id: shipment.id,
            pickup: shipment.pickup,
            delivery: shipment.delivery,
            weight: shipment.weight,
            description: shipment.description,
            created_at: shipment.created_at,
            updated_at: shipment.updated_at,
        }
    }
}

/// List entry: a shipment's route and how many vehicles are near its pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShipmentSummaryDto {
    pub id: Uuid,
    #[schema(example = 60601)]
    pub pickup: i32,
    #[schema(example = 64101)]
    pub delivery: i32,
    #[schema(example = 2)]
    pub vehicle_count: usize,
}

/// Detail view: the shipment's cargo and the designators of nearby vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShipmentDetailDto {
    pub id: Uuid,
    pub pickup: i32,
    pub delivery: i32,
    pub weight: i32,
    pub description: String,
    #[schema(example = json!(["1001A", "1003C"]))]
    pub vehicle_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedShipmentDto {
    pub id: Uuid,
}
