use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::vehicles::models::Vehicle;
use crate::shared::validation::VEHICLE_DESIGNATOR_REGEX;

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleDto {
    /// Generated when omitted
    #[validate(regex(
        path = *VEHICLE_DESIGNATOR_REGEX,
        message = "designator must be four digits followed by an uppercase letter (e.g. '1001A')"
    ))]
    #[schema(example = "1001A")]
    pub designator: Option<String>,

    /// Zip of an existing location; a random one is assigned when omitted
    #[validate(range(min = 1, max = 99999, message = "current_location must be a valid zip"))]
    #[schema(example = 60601)]
    pub current_location: Option<i32>,

    #[validate(range(min = 0, max = 1000, message = "carrying must be between 0 and 1000"))]
    #[schema(example = 500)]
    pub carrying: i32,
}

// Relocation is the only permitted update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RelocateVehicleDto {
    #[validate(range(min = 1, max = 99999, message = "current_location must be a valid zip"))]
    #[schema(example = 64101)]
    pub current_location: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponseDto {
    pub id: Uuid,
    pub designator: String,
    pub current_location: i32,
    pub carrying: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponseDto {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            designator: vehicle.designator,
            current_location: vehicle.current_location,
            carrying: vehicle.carrying,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(designator: Option<&str>, carrying: i32) -> CreateVehicleDto {
        CreateVehicleDto {
            designator: designator.map(str::to_string),
            current_location: None,
            carrying,
        }
    }

    #[test]
    fn test_create_vehicle_validation() {
        assert!(create_dto(None, 0).validate().is_ok());
        assert!(create_dto(Some("1001A"), 1000).validate().is_ok());

        assert!(create_dto(Some("1001a"), 10).validate().is_err());
        assert!(create_dto(Some("ABCDE"), 10).validate().is_err());
        assert!(create_dto(None, -1).validate().is_err());
        assert!(create_dto(None, 1001).validate().is_err());
    }

    #[test]
    fn test_create_vehicle_location_range() {
        let mut dto = create_dto(None, 10);
        dto.current_location = Some(0);
        assert!(dto.validate().is_err());

        dto.current_location = Some(60601);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_relocate_rejects_other_fields() {
        let ok: RelocateVehicleDto =
            serde_json::from_str(r#"{"current_location": 64101}"#).unwrap();
        assert_eq!(ok.current_location, 64101);

        let extra =
            serde_json::from_str::<RelocateVehicleDto>(r#"{"current_location": 1, "carrying": 5}"#);
        assert!(extra.is_err());
    }
}
