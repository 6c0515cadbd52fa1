use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::vehicles::dtos::{CreateVehicleDto, RelocateVehicleDto, VehicleResponseDto};
use crate::features::vehicles::services::VehicleService;
use crate::shared::types::{ApiResponse, Meta};

/// List all vehicles
#[utoipa::path(
    get,
    path = "/api/vehicles",
    responses(
        (status = 200, description = "All vehicles ordered by designator", body = ApiResponse<Vec<VehicleResponseDto>>)
    ),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(service): State<Arc<VehicleService>>,
) -> Result<Json<ApiResponse<Vec<VehicleResponseDto>>>> {
    let vehicles = service.list().await?;
    let total = vehicles.len() as i64;
    let dtos: Vec<VehicleResponseDto> = vehicles.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a vehicle by ID
#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    params(
        ("id" = Uuid, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleResponseDto>),
        (status = 404, description = "Vehicle not found")
    ),
    tag = "vehicles"
)]
pub async fn get_vehicle(
    State(service): State<Arc<VehicleService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponseDto>>> {
    let vehicle = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(vehicle.into()), None, None)))
}

/// Create a vehicle
#[utoipa::path(
    post,
    path = "/api/vehicles",
    request_body = CreateVehicleDto,
    responses(
        (status = 201, description = "Vehicle created", body = ApiResponse<VehicleResponseDto>),
        (status = 400, description = "Validation error or unknown location"),
        (status = 409, description = "Designator already in use"),
        (status = 422, description = "No locations available to place the vehicle")
    ),
    tag = "vehicles"
)]
pub async fn create_vehicle(
    State(service): State<Arc<VehicleService>>,
    AppJson(dto): AppJson<CreateVehicleDto>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let vehicle = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(vehicle.into()),
            Some("Vehicle created".to_string()),
            None,
        )),
    ))
}

/// Relocate a vehicle
#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}",
    params(
        ("id" = Uuid, Path, description = "Vehicle ID")
    ),
    request_body = RelocateVehicleDto,
    responses(
        (status = 200, description = "Vehicle relocated", body = ApiResponse<VehicleResponseDto>),
        (status = 400, description = "Validation error, unknown location or unsupported field"),
        (status = 404, description = "Vehicle not found")
    ),
    tag = "vehicles"
)]
pub async fn relocate_vehicle(
    State(service): State<Arc<VehicleService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RelocateVehicleDto>,
) -> Result<Json<ApiResponse<VehicleResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let vehicle = service.relocate(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(vehicle.into()),
        Some("Vehicle relocated".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::vehicles::routes;
    use crate::shared::test_helpers;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        TestServer::new(routes::routes(test_helpers::vehicle_service())).unwrap()
    }

    #[tokio::test]
    async fn test_create_vehicle_rejects_malformed_designator() {
        let response = server()
            .post("/api/vehicles")
            .json(&json!({ "designator": "10A", "carrying": 100 }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_create_vehicle_rejects_out_of_range_carrying() {
        let response = server()
            .post("/api/vehicles")
            .json(&json!({ "carrying": 1001 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_create_vehicle_rejects_malformed_body() {
        let response = server()
            .post("/api/vehicles")
            .json(&json!({ "designator": "1001A" }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_relocate_rejects_extra_fields() {
        let response = server()
            .patch("/api/vehicles/0190a5d2-7b1e-7c3a-9f00-000000000001")
            .json(&json!({ "current_location": 64101, "carrying": 10 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_get_vehicle_rejects_invalid_id() {
        let response = server().get("/api/vehicles/not-a-uuid").await;

        response.assert_status_bad_request();
    }
}
