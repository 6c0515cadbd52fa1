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
use crate::features::shipments::dtos::{
    CreateShipmentDto, DeletedShipmentDto, ShipmentDetailDto, ShipmentResponseDto,
    ShipmentSummaryDto, UpdateShipmentDto,
};
use crate::features::shipments::services::ShipmentService;
use crate::shared::types::{ApiResponse, Meta};

/// List shipments with the number of vehicles near each pickup
#[utoipa::path(
    get,
    path = "/api/shipments",
    responses(
        (status = 200, description = "Shipment summaries", body = ApiResponse<Vec<ShipmentSummaryDto>>),
        (status = 422, description = "No shipments or no located vehicles")
    ),
    tag = "shipments"
)]
pub async fn list_shipments(
    State(service): State<Arc<ShipmentService>>,
) -> Result<Json<ApiResponse<Vec<ShipmentSummaryDto>>>> {
    let summaries = service.list_summaries().await?;
    let total = summaries.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(summaries),
        None,
        Some(Meta { total }),
    )))
}

/// Get a shipment with the designators of nearby vehicles
#[utoipa::path(
    get,
    path = "/api/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Shipment with nearby vehicles", body = ApiResponse<ShipmentDetailDto>),
        (status = 404, description = "Shipment not found"),
        (status = 422, description = "No located vehicles")
    ),
    tag = "shipments"
)]
pub async fn get_shipment(
    State(service): State<Arc<ShipmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShipmentDetailDto>>> {
    let detail = service.get_detail(id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Create a shipment
#[utoipa::path(
    post,
    path = "/api/shipments",
    request_body = CreateShipmentDto,
    responses(
        (status = 201, description = "Shipment created", body = ApiResponse<ShipmentResponseDto>),
        (status = 400, description = "Validation error or unknown location")
    ),
    tag = "shipments"
)]
pub async fn create_shipment(
    State(service): State<Arc<ShipmentService>>,
    AppJson(dto): AppJson<CreateShipmentDto>,
) -> Result<(StatusCode, Json<ApiResponse<ShipmentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let shipment = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(shipment.into()),
            Some("Shipment created".to_string()),
            None,
        )),
    ))
}

/// Update a shipment's weight and/or description
#[utoipa::path(
    patch,
    path = "/api/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    request_body = UpdateShipmentDto,
    responses(
        (status = 200, description = "Shipment updated", body = ApiResponse<ShipmentResponseDto>),
        (status = 400, description = "Validation error or attempt to change pickup/delivery"),
        (status = 404, description = "Shipment not found")
    ),
    tag = "shipments"
)]
pub async fn update_shipment(
    State(service): State<Arc<ShipmentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateShipmentDto>,
) -> Result<Json<ApiResponse<ShipmentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if dto.is_empty() {
        return Err(AppError::BadRequest(
            "Provide weight and/or description to update".to_string(),
        ));
    }

    let shipment = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(shipment.into()),
        Some("Shipment updated".to_string()),
        None,
    )))
}

/// Delete a shipment
#[utoipa::path(
    delete,
    path = "/api/shipments/{id}",
    params(
        ("id" = Uuid, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Shipment deleted", body = ApiResponse<DeletedShipmentDto>),
        (status = 404, description = "Shipment not found")
    ),
    tag = "shipments"
)]
pub async fn delete_shipment(
    State(service): State<Arc<ShipmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedShipmentDto>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedShipmentDto { id }),
        Some("Shipment deleted".to_string()),
        None,
    )))
}
