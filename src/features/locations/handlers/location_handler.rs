use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::locations::dtos::{LocationResponseDto, LocationSearchQuery};
use crate::features::locations::services::LocationService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Search locations
#[utoipa::path(
    get,
    path = "/api/locations",
    params(LocationSearchQuery, PaginationQuery),
    responses(
        (status = 200, description = "Page of matching locations", body = ApiResponse<Vec<LocationResponseDto>>)
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(service): State<Arc<LocationService>>,
    Query(query): Query<LocationSearchQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let (locations, total) = service.list(query.term(), &pagination).await?;
    let dtos: Vec<LocationResponseDto> = locations.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a location by zip
#[utoipa::path(
    get,
    path = "/api/locations/{zip}",
    params(
        ("zip" = i32, Path, description = "Zip code")
    ),
    responses(
        (status = 200, description = "Location details", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Zip is not a number"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(service): State<Arc<LocationService>>,
    Path(zip): Path<i32>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    let location = service.get_by_zip(zip).await?;
    Ok(Json(ApiResponse::success(
        Some(location.into()),
        None,
        None,
    )))
}
