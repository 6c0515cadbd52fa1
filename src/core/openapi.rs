use utoipa::{Modify, OpenApi};

use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::features::shipments::{dtos as shipments_dtos, handlers as shipments_handlers};
use crate::features::vehicles::{dtos as vehicles_dtos, handlers as vehicles_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Locations
        locations_handlers::list_locations,
        locations_handlers::get_location,
        // Vehicles
        vehicles_handlers::list_vehicles,
        vehicles_handlers::get_vehicle,
        vehicles_handlers::create_vehicle,
        vehicles_handlers::relocate_vehicle,
        // Shipments
        shipments_handlers::list_shipments,
        shipments_handlers::get_shipment,
        shipments_handlers::create_shipment,
        shipments_handlers::update_shipment,
        shipments_handlers::delete_shipment,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Locations
            locations_dtos::LocationResponseDto,
            ApiResponse<Vec<locations_dtos::LocationResponseDto>>,
            ApiResponse<locations_dtos::LocationResponseDto>,
            // Vehicles
            vehicles_dtos::CreateVehicleDto,
            vehicles_dtos::RelocateVehicleDto,
            vehicles_dtos::VehicleResponseDto,
            ApiResponse<Vec<vehicles_dtos::VehicleResponseDto>>,
            ApiResponse<vehicles_dtos::VehicleResponseDto>,
            // Shipments
            shipments_dtos::CreateShipmentDto,
            shipments_dtos::UpdateShipmentDto,
            shipments_dtos::ShipmentResponseDto,
            shipments_dtos::ShipmentSummaryDto,
            shipments_dtos::ShipmentDetailDto,
            shipments_dtos::DeletedShipmentDto,
            ApiResponse<Vec<shipments_dtos::ShipmentSummaryDto>>,
            ApiResponse<shipments_dtos::ShipmentDetailDto>,
            ApiResponse<shipments_dtos::ShipmentResponseDto>,
            ApiResponse<shipments_dtos::DeletedShipmentDto>,
        )
    ),
    tags(
        (name = "locations", description = "Zip code reference locations"),
        (name = "vehicles", description = "Fleet vehicles and relocation"),
        (name = "shipments", description = "Shipments and nearby-vehicle matching"),
    ),
    info(
        title = "Freightmatch API",
        version = "0.1.0",
        description = "API documentation for Freightmatch",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
