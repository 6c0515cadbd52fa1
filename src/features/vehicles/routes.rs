use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::vehicles::handlers;
use crate::features::vehicles::services::VehicleService;

/// Create routes for the vehicles feature
pub fn routes(service: Arc<VehicleService>) -> Router {
    Router::new()
        .route(
            "/api/vehicles",
            get(handlers::list_vehicles).post(handlers::create_vehicle),
        )
        .route(
            "/api/vehicles/{id}",
            get(handlers::get_vehicle).patch(handlers::relocate_vehicle),
        )
        .with_state(service)
}
