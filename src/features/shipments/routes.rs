use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::shipments::handlers;
use crate::features::shipments::services::ShipmentService;

/// Create routes for the shipments feature
pub fn routes(service: Arc<ShipmentService>) -> Router {
    Router::new()
        .route(
            "/api/shipments",
            get(handlers::list_shipments).post(handlers::create_shipment),
        )
        .route(
            "/api/shipments/{id}",
            get(handlers::get_shipment)
                .patch(handlers::update_shipment)
                .delete(handlers::delete_shipment),
        )
        .with_state(service)
}
