//! Shipments and their nearby-vehicle matching.
//!
//! The listing reports, for every shipment, how many vehicles sit within the
//! configured radius of its pickup location. The detail view names those
//! vehicles. Pickup and delivery are fixed once a shipment is created.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/shipments` | List shipments with nearby vehicle counts |
//! | POST | `/api/shipments` | Create a shipment |
//! | GET | `/api/shipments/{id}` | Shipment with nearby vehicle designators |
//! | PATCH | `/api/shipments/{id}` | Update weight and/or description |
//! | DELETE | `/api/shipments/{id}` | Delete a shipment |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ShipmentService;
