//! Fleet vehicles and their current positions.
//!
//! A vehicle is identified externally by its designator (`NNNNL`). The only
//! mutation after creation is relocation to another known zip.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/vehicles` | List all vehicles |
//! | POST | `/api/vehicles` | Create a vehicle |
//! | GET | `/api/vehicles/{id}` | Get a vehicle |
//! | PATCH | `/api/vehicles/{id}` | Relocate a vehicle |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::VehicleService;
