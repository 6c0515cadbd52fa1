//! Reference locations keyed by zip code.
//!
//! Locations are loaded once by the `seed` command and never change afterwards.
//! Vehicles and shipments reference them by zip; their coordinates feed the
//! proximity matcher.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/locations` | Search locations (paginated) |
//! | GET | `/api/locations/{zip}` | Get a location by zip |

pub mod dtos;
pub mod handlers;
pub mod import;
pub mod models;
pub mod routes;
pub mod services;

pub use services::LocationService;
