//! Proximity matching between shipments and vehicles.
//!
//! Pure, synchronous computation over coordinates that have already been
//! resolved from the locations table. Safe to call from any task or thread.
//!
//! - [`DistanceEvaluator`]: great-circle distance plus the "near" threshold test
//! - [`ProximityMatcher`]: list mode (counts) and detail mode (identifiers)

mod coordinate;
mod distance;
mod error;
mod matcher;

pub use coordinate::Coordinate;
pub use distance::{DistanceEvaluator, DistanceUnit, DEFAULT_PROXIMITY_THRESHOLD};
pub use error::ProximityError;
pub use matcher::{
    ProximityMatch, ProximityMatcher, ProximitySummary, ShipmentCargo, ShipmentOrigin,
    VehiclePosition,
};
