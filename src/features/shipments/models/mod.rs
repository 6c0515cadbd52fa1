mod shipment;

pub use shipment::{Shipment, ShipmentPickup};
