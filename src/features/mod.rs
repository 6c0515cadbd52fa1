pub mod locations;
pub mod shipments;
pub mod vehicles;
