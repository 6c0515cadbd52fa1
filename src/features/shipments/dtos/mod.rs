pub mod shipment_dto;

pub use shipment_dto::{
    CreateShipmentDto, DeletedShipmentDto, ShipmentDetailDto, ShipmentResponseDto,
    ShipmentSummaryDto, UpdateShipmentDto,
};
