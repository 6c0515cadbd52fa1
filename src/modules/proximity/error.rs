use thiserror::Error;

/// Errors raised by the proximity-matching core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProximityError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Invalid proximity threshold: {0}")]
    InvalidThreshold(f64),

    #[error("Unsupported distance unit: {0}")]
    UnsupportedUnit(String),
}

pub type Result<T> = std::result::Result<T, ProximityError>;
