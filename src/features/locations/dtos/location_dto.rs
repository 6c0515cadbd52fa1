use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::locations::models::Location;

/// Query parameters for searching locations
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LocationSearchQuery {
    /// Case-insensitive match on city or region, or a zip prefix
    #[param(example = "chicago")]
    pub search: Option<String>,
}

impl LocationSearchQuery {
    /// The trimmed search term, if any
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    #[schema(example = 60601)]
    pub zip: i32,
    #[schema(example = "Chicago")]
    pub city: String,
    #[schema(example = "Illinois")]
    pub region: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<Location> for LocationResponseDto {
    fn from(location: Location) -> Self {
        Self {
            zip: location.zip,
            city: location.city,
            region: location.region,
            lat: location.lat,
            lng: location.lng,
        }
    }
}
