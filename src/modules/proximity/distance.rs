use std::fmt;
use std::str::FromStr;

use super::coordinate::Coordinate;
use super::error::{ProximityError, Result};

/// Mean Earth radius in miles (IUGG)
pub const EARTH_RADIUS_MILES: f64 = 3_958.761_3;

/// Mean Earth radius in kilometers (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// Service radius used when no threshold is configured
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 450.0;

/// Unit in which distances and the proximity threshold are expressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

impl DistanceUnit {
    pub fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Miles => EARTH_RADIUS_MILES,
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "miles",
            DistanceUnit::Kilometers => "km",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceUnit {
    type Err = ProximityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Ok(DistanceUnit::Kilometers)
            }
            other => Err(ProximityError::UnsupportedUnit(other.to_string())),
        }
    }
}

/// Great-circle distance between two points using the Haversine formula.
pub fn haversine_distance(a: Coordinate, b: Coordinate, unit: DistanceUnit) -> f64 {
    let lat1_rad = a.lat().to_radians();
    let lat2_rad = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    // Rounding can push h just past 1.0 for antipodal points
    let h = ((delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    unit.earth_radius() * c
}

/// Measures distances and decides whether two points are "near".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceEvaluator {
    threshold: f64,
    unit: DistanceUnit,
}

impl DistanceEvaluator {
    /// The threshold is expressed in `unit` and must be finite and non-negative.
    pub fn new(threshold: f64, unit: DistanceUnit) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ProximityError::InvalidThreshold(threshold));
        }

        Ok(Self { threshold, unit })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        haversine_distance(a, b, self.unit)
    }

    /// Inclusive: a point exactly on the threshold counts as near.
    pub fn is_within(&self, a: Coordinate, b: Coordinate) -> bool {
        self.distance(a, b) <= self.threshold
    }
}

impl Default for DistanceEvaluator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PROXIMITY_THRESHOLD,
            unit: DistanceUnit::Miles,
        }
    }
}
