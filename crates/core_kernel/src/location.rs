//! Farm geocoordinates
//!
//! Farm location is captured as free text in the form `"lat, lon"`
//! (e.g. `"28.6139, 77.2090"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("Invalid location '{0}': use 'lat, lon'")]
    Malformed(String),

    #[error("Latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self { latitude, longitude })
    }
}

impl FromStr for GeoPoint {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LocationError::Malformed(s.to_string());

        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| malformed())?;

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(malformed());
        }
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
