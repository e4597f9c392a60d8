//! Fixed-position location service.

use async_trait::async_trait;

use crate::domain::foundation::GeoPoint;
use crate::ports::{LocationError, LocationService};

/// Reports a configured position, or a configured failure.
///
/// Headless stand-in for a device GPS.
#[derive(Debug, Clone)]
pub struct FixedLocationService {
    result: Result<GeoPoint, LocationError>,
}

impl FixedLocationService {
    pub fn new(position: GeoPoint) -> Self {
        Self {
            result: Ok(position),
        }
    }

    /// A service that always fails with `error`.
    pub fn failing(error: LocationError) -> Self {
        Self { result: Err(error) }
    }

    /// The visitor refused location access.
    pub fn denied() -> Self {
        Self::failing(LocationError::PermissionDenied)
    }
}

#[async_trait]
impl LocationService for FixedLocationService {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.result.clone()
    }
}
