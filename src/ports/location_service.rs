//! Device location port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::GeoPoint;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out waiting for a position fix")]
    Timeout,
}

/// Current position of the device.
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}
