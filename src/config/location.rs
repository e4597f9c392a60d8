//! Fixed location configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::GeoPoint;

/// Coordinates reported by the fixed location service on headless hosts.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationConfig {
    pub lat: f64,
    pub lon: f64,
}

impl LocationConfig {
    pub fn position(&self) -> Result<GeoPoint, ValidationError> {
        GeoPoint::new(self.lat, self.lon).map_err(|e| ValidationError::InvalidLocation(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.position().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        let config = LocationConfig { lat: 95.0, lon: 0.0 };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLocation(_))
        ));
    }

    #[test]
    fn converts_to_position() {
        let config = LocationConfig {
            lat: 28.61,
            lon: 77.21,
        };
        let point = config.position().unwrap();
        assert_eq!(point.lat(), 28.61);
    }
}
