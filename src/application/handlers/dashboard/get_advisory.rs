//! GetAdvisory - Query handler for the dashboard's air quality card.

use std::sync::Arc;

use crate::application::{HandlerError, SessionStore};
use crate::domain::air_quality::AdvisoryReport;
use crate::domain::foundation::AuthError;
use crate::ports::{AdvisoryClient, LocationService};

/// Handler for the air quality advisory at the visitor's position.
pub struct GetAdvisoryHandler {
    session: Arc<SessionStore>,
    location: Arc<dyn LocationService>,
    client: Arc<dyn AdvisoryClient>,
}

impl GetAdvisoryHandler {
    pub fn new(
        session: Arc<SessionStore>,
        location: Arc<dyn LocationService>,
        client: Arc<dyn AdvisoryClient>,
    ) -> Self {
        Self {
            session,
            location,
            client,
        }
    }

    /// Failures are returned as errors, never as an empty or zero reading.
    pub async fn handle(&self) -> Result<AdvisoryReport, HandlerError> {
        let identity = self
            .session
            .current_identity()
            .ok_or(AuthError::NotSignedIn)?;
        let position = self.location.current_position().await?;

        let report = self.client.get_advisory(&identity.id, position).await?;
        tracing::debug!(
            user_id = %identity.id,
            aqi_index = report.aqi.aqi_index,
            category = %report.aqi.category(),
            "Advisory received"
        );
        Ok(report)
    }
}
