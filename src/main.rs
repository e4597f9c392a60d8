//! `respi-guard` - prints the navigation decision for each path.
//!
//! Runs the guard against the durable local store with an anonymous
//! session, which shows at a glance whether an SOS session is locking
//! navigation on this device.
//!
//! ```text
//! respi-guard / /dashboard /sos
//! respi-guard --end-sos
//! ```

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use respi_guard::adapters::{
    AnonymousIdentityProvider, FileKeyValueStore, LoggingSpeechService, OfflineProfileStore,
};
use respi_guard::application::handlers::EndSosHandler;
use respi_guard::application::{NavigationGuard, ProfileGate, SessionStore, SosChannel};
use respi_guard::config::{AppConfig, ConfigError, LoggingConfig};
use respi_guard::domain::navigation::NavigationDecision;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

fn describe(decision: &NavigationDecision) -> String {
    let text = match decision {
        NavigationDecision::Render { route, .. } => format!("render {}", route.path()),
        NavigationDecision::Redirect { to, .. } => format!("redirect {}", to.path()),
        NavigationDecision::Loading => "loading".to_string(),
        NavigationDecision::Superseded => "superseded".to_string(),
    };
    match decision.notice() {
        Some(notice) => format!("{} ({})", text, notice),
        None => text,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config.logging);

    let store = Arc::new(FileKeyValueStore::new(&config.storage.path));
    let sos = Arc::new(SosChannel::with_key(store, config.storage.sos_key.clone()));

    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.first().map(String::as_str) == Some("--end-sos") {
        EndSosHandler::new(sos.clone(), Arc::new(LoggingSpeechService::new())).handle()?;
        println!("SOS session ended");
        paths.remove(0);
    }
    if paths.is_empty() {
        paths.push("/".to_string());
    }

    let session = Arc::new(SessionStore::new(Arc::new(AnonymousIdentityProvider::new())));
    let _identity_events = session.attach();
    session.wait_until_resolved().await;
    let guard = NavigationGuard::new(
        session,
        ProfileGate::new(Arc::new(OfflineProfileStore::new())),
        sos.clone(),
    );

    match sos.current() {
        Ok(Some(active)) if active.active => tracing::warn!(
            since = %active.timestamp.as_datetime(),
            status = %active.data.status,
            "SOS session is active on this device"
        ),
        Ok(_) => {}
        Err(e) => tracing::error!("SOS session unreadable, navigation stays locked: {}", e),
    }

    for path in &paths {
        let decision = guard.evaluate_path(path).await;
        println!("{} -> {}", path, describe(&decision));
    }
    Ok(())
}
