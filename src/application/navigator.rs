//! Navigator: applies guard decisions to the rendered view.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::navigation::{NavigationDecision, Notice, Route};

use super::NavigationGuard;

/// What is currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Waiting for the identity provider.
    Loading,
    Showing {
        route: Route,
        notice: Option<Notice>,
    },
}

impl ViewState {
    pub fn route(&self) -> Option<Route> {
        match self {
            ViewState::Loading => None,
            ViewState::Showing { route, .. } => Some(*route),
        }
    }
}

/// Holds the rendered view and serializes navigation attempts.
///
/// Each attempt takes a generation number. A decision is committed only if
/// no later attempt started while it was being evaluated; otherwise it is
/// reported as `Superseded` and the view is left alone.
pub struct Navigator {
    guard: Arc<NavigationGuard>,
    generation: AtomicU64,
    view: Mutex<ViewState>,
}

impl Navigator {
    pub fn new(guard: Arc<NavigationGuard>) -> Self {
        Self {
            guard,
            generation: AtomicU64::new(0),
            view: Mutex::new(ViewState::Loading),
        }
    }

    pub fn current(&self) -> ViewState {
        self.view().clone()
    }

    /// Evaluates `location` and, if still current, shows the result.
    pub async fn navigate(&self, location: &str) -> NavigationDecision {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let decision = self.guard.evaluate_path(location).await;

        let mut view = self.view();
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(location, ticket, "Discarding stale navigation result");
            return NavigationDecision::Superseded;
        }
        match &decision {
            NavigationDecision::Render { route, notice } => {
                *view = ViewState::Showing {
                    route: *route,
                    notice: notice.clone(),
                };
            }
            NavigationDecision::Redirect { to, notice } => {
                tracing::info!(location, to = to.path(), "Redirecting");
                *view = ViewState::Showing {
                    route: *to,
                    notice: notice.clone(),
                };
            }
            NavigationDecision::Loading => *view = ViewState::Loading,
            NavigationDecision::Superseded => {}
        }
        decision
    }

    /// Waits for the identity provider's first report, then navigates.
    pub async fn navigate_when_ready(&self, location: &str) -> NavigationDecision {
        self.guard.session().wait_until_resolved().await;
        self.navigate(location).await
    }

    /// Re-runs the guard for the view on screen.
    ///
    /// Used after state that affects navigation changed in place, such as
    /// an SOS activation or a completed onboarding.
    pub async fn refresh(&self) -> NavigationDecision {
        let location = self.current().route().unwrap_or(Route::Home).path();
        self.navigate(location).await
    }

    fn view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
