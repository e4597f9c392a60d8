//! Navigation decisions and the transition table behind them.

use std::fmt;

use super::{Route, RouteAccess};
use crate::domain::authorization::{AuthorizationState, GateEvaluation};
use crate::domain::sos::SosStatus;

/// User-visible message attached to a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PleaseLogin,
    VerifyEmail,
    /// The profile could not be read; the visitor may retry.
    ProfileUnavailable { reason: String },
    /// The emergency flag could not be read, so navigation stays locked.
    SosStatusUnknown,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::PleaseLogin => "Please login to continue".to_string(),
            Notice::VerifyEmail => "Please verify your email before continuing".to_string(),
            Notice::ProfileUnavailable { .. } => {
                "We couldn't load your profile. Please try again.".to_string()
            }
            Notice::SosStatusUnknown => {
                "We couldn't confirm whether an emergency is active. End SOS to continue."
                    .to_string()
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Notice::ProfileUnavailable { .. } | Notice::SosStatusUnknown
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// What to do with one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Render {
        route: Route,
        notice: Option<Notice>,
    },
    Redirect {
        to: Route,
        notice: Option<Notice>,
    },
    /// Identity not yet resolved; show an interim loading state.
    Loading,
    /// A later navigation started before this one settled.
    Superseded,
}

impl NavigationDecision {
    pub fn render(route: Route) -> Self {
        NavigationDecision::Render {
            route,
            notice: None,
        }
    }

    pub fn redirect(to: Route) -> Self {
        NavigationDecision::Redirect { to, notice: None }
    }

    fn redirect_with(to: Route, notice: Notice) -> Self {
        NavigationDecision::Redirect {
            to,
            notice: Some(notice),
        }
    }

    /// The view that ends up on screen, if any.
    pub fn target(&self) -> Option<Route> {
        match self {
            NavigationDecision::Render { route, .. } => Some(*route),
            NavigationDecision::Redirect { to, .. } => Some(*to),
            NavigationDecision::Loading | NavigationDecision::Superseded => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            NavigationDecision::Render { notice, .. }
            | NavigationDecision::Redirect { notice, .. } => notice.as_ref(),
            _ => None,
        }
    }
}

/// Emergency override, checked before anything else.
///
/// An unreadable flag locks navigation like an active one, with a notice.
/// Returns `None` when the request should proceed to the normal rules.
pub fn sos_override(route: Route, sos: SosStatus) -> Option<NavigationDecision> {
    let notice = match sos {
        SosStatus::Inactive => return None,
        SosStatus::Active => None,
        SosStatus::Unreadable => Some(Notice::SosStatusUnknown),
    };
    Some(match route {
        Route::Sos => NavigationDecision::Render {
            route: Route::Sos,
            notice,
        },
        _ => NavigationDecision::Redirect {
            to: Route::Sos,
            notice,
        },
    })
}

/// Decision for views that do not consult the profile gate.
///
/// Returns `None` for gated views.
pub fn decide_ungated(route: Route) -> Option<NavigationDecision> {
    match route.access() {
        RouteAccess::Public => Some(NavigationDecision::render(route)),
        RouteAccess::Emergency => Some(NavigationDecision::redirect(Route::Home)),
        RouteAccess::Protected | RouteAccess::Onboarding => None,
    }
}

/// Transition table for gated views.
pub fn decide_gated(route: Route, gate: &GateEvaluation) -> NavigationDecision {
    let profile_notice = gate
        .profile_error
        .clone()
        .map(|reason| Notice::ProfileUnavailable { reason });

    match (gate.state, route.access()) {
        (AuthorizationState::Anonymous, _) => {
            NavigationDecision::redirect_with(Route::Login, Notice::PleaseLogin)
        }
        (AuthorizationState::Unverified, _) => {
            NavigationDecision::redirect_with(Route::Login, Notice::VerifyEmail)
        }
        (AuthorizationState::Incomplete, RouteAccess::Onboarding) => {
            NavigationDecision::Render {
                route,
                notice: profile_notice,
            }
        }
        (AuthorizationState::Incomplete, _) => NavigationDecision::Redirect {
            to: Route::Onboarding,
            notice: profile_notice,
        },
        (AuthorizationState::Authorized, RouteAccess::Onboarding) => {
            NavigationDecision::redirect(Route::Dashboard)
        }
        (AuthorizationState::Authorized, _) => NavigationDecision::render(route),
    }
}
