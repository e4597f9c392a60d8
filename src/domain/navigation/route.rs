//! Views of the application and their access classes.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Every view the client can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    ForgotPassword,
    Onboarding,
    Dashboard,
    Chat,
    Profile,
    Sos,
    NotFound,
}

/// How a view is guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Rendered for anyone (SOS override still applies).
    Public,
    /// Needs an authorized visitor.
    Protected,
    /// Needs a verified identity whose profile is not yet complete.
    Onboarding,
    /// The emergency view; only meaningful while SOS is active.
    Emergency,
}

static ROUTES: Lazy<HashMap<&'static str, Route>> = Lazy::new(|| {
    Route::ALL
        .iter()
        .filter(|route| **route != Route::NotFound)
        .map(|route| (route.path(), *route))
        .collect()
});

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::ForgotPassword,
        Route::Onboarding,
        Route::Dashboard,
        Route::Chat,
        Route::Profile,
        Route::Sos,
        Route::NotFound,
    ];

    /// Resolves a requested location to a view.
    ///
    /// Query strings, fragments and trailing slashes are ignored; anything
    /// unknown is `NotFound`.
    pub fn parse(location: &str) -> Route {
        let path = location
            .split(&['?', '#'][..])
            .next()
            .unwrap_or_default()
            .trim();
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        ROUTES.get(path).copied().unwrap_or(Route::NotFound)
    }

    /// Canonical path. `NotFound` has no path of its own.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::Onboarding => "/onboarding",
            Route::Dashboard => "/dashboard",
            Route::Chat => "/chat",
            Route::Profile => "/profile",
            Route::Sos => "/sos",
            Route::NotFound => "/404",
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Home
            | Route::Login
            | Route::Register
            | Route::ForgotPassword
            | Route::NotFound => RouteAccess::Public,
            Route::Dashboard | Route::Chat | Route::Profile => RouteAccess::Protected,
            Route::Onboarding => RouteAccess::Onboarding,
            Route::Sos => RouteAccess::Emergency,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
