//! Navigation domain module.
//!
//! Routes, access classes and the pure transition table the
//! `NavigationGuard` applies on every navigation attempt.

mod decision;
mod route;

pub use decision::{decide_gated, decide_ungated, sos_override, NavigationDecision, Notice};
pub use route::{Route, RouteAccess};
