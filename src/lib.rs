//! Respi-Guard - session, navigation and emergency-mode core
//!
//! This crate owns the client-side authorization state machine of the
//! Respi-Guard respiratory health assistant: who the visitor is, whether
//! their profile lets them past onboarding, and the SOS override that
//! locks every view until the emergency is ended. Air quality, advisories,
//! chat answers and alert delivery belong to the backend and are reached
//! through the ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
