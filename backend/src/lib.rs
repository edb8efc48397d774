//! NutriTrack Backend Library
//!
//! Service layer over the shared engine plus the JSON-lines runner used by
//! the `nutritrack-engine` binary. Exposed as a library for tests.

pub mod config;
pub mod error;
pub mod runner;
pub mod services;
