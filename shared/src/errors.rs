//! Error types for the NutriTrack engine
//!
//! The calculations themselves never fail; these errors describe text
//! input (enum names) rejected before it reaches them.

use thiserror::Error;

/// Engine boundary errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl EngineError {
    pub fn unknown_variant(kind: &'static str, value: &str) -> Self {
        EngineError::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
