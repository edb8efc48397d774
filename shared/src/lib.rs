//! NutriTrack Shared Library
//!
//! The nutrition target and accuracy engine: target calculation, accuracy
//! scoring, XP/level/streak progression, food logging arithmetic and the
//! achievement catalog, plus the types and validation shared by the backend
//! and WASM crates. Everything here is pure and synchronous.

pub mod accuracy;
pub mod achievements;
pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod nutrition;
pub mod progression;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use accuracy::*;
pub use errors::*;
pub use health_metrics::*;
pub use progression::*;

pub use achievements::{evaluate_achievements, Achievement, AchievementContext, AchievementId};
pub use models::UserProfile;
pub use nutrition::{DailySummary, DailyTargets, DailyTotals, Food, FoodEntry, MealType};
