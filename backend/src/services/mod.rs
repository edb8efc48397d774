//! Business logic services
//!
//! Services validate caller input, run the engine and record what happened.
//! Storage stays with the caller: services take the current state in and
//! hand the updated state back.

pub mod nutrition;
pub mod profile;
pub mod progression;

pub use nutrition::NutritionService;
pub use profile::ProfileService;
pub use progression::{AchievementOutcome, ProgressionService};
