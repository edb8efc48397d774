//! Data models for the NutriTrack engine

use crate::health_metrics::{ActivityLevel, Gender, GoalType, MacroTargets, Profile};
use crate::nutrition::DailyTargets;
use crate::progression::ProgressionState;
use crate::types::UpdateProfileRequest;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user profile as the caller persists it
///
/// Every physiological field is optional until onboarding completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub goal_type: Option<GoalType>,
    #[serde(default)]
    pub latest_weight_kg: Option<f64>,
    #[serde(default)]
    pub targets: Option<MacroTargets>,
    #[serde(default)]
    pub progression: ProgressionState,
}

impl UserProfile {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            gender: None,
            height_cm: None,
            date_of_birth: None,
            activity_level: None,
            goal_type: None,
            latest_weight_kg: None,
            targets: None,
            progression: ProgressionState::default(),
        }
    }

    /// The calculator input, once every required field is present
    pub fn complete_profile(&self) -> Option<Profile> {
        Some(Profile {
            gender: self.gender?,
            height_cm: self.height_cm?,
            date_of_birth: self.date_of_birth?,
            activity_level: self.activity_level?,
            goal_type: self.goal_type?,
            weight_kg: self.latest_weight_kg,
        })
    }

    /// Overlay the fields present in `update`
    pub fn merged_with(&self, update: &UpdateProfileRequest) -> Self {
        Self {
            gender: update.gender.or(self.gender),
            height_cm: update.height_cm.or(self.height_cm),
            date_of_birth: update.date_of_birth.or(self.date_of_birth),
            activity_level: update.activity_level.or(self.activity_level),
            goal_type: update.goal_type.or(self.goal_type),
            ..self.clone()
        }
    }

    /// Targets to score against, falling back to `fallback` before onboarding
    pub fn daily_targets(&self, fallback: DailyTargets) -> DailyTargets {
        self.targets
            .as_ref()
            .map(DailyTargets::from)
            .unwrap_or(fallback)
    }
}
