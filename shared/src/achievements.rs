//! Achievement catalog and unlock rules
//!
//! The catalog is a fixed table built once on first use. Evaluation is a
//! pure check of a user's current numbers against each unearned
//! achievement's condition; awarding XP is left to the caller.

use crate::progression::compute_streak;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    WelcomeAboard,
    FirstSteps,
    StreakStarter,
    WeekWarrior,
    ProteinPro,
    MacroMaster,
    ConsistencyKing,
    GoalGetter,
    VarietyExplorer,
    LevelUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementCategory {
    Milestone,
    Streak,
    MacroAccuracy,
    Consistency,
}

/// What has to be true for an achievement to unlock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementCondition {
    Signup,
    FirstMeal,
    DailyStreak { value: u32 },
    ProteinStreak { value: u32 },
    MacroAccuracy { value: f64 },
    WeightGoal,
    FoodVariety { value: u32 },
    UserLevel { value: u32 },
}

impl AchievementCondition {
    pub fn is_met(&self, ctx: &AchievementContext) -> bool {
        match *self {
            AchievementCondition::Signup => ctx.signed_up,
            AchievementCondition::FirstMeal => ctx.total_entries >= 1,
            AchievementCondition::DailyStreak { value } => ctx.current_streak >= value,
            AchievementCondition::ProteinStreak { value } => ctx.protein_streak >= value,
            AchievementCondition::MacroAccuracy { value } => {
                ctx.macro_accuracy_today.is_some_and(|a| a >= value)
            }
            AchievementCondition::WeightGoal => ctx.weight_goal_reached,
            AchievementCondition::FoodVariety { value } => ctx.distinct_foods >= value,
            AchievementCondition::UserLevel { value } => ctx.level >= value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: AchievementCategory,
    /// XP granted on unlock
    pub points: u64,
    pub condition: AchievementCondition,
}

/// A user's numbers as of the check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementContext {
    #[serde(default)]
    pub signed_up: bool,
    #[serde(default)]
    pub total_entries: u32,
    #[serde(default)]
    pub current_streak: u32,
    /// Consecutive days, ending today, on which the protein target was hit
    #[serde(default)]
    pub protein_streak: u32,
    #[serde(default)]
    pub macro_accuracy_today: Option<f64>,
    #[serde(default)]
    pub weight_goal_reached: bool,
    #[serde(default)]
    pub distinct_foods: u32,
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}

impl Default for AchievementContext {
    fn default() -> Self {
        Self {
            signed_up: false,
            total_entries: 0,
            current_streak: 0,
            protein_streak: 0,
            macro_accuracy_today: None,
            weight_goal_reached: false,
            distinct_foods: 0,
            level: default_level(),
        }
    }
}

fn achievement(
    id: AchievementId,
    name: &str,
    description: &str,
    icon: &str,
    category: AchievementCategory,
    points: u64,
    condition: AchievementCondition,
) -> Achievement {
    Achievement {
        id,
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category,
        points,
        condition,
    }
}

static CATALOG: Lazy<Vec<Achievement>> = Lazy::new(|| {
    use AchievementCategory::*;
    use AchievementCondition as C;

    vec![
        achievement(
            AchievementId::WelcomeAboard,
            "Welcome Aboard",
            "Welcome to NutriTrack! Your journey to better nutrition starts here.",
            "🎉",
            Milestone,
            100,
            C::Signup,
        ),
        achievement(
            AchievementId::FirstSteps,
            "First Steps",
            "Logged your first meal. Great start!",
            "🥗",
            Milestone,
            50,
            C::FirstMeal,
        ),
        achievement(
            AchievementId::StreakStarter,
            "Streak Starter",
            "Logged meals for 3 days in a row.",
            "🔥",
            Streak,
            150,
            C::DailyStreak { value: 3 },
        ),
        achievement(
            AchievementId::WeekWarrior,
            "Week Warrior",
            "Completed a full week of meal logging!",
            "🏆",
            Streak,
            300,
            C::DailyStreak { value: 7 },
        ),
        achievement(
            AchievementId::ProteinPro,
            "Protein Pro",
            "Hit your protein target 5 days in a row.",
            "💪",
            MacroAccuracy,
            200,
            C::ProteinStreak { value: 5 },
        ),
        achievement(
            AchievementId::MacroMaster,
            "Macro Master",
            "Achieved 90%+ macro accuracy for a full day.",
            "🎯",
            MacroAccuracy,
            250,
            C::MacroAccuracy { value: 90.0 },
        ),
        achievement(
            AchievementId::ConsistencyKing,
            "Consistency King",
            "Logged meals for 30 days straight!",
            "👑",
            Consistency,
            500,
            C::DailyStreak { value: 30 },
        ),
        achievement(
            AchievementId::GoalGetter,
            "Goal Getter",
            "Reached your weight loss/gain goal!",
            "🌟",
            Milestone,
            1000,
            C::WeightGoal,
        ),
        achievement(
            AchievementId::VarietyExplorer,
            "Variety Explorer",
            "Logged 50 different foods.",
            "🌈",
            Milestone,
            300,
            C::FoodVariety { value: 50 },
        ),
        achievement(
            AchievementId::LevelUp,
            "Level Up",
            "Reached level 5 in your nutrition journey!",
            "📈",
            Milestone,
            400,
            C::UserLevel { value: 5 },
        ),
    ]
});

/// Every achievement, in display order
pub fn catalog() -> &'static [Achievement] {
    &CATALOG
}

pub fn find_achievement(id: AchievementId) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.id == id)
}

/// Achievements whose condition holds and that are not yet earned
pub fn evaluate_achievements(
    ctx: &AchievementContext,
    earned: &HashSet<AchievementId>,
) -> Vec<&'static Achievement> {
    CATALOG
        .iter()
        .filter(|a| !earned.contains(&a.id) && a.condition.is_met(ctx))
        .collect()
}

/// Consecutive days with protein accuracy at or above `threshold`
///
/// `daily_protein_accuracy` is ordered from today backward; a day with no
/// summary (`None`) breaks the streak.
pub fn protein_hit_streak<I>(daily_protein_accuracy: I, threshold: f64) -> u32
where
    I: IntoIterator<Item = Option<f64>>,
{
    compute_streak(
        daily_protein_accuracy
            .into_iter()
            .map(|a| a.is_some_and(|a| a >= threshold)),
    )
}
