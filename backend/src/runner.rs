//! JSON-lines command runner
//!
//! Each input line is one command object tagged by `op`. Each command gets
//! exactly one output line: `{"ok": ...}` on success or
//! `{"error": {"code": ..., "message": ...}}` on failure. A bad line never
//! stops the run.

use crate::config::AppConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::services::{AchievementOutcome, NutritionService, ProfileService, ProgressionService};
use chrono::{DateTime, NaiveDate, Utc};
use nutritrack_shared::accuracy::{score_accuracy, score_day};
use nutritrack_shared::achievements::{catalog, AchievementId};
use nutritrack_shared::health_metrics::{calculate_bmi_result, compute_targets_on, Profile};
use nutritrack_shared::models::UserProfile;
use nutritrack_shared::nutrition::{DailyTargets, DailyTotals, Food, FoodEntry};
use nutritrack_shared::progression::{level_for_xp, streak_from_days, xp_for_level, LeaderboardUser};
use nutritrack_shared::types::{
    CreateFoodRequest, FoodSearchRequest, LogFoodRequest, LogWeightRequest, UpdateProfileRequest,
    WeightEntry,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use uuid::Uuid;

fn default_leaderboard_limit() -> usize {
    10
}

fn default_food_list_limit() -> usize {
    10
}

fn default_search_limit() -> usize {
    20
}

fn default_history_days() -> u32 {
    30
}

/// A single engine command
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    ComputeTargets {
        profile: Profile,
        #[serde(default)]
        weight_kg: Option<f64>,
        #[serde(default)]
        today: Option<NaiveDate>,
    },
    UpdateProfile {
        user: UserProfile,
        update: UpdateProfileRequest,
        #[serde(default)]
        today: Option<NaiveDate>,
    },
    RecordWeight {
        user: UserProfile,
        weight: LogWeightRequest,
        #[serde(default)]
        now: Option<DateTime<Utc>>,
    },
    Bmi {
        #[serde(default)]
        weight_kg: Option<f64>,
        #[serde(default)]
        height_cm: Option<f64>,
    },
    ScoreAccuracy {
        actual: f64,
        target: f64,
    },
    ScoreDay {
        totals: DailyTotals,
        targets: DailyTargets,
    },
    LogFood {
        food: Food,
        request: LogFoodRequest,
        #[serde(default)]
        now: Option<DateTime<Utc>>,
    },
    DailySummary {
        user: UserProfile,
        #[serde(default)]
        entries: Vec<FoodEntry>,
        date: NaiveDate,
    },
    MacroAccuracy {
        user: UserProfile,
        #[serde(default)]
        entries: Vec<FoodEntry>,
        date: NaiveDate,
    },
    History {
        user: UserProfile,
        #[serde(default)]
        entries: Vec<FoodEntry>,
        #[serde(default = "default_history_days")]
        days: u32,
        #[serde(default)]
        today: Option<NaiveDate>,
    },
    SearchFoods {
        foods: Vec<Food>,
        query: String,
        #[serde(default = "default_search_limit")]
        limit: usize,
    },
    CreateFood {
        food: CreateFoodRequest,
    },
    NutritionBreakdown {
        food: Food,
        quantity_g: f64,
    },
    SuggestedServing {
        food: Food,
    },
    RecentFoods {
        #[serde(default)]
        entries: Vec<FoodEntry>,
        foods: Vec<Food>,
        #[serde(default = "default_food_list_limit")]
        limit: usize,
    },
    PopularFoods {
        #[serde(default)]
        entries: Vec<FoodEntry>,
        foods: Vec<Food>,
        #[serde(default = "default_food_list_limit")]
        limit: usize,
    },
    XpForLevel {
        level: u32,
    },
    LevelForXp {
        xp: u64,
    },
    Streak {
        logged_days: Vec<NaiveDate>,
        #[serde(default)]
        today: Option<NaiveDate>,
    },
    UserStats {
        user: UserProfile,
        #[serde(default)]
        entries: Vec<FoodEntry>,
        #[serde(default)]
        achievement_count: u32,
        #[serde(default)]
        today: Option<NaiveDate>,
    },
    CheckAchievements {
        user: UserProfile,
        #[serde(default)]
        entries: Vec<FoodEntry>,
        #[serde(default)]
        earned: HashSet<AchievementId>,
        #[serde(default)]
        weight_goal_reached: bool,
        #[serde(default)]
        today: Option<NaiveDate>,
    },
    Leaderboard {
        users: Vec<LeaderboardUser>,
        current_user_id: Uuid,
        #[serde(default = "default_leaderboard_limit")]
        limit: usize,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ComputeTargets { .. } => "compute_targets",
            Command::UpdateProfile { .. } => "update_profile",
            Command::RecordWeight { .. } => "record_weight",
            Command::Bmi { .. } => "bmi",
            Command::ScoreAccuracy { .. } => "score_accuracy",
            Command::ScoreDay { .. } => "score_day",
            Command::LogFood { .. } => "log_food",
            Command::DailySummary { .. } => "daily_summary",
            Command::MacroAccuracy { .. } => "macro_accuracy",
            Command::History { .. } => "history",
            Command::SearchFoods { .. } => "search_foods",
            Command::CreateFood { .. } => "create_food",
            Command::NutritionBreakdown { .. } => "nutrition_breakdown",
            Command::SuggestedServing { .. } => "suggested_serving",
            Command::RecentFoods { .. } => "recent_foods",
            Command::PopularFoods { .. } => "popular_foods",
            Command::XpForLevel { .. } => "xp_for_level",
            Command::LevelForXp { .. } => "level_for_xp",
            Command::Streak { .. } => "streak",
            Command::UserStats { .. } => "user_stats",
            Command::CheckAchievements { .. } => "check_achievements",
            Command::Leaderboard { .. } => "leaderboard",
        }
    }
}

#[derive(Debug, Serialize)]
struct WeightRecorded {
    user: UserProfile,
    entry: WeightEntry,
}

#[derive(Debug, Serialize)]
struct AchievementCheck {
    #[serde(flatten)]
    outcome: AchievementOutcome,
    user: UserProfile,
    /// Every earned achievement, in catalog order
    earned: Vec<AchievementId>,
}

/// Counts from one run over an input stream
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

pub struct Runner {
    config: AppConfig,
}

impl Runner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run one command
    pub fn execute(&self, command: Command) -> ServiceResult<Value> {
        let engine = &self.config.engine;

        match command {
            Command::ComputeTargets { profile, weight_kg, today } => {
                to_value(compute_targets_on(&profile, weight_kg, resolve_today(today)))
            }
            Command::UpdateProfile { user, update, today } => {
                to_value(ProfileService::update_profile(&user, update, resolve_today(today))?)
            }
            Command::RecordWeight { user, weight, now } => {
                let (user, entry) = ProfileService::record_weight(&user, weight, resolve_now(now))?;
                to_value(WeightRecorded { user, entry })
            }
            Command::Bmi { weight_kg, height_cm } => to_value(calculate_bmi_result(weight_kg, height_cm)),
            Command::ScoreAccuracy { actual, target } => Ok(json!(score_accuracy(actual, target))),
            Command::ScoreDay { totals, targets } => to_value(score_day(&totals, &targets)),
            Command::LogFood { food, request, now } => {
                to_value(NutritionService::log_food(&food, request, resolve_now(now))?)
            }
            Command::DailySummary { user, entries, date } => to_value(
                NutritionService::daily_summary(&user, &entries, date, engine.default_targets),
            ),
            Command::MacroAccuracy { user, entries, date } => {
                let summary = entries
                    .iter()
                    .any(|e| e.logged_on() == date)
                    .then(|| NutritionService::daily_summary(&user, &entries, date, engine.default_targets));
                to_value(NutritionService::macro_accuracy(summary.as_ref()))
            }
            Command::History { user, entries, days, today } => to_value(NutritionService::history(
                &user,
                &entries,
                resolve_today(today),
                days,
                engine.default_targets,
            )),
            Command::SearchFoods { foods, query, limit } => {
                to_value(NutritionService::search_foods(&foods, FoodSearchRequest { query, limit })?)
            }
            Command::CreateFood { food } => to_value(NutritionService::create_food(food)?),
            Command::NutritionBreakdown { food, quantity_g } => {
                to_value(NutritionService::nutrition_breakdown(&food, quantity_g)?)
            }
            Command::SuggestedServing { food } => to_value(NutritionService::suggested_serving(&food)),
            Command::RecentFoods { entries, foods, limit } => {
                to_value(NutritionService::recent_foods(&entries, &foods, limit))
            }
            Command::PopularFoods { entries, foods, limit } => {
                to_value(NutritionService::popular_foods(&entries, &foods, limit))
            }
            Command::XpForLevel { level } => {
                if level == 0 {
                    return Err(ServiceError::Validation("Level must be at least 1".to_string()));
                }
                Ok(json!(xp_for_level(level)))
            }
            Command::LevelForXp { xp } => Ok(json!(level_for_xp(xp))),
            Command::Streak { logged_days, today } => {
                let days: HashSet<NaiveDate> = logged_days.into_iter().collect();
                Ok(json!(streak_from_days(&days, resolve_today(today), engine.streak_lookback_days)))
            }
            Command::UserStats { user, entries, achievement_count, today } => to_value(
                ProgressionService::user_stats(&user, &entries, achievement_count, resolve_today(today), engine),
            ),
            Command::CheckAchievements {
                mut user,
                entries,
                mut earned,
                weight_goal_reached,
                today,
            } => {
                let ctx = ProgressionService::build_context(
                    &user,
                    &entries,
                    resolve_today(today),
                    weight_goal_reached,
                    engine,
                );
                let outcome = ProgressionService::check_achievements(&mut user, ctx, &mut earned);
                let earned = catalog()
                    .iter()
                    .map(|a| a.id)
                    .filter(|id| earned.contains(id))
                    .collect();
                to_value(AchievementCheck { outcome, user, earned })
            }
            Command::Leaderboard { users, current_user_id, limit } => {
                to_value(ProgressionService::leaderboard(&users, current_user_id, limit))
            }
        }
    }

    /// Parse and execute one input line
    pub fn respond(&self, line: &str) -> ServiceResult<Value> {
        let command = serde_json::from_str::<Command>(line)
            .map_err(|e| ServiceError::BadRequest(format!("Malformed command: {}", e)))?;
        let op = command.name();
        debug!(op, "Executing command");
        self.execute(command).map_err(|err| {
            warn!(op, code = err.code(), error = %err, "Command failed");
            err
        })
    }

    /// Handle one input line, returning the output line
    pub fn handle_line(&self, line: &str) -> String {
        render(&self.respond(line))
    }

    /// Process every non-blank line of `input`, writing one response per line
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let result = self.respond(&line);
            summary.processed += 1;
            if result.is_err() {
                summary.failed += 1;
            }
            writeln!(output, "{}", render(&result))?;
            output.flush()?;
        }

        info!(processed = summary.processed, failed = summary.failed, "Input exhausted");
        Ok(summary)
    }
}

fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().date_naive())
}

fn resolve_now(now: Option<DateTime<Utc>>) -> DateTime<Utc> {
    now.unwrap_or_else(Utc::now)
}

fn render(result: &ServiceResult<Value>) -> String {
    let body = match result {
        Ok(value) => json!({ "ok": value }),
        Err(err) => json!(err.to_response()),
    };
    body.to_string()
}

fn to_value<T: Serialize>(value: T) -> ServiceResult<Value> {
    serde_json::to_value(value).map_err(|e| ServiceError::Internal(e.into()))
}
