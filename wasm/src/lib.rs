//! NutriTrack WASM Module
//!
//! Browser bindings for the engine so targets and progress can be previewed
//! without a round trip. Structured values cross the boundary as JSON
//! strings in the same wire format the runner uses.

use chrono::{NaiveDate, Utc};
use nutritrack_shared::accuracy::score_day as score_day_report;
use nutritrack_shared::health_metrics::{
    activity_options, calculate_bmi_result, compute_targets_on, ActivityLevel, Profile,
};
use nutritrack_shared::nutrition::{DailyTargets, DailyTotals};
use nutritrack_shared::progression;
use wasm_bindgen::prelude::*;

fn targets_json(profile_json: &str, weight_kg: Option<f64>, today: NaiveDate) -> Result<String, String> {
    let profile: Profile = serde_json::from_str(profile_json).map_err(|e| e.to_string())?;
    let targets = compute_targets_on(&profile, weight_kg, today);
    serde_json::to_string(&targets).map_err(|e| e.to_string())
}

fn day_report_json(totals_json: &str, targets_json: &str) -> Result<String, String> {
    let totals: DailyTotals = serde_json::from_str(totals_json).map_err(|e| e.to_string())?;
    let targets: DailyTargets = serde_json::from_str(targets_json).map_err(|e| e.to_string())?;
    serde_json::to_string(&score_day_report(&totals, &targets)).map_err(|e| e.to_string())
}

/// Daily calorie and macro targets for a profile
///
/// Takes a profile as JSON and returns `MacroTargets` as JSON. Age is taken
/// as of today (UTC).
#[wasm_bindgen]
pub fn compute_targets(profile_json: &str, weight_kg: Option<f64>) -> Result<String, JsValue> {
    targets_json(profile_json, weight_kg, Utc::now().date_naive()).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn score_accuracy(actual: f64, target: f64) -> f64 {
    nutritrack_shared::accuracy::score_accuracy(actual, target)
}

/// Accuracy report for a day's totals against its targets, both as JSON
#[wasm_bindgen]
pub fn score_day(totals_json: &str, targets_json: &str) -> Result<String, JsValue> {
    day_report_json(totals_json, targets_json).map_err(|e| JsValue::from_str(&e))
}

/// XP threshold for a level, as a JS number
#[wasm_bindgen]
pub fn xp_for_level(level: u32) -> f64 {
    progression::xp_for_level(level.max(1)) as f64
}

#[wasm_bindgen]
pub fn level_for_xp(total_xp: f64) -> u32 {
    progression::level_for_xp(total_xp.max(0.0) as u64)
}

/// Streak from per-day flags ordered from today backward (non-zero = logged)
#[wasm_bindgen]
pub fn compute_streak(presence: &[u8]) -> u32 {
    progression::compute_streak(presence.iter().map(|day| *day != 0))
}

/// Onboarding choices: every activity level with multiplier and description, as JSON
#[wasm_bindgen]
pub fn activity_level_options() -> Result<String, JsValue> {
    serde_json::to_string(&activity_options()).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn multiplier_for(level: &str) -> Result<f64, String> {
    level
        .parse::<ActivityLevel>()
        .map(|level| level.multiplier())
        .map_err(|e| e.to_string())
}

/// TDEE multiplier for an activity level name (case-insensitive)
#[wasm_bindgen]
pub fn activity_multiplier(level: &str) -> Result<f64, JsValue> {
    multiplier_for(level).map_err(|e| JsValue::from_str(&e))
}

/// BMI rounded to one decimal, or 0 for a non-positive height
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    calculate_bmi_result(Some(weight_kg), Some(height_cm))
        .map(|r| r.bmi)
        .unwrap_or(0.0)
}
