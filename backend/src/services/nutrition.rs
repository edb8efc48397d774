//! Nutrition service - food logging and daily summaries

use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use nutritrack_shared::models::UserProfile;
use nutritrack_shared::nutrition::{
    nutrition_breakdown, popular_foods, recent_foods, search_foods, DailySummary, DailyTargets,
    Food, FoodEntry, NutritionBreakdown, PopularFood, SuggestedServing,
};
use nutritrack_shared::types::{CreateFoodRequest, FoodSearchRequest, LogFoodRequest, MacroAccuracyResponse};
use nutritrack_shared::validation::validate_quantity_g;
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// Nutrition service
pub struct NutritionService;

impl NutritionService {
    /// Log a portion of `food`
    ///
    /// `food` must be the item `req.food_id` refers to.
    pub fn log_food(food: &Food, req: LogFoodRequest, now: DateTime<Utc>) -> ServiceResult<FoodEntry> {
        req.validate()?;
        validate_quantity_g(req.quantity_g).map_err(ServiceError::Validation)?;

        if food.id != req.food_id {
            return Err(ServiceError::NotFound(format!("Food {} not found", req.food_id)));
        }

        let entry = FoodEntry::new(
            Uuid::new_v4(),
            food,
            req.meal_type,
            req.quantity_g,
            req.logged_at.unwrap_or(now),
        );

        metrics::counter!("nutritrack_food_entries_total", "meal" => req.meal_type.as_str())
            .increment(1);
        info!(
            food_id = %food.id,
            meal = %req.meal_type,
            quantity_g = req.quantity_g,
            calories = entry.calories,
            "Logged food entry"
        );

        Ok(entry)
    }

    /// Search the food catalog by name or brand
    pub fn search_foods(foods: &[Food], req: FoodSearchRequest) -> ServiceResult<Vec<Food>> {
        req.validate()?;
        let hits: Vec<Food> = search_foods(foods, &req.query, req.limit)
            .into_iter()
            .cloned()
            .collect();
        debug!(query = req.query.as_str(), results = hits.len(), "Searched foods");
        Ok(hits)
    }

    /// Validate and build a user-created food
    pub fn create_food(req: CreateFoodRequest) -> ServiceResult<Food> {
        req.validate()?;
        if req.name.trim().is_empty() {
            return Err(ServiceError::Validation("Name is required".to_string()));
        }

        let food = req.into_food(Uuid::new_v4());
        metrics::counter!("nutritrack_custom_foods_total").increment(1);
        info!(food_id = %food.id, name = food.name.as_str(), "Created custom food");
        Ok(food)
    }

    /// Nutrition of `quantity_g` of a food, fiber and sugar included
    pub fn nutrition_breakdown(food: &Food, quantity_g: f64) -> ServiceResult<NutritionBreakdown> {
        validate_quantity_g(quantity_g).map_err(ServiceError::Validation)?;
        Ok(nutrition_breakdown(food, quantity_g))
    }

    pub fn suggested_serving(food: &Food) -> SuggestedServing {
        food.suggested_serving()
    }

    /// Foods the user logged most recently, without repeats
    pub fn recent_foods(entries: &[FoodEntry], foods: &[Food], limit: usize) -> Vec<Food> {
        recent_foods(entries, foods, limit).into_iter().cloned().collect()
    }

    /// Foods ranked by how often they were logged
    pub fn popular_foods(entries: &[FoodEntry], foods: &[Food], limit: usize) -> Vec<PopularFood> {
        popular_foods(entries, foods, limit)
    }

    /// Remove an entry by id, returning it
    pub fn delete_entry(entries: &mut Vec<FoodEntry>, entry_id: Uuid) -> ServiceResult<FoodEntry> {
        let index = entries
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Food entry {} not found", entry_id)))?;

        debug!(entry_id = %entry_id, "Deleted food entry");
        Ok(entries.remove(index))
    }

    /// Summary for one day, scored against the user's targets or `defaults`
    pub fn daily_summary(
        user: &UserProfile,
        entries: &[FoodEntry],
        date: NaiveDate,
        defaults: DailyTargets,
    ) -> DailySummary {
        let summary = DailySummary::build(date, entries, user.daily_targets(defaults));
        debug!(
            user_id = %user.id,
            %date,
            logged_meals = summary.logged_meals,
            accuracy = summary.accuracy.overall,
            "Built daily summary"
        );
        summary
    }

    /// Accuracy for a day; `None` means nothing was logged
    pub fn macro_accuracy(summary: Option<&DailySummary>) -> MacroAccuracyResponse {
        MacroAccuracyResponse::from_summary(summary)
    }

    /// Summaries of the logged days within the last `days` days, newest first
    pub fn history(
        user: &UserProfile,
        entries: &[FoodEntry],
        today: NaiveDate,
        days: u32,
        defaults: DailyTargets,
    ) -> Vec<DailySummary> {
        let earliest = today
            .checked_sub_signed(Duration::days(i64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        let logged: BTreeSet<NaiveDate> = entries
            .iter()
            .map(FoodEntry::logged_on)
            .filter(|d| *d >= earliest && *d <= today)
            .collect();

        logged
            .into_iter()
            .rev()
            .map(|date| DailySummary::build(date, entries, user.daily_targets(defaults)))
            .collect()
    }
}
