//! Food logging arithmetic
//!
//! Foods carry nutrition per 100 g; an entry scales those values by the
//! logged quantity. Daily totals and summaries are plain folds over the
//! entries a caller hands in.

use crate::accuracy::{score_day, AccuracyReport};
use crate::errors::EngineError;
use crate::health_metrics::MacroTargets;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Meal slot an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "BREAKFAST",
            MealType::Lunch => "LUNCH",
            MealType::Dinner => "DINNER",
            MealType::Snack => "SNACK",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BREAKFAST" => Ok(MealType::Breakfast),
            "LUNCH" => Ok(MealType::Lunch),
            "DINNER" => Ok(MealType::Dinner),
            "SNACK" => Ok(MealType::Snack),
            _ => Err(EngineError::unknown_variant("meal type", s)),
        }
    }
}

/// Food database item, nutrition per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
    #[serde(default)]
    pub fiber_per_100g: Option<f64>,
    #[serde(default)]
    pub sugar_per_100g: Option<f64>,
    #[serde(default)]
    pub serving_size_g: Option<f64>,
    #[serde(default)]
    pub serving_desc: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Calories and macros for one logged portion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortionNutrition {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale a food's per-100 g values to `quantity_g`, rounded to 2 decimals
pub fn portion_nutrition(food: &Food, quantity_g: f64) -> PortionNutrition {
    let multiplier = quantity_g / 100.0;
    PortionNutrition {
        calories: round_to_hundredths(food.calories_per_100g * multiplier),
        protein_g: round_to_hundredths(food.protein_per_100g * multiplier),
        carbs_g: round_to_hundredths(food.carbs_per_100g * multiplier),
        fat_g: round_to_hundredths(food.fat_per_100g * multiplier),
    }
}

/// Portion nutrition including fiber and sugar, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionBreakdown {
    pub quantity: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

/// Full breakdown for `quantity_g` of a food; missing fiber or sugar counts as 0
pub fn nutrition_breakdown(food: &Food, quantity_g: f64) -> NutritionBreakdown {
    let multiplier = quantity_g / 100.0;
    let core = portion_nutrition(food, quantity_g);
    NutritionBreakdown {
        quantity: quantity_g,
        calories: core.calories,
        protein: core.protein_g,
        carbs: core.carbs_g,
        fat: core.fat_g,
        fiber: round_to_hundredths(food.fiber_per_100g.unwrap_or(0.0) * multiplier),
        sugar: round_to_hundredths(food.sugar_per_100g.unwrap_or(0.0) * multiplier),
    }
}

/// Default portion offered when logging a food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedServing {
    pub size: f64,
    pub description: String,
}

impl Food {
    /// Stored serving, or 100 g when the food has none
    pub fn suggested_serving(&self) -> SuggestedServing {
        let size = self.serving_size_g.filter(|g| *g > 0.0).unwrap_or(100.0);
        let description = self
            .serving_desc
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("{size}g"));
        SuggestedServing { size, description }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(needle))
    }
}

/// Foods whose name or brand contains `query` (case-insensitive)
///
/// Verified foods come first, then alphabetical by name. At most `limit`
/// results are returned.
pub fn search_foods<'a>(foods: &'a [Food], query: &str, limit: usize) -> Vec<&'a Food> {
    let needle = query.trim().to_lowercase();
    let mut hits: Vec<&Food> = foods.iter().filter(|f| f.matches(&needle)).collect();
    hits.sort_by(|a, b| {
        b.is_verified
            .cmp(&a.is_verified)
            .then_with(|| a.name.cmp(&b.name))
    });
    hits.truncate(limit);
    hits
}

/// Distinct foods from the most recent entries, newest first
///
/// Entries whose food is not in `foods` are skipped.
pub fn recent_foods<'a>(entries: &[FoodEntry], foods: &'a [Food], limit: usize) -> Vec<&'a Food> {
    let by_id: HashMap<Uuid, &Food> = foods.iter().map(|f| (f.id, f)).collect();
    let mut ordered: Vec<&FoodEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .filter(|e| seen.insert(e.food_id))
        .filter_map(|e| by_id.get(&e.food_id).copied())
        .take(limit)
        .collect()
}

/// A food with the number of entries that reference it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularFood {
    #[serde(flatten)]
    pub food: Food,
    pub usage_count: u32,
}

/// Most frequently logged foods, ties broken by name
pub fn popular_foods(entries: &[FoodEntry], foods: &[Food], limit: usize) -> Vec<PopularFood> {
    let mut counts: HashMap<Uuid, u32> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.food_id).or_default() += 1;
    }

    let mut popular: Vec<PopularFood> = foods
        .iter()
        .filter_map(|food| {
            counts.get(&food.id).map(|&usage_count| PopularFood {
                food: food.clone(),
                usage_count,
            })
        })
        .collect();
    popular.sort_by(|a, b| {
        b.usage_count
            .cmp(&a.usage_count)
            .then_with(|| a.food.name.cmp(&b.food.name))
    });
    popular.truncate(limit);
    popular
}

/// A logged portion of food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub food_id: Uuid,
    pub meal_type: MealType,
    pub quantity_g: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub logged_at: DateTime<Utc>,
}

impl FoodEntry {
    /// Build an entry, computing its nutrition from the food
    pub fn new(
        id: Uuid,
        food: &Food,
        meal_type: MealType,
        quantity_g: f64,
        logged_at: DateTime<Utc>,
    ) -> Self {
        let nutrition = portion_nutrition(food, quantity_g);
        Self {
            id,
            food_id: food.id,
            meal_type,
            quantity_g,
            calories: nutrition.calories,
            protein_g: nutrition.protein_g,
            carbs_g: nutrition.carbs_g,
            fat_g: nutrition.fat_g,
            logged_at,
        }
    }

    pub fn logged_on(&self) -> NaiveDate {
        self.logged_at.date_naive()
    }
}

/// Summed intake for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl DailyTotals {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a FoodEntry>,
    {
        entries.into_iter().fold(Self::default(), |acc, e| Self {
            calories: acc.calories + e.calories,
            protein_g: acc.protein_g + e.protein_g,
            carbs_g: acc.carbs_g + e.carbs_g,
            fat_g: acc.fat_g + e.fat_g,
        })
    }
}

/// Targets a day is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl Default for DailyTargets {
    /// Fallback for users whose profile has no computed targets yet
    fn default() -> Self {
        Self {
            calories: 2000,
            protein_g: 120,
            carbs_g: 200,
            fat_g: 70,
        }
    }
}

impl From<&MacroTargets> for DailyTargets {
    fn from(t: &MacroTargets) -> Self {
        Self {
            calories: t.daily_calories,
            protein_g: t.protein_g,
            carbs_g: t.carbs_g,
            fat_g: t.fat_g,
        }
    }
}

/// Entries grouped by meal, newest first within each group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealEntries {
    pub breakfast: Vec<FoodEntry>,
    pub lunch: Vec<FoodEntry>,
    pub dinner: Vec<FoodEntry>,
    pub snack: Vec<FoodEntry>,
}

impl MealEntries {
    fn slot_mut(&mut self, meal_type: MealType) -> &mut Vec<FoodEntry> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snack => &mut self.snack,
        }
    }

    pub fn len(&self) -> usize {
        self.breakfast.len() + self.lunch.len() + self.dinner.len() + self.snack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One day's intake, targets and accuracy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub totals: DailyTotals,
    pub targets: DailyTargets,
    pub accuracy: AccuracyReport,
    pub entries: MealEntries,
    pub logged_meals: u32,
}

impl DailySummary {
    /// Summarize `entries` that fall on `date`; entries on other days are ignored
    pub fn build(date: NaiveDate, entries: &[FoodEntry], targets: DailyTargets) -> Self {
        let mut day: Vec<&FoodEntry> = entries.iter().filter(|e| e.logged_on() == date).collect();
        day.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));

        let totals = DailyTotals::from_entries(day.iter().copied());
        let mut grouped = MealEntries::default();
        for entry in &day {
            grouped.slot_mut(entry.meal_type).push((*entry).clone());
        }

        Self {
            date,
            totals,
            targets,
            accuracy: score_day(&totals, &targets),
            logged_meals: day.len() as u32,
            entries: grouped,
        }
    }
}

/// Number of distinct foods across `entries`
pub fn distinct_food_count(entries: &[FoodEntry]) -> usize {
    entries.iter().map(|e| e.food_id).collect::<HashSet<_>>().len()
}
