//! Request and response types exchanged with callers

use crate::accuracy::FieldAccuracy;
use crate::health_metrics::{ActivityLevel, Gender, GoalType};
use crate::nutrition::{DailySummary, Food, MealType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Profile Types
// ============================================================================

/// Partial profile update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    #[validate(range(min = 100.0, max = 250.0, message = "Height must be between 100 and 250 cm"))]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub goal_type: Option<GoalType>,
}

fn default_weight_source() -> String {
    "manual".to_string()
}

/// Weight log entry request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWeightRequest {
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub weight_kg: f64,
    #[serde(default = "default_weight_source")]
    pub source: String,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A stored weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub weight_kg: f64,
    pub source: String,
    pub recorded_at: DateTime<Utc>,
}

// ============================================================================
// Nutrition Types
// ============================================================================

/// Food log request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogFoodRequest {
    pub food_id: Uuid,
    pub meal_type: MealType,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be positive"))]
    pub quantity_g: f64,
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
}

fn default_search_limit() -> usize {
    20
}

/// Food search request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodSearchRequest {
    #[validate(length(min = 2, message = "Search query must be at least 2 characters"))]
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

/// User-created food, nutrition per 100 g
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFoodRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Calories must be positive"))]
    pub calories_per_100g: f64,
    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    pub protein_per_100g: f64,
    #[validate(range(min = 0.0, message = "Carbs cannot be negative"))]
    pub carbs_per_100g: f64,
    #[validate(range(min = 0.0, message = "Fat cannot be negative"))]
    pub fat_per_100g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Fiber cannot be negative"))]
    pub fiber_per_100g: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Sugar cannot be negative"))]
    pub sugar_per_100g: Option<f64>,
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "Serving size must be positive"))]
    pub serving_size_g: Option<f64>,
    #[serde(default)]
    pub serving_desc: Option<String>,
}

impl CreateFoodRequest {
    /// Build the stored food; user-created foods are never verified
    pub fn into_food(self, id: Uuid) -> Food {
        Food {
            id,
            name: self.name.trim().to_string(),
            brand: self.brand,
            calories_per_100g: self.calories_per_100g,
            protein_per_100g: self.protein_per_100g,
            carbs_per_100g: self.carbs_per_100g,
            fat_per_100g: self.fat_per_100g,
            fiber_per_100g: Some(self.fiber_per_100g.unwrap_or(0.0)),
            sugar_per_100g: Some(self.sugar_per_100g.unwrap_or(0.0)),
            serving_size_g: self.serving_size_g,
            serving_desc: self.serving_desc,
            is_verified: false,
        }
    }
}

/// Today's accuracy as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroAccuracyResponse {
    /// Overall accuracy rounded to a whole percent
    pub accuracy: u32,
    pub breakdown: Option<FieldAccuracy>,
}

impl MacroAccuracyResponse {
    /// Accuracy for a day; a day without a summary scores 0 with no breakdown
    pub fn from_summary(summary: Option<&DailySummary>) -> Self {
        match summary {
            Some(s) => Self {
                accuracy: s.accuracy.overall_rounded(),
                breakdown: Some(s.accuracy.per_field),
            },
            None => Self {
                accuracy: 0,
                breakdown: None,
            },
        }
    }
}
