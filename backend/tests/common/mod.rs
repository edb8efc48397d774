//! Common fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Word;
use fake::Fake;
use nutritrack_backend::config::AppConfig;
use nutritrack_backend::runner::Runner;
use nutritrack_shared::health_metrics::{ActivityLevel, Gender, GoalType};
use nutritrack_shared::models::UserProfile;
use nutritrack_shared::nutrition::{Food, FoodEntry, MealType};
use nutritrack_shared::types::UpdateProfileRequest;
use uuid::Uuid;

pub fn runner() -> Runner {
    Runner::new(AppConfig::default())
}

/// Run one command line and parse the response
pub fn call(runner: &Runner, command: serde_json::Value) -> serde_json::Value {
    serde_json::from_str(&runner.handle_line(&command.to_string())).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at_noon(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
}

/// A food with a generated name and the given per-100 g values
pub fn food(calories: f64, protein: f64, carbs: f64, fat: f64) -> Food {
    Food {
        id: Uuid::new_v4(),
        name: Word().fake(),
        brand: Some(CompanyName().fake()),
        calories_per_100g: calories,
        protein_per_100g: protein,
        carbs_per_100g: carbs,
        fat_per_100g: fat,
        fiber_per_100g: None,
        sugar_per_100g: None,
        serving_size_g: None,
        serving_desc: None,
        is_verified: false,
    }
}

/// An entry eating exactly `grams` of `food` at noon on `day`
pub fn entry(food: &Food, meal_type: MealType, grams: f64, day: NaiveDate) -> FoodEntry {
    FoodEntry::new(Uuid::new_v4(), food, meal_type, grams, at_noon(day))
}

/// Everything onboarding asks for: male, 180 cm, moderately active, maintaining
pub fn onboarding() -> UpdateProfileRequest {
    UpdateProfileRequest {
        date_of_birth: Some(date(1996, 6, 15)),
        gender: Some(Gender::Male),
        height_cm: Some(180.0),
        activity_level: Some(ActivityLevel::ModeratelyActive),
        goal_type: Some(GoalType::MaintainWeight),
    }
}

pub fn new_user() -> UserProfile {
    UserProfile::new(Uuid::new_v4())
}
