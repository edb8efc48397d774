//! Input validation functions
//!
//! The calculators accept any number; these checks are what callers run
//! before handing user input to them. Request types additionally carry
//! `validator` derive rules (see [`crate::types`]).

use crate::health_metrics::Profile;
use thiserror::Error;

/// Minimum accepted height (cm)
pub const MIN_HEIGHT_CM: f64 = 100.0;
/// Maximum accepted height (cm)
pub const MAX_HEIGHT_CM: f64 = 250.0;
/// Minimum accepted weight (kg)
pub const MIN_WEIGHT_KG: f64 = 20.0;
/// Maximum accepted weight (kg)
pub const MAX_WEIGHT_KG: f64 = 300.0;

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < MIN_WEIGHT_KG {
        return Err(format!("Weight must be at least {} kg", MIN_WEIGHT_KG));
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(format!("Weight must be at most {} kg", MAX_WEIGHT_KG));
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < MIN_HEIGHT_CM {
        return Err(format!("Height must be at least {} cm", MIN_HEIGHT_CM));
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err(format!("Height must be at most {} cm", MAX_HEIGHT_CM));
    }
    Ok(())
}

/// Validate date of birth
/// Must not be in the future, and age must be between 1 and 150 years
pub fn validate_date_of_birth(dob: chrono::NaiveDate) -> Result<(), String> {
    validate_date_of_birth_on(dob, chrono::Utc::now().date_naive())
}

pub fn validate_date_of_birth_on(dob: chrono::NaiveDate, today: chrono::NaiveDate) -> Result<(), String> {
    if dob > today {
        return Err("Date of birth cannot be in the future".to_string());
    }

    match today.years_since(dob) {
        Some(age) if age < 1 => Err("Age must be at least 1 year".to_string()),
        Some(age) if age > 150 => Err("Age cannot exceed 150 years".to_string()),
        None => Err("Invalid date of birth".to_string()),
        _ => Ok(()),
    }
}

/// Validate a logged food quantity (in grams)
pub fn validate_quantity_g(quantity_g: f64) -> Result<(), String> {
    if quantity_g.is_nan() || quantity_g.is_infinite() {
        return Err("Quantity must be a valid number".to_string());
    }
    if quantity_g <= 0.0 {
        return Err("Quantity must be positive".to_string());
    }
    Ok(())
}

/// Check every numeric field of a complete profile
pub fn validate_profile(profile: &Profile, today: chrono::NaiveDate) -> Result<(), ValidationError> {
    validate_height_cm(profile.height_cm).map_err(|m| ValidationError::new("height_cm", &m))?;
    validate_date_of_birth_on(profile.date_of_birth, today)
        .map_err(|m| ValidationError::new("date_of_birth", &m))?;
    if let Some(weight) = profile.weight_kg {
        validate_weight(weight).map_err(|m| ValidationError::new("weight", &m))?;
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" => "Current Weight",
        "height" | "height_cm" => "Height",
        "date_of_birth" => "Date of Birth",
        "gender" => "Gender",
        "activity_level" => "Activity Level",
        "goal_type" => "Goal",
        "quantity_g" => "Quantity",
        "meal_type" => "Meal",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{display_label}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    /// Keep the first failing field; enough for a single user-facing message
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is out of range".to_string());
                ValidationError::new(&field.to_string(), &message)
            }
            None => ValidationError::new("request", "is invalid"),
        }
    }
}
