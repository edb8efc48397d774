//! Nutrition target calculations
//!
//! Turns a user's physiological profile into daily calorie and macro
//! targets: Mifflin-St Jeor BMR, activity-scaled TDEE, goal-based calorie
//! adjustment and a goal-specific macro split. Also provides the BMI
//! classification shown alongside the targets.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No I/O, no shared state, never fails
//! 2. **Closed Enums**: Every lookup table is an exhaustive `match`
//! 3. **Lenient Arithmetic**: Range checks live in [`crate::validation`]

use crate::errors::EngineError;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Energy density of protein (kcal per gram)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate (kcal per gram)
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy density of fat (kcal per gram)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender as used by the BMR equation
///
/// `Other` follows the female constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Sex-specific constant added by Mifflin-St Jeor
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female | Gender::Other => -161.0,
        }
    }

    /// Crude weight estimate used when no weight has been logged
    pub fn estimated_weight_kg(&self, height_cm: f64) -> f64 {
        match self {
            Gender::Male => height_cm - 100.0,
            Gender::Female | Gender::Other => height_cm - 110.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            "OTHER" => Ok(Gender::Other),
            _ => Err(EngineError::unknown_variant("gender", s)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtremelyActive => "Very hard exercise or physical job",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "SEDENTARY",
            ActivityLevel::LightlyActive => "LIGHTLY_ACTIVE",
            ActivityLevel::ModeratelyActive => "MODERATELY_ACTIVE",
            ActivityLevel::VeryActive => "VERY_ACTIVE",
            ActivityLevel::ExtremelyActive => "EXTREMELY_ACTIVE",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SEDENTARY" => Ok(ActivityLevel::Sedentary),
            "LIGHTLY_ACTIVE" => Ok(ActivityLevel::LightlyActive),
            "MODERATELY_ACTIVE" => Ok(ActivityLevel::ModeratelyActive),
            "VERY_ACTIVE" => Ok(ActivityLevel::VeryActive),
            "EXTREMELY_ACTIVE" => Ok(ActivityLevel::ExtremelyActive),
            _ => Err(EngineError::unknown_variant("activity level", s)),
        }
    }
}

/// An activity level as offered during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityOption {
    pub value: ActivityLevel,
    pub multiplier: f64,
    pub description: &'static str,
}

/// Every activity level with its multiplier and description, least active first
pub fn activity_options() -> Vec<ActivityOption> {
    ActivityLevel::ALL
        .iter()
        .map(|level| ActivityOption {
            value: *level,
            multiplier: level.multiplier(),
            description: level.description(),
        })
        .collect()
}

/// Fraction of daily calories assigned to each macro
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Body composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    LoseFat,
    GainMuscle,
    MaintainWeight,
    BodyRecomposition,
}

impl GoalType {
    pub const ALL: [GoalType; 4] = [
        GoalType::LoseFat,
        GoalType::GainMuscle,
        GoalType::MaintainWeight,
        GoalType::BodyRecomposition,
    ];

    /// Multiplier applied to TDEE (20% deficit, 10% surplus or maintenance)
    pub fn calorie_factor(&self) -> f64 {
        match self {
            GoalType::LoseFat => 0.8,
            GoalType::GainMuscle => 1.1,
            GoalType::MaintainWeight | GoalType::BodyRecomposition => 1.0,
        }
    }

    /// Macro split for this goal
    pub fn macro_ratios(&self) -> MacroRatios {
        match self {
            GoalType::LoseFat => MacroRatios { protein: 0.35, carbs: 0.35, fat: 0.30 },
            GoalType::GainMuscle => MacroRatios { protein: 0.30, carbs: 0.45, fat: 0.25 },
            GoalType::BodyRecomposition => MacroRatios { protein: 0.35, carbs: 0.35, fat: 0.30 },
            GoalType::MaintainWeight => MacroRatios { protein: 0.25, carbs: 0.45, fat: 0.30 },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::LoseFat => "LOSE_FAT",
            GoalType::GainMuscle => "GAIN_MUSCLE",
            GoalType::MaintainWeight => "MAINTAIN_WEIGHT",
            GoalType::BodyRecomposition => "BODY_RECOMPOSITION",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOSE_FAT" => Ok(GoalType::LoseFat),
            "GAIN_MUSCLE" => Ok(GoalType::GainMuscle),
            "MAINTAIN_WEIGHT" => Ok(GoalType::MaintainWeight),
            "BODY_RECOMPOSITION" => Ok(GoalType::BodyRecomposition),
            _ => Err(EngineError::unknown_variant("goal type", s)),
        }
    }
}

/// Profile attributes needed to compute targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Gender,
    /// Height in centimeters
    pub height_cm: f64,
    pub date_of_birth: NaiveDate,
    pub activity_level: ActivityLevel,
    pub goal_type: GoalType,
    /// Latest measured weight in kilograms, if any
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

impl Profile {
    /// Age in whole years as of `today`, by calendar year difference
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_in_years(self.date_of_birth, today)
    }
}

/// Age as `today.year - birth.year`; birthdays later in the year are not considered
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - date_of_birth.year()
}

// ============================================================================
// Target Calculation
// ============================================================================

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub daily_calories: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub bmr: u32,
    pub tdee: u32,
}

/// Gram targets for one calorie budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl MacroGrams {
    /// Calories implied by the gram targets
    pub fn calories(&self) -> u32 {
        (self.protein_g as f64 * KCAL_PER_GRAM_PROTEIN
            + self.carbs_g as f64 * KCAL_PER_GRAM_CARBS
            + self.fat_g as f64 * KCAL_PER_GRAM_FAT) as u32
    }
}

fn round_kcal(value: f64) -> u32 {
    // `as` saturates: negatives and NaN become 0
    value.round() as u32
}

/// Mifflin-St Jeor Basal Metabolic Rate, unrounded
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women/other: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64 + gender.bmr_offset()
}

/// TDEE = BMR × activity multiplier, rounded
pub fn calculate_tdee(bmr: u32, activity_level: ActivityLevel) -> u32 {
    round_kcal(bmr as f64 * activity_level.multiplier())
}

/// Goal-adjusted daily calories, rounded
pub fn daily_calories_for_goal(tdee: u32, goal_type: GoalType) -> u32 {
    round_kcal(tdee as f64 * goal_type.calorie_factor())
}

/// Split a calorie budget into gram targets using the goal's ratios
pub fn macro_grams(daily_calories: u32, goal_type: GoalType) -> MacroGrams {
    let ratios = goal_type.macro_ratios();
    let calories = daily_calories as f64;

    MacroGrams {
        protein_g: round_kcal(calories * ratios.protein / KCAL_PER_GRAM_PROTEIN),
        carbs_g: round_kcal(calories * ratios.carbs / KCAL_PER_GRAM_CARBS),
        fat_g: round_kcal(calories * ratios.fat / KCAL_PER_GRAM_FAT),
    }
}

/// Compute targets using today's date (UTC) for the age
///
/// `weight_kg` takes precedence over `profile.weight_kg`; when neither is a
/// positive number the weight is estimated from height.
pub fn compute_targets(profile: &Profile, weight_kg: Option<f64>) -> MacroTargets {
    compute_targets_on(profile, weight_kg, Utc::now().date_naive())
}

/// Compute targets with an explicit evaluation date
pub fn compute_targets_on(profile: &Profile, weight_kg: Option<f64>, today: NaiveDate) -> MacroTargets {
    let age = profile.age_on(today);
    let measured = |w: &f64| *w > 0.0;
    let weight = weight_kg
        .filter(measured)
        .or(profile.weight_kg.filter(measured))
        .unwrap_or_else(|| profile.gender.estimated_weight_kg(profile.height_cm));

    let bmr = round_kcal(calculate_bmr_mifflin(weight, profile.height_cm, age, profile.gender));
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let daily_calories = daily_calories_for_goal(tdee, profile.goal_type);
    let grams = macro_grams(daily_calories, profile.goal_type);

    MacroTargets {
        daily_calories,
        protein_g: grams.protein_g,
        carbs_g: grams.carbs_g,
        fat_g: grams.fat_g,
        bmr,
        tdee,
    }
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// BMI calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// BMI for a profile; `None` unless both measurements are present and height is positive
pub fn calculate_bmi_result(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<BmiResult> {
    match (weight_kg, height_cm) {
        (Some(w), Some(h)) if h > 0.0 => {
            let bmi = calculate_bmi(w, h);
            Some(BmiResult {
                bmi: (bmi * 10.0).round() / 10.0,
                category: classify_bmi(bmi),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(gender: Gender, activity: ActivityLevel, goal: GoalType) -> Profile {
        Profile {
            gender,
            height_cm: 180.0,
            date_of_birth: date(1996, 6, 15),
            activity_level: activity,
            goal_type: goal,
            weight_kg: Some(80.0),
        }
    }

    // =========================================================================
    // Lookup Table Tests
    // =========================================================================

    #[rstest]
    #[case(ActivityLevel::Sedentary, 1.2)]
    #[case(ActivityLevel::LightlyActive, 1.375)]
    #[case(ActivityLevel::ModeratelyActive, 1.55)]
    #[case(ActivityLevel::VeryActive, 1.725)]
    #[case(ActivityLevel::ExtremelyActive, 1.9)]
    fn test_activity_multipliers(#[case] level: ActivityLevel, #[case] expected: f64) {
        assert_eq!(level.multiplier(), expected);
    }

    #[rstest]
    #[case(GoalType::LoseFat, 0.35, 0.35, 0.30)]
    #[case(GoalType::GainMuscle, 0.30, 0.45, 0.25)]
    #[case(GoalType::BodyRecomposition, 0.35, 0.35, 0.30)]
    #[case(GoalType::MaintainWeight, 0.25, 0.45, 0.30)]
    fn test_macro_ratios(
        #[case] goal: GoalType,
        #[case] protein: f64,
        #[case] carbs: f64,
        #[case] fat: f64,
    ) {
        let ratios = goal.macro_ratios();
        assert_eq!(ratios.protein, protein);
        assert_eq!(ratios.carbs, carbs);
        assert_eq!(ratios.fat, fat);
        assert!((ratios.protein + ratios.carbs + ratios.fat - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("OTHER".parse::<Gender>().unwrap(), Gender::Other);
        assert_eq!(
            "Moderately_Active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert_eq!("lose_fat".parse::<GoalType>().unwrap(), GoalType::LoseFat);

        assert!("extra_active".parse::<ActivityLevel>().is_err());
        assert!("bulk".parse::<GoalType>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_enum_wire_format() {
        let json = serde_json::to_string(&ActivityLevel::ExtremelyActive).unwrap();
        assert_eq!(json, "\"EXTREMELY_ACTIVE\"");
        let goal: GoalType = serde_json::from_str("\"BODY_RECOMPOSITION\"").unwrap();
        assert_eq!(goal, GoalType::BodyRecomposition);
        assert!(serde_json::from_str::<Gender>("\"male\"").is_err());
    }

    #[test]
    fn test_activity_options() {
        let options = activity_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].value, ActivityLevel::Sedentary);
        assert_eq!(options[4].multiplier, 1.9);
        assert!(options.windows(2).all(|w| w[0].multiplier < w[1].multiplier));

        let json = serde_json::to_value(options[2]).unwrap();
        assert_eq!(json["value"], "MODERATELY_ACTIVE");
        assert_eq!(json["description"], "Moderate exercise 3-5 days/week");
    }

    // =========================================================================
    // BMR/TDEE Tests
    // =========================================================================

    #[test]
    fn test_bmr_mifflin() {
        // 10×80 + 6.25×180 − 5×30 + 5
        let bmr = calculate_bmr_mifflin(80.0, 180.0, 30, Gender::Male);
        assert_eq!(bmr, 1780.0);

        // 10×60 + 6.25×165 − 5×30 − 161
        let bmr = calculate_bmr_mifflin(60.0, 165.0, 30, Gender::Female);
        assert_eq!(bmr, 1320.25);

        let other = calculate_bmr_mifflin(60.0, 165.0, 30, Gender::Other);
        assert_eq!(other, bmr);
    }

    #[test]
    fn test_age_uses_calendar_year_difference() {
        let dob = date(1996, 12, 31);
        assert_eq!(age_in_years(dob, date(2026, 1, 1)), 30);
        assert_eq!(age_in_years(dob, date(2026, 12, 31)), 30);
    }

    #[test]
    fn test_male_maintenance_example() {
        let p = profile(Gender::Male, ActivityLevel::ModeratelyActive, GoalType::MaintainWeight);
        let targets = compute_targets_on(&p, None, date(2026, 3, 1));

        assert_eq!(targets.bmr, 1780);
        assert_eq!(targets.tdee, 2759);
        assert_eq!(targets.daily_calories, 2759);
        assert_eq!(targets.protein_g, 172);
        assert_eq!(targets.carbs_g, 310);
        assert_eq!(targets.fat_g, 92);
    }

    #[test]
    fn test_downstream_chain_from_tdee() {
        let bmr = 1267;
        let tdee = calculate_tdee(bmr, ActivityLevel::ModeratelyActive);
        assert_eq!(tdee, 1964);

        let calories = daily_calories_for_goal(tdee, GoalType::MaintainWeight);
        assert_eq!(calories, 1964);

        let grams = macro_grams(calories, GoalType::MaintainWeight);
        assert_eq!(grams.protein_g, 123);
        assert_eq!(grams.carbs_g, 221);
        assert_eq!(grams.fat_g, 65);
        assert!((grams.calories() as i64 - calories as i64).abs() <= 3);
    }

    #[test]
    fn test_goal_calorie_adjustment() {
        assert_eq!(daily_calories_for_goal(2759, GoalType::LoseFat), 2207);
        assert_eq!(daily_calories_for_goal(2759, GoalType::GainMuscle), 3035);
        assert_eq!(daily_calories_for_goal(2759, GoalType::BodyRecomposition), 2759);
        assert_eq!(daily_calories_for_goal(2759, GoalType::MaintainWeight), 2759);
    }

    #[test]
    fn test_weight_precedence_and_estimate() {
        let today = date(2026, 3, 1);
        let mut p = profile(Gender::Male, ActivityLevel::Sedentary, GoalType::MaintainWeight);

        // Explicit weight beats the profile weight
        let explicit = compute_targets_on(&p, Some(90.0), today);
        assert_eq!(explicit.bmr, 1880);

        // An unusable explicit weight falls back to the profile's, not the estimate
        p.weight_kg = Some(95.0);
        assert_eq!(compute_targets_on(&p, None, today).bmr, 1930);
        assert_eq!(compute_targets_on(&p, Some(0.0), today).bmr, 1930);
        assert_eq!(compute_targets_on(&p, Some(-4.0), today).bmr, 1930);

        // No weight: 180 − 100 = 80 kg estimate for men
        p.weight_kg = None;
        assert_eq!(compute_targets_on(&p, None, today).bmr, 1780);

        // Zero counts as absent
        assert_eq!(compute_targets_on(&p, Some(0.0), today).bmr, 1780);

        // 180 − 110 = 70 kg estimate otherwise
        p.gender = Gender::Other;
        assert_eq!(compute_targets_on(&p, None, today).bmr, 1514);
    }

    #[test]
    fn test_nonsense_input_does_not_panic() {
        let p = Profile {
            gender: Gender::Female,
            height_cm: -50.0,
            date_of_birth: date(1900, 1, 1),
            activity_level: ActivityLevel::Sedentary,
            goal_type: GoalType::LoseFat,
            weight_kg: None,
        };
        let targets = compute_targets_on(&p, None, date(2026, 1, 1));
        assert_eq!(targets.bmr, 0);
        assert_eq!(targets.daily_calories, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Targets are non-negative for every enum combination
        #[test]
        fn prop_targets_non_negative(
            gender_idx in 0usize..3,
            activity_idx in 0usize..5,
            goal_idx in 0usize..4,
            height in 140.0f64..210.0,
            weight in proptest::option::of(40.0f64..150.0),
            age in 18i32..80
        ) {
            let p = Profile {
                gender: Gender::ALL[gender_idx],
                height_cm: height,
                date_of_birth: date(2026 - age, 5, 5),
                activity_level: ActivityLevel::ALL[activity_idx],
                goal_type: GoalType::ALL[goal_idx],
                weight_kg: weight,
            };
            let t = compute_targets_on(&p, None, date(2026, 1, 1));
            prop_assert!(t.bmr > 0);
            prop_assert!(t.tdee >= t.bmr);
            prop_assert!(t.daily_calories > 0);
            prop_assert!(t.protein_g > 0 && t.carbs_g > 0 && t.fat_g > 0);
        }

        /// Macro calories reconstruct the budget within the rounding bound
        /// (0.5 g × 4 + 0.5 g × 4 + 0.5 g × 9 = 8.5 kcal)
        #[test]
        fn prop_macro_calories_reconstruct(calories in 800u32..5000, goal_idx in 0usize..4) {
            let grams = macro_grams(calories, GoalType::ALL[goal_idx]);
            let reconstructed = grams.protein_g as f64 * 4.0
                + grams.carbs_g as f64 * 4.0
                + grams.fat_g as f64 * 9.0;
            prop_assert!((reconstructed - calories as f64).abs() <= 8.5 + 1e-6,
                "{} kcal reconstructed as {}", calories, reconstructed);
        }

        /// Property: Male BMR > Female BMR (same stats)
        #[test]
        fn prop_male_bmr_higher(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20i32..60
        ) {
            let male = calculate_bmr_mifflin(weight, height, age, Gender::Male);
            let female = calculate_bmr_mifflin(weight, height, age, Gender::Female);
            prop_assert!((male - female - 166.0).abs() < 1e-9);
        }

        /// Deficit < maintenance < surplus for the same TDEE
        #[test]
        fn prop_goal_ordering(tdee in 1200u32..4000) {
            let lose = daily_calories_for_goal(tdee, GoalType::LoseFat);
            let keep = daily_calories_for_goal(tdee, GoalType::MaintainWeight);
            let gain = daily_calories_for_goal(tdee, GoalType::GainMuscle);
            prop_assert!(lose < keep && keep < gain);
        }
    }

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.1);

        let result = calculate_bmi_result(Some(70.0), Some(175.0)).unwrap();
        assert_eq!(result.bmi, 22.9);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(classify_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
        assert_eq!(classify_bmi(27.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_bmi_requires_measurements() {
        assert!(calculate_bmi_result(None, Some(175.0)).is_none());
        assert!(calculate_bmi_result(Some(70.0), None).is_none());
        assert!(calculate_bmi_result(Some(70.0), Some(0.0)).is_none());
    }
}
