//! End-to-end tests for the JSON-lines runner

mod common;

use serde_json::json;

#[test]
fn test_compute_targets_worked_example() {
    let runner = common::runner();
    let response = common::call(
        &runner,
        json!({
            "op": "compute_targets",
            "profile": {
                "gender": "MALE",
                "height_cm": 180,
                "date_of_birth": "1996-06-15",
                "activity_level": "MODERATELY_ACTIVE",
                "goal_type": "MAINTAIN_WEIGHT"
            },
            "today": "2026-03-01"
        }),
    );

    assert_eq!(
        response["ok"],
        json!({
            "daily_calories": 2759,
            "protein_g": 172,
            "carbs_g": 310,
            "fat_g": 92,
            "bmr": 1780,
            "tdee": 2759
        })
    );
}

#[test]
fn test_update_profile_round_trips_user() {
    let runner = common::runner();
    let user = common::new_user();
    let response = common::call(
        &runner,
        json!({
            "op": "update_profile",
            "user": user,
            "update": common::onboarding(),
            "today": "2026-03-01"
        }),
    );

    assert_eq!(response["ok"]["id"], json!(user.id));
    assert_eq!(response["ok"]["targets"]["bmr"], 1780);
    assert_eq!(response["ok"]["progression"]["level"], 1);
}

#[test]
fn test_daily_summary_and_accuracy() {
    let runner = common::runner();
    let today = common::date(2026, 3, 1);
    let meal = common::food(2000.0, 120.0, 200.0, 70.0);
    let entries = vec![common::entry(&meal, nutritrack_shared::MealType::Lunch, 50.0, today)];

    let summary = common::call(
        &runner,
        json!({ "op": "daily_summary", "user": common::new_user(), "entries": entries, "date": "2026-03-01" }),
    );
    assert_eq!(summary["ok"]["logged_meals"], 1);
    assert_eq!(summary["ok"]["accuracy"]["overall"], 50.0);

    let accuracy = common::call(
        &runner,
        json!({ "op": "macro_accuracy", "user": common::new_user(), "entries": entries, "date": "2026-03-02" }),
    );
    assert_eq!(accuracy["ok"], json!({ "accuracy": 0, "breakdown": null }));
}

#[test]
fn test_streak_and_bmi() {
    let runner = common::runner();
    let streak = common::call(
        &runner,
        json!({
            "op": "streak",
            "logged_days": ["2026-03-01", "2026-02-28", "2026-02-26"],
            "today": "2026-03-01"
        }),
    );
    assert_eq!(streak["ok"], 2);

    let bmi = common::call(&runner, json!({ "op": "bmi", "weight_kg": 72.0 }));
    assert_eq!(bmi["ok"], json!(null));
}

#[test]
fn test_check_achievements_reports_earned_in_catalog_order() {
    let runner = common::runner();
    let today = common::date(2026, 3, 1);
    let meal = common::food(300.0, 20.0, 30.0, 10.0);
    let entries = vec![common::entry(&meal, nutritrack_shared::MealType::Breakfast, 100.0, today)];

    let response = common::call(
        &runner,
        json!({
            "op": "check_achievements",
            "user": common::new_user(),
            "entries": entries,
            "earned": ["welcome_aboard"],
            "today": "2026-03-01"
        }),
    );

    assert_eq!(response["ok"]["earned"], json!(["welcome_aboard", "first_steps"]));
    assert_eq!(response["ok"]["xp_awarded"], 50);
    assert_eq!(response["ok"]["user"]["progression"]["total_xp"], 50);
}

#[test]
fn test_invalid_weight_is_a_validation_error() {
    let runner = common::runner();
    let response = common::call(
        &runner,
        json!({
            "op": "record_weight",
            "user": common::new_user(),
            "weight": { "weight_kg": 500.0 }
        }),
    );
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_record_weight_and_log_food_honor_now() {
    let runner = common::runner();
    let now = "2026-02-14T08:30:00Z";

    let weight = common::call(
        &runner,
        json!({
            "op": "record_weight",
            "user": common::new_user(),
            "weight": { "weight_kg": 81.2 },
            "now": now
        }),
    );
    assert_eq!(weight["ok"]["entry"]["recorded_at"], now);
    assert_eq!(weight["ok"]["entry"]["source"], "manual");

    let oats = common::food(389.0, 16.9, 66.3, 6.9);
    let logged = common::call(
        &runner,
        json!({
            "op": "log_food",
            "food": oats,
            "request": { "food_id": oats.id, "meal_type": "BREAKFAST", "quantity_g": 50.0 },
            "now": now
        }),
    );
    assert_eq!(logged["ok"]["logged_at"], now);
    assert_eq!(logged["ok"]["calories"], 194.5);
}

#[test]
fn test_history_lists_logged_days_newest_first() {
    let runner = common::runner();
    let meal = common::food(500.0, 30.0, 50.0, 20.0);
    let entries = vec![
        common::entry(&meal, nutritrack_shared::MealType::Lunch, 100.0, common::date(2026, 2, 20)),
        common::entry(&meal, nutritrack_shared::MealType::Lunch, 100.0, common::date(2026, 2, 27)),
        common::entry(&meal, nutritrack_shared::MealType::Dinner, 100.0, common::date(2026, 3, 1)),
    ];

    let response = common::call(
        &runner,
        json!({
            "op": "history",
            "user": common::new_user(),
            "entries": entries,
            "days": 7,
            "today": "2026-03-01"
        }),
    );
    let dates: Vec<&str> = response["ok"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-03-01", "2026-02-27"]);

    // Defaults to 30 days
    let all = common::call(
        &runner,
        json!({ "op": "history", "user": common::new_user(), "entries": entries, "today": "2026-03-01" }),
    );
    assert_eq!(all["ok"].as_array().unwrap().len(), 3);
}

#[test]
fn test_food_catalog_ops() {
    let runner = common::runner();
    let mut verified = common::food(89.0, 1.1, 22.8, 0.3);
    verified.name = "Banana".to_string();
    verified.brand = None;
    verified.is_verified = true;
    verified.fiber_per_100g = Some(2.6);
    verified.sugar_per_100g = Some(12.2);
    let mut custom = common::food(330.0, 4.0, 48.0, 14.0);
    custom.name = "Banana Muffin".to_string();
    custom.brand = None;
    let foods = vec![custom.clone(), verified.clone()];

    let search = common::call(&runner, json!({ "op": "search_foods", "foods": foods, "query": "banana" }));
    assert_eq!(search["ok"][0]["name"], "Banana");
    assert_eq!(search["ok"][1]["name"], "Banana Muffin");

    let too_short = common::call(&runner, json!({ "op": "search_foods", "foods": foods, "query": "b" }));
    assert_eq!(too_short["error"]["code"], "VALIDATION_ERROR");

    let breakdown = common::call(
        &runner,
        json!({ "op": "nutrition_breakdown", "food": verified, "quantity_g": 118.0 }),
    );
    assert_eq!(breakdown["ok"]["fiber"], 3.07);
    assert_eq!(breakdown["ok"]["sugar"], 14.4);

    let serving = common::call(&runner, json!({ "op": "suggested_serving", "food": custom }));
    assert_eq!(serving["ok"], json!({ "size": 100.0, "description": "100g" }));

    let day = common::date(2026, 3, 1);
    let entries = vec![
        common::entry(&verified, nutritrack_shared::MealType::Breakfast, 100.0, day),
        common::entry(&custom, nutritrack_shared::MealType::Snack, 80.0, common::date(2026, 3, 2)),
        common::entry(&verified, nutritrack_shared::MealType::Snack, 100.0, common::date(2026, 3, 3)),
    ];
    let recent = common::call(
        &runner,
        json!({ "op": "recent_foods", "entries": entries, "foods": foods }),
    );
    assert_eq!(recent["ok"][0]["id"], json!(verified.id));
    assert_eq!(recent["ok"][1]["id"], json!(custom.id));
    assert_eq!(recent["ok"].as_array().unwrap().len(), 2);

    let popular = common::call(
        &runner,
        json!({ "op": "popular_foods", "entries": entries, "foods": foods, "limit": 1 }),
    );
    assert_eq!(popular["ok"][0]["name"], "Banana");
    assert_eq!(popular["ok"][0]["usage_count"], 2);
}

#[test]
fn test_create_food_validates_and_is_unverified() {
    let runner = common::runner();
    let created = common::call(
        &runner,
        json!({
            "op": "create_food",
            "food": {
                "name": "Grandma's Lasagna",
                "calories_per_100g": 165.0,
                "protein_per_100g": 9.0,
                "carbs_per_100g": 15.0,
                "fat_per_100g": 7.5,
                "serving_size_g": 250.0
            }
        }),
    );
    assert_eq!(created["ok"]["is_verified"], false);
    assert_eq!(created["ok"]["fiber_per_100g"], 0.0);
    assert_eq!(created["ok"]["serving_size_g"], 250.0);

    let rejected = common::call(
        &runner,
        json!({
            "op": "create_food",
            "food": {
                "name": "Air",
                "calories_per_100g": 0.0,
                "protein_per_100g": 0.0,
                "carbs_per_100g": 0.0,
                "fat_per_100g": 0.0
            }
        }),
    );
    assert_eq!(rejected["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_user_stats_at_level_ceiling() {
    let runner = common::runner();
    let mut user = common::new_user();
    user.progression.level = u32::MAX;
    user.progression.total_xp = u64::MAX;

    let response = common::call(
        &runner,
        json!({ "op": "user_stats", "user": user, "today": "2026-03-01" }),
    );
    assert_eq!(response["ok"]["level"], u32::MAX);
    assert_eq!(response["ok"]["xp_percentage"], 100);
}
