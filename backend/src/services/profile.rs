//! Profile service - profile edits, weight logs and target recalculation

use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, NaiveDate, Utc};
use nutritrack_shared::health_metrics::{calculate_bmi_result, compute_targets_on, BmiResult, MacroTargets};
use nutritrack_shared::models::UserProfile;
use nutritrack_shared::types::{LogWeightRequest, UpdateProfileRequest, WeightEntry};
use nutritrack_shared::validation::{
    get_field_display_label, validate_date_of_birth_on, validate_profile, validate_weight,
};
use tracing::{debug, info, warn};
use validator::Validate;

/// Profile service for user profile operations
pub struct ProfileService;

impl ProfileService {
    /// Validate profile update request
    fn validate_profile_update(req: &UpdateProfileRequest, today: NaiveDate) -> ServiceResult<()> {
        req.validate()?;

        if let Some(dob) = req.date_of_birth {
            if let Err(msg) = validate_date_of_birth_on(dob, today) {
                return Err(ServiceError::Validation(format!(
                    "{}: {}",
                    get_field_display_label("date_of_birth"),
                    msg
                )));
            }
        }

        Ok(())
    }

    /// Recompute targets if the profile is complete
    ///
    /// Incomplete profiles keep whatever targets they had.
    pub fn recalculate(user: &mut UserProfile, today: NaiveDate) -> ServiceResult<Option<MacroTargets>> {
        let Some(profile) = user.complete_profile() else {
            debug!(user_id = %user.id, "Profile incomplete, targets not recalculated");
            return Ok(None);
        };

        validate_profile(&profile, today)?;

        let targets = compute_targets_on(&profile, None, today);
        metrics::counter!("nutritrack_targets_computed_total", "goal" => profile.goal_type.as_str())
            .increment(1);
        info!(
            user_id = %user.id,
            goal = %profile.goal_type,
            daily_calories = targets.daily_calories,
            bmr = targets.bmr,
            tdee = targets.tdee,
            estimated_weight = profile.weight_kg.is_none(),
            "Recalculated macro targets"
        );

        user.targets = Some(targets);
        Ok(Some(targets))
    }

    /// Apply a partial profile update and recalculate targets
    pub fn update_profile(
        current: &UserProfile,
        req: UpdateProfileRequest,
        today: NaiveDate,
    ) -> ServiceResult<UserProfile> {
        if let Err(err) = Self::validate_profile_update(&req, today) {
            warn!(user_id = %current.id, error = %err, "Rejected profile update");
            return Err(err);
        }

        let mut updated = current.merged_with(&req);
        Self::recalculate(&mut updated, today)?;
        Ok(updated)
    }

    /// Log a weight measurement and recalculate targets with it
    pub fn record_weight(
        current: &UserProfile,
        req: LogWeightRequest,
        now: DateTime<Utc>,
    ) -> ServiceResult<(UserProfile, WeightEntry)> {
        req.validate()?;
        validate_weight(req.weight_kg).map_err(|msg| {
            ServiceError::Validation(format!("{}: {}", get_field_display_label("weight"), msg))
        })?;

        let entry = WeightEntry {
            weight_kg: req.weight_kg,
            source: req.source,
            recorded_at: req.recorded_at.unwrap_or(now),
        };

        let mut updated = current.clone();
        updated.latest_weight_kg = Some(entry.weight_kg);
        Self::recalculate(&mut updated, now.date_naive())?;

        debug!(user_id = %current.id, weight_kg = entry.weight_kg, "Recorded weight");
        Ok((updated, entry))
    }

    /// BMI from the latest weight, if height and weight are known
    pub fn bmi(user: &UserProfile) -> Option<BmiResult> {
        calculate_bmi_result(user.latest_weight_kg, user.height_cm)
    }
}
