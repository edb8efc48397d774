//! Daily accuracy scoring
//!
//! Accuracy is the symmetric deviation from target, expressed as a
//! percentage in `0..=100`. Overshoot and undershoot cost the same.

use crate::nutrition::{DailyTargets, DailyTotals};
use serde::{Deserialize, Serialize};

/// Score one field against its target
///
/// A zero target scores 100 whatever was eaten.
pub fn score_accuracy(actual: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 100.0;
    }
    let percentage_off = ((actual - target) / target).abs() * 100.0;
    (100.0 - percentage_off).clamp(0.0, 100.0)
}

/// Per-field accuracy percentages
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldAccuracy {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Accuracy of one day's intake
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Mean of the four field scores
    pub overall: f64,
    /// Mean of the three macro scores, calories excluded
    pub macro_accuracy: f64,
    pub per_field: FieldAccuracy,
}

impl AccuracyReport {
    /// Overall accuracy rounded to a whole percent
    pub fn overall_rounded(&self) -> u32 {
        self.overall.round() as u32
    }
}

/// Score a day's totals against its targets
pub fn score_day(totals: &DailyTotals, targets: &DailyTargets) -> AccuracyReport {
    let per_field = FieldAccuracy {
        calories: score_accuracy(totals.calories, targets.calories as f64),
        protein: score_accuracy(totals.protein_g, targets.protein_g as f64),
        carbs: score_accuracy(totals.carbs_g, targets.carbs_g as f64),
        fat: score_accuracy(totals.fat_g, targets.fat_g as f64),
    };

    AccuracyReport {
        overall: (per_field.calories + per_field.protein + per_field.carbs + per_field.fat) / 4.0,
        macro_accuracy: (per_field.protein + per_field.carbs + per_field.fat) / 3.0,
        per_field,
    }
}
