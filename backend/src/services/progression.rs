//! Progression service - streaks, stats, achievements and the leaderboard

use crate::config::EngineConfig;
use chrono::NaiveDate;
use nutritrack_shared::accuracy::score_day;
use nutritrack_shared::achievements::{
    evaluate_achievements, protein_hit_streak, Achievement, AchievementContext, AchievementId,
};
use nutritrack_shared::models::UserProfile;
use nutritrack_shared::nutrition::{distinct_food_count, DailyTotals, FoodEntry};
use nutritrack_shared::progression::{
    leaderboard, streak_from_days, user_stats, Leaderboard, LeaderboardUser, UserStats,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use uuid::Uuid;

/// Result of an achievement check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementOutcome {
    pub newly_earned: Vec<Achievement>,
    pub xp_awarded: u64,
    pub leveled_up: bool,
    pub level: u32,
    pub total_xp: u64,
}

/// Progression service
pub struct ProgressionService;

impl ProgressionService {
    /// Days on which at least one entry was logged
    pub fn logged_days(entries: &[FoodEntry]) -> HashSet<NaiveDate> {
        entries.iter().map(FoodEntry::logged_on).collect()
    }

    /// Current logging streak ending at `today`
    pub fn current_streak(entries: &[FoodEntry], today: NaiveDate, config: &EngineConfig) -> u32 {
        streak_from_days(&Self::logged_days(entries), today, config.streak_lookback_days)
    }

    /// Gather the numbers achievement conditions are checked against
    pub fn build_context(
        user: &UserProfile,
        entries: &[FoodEntry],
        today: NaiveDate,
        weight_goal_reached: bool,
        config: &EngineConfig,
    ) -> AchievementContext {
        let targets = user.daily_targets(config.default_targets);

        let mut by_day: HashMap<NaiveDate, Vec<&FoodEntry>> = HashMap::new();
        for entry in entries {
            by_day.entry(entry.logged_on()).or_default().push(entry);
        }
        let day_accuracy = |date: NaiveDate| {
            by_day.get(&date).map(|day| {
                let totals = DailyTotals::from_entries(day.iter().copied());
                score_day(&totals, &targets)
            })
        };

        let days_back = std::iter::successors(Some(today), |d| d.pred_opt())
            .take(config.streak_lookback_days);
        let protein_streak = protein_hit_streak(
            days_back.map(|d| day_accuracy(d).map(|a| a.per_field.protein)),
            config.protein_hit_threshold,
        );

        AchievementContext {
            signed_up: true,
            total_entries: entries.len() as u32,
            current_streak: Self::current_streak(entries, today, config),
            protein_streak,
            macro_accuracy_today: day_accuracy(today).map(|a| a.overall),
            weight_goal_reached,
            distinct_foods: distinct_food_count(entries) as u32,
            level: user.progression.level,
        }
    }

    /// Unlock every newly satisfied achievement and award its XP
    ///
    /// Re-evaluates after each round so level-based achievements reached
    /// through the awarded XP unlock in the same check.
    pub fn check_achievements(
        user: &mut UserProfile,
        mut ctx: AchievementContext,
        earned: &mut HashSet<AchievementId>,
    ) -> AchievementOutcome {
        let starting_level = user.progression.level;
        let mut newly_earned = Vec::new();
        let mut xp_awarded = 0u64;

        ctx.level = ctx.level.max(user.progression.level);
        loop {
            let unlocked = evaluate_achievements(&ctx, earned);
            if unlocked.is_empty() {
                break;
            }
            for achievement in unlocked {
                earned.insert(achievement.id);
                user.progression.award(achievement.points);
                xp_awarded = xp_awarded.saturating_add(achievement.points);

                metrics::counter!("nutritrack_achievements_awarded_total").increment(1);
                info!(
                    user_id = %user.id,
                    achievement = achievement.name.as_str(),
                    points = achievement.points,
                    "Achievement unlocked"
                );
                newly_earned.push(achievement.clone());
            }
            ctx.level = user.progression.level;
        }

        let leveled_up = user.progression.level > starting_level;
        if leveled_up {
            metrics::counter!("nutritrack_level_ups_total").increment(1);
            info!(
                user_id = %user.id,
                from = starting_level,
                to = user.progression.level,
                "Level up"
            );
        }

        AchievementOutcome {
            newly_earned,
            xp_awarded,
            leveled_up,
            level: user.progression.level,
            total_xp: user.progression.total_xp,
        }
    }

    /// Dashboard stats for a user
    pub fn user_stats(
        user: &UserProfile,
        entries: &[FoodEntry],
        achievement_count: u32,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> UserStats {
        let days = Self::logged_days(entries);
        let streak = streak_from_days(&days, today, config.streak_lookback_days);
        debug!(user_id = %user.id, streak, days_logged = days.len(), "Computed user stats");
        user_stats(&user.progression, streak, achievement_count, days.len() as u32)
    }

    pub fn leaderboard(users: &[LeaderboardUser], current_user_id: Uuid, limit: usize) -> Leaderboard {
        leaderboard(users, current_user_id, limit)
    }
}
