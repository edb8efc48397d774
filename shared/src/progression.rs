//! XP, levels and streaks
//!
//! Level thresholds grow quadratically: the gap to the next level widens by
//! 50 XP each level (100, 250, 450, 700, 1000, ...). Levels are derived from
//! total XP and never go down once earned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Safety bound on how far back a streak is counted
pub const MAX_STREAK_LOOKBACK_DAYS: usize = 365;

// ============================================================================
// Levels
// ============================================================================

/// Total XP required to reach `level`
pub fn xp_for_level(level: u32) -> u64 {
    let l = level as u64;
    (100 * l).saturating_add(25u64.saturating_mul(l).saturating_mul(l.saturating_sub(1)))
}

/// Highest level whose threshold `total_xp` meets, never below 1
///
/// Linear ascent from level 1.
pub fn level_for_xp(total_xp: u64) -> u32 {
    let mut level: u32 = 1;
    loop {
        let next = xp_for_level(level.saturating_add(1));
        if next == u64::MAX || total_xp < next {
            return level;
        }
        level += 1;
    }
}

/// A user's XP and earned level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub total_xp: u64,
    pub level: u32,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self { total_xp: 0, level: 1 }
    }
}

impl ProgressionState {
    /// Add XP and promote if a threshold was crossed; returns whether the level changed
    pub fn award(&mut self, xp: u64) -> bool {
        self.total_xp = self.total_xp.saturating_add(xp);
        let promoted = promote(self.level, self.total_xp);
        let leveled_up = promoted > self.level;
        self.level = promoted;
        leveled_up
    }
}

/// Level after a recomputation check; an earned level is kept even if XP disagrees
pub fn promote(current_level: u32, total_xp: u64) -> u32 {
    current_level.max(level_for_xp(total_xp))
}

// ============================================================================
// Streaks
// ============================================================================

/// Count consecutive logged days
///
/// `presence` is ordered from today backward; counting stops at the first
/// `false` or after [`MAX_STREAK_LOOKBACK_DAYS`] entries.
pub fn compute_streak<I>(presence: I) -> u32
where
    I: IntoIterator<Item = bool>,
{
    compute_streak_with_limit(presence, MAX_STREAK_LOOKBACK_DAYS)
}

pub fn compute_streak_with_limit<I>(presence: I, max_days: usize) -> u32
where
    I: IntoIterator<Item = bool>,
{
    presence
        .into_iter()
        .take(max_days)
        .take_while(|logged| *logged)
        .count() as u32
}

/// Streak ending at `today` from the set of days with at least one logged meal
pub fn streak_from_days(logged_days: &HashSet<NaiveDate>, today: NaiveDate, max_days: usize) -> u32 {
    let days_back = std::iter::successors(Some(today), |d| d.pred_opt());
    compute_streak_with_limit(days_back.map(|d| logged_days.contains(&d)), max_days)
}

// ============================================================================
// Stats
// ============================================================================

/// Progression summary shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub level: u32,
    pub total_xp: u64,
    pub current_streak: u32,
    pub achievement_count: u32,
    pub total_days_logged: u32,
    /// XP earned since reaching the current level
    pub xp_progress: u64,
    /// XP between the current level and the next
    pub xp_needed: u64,
    pub xp_percentage: u32,
}

pub fn user_stats(
    state: &ProgressionState,
    current_streak: u32,
    achievement_count: u32,
    total_days_logged: u32,
) -> UserStats {
    let current_threshold = xp_for_level(state.level);
    let next_threshold = xp_for_level(state.level.saturating_add(1));
    let xp_progress = state.total_xp.saturating_sub(current_threshold);
    let xp_needed = next_threshold.saturating_sub(current_threshold);
    // Past the last representable threshold there is nothing left to earn
    let xp_percentage = if xp_needed == 0 {
        100
    } else {
        ((xp_progress as f64 / xp_needed as f64) * 100.0).round().min(100.0) as u32
    };

    UserStats {
        level: state.level,
        total_xp: state.total_xp,
        current_streak,
        achievement_count,
        total_days_logged,
        xp_progress,
        xp_needed,
        xp_percentage,
    }
}

// ============================================================================
// Leaderboard
// ============================================================================

/// A user as seen by the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardUser {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    pub level: u32,
    pub total_xp: u64,
    #[serde(default)]
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub user: LeaderboardUser,
    pub rank: u32,
    pub is_current_user: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub top_users: Vec<LeaderboardEntry>,
    pub current_user_rank: u32,
}

/// Rank users by XP then level, keeping the top `limit`
///
/// The current user's rank counts only users with strictly more XP, so ties
/// share a rank; a user missing from `users` is ranked as if they had 0 XP.
pub fn leaderboard(users: &[LeaderboardUser], current_user_id: Uuid, limit: usize) -> Leaderboard {
    let mut ranked: Vec<&LeaderboardUser> = users.iter().collect();
    ranked.sort_by(|a, b| b.total_xp.cmp(&a.total_xp).then(b.level.cmp(&a.level)));

    let top_users = ranked
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, user)| LeaderboardEntry {
            user: (*user).clone(),
            rank: index as u32 + 1,
            is_current_user: user.id == current_user_id,
        })
        .collect();

    let current_xp = users
        .iter()
        .find(|u| u.id == current_user_id)
        .map(|u| u.total_xp)
        .unwrap_or(0);
    let ahead = users.iter().filter(|u| u.total_xp > current_xp).count() as u32;

    Leaderboard {
        top_users,
        current_user_rank: ahead + 1,
    }
}
