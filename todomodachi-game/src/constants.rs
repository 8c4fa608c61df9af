//! Centralized balance and tuning constants for Todomodachi game logic.
//!
//! These values define the deterministic math for the reward economy.
//! Keeping them together ensures that progression pacing can only be
//! adjusted via code changes reviewed in version control, rather than
//! through external JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_SEED_SET: &str = "log.seed-set";
pub(crate) const LOG_TASK_ADDED: &str = "log.task.added";
pub(crate) const LOG_TASK_COMPLETE: &str = "log.task.complete";
pub(crate) const LOG_TASK_RECOMPLETE: &str = "log.task.recomplete";
pub(crate) const LOG_TASK_REOPENED: &str = "log.task.reopened";
pub(crate) const LOG_TASK_REMOVED: &str = "log.task.removed";
pub(crate) const LOG_LEVEL_UP: &str = "log.levelup";
pub(crate) const LOG_GACHA_DRAW: &str = "log.gacha.draw";
pub(crate) const LOG_GACHA_DRAW_NEW: &str = "log.gacha.draw.new";
pub(crate) const LOG_GACHA_INSUFFICIENT: &str = "log.gacha.insufficient";
pub(crate) const LOG_ACTIVE_CHANGED: &str = "log.character.active";
pub(crate) const LOG_ACTIVE_REJECTED: &str = "log.character.active.rejected";
pub(crate) const LOG_ACHIEVEMENT_UNLOCKED_PREFIX: &str = "achievement.unlocked.";
pub(crate) const LOG_ACHIEVEMENT_CLAIMED_PREFIX: &str = "achievement.claimed.";

// Progression tuning -------------------------------------------------------
pub(crate) const BASE_EXP_TO_NEXT: i64 = 100;
pub(crate) const EXP_GROWTH: f32 = 1.5;
pub(crate) const TASK_EXP_REWARD: i64 = 20;

// Economy tuning -----------------------------------------------------------
pub(crate) const TASK_STONE_REWARD: i64 = 1;
pub(crate) const DRAW_COST: i64 = 5;

// Analytics ----------------------------------------------------------------
pub(crate) const TRAILING_WINDOW_DAYS: i64 = 7;
