//! Level and experience ledger.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BASE_EXP_TO_NEXT, EXP_GROWTH, TASK_EXP_REWARD};

/// Configuration for experience pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Experience required to clear level 1.
    pub base_exp_to_next: i64,
    /// Multiplier applied to the threshold on every level-up (floored).
    pub growth: f32,
    /// Experience awarded for the first completion of a task.
    pub task_exp: i64,
}

impl ProgressionConfig {
    /// The tuning shipped with the game.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            base_exp_to_next: BASE_EXP_TO_NEXT,
            growth: EXP_GROWTH,
            task_exp: TASK_EXP_REWARD,
        }
    }

    /// Validate the configuration before attaching it to a session.
    ///
    /// # Errors
    ///
    /// Returns an error when a field would stall or shrink progression.
    pub fn validate(&self) -> Result<(), ProgressionConfigError> {
        if self.base_exp_to_next <= 0 {
            return Err(ProgressionConfigError::NonPositiveThreshold {
                value: self.base_exp_to_next,
            });
        }
        if self.growth < 1.0 {
            return Err(ProgressionConfigError::ShrinkingGrowth { value: self.growth });
        }
        Ok(())
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Rejected progression configurations.
#[derive(Debug, Error, PartialEq)]
pub enum ProgressionConfigError {
    #[error("base experience threshold must be positive (got {value})")]
    NonPositiveThreshold { value: i64 },
    #[error("growth must be at least 1.0 (got {value:.2})")]
    ShrinkingGrowth { value: f32 },
}

/// Signal emitted when an experience gain crosses the current threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    /// Overflow experience carried into the new level.
    pub carried_exp: i64,
    /// Recomputed threshold for the new level.
    pub new_threshold: i64,
}

/// Mutable level/experience aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub exp: i64,
    pub exp_to_next: i64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            exp: 0,
            exp_to_next: BASE_EXP_TO_NEXT,
        }
    }
}

impl Progression {
    /// Fresh ledger using the configured base threshold.
    #[must_use]
    pub fn new(cfg: &ProgressionConfig) -> Self {
        Self {
            level: 1,
            exp: 0,
            exp_to_next: cfg.base_exp_to_next,
        }
    }

    /// Apply an experience delta, resolving at most one level-up.
    ///
    /// A gain spanning several thresholds carries its full overflow into
    /// the new level instead of cascading; the next positive gain resolves
    /// the next level. Non-positive amounts are a no-op by contract.
    pub fn apply_experience(&mut self, amount: i64, cfg: &ProgressionConfig) -> Option<LevelUp> {
        if amount <= 0 {
            return None;
        }
        let new_exp = self.exp + amount;
        if new_exp >= self.exp_to_next {
            let old_threshold = self.exp_to_next;
            self.level += 1;
            self.exp = new_exp - old_threshold;
            self.exp_to_next = next_threshold(old_threshold, cfg.growth);
            return Some(LevelUp {
                new_level: self.level,
                carried_exp: self.exp,
                new_threshold: self.exp_to_next,
            });
        }
        self.exp = new_exp;
        None
    }

    /// Fraction of the current level already earned, for progress bars.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn progress_fraction(&self) -> f32 {
        if self.exp_to_next <= 0 {
            return 0.0;
        }
        (self.exp as f64 / self.exp_to_next as f64) as f32
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn next_threshold(old_threshold: i64, growth: f32) -> i64 {
    let raised = (old_threshold as f64 * f64::from(growth)).floor() as i64;
    raised.max(1)
}
