//! Declarative achievement catalog, evaluation, and the claim protocol.
//!
//! Each achievement moves monotonically through
//! `Locked -> CompletedUnclaimed -> Claimed`. Conditions are data, not
//! code: a [`Goal`] variant plus threshold, dispatched against a
//! read-only [`StateSnapshot`]. This keeps the catalog serializable and
//! testable without a live session.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::state::StateSnapshot;

/// Ids of achievements completed by a single evaluation pass.
pub type NewlyCompleted = SmallVec<[String; 4]>;

/// Condition kind evaluated against the aggregate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Goal {
    /// Completed-task count reaches the threshold.
    TaskCount { threshold: u32 },
    /// Player level reaches the threshold.
    Level { threshold: u32 },
    /// Distinct owned characters reach the threshold.
    UniqueCharacters { threshold: u32 },
    /// Lifetime draw count reaches the threshold.
    DrawCount { threshold: u32 },
}

impl Goal {
    /// Pure predicate dispatch over the snapshot.
    #[must_use]
    pub const fn is_met(self, snapshot: &StateSnapshot) -> bool {
        match self {
            Self::TaskCount { threshold } => snapshot.completed_tasks >= threshold,
            Self::Level { threshold } => snapshot.level >= threshold,
            Self::UniqueCharacters { threshold } => snapshot.unique_characters >= threshold,
            Self::DrawCount { threshold } => snapshot.draw_count >= threshold,
        }
    }
}

/// Catalog entry plus its mutable protocol flags.
///
/// `claimed` implies `completed`; neither flag ever reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub goal: Goal,
    /// Stones credited on claim, exactly once.
    pub reward: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub claimed: bool,
}

impl Achievement {
    /// Whether the reward is currently claimable.
    #[must_use]
    pub const fn is_claimable(&self) -> bool {
        self.completed && !self.claimed
    }
}

/// Recoverable failures of the claim protocol.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AchievementError {
    #[error("unknown achievement '{id}'")]
    Unknown { id: String },
    #[error("achievement '{id}' is not claimable")]
    NotClaimable { id: String },
}

/// The full achievement catalog with per-entry protocol state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementBook {
    pub achievements: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::default_catalog()
    }
}

impl AchievementBook {
    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the catalog shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Empty catalog for tests.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            achievements: Vec::new(),
        }
    }

    /// The catalog shipped with the game: escalating thresholds on task
    /// completions, level, unique characters, and draws.
    #[must_use]
    pub fn default_catalog() -> Self {
        let entry = |id: &str, name: &str, desc: &str, goal: Goal, reward: i64| Achievement {
            id: id.to_string(),
            name: name.to_string(),
            desc: desc.to_string(),
            goal,
            reward,
            completed: false,
            claimed: false,
        };
        Self {
            achievements: vec![
                entry(
                    "ach.task.first",
                    "First Step",
                    "Complete your first task.",
                    Goal::TaskCount { threshold: 1 },
                    5,
                ),
                entry(
                    "ach.task.ten",
                    "Getting Things Done",
                    "Complete 10 tasks.",
                    Goal::TaskCount { threshold: 10 },
                    10,
                ),
                entry(
                    "ach.task.fifty",
                    "Task Machine",
                    "Complete 50 tasks.",
                    Goal::TaskCount { threshold: 50 },
                    25,
                ),
                entry(
                    "ach.task.hundred",
                    "Centurion",
                    "Complete 100 tasks.",
                    Goal::TaskCount { threshold: 100 },
                    50,
                ),
                entry(
                    "ach.level.two",
                    "Warming Up",
                    "Reach level 2.",
                    Goal::Level { threshold: 2 },
                    5,
                ),
                entry(
                    "ach.level.five",
                    "On a Roll",
                    "Reach level 5.",
                    Goal::Level { threshold: 5 },
                    15,
                ),
                entry(
                    "ach.level.ten",
                    "Veteran",
                    "Reach level 10.",
                    Goal::Level { threshold: 10 },
                    30,
                ),
                entry(
                    "ach.chars.pair",
                    "Company",
                    "Own 2 different characters.",
                    Goal::UniqueCharacters { threshold: 2 },
                    10,
                ),
                entry(
                    "ach.chars.all",
                    "Full House",
                    "Own every character.",
                    Goal::UniqueCharacters { threshold: 3 },
                    20,
                ),
                entry(
                    "ach.draw.first",
                    "Beginner's Luck",
                    "Draw from the gacha once.",
                    Goal::DrawCount { threshold: 1 },
                    5,
                ),
                entry(
                    "ach.draw.ten",
                    "Regular Customer",
                    "Draw from the gacha 10 times.",
                    Goal::DrawCount { threshold: 10 },
                    15,
                ),
                entry(
                    "ach.draw.fifty",
                    "High Roller",
                    "Draw from the gacha 50 times.",
                    Goal::DrawCount { threshold: 50 },
                    40,
                ),
            ],
        }
    }

    /// Find an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Ids currently completed but unclaimed.
    #[must_use]
    pub fn claimable_ids(&self) -> Vec<String> {
        self.achievements
            .iter()
            .filter(|a| a.is_claimable())
            .map(|a| a.id.clone())
            .collect()
    }

    /// Re-evaluate every still-locked entry against the snapshot.
    ///
    /// Already-completed entries are skipped, which makes the pass
    /// idempotent and the `completed` flag monotonic.
    pub fn evaluate(&mut self, snapshot: &StateSnapshot) -> NewlyCompleted {
        let mut newly = NewlyCompleted::new();
        for achievement in &mut self.achievements {
            if !achievement.completed && achievement.goal.is_met(snapshot) {
                achievement.completed = true;
                newly.push(achievement.id.clone());
            }
        }
        newly
    }

    /// Mark an achievement claimed and return its reward.
    ///
    /// Crediting the reward is the caller's job so that every balance
    /// mutation stays funneled through the session.
    ///
    /// # Errors
    ///
    /// `Unknown` for ids outside the catalog, `NotClaimable` when the
    /// entry is still locked or was already claimed; neither mutates.
    pub fn claim(&mut self, id: &str) -> Result<i64, AchievementError> {
        let Some(achievement) = self.achievements.iter_mut().find(|a| a.id == id) else {
            return Err(AchievementError::Unknown { id: id.to_string() });
        };
        if !achievement.is_claimable() {
            return Err(AchievementError::NotClaimable { id: id.to_string() });
        }
        achievement.claimed = true;
        Ok(achievement.reward)
    }
}
