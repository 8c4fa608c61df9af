//! High-level session binding the aggregate state to its catalogs.
//!
//! Every mutation is funneled through the transition methods here, and
//! every reward-relevant transition settles atomically end-to-end: the
//! state change, its logs, and the achievement re-evaluation happen
//! before anything else can observe the aggregate. Achievement
//! re-evaluation is a post-condition of each transition, not a polled
//! background task.
use chrono::{DateTime, Local};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::achievements::{AchievementError, NewlyCompleted};
use crate::analytics;
use crate::characters::{Character, CharacterCatalog};
use crate::constants::{
    LOG_ACHIEVEMENT_CLAIMED_PREFIX, LOG_ACHIEVEMENT_UNLOCKED_PREFIX, LOG_ACTIVE_CHANGED,
    LOG_ACTIVE_REJECTED, LOG_GACHA_DRAW, LOG_GACHA_DRAW_NEW, LOG_GACHA_INSUFFICIENT, LOG_LEVEL_UP,
    LOG_TASK_ADDED, LOG_TASK_COMPLETE, LOG_TASK_RECOMPLETE, LOG_TASK_REMOVED, LOG_TASK_REOPENED,
};
use crate::gacha::{GachaConfig, GachaError};
use crate::progression::{LevelUp, ProgressionConfig};
use crate::state::{GameState, StateSnapshot};
use crate::tasks::TaskTransition;

/// Outcome of toggling a task, including any rewards it triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskToggleOutcome {
    pub transition: TaskTransition,
    /// Experience awarded by this toggle (zero unless first completion).
    pub exp_awarded: i64,
    /// Stones awarded by this toggle (zero unless first completion).
    pub stones_awarded: i64,
    pub level_up: Option<LevelUp>,
    pub newly_completed: NewlyCompleted,
}

/// Outcome of a successful loot draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawReport {
    pub character: Character,
    pub was_new: bool,
    pub newly_completed: NewlyCompleted,
}

/// Outcome of a successful achievement claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReport {
    pub id: String,
    pub reward: i64,
    pub newly_completed: NewlyCompleted,
}

/// Read-only analytics bundle for the report view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityReport {
    pub total_completed: usize,
    pub completed_this_week: usize,
    pub streak_days: u32,
}

/// Session wrapper owning the game state, catalogs, and tuning.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    catalog: CharacterCatalog,
    progression_cfg: ProgressionConfig,
    gacha_cfg: GachaConfig,
}

impl GameSession {
    /// Construct a fresh session from a seed and character catalog.
    ///
    /// The catalog's starter character is owned and active from the
    /// first frame; an empty catalog leaves the roster empty and every
    /// draw rejected.
    #[must_use]
    pub fn new(seed: u64, catalog: CharacterCatalog) -> Self {
        let mut state = GameState::default().with_seed(seed);
        state.gacha = match catalog.starter() {
            Some(starter) => crate::gacha::GachaState::with_starter(&starter.id),
            None => crate::gacha::GachaState::default(),
        };
        Self {
            state,
            catalog,
            progression_cfg: ProgressionConfig::default_config(),
            gacha_cfg: GachaConfig::default_config(),
        }
    }

    /// Rebuild a session around a previously saved state.
    #[must_use]
    pub fn from_state(state: GameState, catalog: CharacterCatalog) -> Self {
        Self {
            state: state.rehydrate(),
            catalog,
            progression_cfg: ProgressionConfig::default_config(),
            gacha_cfg: GachaConfig::default_config(),
        }
    }

    /// Override the progression tuning.
    #[must_use]
    pub fn with_progression_config(mut self, cfg: ProgressionConfig) -> Self {
        self.progression_cfg = cfg;
        self
    }

    /// Override the economy tuning.
    #[must_use]
    pub fn with_gacha_config(mut self, cfg: GachaConfig) -> Self {
        self.gacha_cfg = cfg;
        self
    }

    /// Add a task. Returns its id, or `None` for blank text.
    pub fn add_task(&mut self, text: &str) -> Option<u64> {
        let id = self.state.tasks.add(text)?;
        self.state.push_log(LOG_TASK_ADDED);
        Some(id)
    }

    /// Remove a task. Returns whether anything was removed.
    pub fn remove_task(&mut self, id: u64) -> bool {
        let removed = self.state.tasks.remove(id);
        if removed {
            self.state.push_log(LOG_TASK_REMOVED);
        }
        removed
    }

    /// Rename a task.
    pub fn rename_task(&mut self, id: u64, text: &str) -> bool {
        self.state.tasks.rename(id, text)
    }

    /// Toggle a task's completion, paying out rewards exactly once per
    /// task. Returns `None` for unknown ids.
    pub fn toggle_task(&mut self, id: u64, now: DateTime<Local>) -> Option<TaskToggleOutcome> {
        let transition = self.state.tasks.toggle(id, now)?;

        let mut exp_awarded = 0;
        let mut stones_awarded = 0;
        let mut level_up = None;
        if transition.first_completion {
            self.state.push_log(LOG_TASK_COMPLETE);
            exp_awarded = self.progression_cfg.task_exp;
            level_up = self
                .state
                .progression
                .apply_experience(exp_awarded, &self.progression_cfg);
            if level_up.is_some() {
                self.state.push_log(LOG_LEVEL_UP);
            }
            stones_awarded = self.gacha_cfg.task_stone_reward;
            self.state.gacha.credit(stones_awarded);
        } else if transition.now_completed {
            self.state.push_log(LOG_TASK_RECOMPLETE);
        } else {
            self.state.push_log(LOG_TASK_REOPENED);
        }

        let newly_completed = self.evaluate_achievements();
        Some(TaskToggleOutcome {
            transition,
            exp_awarded,
            stones_awarded,
            level_up,
            newly_completed,
        })
    }

    /// Apply a raw experience delta (exposed for event sources other
    /// than task completion). Non-positive amounts are a no-op.
    pub fn apply_experience(&mut self, amount: i64) -> (Option<LevelUp>, NewlyCompleted) {
        let level_up = self
            .state
            .progression
            .apply_experience(amount, &self.progression_cfg);
        if level_up.is_some() {
            self.state.push_log(LOG_LEVEL_UP);
        }
        (level_up, self.evaluate_achievements())
    }

    /// Credit stones from an external source.
    pub fn credit_stones(&mut self, amount: i64) -> NewlyCompleted {
        self.state.gacha.credit(amount);
        self.evaluate_achievements()
    }

    /// Spend stones on one loot draw.
    ///
    /// # Errors
    ///
    /// Propagates [`GachaError`] from the loot engine; rejection leaves
    /// the whole aggregate untouched apart from a log entry.
    pub fn draw(&mut self) -> Result<DrawReport, GachaError> {
        let state = &mut self.state;
        let seed = state.seed;
        let rng = state
            .rng
            .get_or_insert_with(|| ChaCha20Rng::seed_from_u64(seed));
        let outcome = match state.gacha.draw(&self.catalog, &self.gacha_cfg, rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                if matches!(err, GachaError::InsufficientCurrency { .. }) {
                    state.push_log(LOG_GACHA_INSUFFICIENT);
                }
                return Err(err);
            }
        };

        state.push_log(LOG_GACHA_DRAW);
        if outcome.was_new {
            state.push_log(LOG_GACHA_DRAW_NEW);
        }
        let newly_completed = self.evaluate_achievements();
        Ok(DrawReport {
            character: outcome.character,
            was_new: outcome.was_new,
            newly_completed,
        })
    }

    /// Claim a completed achievement, crediting its reward exactly once.
    ///
    /// # Errors
    ///
    /// Propagates [`AchievementError`]; a failed claim performs no
    /// mutation.
    pub fn claim_achievement(&mut self, id: &str) -> Result<ClaimReport, AchievementError> {
        let reward = self.state.achievements.claim(id)?;
        self.state.gacha.credit(reward);
        self.state
            .logs
            .push(format!("{LOG_ACHIEVEMENT_CLAIMED_PREFIX}{id}"));
        let newly_completed = self.evaluate_achievements();
        Ok(ClaimReport {
            id: id.to_string(),
            reward,
            newly_completed,
        })
    }

    /// Reassign the active character.
    ///
    /// # Errors
    ///
    /// `NotOwned` when the character is not in the roster; the rejection
    /// is logged since it indicates a presentation-layer desync.
    pub fn select_active_character(&mut self, id: &str) -> Result<(), GachaError> {
        match self.state.gacha.select_active(id) {
            Ok(()) => {
                self.state.push_log(LOG_ACTIVE_CHANGED);
                Ok(())
            }
            Err(err) => {
                self.state.push_log(LOG_ACTIVE_REJECTED);
                Err(err)
            }
        }
    }

    fn evaluate_achievements(&mut self) -> NewlyCompleted {
        let snapshot = self.state.snapshot();
        let newly = self.state.achievements.evaluate(&snapshot);
        for id in &newly {
            self.state
                .logs
                .push(format!("{LOG_ACHIEVEMENT_UNLOCKED_PREFIX}{id}"));
        }
        newly
    }

    /// Borrow the underlying immutable game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The character catalog bound to this session.
    #[must_use]
    pub const fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    /// Current aggregate snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// The currently active character, if the roster is non-empty.
    #[must_use]
    pub fn active_character(&self) -> Option<&Character> {
        let id = self.state.gacha.active_id.as_deref()?;
        self.catalog.get(id)
    }

    /// Derived analytics over the task history.
    #[must_use]
    pub fn report(&self, now: DateTime<Local>) -> ActivityReport {
        let tasks = self.state.tasks.todos();
        ActivityReport {
            total_completed: analytics::total_completed(tasks),
            completed_this_week: analytics::completed_this_week(tasks, now),
            streak_days: analytics::consecutive_day_streak(tasks),
        }
    }

    /// Consume the session, returning the underlying game state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
