//! Gacha stone wallet, loot draws, and the owned-character roster.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::characters::{Character, CharacterCatalog};
use crate::constants::{DRAW_COST, TASK_STONE_REWARD};

/// Configuration for the stone economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GachaConfig {
    /// Stones consumed by one draw.
    pub draw_cost: i64,
    /// Stones awarded for the first completion of a task.
    pub task_stone_reward: i64,
}

impl GachaConfig {
    /// The tuning shipped with the game.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            draw_cost: DRAW_COST,
            task_stone_reward: TASK_STONE_REWARD,
        }
    }
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Recoverable failures of the loot engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GachaError {
    #[error("not enough gacha stones: need {needed}, have {have}")]
    InsufficientCurrency { needed: i64, have: i64 },
    #[error("character '{id}' is not owned")]
    NotOwned { id: String },
    #[error("character catalog is empty")]
    EmptyCatalog,
}

/// Result of one successful draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub character: Character,
    /// Whether the character was absent from the unique-owned set
    /// before this draw landed.
    pub was_new: bool,
}

/// Wallet plus duplicate-tolerant loot log.
///
/// `owned` is an append-only sequence of catalog ids; duplicates are a
/// visible, intended outcome of the economy. The unique-owned set is
/// derived on demand for achievement checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GachaState {
    pub stones: i64,
    pub draw_count: u32,
    #[serde(default)]
    pub owned: Vec<String>,
    #[serde(default)]
    pub active_id: Option<String>,
}

impl GachaState {
    /// State owning only the starter character, which is also active.
    #[must_use]
    pub fn with_starter(starter_id: &str) -> Self {
        Self {
            stones: 0,
            draw_count: 0,
            owned: vec![starter_id.to_string()],
            active_id: Some(starter_id.to_string()),
        }
    }

    /// Unconditional balance increase. Non-positive amounts are ignored.
    pub fn credit(&mut self, amount: i64) {
        if amount > 0 {
            self.stones += amount;
        }
    }

    /// Whether the character appears in the loot log at least once.
    #[must_use]
    pub fn owns(&self, id: &str) -> bool {
        self.owned.iter().any(|owned| owned == id)
    }

    /// Distinct owned characters, for completion-rate and achievement checks.
    #[must_use]
    pub fn unique_owned(&self) -> HashSet<&str> {
        self.owned.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn unique_owned_count(&self) -> usize {
        self.unique_owned().len()
    }

    /// Execute one draw against the catalog.
    ///
    /// The pick is uniform over the full catalog, not just unowned
    /// entries; duplicate pulls are part of the economy and must stay
    /// visible. Rejection leaves balance and counters untouched.
    ///
    /// # Errors
    ///
    /// `EmptyCatalog` when there is nothing to draw from,
    /// `InsufficientCurrency` when the balance cannot cover the cost.
    pub fn draw<R: Rng>(
        &mut self,
        catalog: &CharacterCatalog,
        cfg: &GachaConfig,
        rng: &mut R,
    ) -> Result<DrawOutcome, GachaError> {
        if catalog.is_empty() {
            return Err(GachaError::EmptyCatalog);
        }
        if self.stones < cfg.draw_cost {
            return Err(GachaError::InsufficientCurrency {
                needed: cfg.draw_cost,
                have: self.stones,
            });
        }

        let index = rng.random_range(0..catalog.len());
        let character = catalog.characters[index].clone();
        let was_new = !self.owns(&character.id);

        self.stones -= cfg.draw_cost;
        self.draw_count += 1;
        self.owned.push(character.id.clone());

        Ok(DrawOutcome { character, was_new })
    }

    /// Reassign the active character.
    ///
    /// # Errors
    ///
    /// `NotOwned` when the id is absent from the loot log; the active
    /// character must always be a member of the owned collection.
    pub fn select_active(&mut self, id: &str) -> Result<(), GachaError> {
        if !self.owns(id) {
            return Err(GachaError::NotOwned { id: id.to_string() });
        }
        self.active_id = Some(id.to_string());
        Ok(())
    }
}
