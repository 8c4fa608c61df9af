//! Todomodachi Game Engine
//!
//! Platform-agnostic core game logic for the Todomodachi gamified task
//! tracker. Completing tasks feeds an RPG-style progression loop,
//! a gacha-stone economy with a collectible character roster, a
//! declarative achievement catalog, and derived activity analytics.
//! This crate provides all of those rules without UI or
//! platform-specific dependencies.

pub mod achievements;
pub mod analytics;
pub mod characters;
pub mod companion;
pub mod constants;
pub mod gacha;
pub mod progression;
pub mod session;
pub mod state;
pub mod tasks;

// Re-export commonly used types
pub use achievements::{
    Achievement, AchievementBook, AchievementError, Goal, NewlyCompleted,
};
pub use analytics::{
    completed_in_trailing_window, completed_this_week, consecutive_day_streak, total_completed,
};
pub use characters::{Character, CharacterCatalog};
pub use companion::{
    CompanionError, CompanionRequest, CompanionSession, MAX_REPLY_CHARS, Moment, TurnToken,
    fallback_line, shape_reply,
};
#[cfg(feature = "async")]
pub use companion::{CompanionClient, request_reply};
pub use gacha::{DrawOutcome, GachaConfig, GachaError, GachaState};
pub use progression::{LevelUp, Progression, ProgressionConfig, ProgressionConfigError};
pub use session::{
    ActivityReport, ClaimReport, DrawReport, GameSession, TaskToggleOutcome,
};
pub use state::{GameState, StateSnapshot};
pub use tasks::{TaskBook, TaskTransition, Todo};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this; the engine
/// treats state as in-memory for one session and never persists on its
/// own.
pub trait StateStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save game state under a slot name.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be saved.
    fn save(&self, slot: &str, state: &GameState) -> Result<(), Self::Error>;

    /// Load game state from a slot, `None` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be loaded.
    fn load(&self, slot: &str) -> Result<Option<GameState>, Self::Error>;
}
