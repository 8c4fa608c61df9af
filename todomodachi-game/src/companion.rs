//! Companion chat sequencing and the text-completion collaborator contract.
//!
//! The companion reply is the one genuinely asynchronous boundary in the
//! game: requests must never block state transitions, and a reply that
//! arrives after a newer request started is discarded (last-request-wins
//! display). Failures and timeouts degrade silently to canned lines;
//! they never surface as errors and never touch game state.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::characters::Character;

/// Soft cap on reply length, mirrored in the collaborator prompt.
pub const MAX_REPLY_CHARS: usize = 50;

/// Request contract for the external text-completion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionRequest {
    pub character_name: String,
    pub character_description: String,
    pub context_message: String,
}

impl CompanionRequest {
    /// Build a request for the given character and context message.
    #[must_use]
    pub fn for_character(character: &Character, context_message: &str) -> Self {
        Self {
            character_name: character.name.clone(),
            character_description: character.desc.clone(),
            context_message: context_message.to_string(),
        }
    }
}

/// Failures at the collaborator boundary. Always recoverable: callers
/// fall back to a canned line and move on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompanionError {
    #[error("companion service unavailable")]
    Unavailable,
}

/// Game moments with a canned companion line, used whenever the
/// collaborator is unconfigured, slow, or failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Greeting,
    TaskAdded,
    TaskCompleted,
    LevelUp,
    DrawNew,
    DrawDuplicate,
    StonesShort,
    CharacterChanged,
}

/// Static fallback line for a moment.
#[must_use]
pub const fn fallback_line(moment: Moment) -> &'static str {
    match moment {
        Moment::Greeting => "Hi! Let's do our best today!",
        Moment::TaskAdded => "A new task! You've got this!",
        Moment::TaskCompleted => "Task done! You earned a gacha stone!",
        Moment::LevelUp => "Level up! Congratulations!",
        Moment::DrawNew => "A new friend joined you!",
        Moment::DrawDuplicate => "We meet again! Still happy to see you.",
        Moment::StonesShort => "Not enough stones yet. Keep going!",
        Moment::CharacterChanged => "Nice to meet you! Let's team up!",
    }
}

/// Opaque handle identifying one logical conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TurnToken(u64);

/// Display-side sequencing of companion replies.
///
/// Only the reply carrying the latest token is accepted; anything older
/// is a stale response from a superseded request and is dropped without
/// touching the display state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionSession {
    turn: u64,
    display: Option<String>,
}

impl CompanionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new conversation turn, superseding any in-flight request.
    pub fn begin_turn(&mut self) -> TurnToken {
        self.turn += 1;
        TurnToken(self.turn)
    }

    /// Token of the most recently started turn.
    #[must_use]
    pub const fn latest(&self) -> TurnToken {
        TurnToken(self.turn)
    }

    /// Accept a reply for the given turn. Returns false (and changes
    /// nothing) when the turn has been superseded.
    pub fn accept(&mut self, token: TurnToken, reply: &str) -> bool {
        if token != self.latest() {
            return false;
        }
        self.display = Some(shape_reply(reply));
        true
    }

    /// Accept the canned line for a moment, same sequencing rules.
    pub fn accept_fallback(&mut self, token: TurnToken, moment: Moment) -> bool {
        self.accept(token, fallback_line(moment))
    }

    /// Currently displayed companion line, if any.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Clear the speech bubble.
    pub fn clear(&mut self) {
        self.display = None;
    }
}

/// Normalize a raw collaborator reply for display: trim, collapse
/// repeated blank lines, cap the length on a character boundary.
#[must_use]
pub fn shape_reply(raw: &str) -> String {
    let mut shaped = String::new();
    let mut previous_blank = false;
    for line in raw.trim().lines() {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        if !shaped.is_empty() {
            shaped.push('\n');
        }
        shaped.push_str(line.trim_end());
    }
    shaped.chars().take(MAX_REPLY_CHARS).collect()
}

#[cfg(feature = "async")]
mod request {
    use std::future::Future;
    use std::time::Duration;

    use tokio::time::timeout;

    use super::{CompanionError, CompanionRequest, Moment, fallback_line, shape_reply};

    /// Text-completion collaborator consumed by the companion surface.
    pub trait CompanionClient {
        /// Produce a short in-character reply for the request.
        fn generate(
            &self,
            request: &CompanionRequest,
        ) -> impl Future<Output = Result<String, CompanionError>> + Send;
    }

    /// Request a reply with a deadline, degrading to the canned line for
    /// `fallback` on error, timeout, or an empty reply. Never fails.
    pub async fn request_reply<C: CompanionClient>(
        client: &C,
        request: &CompanionRequest,
        deadline: Duration,
        fallback: Moment,
    ) -> String {
        match timeout(deadline, client.generate(request)).await {
            Ok(Ok(reply)) if !reply.trim().is_empty() => shape_reply(&reply),
            _ => fallback_line(fallback).to_string(),
        }
    }
}

#[cfg(feature = "async")]
pub use request::{CompanionClient, request_reply};
