//! Offline probe of the companion interaction contract.
//!
//! Exercises the async boundary without any live text service: a
//! scripted client standing in for a healthy collaborator, a broken one
//! standing in for outages, and the turn-token sequencing that keeps a
//! stale reply from clobbering a newer one.
use std::time::Duration;

use anyhow::{Result, ensure};
use colored::Colorize;
use log::info;
use tokio::time::sleep;
use todomodachi_game::{
    CharacterCatalog, CompanionClient, CompanionError, CompanionRequest, CompanionSession, Moment,
    fallback_line, request_reply,
};

/// Healthy collaborator with a small artificial latency.
struct ScriptedCompanion {
    latency: Duration,
}

impl CompanionClient for ScriptedCompanion {
    async fn generate(&self, request: &CompanionRequest) -> Result<String, CompanionError> {
        sleep(self.latency).await;
        Ok(format!(
            "{} here. {} Nice work today!",
            request.character_name, request.context_message
        ))
    }
}

/// Collaborator that is down hard.
struct OfflineCompanion;

impl CompanionClient for OfflineCompanion {
    async fn generate(&self, _request: &CompanionRequest) -> Result<String, CompanionError> {
        Err(CompanionError::Unavailable)
    }
}

/// Run the probe, printing each exchange. Fails only when the contract
/// itself is violated, never because the collaborator is unavailable.
pub async fn run_probe(timeout_ms: u64) -> Result<()> {
    let catalog = CharacterCatalog::builtin();
    let character = catalog.starter().expect("builtin catalog has a starter");
    let deadline = Duration::from_millis(timeout_ms);
    let mut chat = CompanionSession::new();

    // Healthy round trip.
    let token = chat.begin_turn();
    let request = CompanionRequest::for_character(character, "I finished all my tasks!");
    let reply = request_reply(
        &ScriptedCompanion {
            latency: Duration::from_millis(10),
        },
        &request,
        deadline,
        Moment::TaskCompleted,
    )
    .await;
    ensure!(chat.accept(token, &reply), "fresh reply must be accepted");
    println!("  {} {}", "live:".green().bold(), reply);

    // Outage degrades to the canned line, silently.
    let token = chat.begin_turn();
    let reply = request_reply(&OfflineCompanion, &request, deadline, Moment::Greeting).await;
    ensure!(
        reply == fallback_line(Moment::Greeting),
        "outage must fall back to the canned line"
    );
    ensure!(chat.accept(token, &reply), "fallback follows sequencing");
    println!("  {} {}", "offline:".yellow().bold(), reply);

    // A reply from a superseded turn is discarded.
    let stale = chat.begin_turn();
    let fresh = chat.begin_turn();
    ensure!(
        !chat.accept(stale, "stale reply"),
        "superseded turn must be discarded"
    );
    ensure!(chat.accept(fresh, "fresh reply"), "latest turn wins");
    ensure!(chat.display() == Some("fresh reply"));
    println!(
        "  {} stale reply discarded, display = {:?}",
        "race:".blue().bold(),
        chat.display()
    );

    info!("companion probe passed with timeout {timeout_ms}ms");
    Ok(())
}
