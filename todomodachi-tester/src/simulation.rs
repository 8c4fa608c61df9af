//! Drives a game session through a scripted scenario, checking the
//! engine's invariants after every transition.
use anyhow::{Context, Result, bail, ensure};
use chrono::{DateTime, Duration, Local, TimeZone};
use serde::Serialize;
use todomodachi_game::{CharacterCatalog, GachaError, GameSession};

use crate::scenarios::{DrawPolicy, Scenario};

/// Aggregate result of one scenario run on one seed.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRecord {
    pub scenario: &'static str,
    pub seed: u64,
    pub days: u32,
    pub tasks_completed: u32,
    pub final_level: u32,
    pub final_exp: i64,
    pub final_exp_to_next: i64,
    pub final_stones: i64,
    pub draws_accepted: u32,
    pub draws_rejected: u32,
    pub unique_characters: usize,
    pub achievements_completed: usize,
    pub achievements_claimed: usize,
    pub reward_stones_claimed: i64,
    pub streak_days: u32,
    pub completed_this_week: usize,
}

fn start_of_run() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
}

/// Run one scenario to completion, verifying invariants along the way.
pub fn run_scenario(scenario: &Scenario, seed: u64, days: u32) -> Result<ScenarioRecord> {
    let mut session = GameSession::new(seed, CharacterCatalog::builtin());
    let mut record = ScenarioRecord {
        scenario: scenario.name,
        seed,
        days,
        tasks_completed: 0,
        final_level: 0,
        final_exp: 0,
        final_exp_to_next: 0,
        final_stones: 0,
        draws_accepted: 0,
        draws_rejected: 0,
        unique_characters: 0,
        achievements_completed: 0,
        achievements_claimed: 0,
        reward_stones_claimed: 0,
        streak_days: 0,
        completed_this_week: 0,
    };

    for day in 0..days {
        let today = start_of_run() + Duration::days(i64::from(day));
        let mut last_task = None;

        for slot in 0..scenario.tasks_per_day {
            let id = session
                .add_task(&format!("day {day} task {slot}"))
                .context("scripted task text should never be blank")?;
            let outcome = session
                .toggle_task(id, today)
                .context("scripted task ids should resolve")?;
            ensure!(
                outcome.transition.first_completion,
                "fresh tasks must award on first completion"
            );
            record.tasks_completed += 1;
            last_task = Some(id);
            check_invariants(&session)?;
        }

        if scenario.churn
            && let Some(id) = last_task
        {
            let before = (session.state().progression, session.state().gacha.stones);
            session.toggle_task(id, today).context("reopen")?;
            session.toggle_task(id, today).context("recomplete")?;
            let after = (session.state().progression, session.state().gacha.stones);
            ensure!(
                before == after,
                "churn must never re-award experience or stones (seed {seed}, day {day})"
            );
        }

        if scenario.draw_policy == DrawPolicy::WhenAffordable {
            drain_draws(&mut session, &mut record)?;
        }

        if scenario.claim_rewards {
            for id in session.state().achievements.claimable_ids() {
                let report = session
                    .claim_achievement(&id)
                    .context("claimable ids must claim exactly once")?;
                record.achievements_claimed += 1;
                record.reward_stones_claimed += report.reward;
                check_invariants(&session)?;
            }
        }
    }

    if scenario.draw_policy == DrawPolicy::HoardThenSpend {
        drain_draws(&mut session, &mut record)?;
    }

    let now = start_of_run() + Duration::days(i64::from(days.saturating_sub(1)));
    let report = session.report(now);
    let snapshot = session.snapshot();
    record.final_level = snapshot.level;
    record.final_exp = snapshot.exp;
    record.final_exp_to_next = snapshot.exp_to_next;
    record.final_stones = snapshot.stones;
    record.unique_characters = session.state().gacha.unique_owned_count();
    record.achievements_completed = session
        .state()
        .achievements
        .achievements
        .iter()
        .filter(|a| a.completed)
        .count();
    record.streak_days = report.streak_days;
    record.completed_this_week = report.completed_this_week;

    ensure!(
        record.streak_days <= days,
        "streak cannot exceed the simulated span"
    );
    check_invariants(&session)?;
    Ok(record)
}

/// Draw until the balance can no longer cover the cost, counting both
/// accepted and the final rejected attempt.
fn drain_draws(session: &mut GameSession, record: &mut ScenarioRecord) -> Result<()> {
    loop {
        let before = session.state().gacha.stones;
        match session.draw() {
            Ok(_) => {
                record.draws_accepted += 1;
                check_invariants(session)?;
            }
            Err(GachaError::InsufficientCurrency { .. }) => {
                record.draws_rejected += 1;
                ensure!(
                    session.state().gacha.stones == before,
                    "rejected draw must not touch the balance"
                );
                return Ok(());
            }
            Err(other) => bail!("unexpected draw failure: {other}"),
        }
    }
}

/// Cross-component invariants that must hold after every transition.
fn check_invariants(session: &GameSession) -> Result<()> {
    let state = session.state();
    ensure!(state.gacha.stones >= 0, "stone balance went negative");
    ensure!(
        state.progression.exp >= 0 && state.progression.exp < state.progression.exp_to_next,
        "experience {} escaped the window [0, {})",
        state.progression.exp,
        state.progression.exp_to_next
    );
    ensure!(
        u64::from(state.gacha.draw_count) + 1 >= state.gacha.owned.len() as u64,
        "loot log grew without draws"
    );
    if let Some(active) = state.gacha.active_id.as_deref() {
        ensure!(
            state.gacha.owns(active),
            "active character '{active}' is not owned"
        );
    }
    for achievement in &state.achievements.achievements {
        ensure!(
            !achievement.claimed || achievement.completed,
            "achievement '{}' is claimed but not completed",
            achievement.id
        );
    }
    Ok(())
}
