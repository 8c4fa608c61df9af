use chrono::{DateTime, Duration, Local, TimeZone};
use todomodachi_game::{CharacterCatalog, GameSession};

fn at(month: u32, day: u32, hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, month, day, hour, 0, 0).unwrap()
}

fn complete_one(session: &mut GameSession, label: &str, when: DateTime<Local>) -> u64 {
    let id = session.add_task(label).unwrap();
    session.toggle_task(id, when).unwrap();
    id
}

#[test]
fn streak_counts_days_not_completions() {
    let mut session = GameSession::new(21, CharacterCatalog::builtin());
    complete_one(&mut session, "morning", at(5, 10, 8));
    complete_one(&mut session, "evening", at(5, 10, 21));
    complete_one(&mut session, "yesterday", at(5, 9, 12));

    let report = session.report(at(5, 10, 23));
    assert_eq!(report.total_completed, 3);
    assert_eq!(report.streak_days, 2, "same-day pair collapses to one day");
}

#[test]
fn a_skipped_day_ends_the_streak_even_with_older_history() {
    let mut session = GameSession::new(22, CharacterCatalog::builtin());
    complete_one(&mut session, "today", at(5, 20, 9));
    complete_one(&mut session, "yesterday", at(5, 19, 9));
    // Two-day gap, then more history that must not be skipped into.
    complete_one(&mut session, "old 1", at(5, 16, 9));
    complete_one(&mut session, "old 2", at(5, 15, 9));

    let report = session.report(at(5, 20, 10));
    assert_eq!(report.streak_days, 2);
}

#[test]
fn weekly_window_trails_now_not_the_calendar_week() {
    let mut session = GameSession::new(23, CharacterCatalog::builtin());
    let now = at(6, 15, 12);
    complete_one(&mut session, "recent", now - Duration::days(6));
    complete_one(&mut session, "boundary", now - Duration::days(7));
    complete_one(&mut session, "stale", now - Duration::days(9));

    let report = session.report(now);
    assert_eq!(report.total_completed, 3);
    assert_eq!(report.completed_this_week, 2);
}

#[test]
fn reopened_tasks_leave_the_totals_but_keep_their_day() {
    let mut session = GameSession::new(24, CharacterCatalog::builtin());
    let kept = complete_one(&mut session, "kept", at(7, 2, 9));
    let reopened = complete_one(&mut session, "reopened", at(7, 1, 9));
    session.toggle_task(reopened, at(7, 2, 10)).unwrap();

    let report = session.report(at(7, 2, 11));
    // Only currently-completed tasks count anywhere in analytics.
    assert_eq!(report.total_completed, 1);
    assert_eq!(report.streak_days, 1);

    // Re-completing restores the original completion day, not today's.
    session.toggle_task(reopened, at(7, 5, 9)).unwrap();
    let report = session.report(at(7, 5, 10));
    assert_eq!(report.total_completed, 2);
    assert_eq!(
        session.state().tasks.get(kept).unwrap().completed_at,
        Some(at(7, 2, 9))
    );
    assert_eq!(
        session.state().tasks.get(reopened).unwrap().completed_at,
        Some(at(7, 1, 9))
    );
}

#[test]
fn fresh_session_reports_all_zeroes() {
    let session = GameSession::new(25, CharacterCatalog::builtin());
    let report = session.report(at(1, 1, 0));
    assert_eq!(report.total_completed, 0);
    assert_eq!(report.completed_this_week, 0);
    assert_eq!(report.streak_days, 0);
}
