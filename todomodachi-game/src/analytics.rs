//! Derived task statistics: totals, trailing-window counts, streaks.
//!
//! Everything here is a pure function of the task slice; no hidden
//! state, no mutation. Timestamps are truncated to local calendar days
//! before any day arithmetic.
use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::constants::TRAILING_WINDOW_DAYS;
use crate::tasks::Todo;

/// Count of tasks currently marked complete.
#[must_use]
pub fn total_completed(tasks: &[Todo]) -> usize {
    tasks.iter().filter(|todo| todo.completed).count()
}

/// Completed tasks whose completion falls within `[now - window_days, now]`.
#[must_use]
pub fn completed_in_trailing_window(
    tasks: &[Todo],
    now: DateTime<Local>,
    window_days: i64,
) -> usize {
    let window_start = now - Duration::days(window_days);
    tasks
        .iter()
        .filter(|todo| todo.completed)
        .filter_map(|todo| todo.completed_at)
        .filter(|at| *at >= window_start && *at <= now)
        .count()
}

/// Completed tasks in the trailing week.
#[must_use]
pub fn completed_this_week(tasks: &[Todo], now: DateTime<Local>) -> usize {
    completed_in_trailing_window(tasks, now, TRAILING_WINDOW_DAYS)
}

/// Length of the consecutive-calendar-day completion streak ending at
/// the most recent completion.
///
/// Same-day completions collapse to one day, and a gap of more than one
/// day terminates the streak rather than being skipped. Returns 0 when
/// nothing has been completed.
#[must_use]
pub fn consecutive_day_streak(tasks: &[Todo]) -> u32 {
    let mut days: Vec<NaiveDate> = tasks
        .iter()
        .filter(|todo| todo.completed)
        .filter_map(|todo| todo.completed_at)
        .map(|at| at.date_naive())
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(&most_recent) = days.first() else {
        return 0;
    };

    let mut streak = 1;
    let mut current = most_recent;
    for &day in days.iter().skip(1) {
        if current.signed_duration_since(day).num_days() == 1 {
            streak += 1;
            current = day;
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn completed_on(id: u64, at: DateTime<Local>) -> Todo {
        Todo {
            id,
            text: format!("task-{id}"),
            completed: true,
            completed_at: Some(at),
            has_awarded_exp: true,
        }
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn totals_ignore_open_tasks() {
        let mut open = completed_on(1, at(2026, 1, 3, 9));
        open.completed = false;
        let tasks = vec![open, completed_on(2, at(2026, 1, 3, 10))];
        assert_eq!(total_completed(&tasks), 1);
    }

    #[test]
    fn trailing_window_is_inclusive_at_both_ends() {
        let now = at(2026, 1, 8, 12);
        let tasks = vec![
            completed_on(1, now),
            completed_on(2, now - Duration::days(7)),
            completed_on(3, now - Duration::days(7) - Duration::hours(1)),
        ];
        assert_eq!(completed_this_week(&tasks, now), 2);
        assert_eq!(completed_in_trailing_window(&tasks, now, 8), 3);
    }

    #[test]
    fn streak_collapses_same_day_and_breaks_on_gap() {
        // Jan 3, Jan 2, Jan 2, Dec 31: two contiguous days, then a gap.
        let tasks = vec![
            completed_on(1, at(2026, 1, 3, 9)),
            completed_on(2, at(2026, 1, 2, 8)),
            completed_on(3, at(2026, 1, 2, 22)),
            completed_on(4, at(2025, 12, 31, 9)),
        ];
        assert_eq!(consecutive_day_streak(&tasks), 2);
    }

    #[test]
    fn streak_spans_month_and_year_boundaries_when_contiguous() {
        let tasks = vec![
            completed_on(1, at(2026, 1, 1, 9)),
            completed_on(2, at(2025, 12, 31, 9)),
            completed_on(3, at(2025, 12, 30, 9)),
        ];
        assert_eq!(consecutive_day_streak(&tasks), 3);
    }

    #[test]
    fn streak_is_zero_without_completions() {
        assert_eq!(consecutive_day_streak(&[]), 0);
        let mut open = completed_on(1, at(2026, 1, 3, 9));
        open.completed = false;
        assert_eq!(consecutive_day_streak(&[open]), 0);
    }

    #[test]
    fn single_day_of_completions_is_a_streak_of_one() {
        let tasks = vec![
            completed_on(1, at(2026, 1, 3, 9)),
            completed_on(2, at(2026, 1, 3, 21)),
        ];
        assert_eq!(consecutive_day_streak(&tasks), 1);
    }
}
