//! Task bookkeeping at the collaborator boundary.
//!
//! Task CRUD itself has no game rules; what matters to the core is the
//! completion transition and the one-shot award guard. `completed_at`
//! is set exactly once, on the first incomplete-to-complete transition,
//! and `has_awarded_exp` prevents re-rewarding a task that gets toggled
//! back and forth.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
    #[serde(default)]
    pub has_awarded_exp: bool,
}

/// Outcome of a toggle, consumed by the session to decide rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTransition {
    pub id: u64,
    pub now_completed: bool,
    /// True only on the first completion of this task; the award guard.
    pub first_completion: bool,
}

/// Ordered task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBook {
    #[serde(default)]
    next_id: u64,
    todos: Vec<Todo>,
}

impl TaskBook {
    /// Append a task. Blank text is rejected.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.todos.push(Todo {
            id,
            text: text.to_string(),
            completed: false,
            completed_at: None,
            has_awarded_exp: false,
        });
        Some(id)
    }

    /// Remove a task. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        self.todos.len() != before
    }

    /// Rename a task, keeping its completion state.
    pub fn rename(&mut self, id: u64, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(todo) => {
                todo.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Flip a task's completion flag.
    ///
    /// `completed_at` is recorded once, on the first completion, and is
    /// deliberately kept on reopen so analytics history stays intact.
    pub fn toggle(&mut self, id: u64, now: DateTime<Local>) -> Option<TaskTransition> {
        let todo = self.get_mut(id)?;
        todo.completed = !todo.completed;
        let mut first_completion = false;
        if todo.completed && !todo.has_awarded_exp {
            todo.has_awarded_exp = true;
            todo.completed_at = Some(now);
            first_completion = true;
        }
        Some(TaskTransition {
            id,
            now_completed: todo.completed,
            first_completion,
        })
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    /// Full ordered task slice, for analytics and presentation.
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Count of currently-completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn add_assigns_increasing_ids_and_rejects_blanks() {
        let mut book = TaskBook::default();
        let first = book.add("water the plants").unwrap();
        let second = book.add("  stretch  ").unwrap();
        assert!(second > first);
        assert_eq!(book.get(second).unwrap().text, "stretch");
        assert_eq!(book.add("   "), None);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn first_completion_sets_timestamp_and_guard() {
        let mut book = TaskBook::default();
        let id = book.add("write report").unwrap();

        let transition = book.toggle(id, noon(1)).unwrap();
        assert!(transition.now_completed);
        assert!(transition.first_completion);

        let todo = book.get(id).unwrap();
        assert!(todo.has_awarded_exp);
        assert_eq!(todo.completed_at, Some(noon(1)));
    }

    #[test]
    fn reopen_and_recomplete_never_award_twice() {
        let mut book = TaskBook::default();
        let id = book.add("write report").unwrap();
        book.toggle(id, noon(1)).unwrap();

        let reopened = book.toggle(id, noon(2)).unwrap();
        assert!(!reopened.now_completed);
        assert!(!reopened.first_completion);

        let recompleted = book.toggle(id, noon(3)).unwrap();
        assert!(recompleted.now_completed);
        assert!(!recompleted.first_completion, "award guard must hold");
        // Original completion timestamp is preserved for analytics.
        assert_eq!(book.get(id).unwrap().completed_at, Some(noon(1)));
    }

    #[test]
    fn toggle_on_missing_id_is_a_no_op() {
        let mut book = TaskBook::default();
        assert!(book.toggle(99, noon(1)).is_none());
    }

    #[test]
    fn remove_and_rename_behave() {
        let mut book = TaskBook::default();
        let id = book.add("draft email").unwrap();
        assert!(book.rename(id, "send email"));
        assert!(!book.rename(id, "   "));
        assert_eq!(book.get(id).unwrap().text, "send email");
        assert!(book.remove(id));
        assert!(!book.remove(id));
    }
}
