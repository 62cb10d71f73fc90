//! Task records and the in-session task book.

pub mod extract;
pub mod suggest;

pub use extract::{extract_tasks, format_block, TaskExtractor, TASKS_MARKER};
pub use suggest::{suggest_for_free_time, DEFAULT_SUGGESTIONS};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task for the day.
///
/// `time` is kept as the raw clock token the task arrived with ("9:00 AM",
/// "14:00", ...); interpretation happens at composition time. Ids are
/// random and collision-resistant within a session; no global uniqueness
/// is relied on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub time: Option<String>,
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task with a fresh id.
    pub fn new(title: impl Into<String>, time: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            time,
            completed: false,
        }
    }

    /// Whether the task carries an explicit clock time.
    pub fn is_timed(&self) -> bool {
        self.time.is_some()
    }
}

/// Ordered collection of the session's tasks.
///
/// Titles are not unique and extraction may append duplicates; the book
/// does not deduplicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskBook {
    tasks: Vec<Task>,
}

impl TaskBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one task.
    pub fn add(&mut self, task: Task) -> &Task {
        self.tasks.push(task);
        self.tasks.last().expect("just pushed")
    }

    /// Append every extracted task in order.
    pub fn extend(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks.extend(tasks);
    }

    /// Flip completion for the task with `id`. Returns false when no task
    /// matches.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove the task with `id`, returning it when found. Reminder rules
    /// referencing the id are left to their owner and may orphan.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_round_trips() {
        let mut book = TaskBook::new();
        let id = book.add(Task::new("Review notes", None)).id.clone();

        assert!(book.toggle(&id));
        assert!(book.get(&id).unwrap().completed);
        assert!(book.toggle(&id));
        assert!(!book.get(&id).unwrap().completed);
    }

    #[test]
    fn remove_leaves_other_tasks_untouched() {
        let mut book = TaskBook::new();
        let keep = book
            .add(Task::new("Keep me", Some("9:00 AM".into())))
            .id
            .clone();
        let drop = book.add(Task::new("Drop me", None)).id.clone();

        assert!(book.remove(&drop).is_some());
        assert!(book.remove(&drop).is_none());
        assert_eq!(book.len(), 1);
        let survivor = book.get(&keep).unwrap();
        assert_eq!(survivor.title, "Keep me");
        assert_eq!(survivor.time.as_deref(), Some("9:00 AM"));
    }

    #[test]
    fn duplicate_titles_are_allowed() {
        let mut book = TaskBook::new();
        book.add(Task::new("Standup", Some("9:00 AM".into())));
        book.add(Task::new("Standup", Some("9:00 AM".into())));
        assert_eq!(book.len(), 2);
    }
}
