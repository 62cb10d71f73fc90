//! Local task suggestions for free time.
//!
//! When the user has a free window, propose flexible tasks from the
//! current book: incomplete, without a fixed time, oldest first. The
//! hosted model gives the conversational answer; this is the deterministic
//! counterpart the views use.

use super::Task;

/// Default number of suggestions returned.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Propose up to `limit` flexible tasks for a free window.
///
/// Tasks with explicit times are pinned to their slot and never proposed;
/// completed tasks are skipped. Insertion order is preserved so the
/// longest-waiting task surfaces first.
pub fn suggest_for_free_time(tasks: &[Task], limit: usize) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.completed && !t.is_timed())
        .take(limit)
        .collect()
}
