//! Half-hour slotting of flexible tasks into a composed routine.
//!
//! Tasks without an explicit time are placed at the first free half-hour
//! step at or after a starting clock time, skipping slots already occupied
//! by fixed entries, then the routine is re-sorted.

use chrono::{Duration, NaiveTime};

use super::{format_clock, parse_clock, sort_entries, Routine, RoutineEntry};
use crate::task::Task;

const SLOT_MINUTES: i64 = 30;

/// Place incomplete, untimed tasks into `routine` at half-hour steps
/// starting from `start`. Timed tasks are already part of the composed
/// routine and are skipped here.
pub fn place_flexible_tasks(routine: &mut Routine, tasks: &[Task], start: NaiveTime) {
    let mut occupied: Vec<NaiveTime> = routine
        .entries
        .iter()
        .filter_map(|e| parse_clock(&e.time))
        .collect();

    let mut cursor = start;
    for task in tasks.iter().filter(|t| !t.completed && !t.is_timed()) {
        while occupied.contains(&cursor) {
            cursor = advance(cursor);
        }
        routine.entries.push(RoutineEntry {
            time: format_clock(cursor),
            activity: task.title.clone(),
        });
        occupied.push(cursor);
        cursor = advance(cursor);
    }

    sort_entries(&mut routine.entries);
}

fn advance(time: NaiveTime) -> NaiveTime {
    time.overflowing_add_signed(Duration::minutes(SLOT_MINUTES)).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flexible(title: &str) -> Task {
        Task::new(title, None)
    }

    #[test]
    fn fills_consecutive_free_slots() {
        let mut routine = Routine::default();
        let tasks = vec![flexible("One"), flexible("Two")];
        place_flexible_tasks(&mut routine, &tasks, parse_clock("9:00 AM").unwrap());

        let rows: Vec<_> = routine
            .entries
            .iter()
            .map(|e| (e.time.as_str(), e.activity.as_str()))
            .collect();
        assert_eq!(rows, vec![("9:00 AM", "One"), ("9:30 AM", "Two")]);
    }

    #[test]
    fn skips_slots_held_by_fixed_entries() {
        let mut routine = Routine::compose(
            Some("Beekeeper"),
            &[Task::new("Inspection", Some("9:00 AM".to_string()))],
        );
        place_flexible_tasks(&mut routine, &[flexible("Paperwork")], parse_clock("9:00 AM").unwrap());

        let paperwork = routine
            .entries
            .iter()
            .find(|e| e.activity == "Paperwork")
            .unwrap();
        assert_eq!(paperwork.time, "9:30 AM");
    }

    #[test]
    fn completed_and_timed_tasks_are_not_placed() {
        let mut done = flexible("Done");
        done.completed = true;
        let tasks = vec![done, Task::new("Pinned", Some("2:00 PM".to_string()))];

        let mut routine = Routine::default();
        place_flexible_tasks(&mut routine, &tasks, parse_clock("9:00 AM").unwrap());
        assert!(routine.is_empty());
    }

    #[test]
    fn result_stays_sorted() {
        let mut routine = Routine::compose(
            Some("Beekeeper"),
            &[Task::new("Lunch", Some("12:00 PM".to_string()))],
        );
        place_flexible_tasks(&mut routine, &[flexible("Errand")], parse_clock("8:00 AM").unwrap());

        assert_eq!(routine.entries[0].activity, "Errand");
        assert_eq!(routine.entries[1].activity, "Lunch");
    }
}
