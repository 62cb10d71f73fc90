//! Day-routine composition.
//!
//! A routine is an ordered sequence of (time, activity) entries spanning a
//! day. It is derived state: rebuilt from scratch from the profession
//! template and the timed tasks whenever either changes, never updated
//! incrementally and never persisted.

pub mod slots;
pub mod templates;

pub use slots::place_flexible_tasks;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// One row of the day timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineEntry {
    pub time: String,
    pub activity: String,
}

/// A composed day timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Routine {
    pub entries: Vec<RoutineEntry>,
}

impl Routine {
    /// Compose the routine for `profession` and the current tasks.
    ///
    /// No profession produces an empty routine. An unknown profession
    /// yields an empty base list, to which tasks with explicit times are
    /// still appended. Bare clock values are normalized with the
    /// `hour < 12 => AM, else PM` heuristic before sorting. Adjacent
    /// entries identical in both time and activity collapse to one;
    /// non-adjacent duplicates survive.
    pub fn compose(profession: Option<&str>, tasks: &[Task]) -> Self {
        let Some(profession) = profession else {
            return Self::default();
        };

        let mut entries: Vec<RoutineEntry> = templates::template_for(profession)
            .unwrap_or(&[])
            .iter()
            .map(|(time, activity)| RoutineEntry {
                time: (*time).to_string(),
                activity: (*activity).to_string(),
            })
            .collect();

        for task in tasks {
            if let Some(time) = &task.time {
                entries.push(RoutineEntry {
                    time: normalize_time(time),
                    activity: task.title.clone(),
                });
            }
        }

        sort_entries(&mut entries);
        entries.dedup_by(|b, a| b.time == a.time && b.activity == a.activity);

        Self { entries }
    }

    /// Plain-text export: one `"{time} - {activity}"` line per entry.
    pub fn export_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} - {}", e.time, e.activity))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Download filename for the export.
    pub fn export_filename(profession: Option<&str>) -> String {
        format!("{}_Routine.txt", profession.unwrap_or("Custom"))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sort entries by parsed clock-of-day.
///
/// The sort is stable, so ties keep insertion order. Entries whose time
/// does not parse have no meaningful position; they sort to the front so
/// placement stays deterministic.
pub(crate) fn sort_entries(entries: &mut [RoutineEntry]) {
    entries.sort_by_key(|e| parse_clock(&e.time));
}

/// Ensure a clock string carries an AM/PM marker.
///
/// A bare value keeps its digits and gains a marker by the heuristic
/// `hour < 12 => AM, else PM`; an unparseable hour lands on PM.
pub fn normalize_time(time: &str) -> String {
    let upper = time.to_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        return time.to_string();
    }
    let marker = match time.split(':').next().and_then(|h| h.trim().parse::<u32>().ok()) {
        Some(hour) if hour < 12 => "AM",
        _ => "PM",
    };
    format!("{time} {marker}")
}

/// Parse a clock-of-day string like `9:00 AM`, `12:30pm`, or `14:00 PM`.
///
/// Minutes default to zero. An hour at or past 12 keeps its 24-hour value
/// under a PM marker, so normalized `14:00 PM` stays 14:00. Returns None
/// for values that name no valid time of day.
pub fn parse_clock(time: &str) -> Option<NaiveTime> {
    let upper = time.trim().to_uppercase();
    let (digits, marker) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some("AM"))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some("PM"))
    } else {
        (upper.as_str(), None)
    };

    let mut parts = digits.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || minute > 59 {
        return None;
    }

    let hour = match marker {
        Some("PM") if hour < 12 => hour + 12,
        Some("AM") if hour == 12 => 0,
        Some("AM") if hour > 12 => return None,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Format a time of day in the `7:00 AM` style the templates use.
pub fn format_clock(time: NaiveTime) -> String {
    use chrono::Timelike;
    let (hour, minute) = (time.hour(), time.minute());
    let marker = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {marker}")
}
