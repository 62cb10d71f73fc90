//! `TASKS:` block extraction.
//!
//! The `TASKS:`-prefixed text convention is an informal contract between
//! the prompt template and this parser: assistant replies that list tasks
//! prefix them with `TASKS:` and put one task per line. The block ends at
//! the first blank line (or at a second marker). A missing marker is not
//! an error -- it simply yields zero tasks.

use regex::Regex;

use super::Task;

/// Marker that opens a task block in assistant output.
pub const TASKS_MARKER: &str = "TASKS:";

/// 12-hour clock token with optional minutes and AM/PM marker.
const TIME_TOKEN: &str = r"\d{1,2}(?::\d{2})?\s*(?:AM|PM|am|pm)";

/// Parser for `TASKS:` blocks in assistant messages.
pub struct TaskExtractor {
    time_token: Regex,
    leading_bullets: Regex,
}

impl TaskExtractor {
    pub fn new() -> Self {
        Self {
            time_token: Regex::new(TIME_TOKEN).expect("time token pattern is valid"),
            leading_bullets: Regex::new(r"^[\s\-•*:.]+").expect("bullet pattern is valid"),
        }
    }

    /// Extract tasks from one assistant message.
    ///
    /// Takes the text between the first `TASKS:` marker and the first
    /// blank line (or second marker), one task per non-empty line. Each
    /// line contributes its first clock token as the task time and the
    /// rest, minus leading bullets and punctuation, as the title. No
    /// duplicate detection: re-extraction from overlapping messages will
    /// append duplicates.
    pub fn extract(&self, message: &str) -> Vec<Task> {
        let mut sections = message.split(TASKS_MARKER);
        sections.next();
        let block = match sections.next() {
            Some(rest) => rest.split("\n\n").next().unwrap_or(""),
            None => return Vec::new(),
        };

        block
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let time = self
                    .time_token
                    .find(line)
                    .map(|m| (m.range(), m.as_str().to_string()));

                let without_time = match &time {
                    Some((range, _)) => {
                        let mut rest = String::with_capacity(line.len());
                        rest.push_str(&line[..range.start]);
                        rest.push_str(&line[range.end..]);
                        rest
                    }
                    None => line.to_string(),
                };
                let title = self
                    .leading_bullets
                    .replace(&without_time, "")
                    .trim()
                    .to_string();

                Task::new(title, time.map(|(_, token)| token))
            })
            .collect()
    }
}

impl Default for TaskExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper constructing a throwaway [`TaskExtractor`].
pub fn extract_tasks(message: &str) -> Vec<Task> {
    TaskExtractor::new().extract(message)
}

/// Render tasks as a `TASKS:` block, the same micro-format the extractor
/// reads. Used to validate round-trip behavior instead of assuming the
/// model always complies.
pub fn format_block(tasks: &[Task]) -> String {
    let mut block = String::from(TASKS_MARKER);
    block.push('\n');
    for task in tasks {
        match &task.time {
            Some(time) => block.push_str(&format!("- {} {}\n", time, task.title)),
            None => block.push_str(&format!("- {}\n", task.title)),
        }
    }
    block.push('\n');
    block
}
