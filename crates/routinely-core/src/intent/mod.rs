//! Intent classification for user utterances.
//!
//! Keyword and regex matching is a coarse approximation of natural
//! language understanding, so the classifier sits behind a trait and can
//! be swapped without touching the prompt router.

use regex::Regex;

/// What the user's latest message is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The user named their profession (captured label, lowercased).
    ProfessionDeclared(String),
    /// The message mentions tasks, meetings, or scheduling.
    TaskMention,
    /// The user asks what to do with free time.
    SuggestionRequest,
    /// The user asks for a full daily routine.
    RoutineRequest,
    /// The user asks about reminders or notifications.
    ReminderInquiry,
    /// Nothing matched; the generic prompt applies.
    General,
}

/// Maps a user utterance to an [`Intent`].
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, message: &str) -> Intent;
}

const TASK_KEYWORDS: &[&str] = &["task", "todo", "schedule", "plan", "meeting", "appointment"];

const SUGGESTION_PHRASES: &[&str] = &[
    "What should I do now",
    "have 1 hour free",
    "suggest a task",
    "recommend",
];

const ROUTINE_PHRASES: &[&str] = &[
    "Generate a daily routine",
    "Create a routine",
    "Make a schedule",
];

const REMINDER_KEYWORDS: &[&str] = &["reminder", "notify", "alert"];

/// First-match-wins classifier over five ordered predicates.
///
/// Ordering matters: "Make a schedule" contains the task keyword
/// "schedule" and therefore classifies as [`Intent::TaskMention`], not
/// [`Intent::RoutineRequest`].
pub struct KeywordClassifier {
    profession_patterns: Vec<Regex>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        let profession_patterns = [
            r"(?i)profession is (.*)$",
            r"(?i)I am a (.*)$",
            r"(?i)I work as a (.*)$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("profession pattern is valid"))
        .collect();

        Self {
            profession_patterns,
        }
    }

    fn profession_in(&self, message: &str) -> Option<String> {
        self.profession_patterns.iter().find_map(|re| {
            re.captures(message)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_lowercase())
        })
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, message: &str) -> Intent {
        if let Some(profession) = self.profession_in(message) {
            return Intent::ProfessionDeclared(profession);
        }
        if TASK_KEYWORDS.iter().any(|k| message.contains(k)) {
            return Intent::TaskMention;
        }
        if SUGGESTION_PHRASES.iter().any(|p| message.contains(p)) {
            return Intent::SuggestionRequest;
        }
        if ROUTINE_PHRASES.iter().any(|p| message.contains(p)) {
            return Intent::RoutineRequest;
        }
        if REMINDER_KEYWORDS.iter().any(|k| message.contains(k)) {
            return Intent::ReminderInquiry;
        }
        Intent::General
    }
}
