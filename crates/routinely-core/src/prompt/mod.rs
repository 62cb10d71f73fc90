//! System-prompt assembly.
//!
//! The router inspects the latest user message, classifies it, and builds
//! the system prompt by concatenating a base prompt with a per-intent
//! extension. A pure function of its input: no match is a valid outcome
//! and falls through to the generic prompt.

use crate::chat::ChatHistory;
use crate::intent::{Intent, IntentClassifier, KeywordClassifier};
use crate::routine::templates;

/// Base system prompt shared by every intent.
pub const BASE_SYSTEM_PROMPT: &str = "You are a professional daily routine management assistant.
You help users plan their day based on their profession and tasks.
Be formal and professional in your responses.
When generating routines or schedules, format them clearly.
When listing tasks, always prefix with TASKS: and then list each task on a new line.";

/// Result of routing one turn.
#[derive(Debug, Clone)]
pub struct RoutedPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
    pub intent: Intent,
}

/// Builds the system prompt for the latest user message.
pub struct PromptRouter {
    classifier: Box<dyn IntentClassifier>,
}

impl PromptRouter {
    /// Router with the shipped keyword classifier.
    pub fn new() -> Self {
        Self::with_classifier(Box::new(KeywordClassifier::new()))
    }

    /// Router with a custom classification strategy.
    pub fn with_classifier(classifier: Box<dyn IntentClassifier>) -> Self {
        Self { classifier }
    }

    /// Classify the latest user message in `history` and assemble the
    /// system prompt for it.
    pub fn route(&self, history: &ChatHistory) -> RoutedPrompt {
        let user_prompt = history.latest_user_content().to_string();
        let intent = self.classifier.classify(&user_prompt);

        let mut system_prompt = BASE_SYSTEM_PROMPT.to_string();
        match &intent {
            Intent::ProfessionDeclared(profession) => {
                system_prompt.push_str(&format!(
                    "\n\nThe user has indicated they are a {profession}.
Provide a tailored daily routine for a {profession} would typically follow.
Include appropriate wake-up times, meal times, work periods, and rest periods.
If you know a template for this profession, use it as a starting point."
                ));
                if let Some(template) = templates::render_prompt_template(profession) {
                    system_prompt
                        .push_str(&format!("\n\nHere's a template for {profession}:\n{template}"));
                }
            }
            Intent::TaskMention => {
                system_prompt.push_str(
                    "\n\nThe user is mentioning tasks.
Extract any tasks from their message and organize them into a schedule.
For tasks with specific times, schedule them at those times.
For flexible tasks, suggest appropriate time slots based on typical daily routines.
Always format the tasks list with the prefix TASKS: followed by each task on a new line.",
                );
            }
            Intent::SuggestionRequest => {
                system_prompt.push_str(
                    "\n\nThe user is asking for a suggestion on what to do.
Based on the current time of day and any known tasks, suggest an appropriate activity.
Consider productivity principles, work-life balance, and typical routines for their profession if known.",
                );
            }
            Intent::RoutineRequest => {
                system_prompt.push_str(
                    "\n\nThe user wants a complete daily routine.
Generate a comprehensive schedule from wake-up to bedtime.
Include appropriate times for meals, work, breaks, exercise, and personal time.
If you know their profession, tailor the routine accordingly.
Format the routine as a clear schedule with times and activities.",
                );
            }
            Intent::ReminderInquiry => {
                system_prompt.push_str(
                    "\n\nThe user is interested in reminders.
Explain how the reminder system works, including:
- Morning summaries of the day's tasks
- Notifications before scheduled tasks
- End-of-day wrap-ups
Suggest appropriate reminder settings based on their routine if known.",
                );
            }
            Intent::General => {}
        }

        RoutedPrompt {
            system_prompt,
            user_prompt,
            intent,
        }
    }
}

impl Default for PromptRouter {
    fn default() -> Self {
        Self::new()
    }
}
