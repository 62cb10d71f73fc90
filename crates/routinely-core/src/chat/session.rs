//! Session state container and turn driver.
//!
//! All mutable view state -- profession, history, task book, reminder
//! plan -- lives in [`SessionState`], with one authoritative owner and
//! read-only projections elsewhere. [`Session`] drives a chat turn end to
//! end and serializes turns by construction: `submit` takes `&mut self`,
//! so a second request cannot start before the first resolves.

use regex::Regex;
use std::path::{Path, PathBuf};

use super::{ChatHistory, ChatMessage};
use crate::config::RemindersConfig;
use crate::error::{CoreError, GatewayError};
use crate::gateway::ModelGateway;
use crate::prompt::{PromptRouter, RoutedPrompt};
use crate::reminder::ReminderPlan;
use crate::routine::Routine;
use crate::task::{extract_tasks, suggest_for_free_time, Task, TaskBook, DEFAULT_SUGGESTIONS};

/// Canned quick-action prompts offered alongside the chat input.
pub const QUICK_WHAT_NOW: &str = "What should I do now?";
pub const QUICK_FREE_HOUR: &str = "I have 1 hour free, suggest a task.";
pub const QUICK_GENERATE_ROUTINE: &str = "Generate a daily routine for me.";
pub const QUICK_SET_REMINDERS: &str = "Set reminders for my tasks.";

/// Mutable state of one chat session. Nothing here survives the session.
#[derive(Debug, Default)]
pub struct SessionState {
    pub profession: Option<String>,
    pub history: ChatHistory,
    pub tasks: TaskBook,
    pub reminders: ReminderPlan,
}

impl SessionState {
    /// Fresh state opened with the welcome message.
    pub fn new() -> Self {
        Self {
            profession: None,
            history: ChatHistory::with_welcome(),
            tasks: TaskBook::new(),
            reminders: ReminderPlan::new(),
        }
    }

    /// Fresh state with reminder defaults taken from configuration.
    pub fn with_reminder_config(config: &RemindersConfig) -> Self {
        Self {
            reminders: ReminderPlan::from_config(config),
            ..Self::new()
        }
    }

    /// Add a task directly (the task-list path, bypassing the model).
    pub fn add_task(&mut self, title: impl Into<String>, time: Option<String>) -> String {
        self.tasks.add(Task::new(title, time)).id.clone()
    }

    /// Seed the default reminder rule for every task that has none yet.
    pub fn ensure_reminder_defaults(&mut self) {
        for task in self.tasks.tasks() {
            self.reminders.ensure_defaults(task);
        }
    }

    /// The day timeline for the current profession and tasks, rebuilt
    /// from scratch on every call.
    pub fn routine(&self) -> Routine {
        Routine::compose(self.profession.as_deref(), self.tasks.tasks())
    }

    /// Flexible-task suggestions for a free window.
    pub fn suggestions(&self) -> Vec<&Task> {
        suggest_for_free_time(self.tasks.tasks(), DEFAULT_SUGGESTIONS)
    }

    /// Write the routine export into `dir`, returning the file path.
    pub fn export_routine(&self, dir: &Path) -> Result<PathBuf, CoreError> {
        let path = dir.join(Routine::export_filename(self.profession.as_deref()));
        std::fs::write(&path, self.routine().export_text())?;
        Ok(path)
    }
}

/// Owns the session state and drives chat turns through the router and
/// the model gateway.
pub struct Session {
    state: SessionState,
    router: PromptRouter,
    gateway: Box<dyn ModelGateway>,
    profession_echo: Regex,
}

impl Session {
    pub fn new(gateway: Box<dyn ModelGateway>) -> Self {
        Self::with_state(SessionState::new(), gateway)
    }

    pub fn with_state(state: SessionState, gateway: Box<dyn ModelGateway>) -> Self {
        Self {
            state,
            router: PromptRouter::new(),
            gateway,
            profession_echo: Regex::new(r"for a (.*?) would").expect("echo pattern is valid"),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Drive one turn: append the user message, route it, call the
    /// gateway, append the reply, then extract tasks and adopt a
    /// profession echoed by the assistant.
    ///
    /// On gateway failure the user message stays in the history, no
    /// assistant message is appended, and the error is returned; the
    /// transcript itself never shows failures.
    pub async fn submit(&mut self, text: impl Into<String>) -> Result<String, GatewayError> {
        self.state.history.push(ChatMessage::user(text));

        let RoutedPrompt {
            system_prompt,
            user_prompt,
            ..
        } = self.router.route(&self.state.history);

        let reply = self.gateway.generate(&system_prompt, &user_prompt).await?;
        self.state.history.push(ChatMessage::assistant(reply.clone()));
        self.ingest_reply(&reply);
        Ok(reply)
    }

    /// Select a profession from the quick-select list: set it, then
    /// submit the canned declaration message.
    pub async fn declare_profession(
        &mut self,
        profession: impl Into<String>,
    ) -> Result<String, GatewayError> {
        let profession = profession.into();
        self.state.profession = Some(profession.clone());
        self.submit(format!("My profession is {profession}")).await
    }

    /// Post-process one assistant reply: extract tasks, seed their
    /// reminder defaults, and auto-adopt a profession when unset.
    fn ingest_reply(&mut self, reply: &str) {
        let extracted = extract_tasks(reply);
        for task in &extracted {
            self.state.reminders.ensure_defaults(task);
        }
        self.state.tasks.extend(extracted);

        if self.state.profession.is_none() && reply.contains("profession") {
            if let Some(captures) = self.profession_echo.captures(reply) {
                let profession = captures[1].trim().to_string();
                if !profession.is_empty() {
                    self.state.profession = Some(profession);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Gateway stub that replays canned replies and records prompts.
    struct ScriptedGateway {
        replies: Mutex<Vec<String>>,
        seen_system_prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
                seen_system_prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        async fn generate(
            &self,
            system_prompt: &str,
            _user_prompt: &str,
        ) -> Result<String, GatewayError> {
            self.seen_system_prompts
                .lock()
                .unwrap()
                .push(system_prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .ok_or(GatewayError::EmptyCompletion)
        }
    }

    #[async_trait]
    impl ModelGateway for std::sync::Arc<ScriptedGateway> {
        async fn generate(
            &self,
            system_prompt: &str,
            user_prompt: &str,
        ) -> Result<String, GatewayError> {
            self.as_ref().generate(system_prompt, user_prompt).await
        }
    }

    #[tokio::test]
    async fn submit_appends_both_turns_and_extracts_tasks() {
        let gateway = ScriptedGateway::new(&[
            "Here is your plan.\n\nTASKS:\n- 9:00 AM Standup\n- Review notes\n\nGood luck!",
        ]);
        let mut session = Session::new(Box::new(gateway));

        let reply = session.submit("Plan my tasks for tomorrow").await.unwrap();
        assert!(reply.contains("TASKS:"));

        let state = session.state();
        assert_eq!(state.history.len(), 3); // welcome + user + assistant
        assert_eq!(state.tasks.len(), 2);

        let standup = state.tasks.tasks().first().unwrap();
        assert_eq!(standup.title, "Standup");
        assert_eq!(standup.time.as_deref(), Some("9:00 AM"));
        // Extraction seeds the default reminder rule.
        assert_eq!(state.reminders.rules_for(&standup.id).len(), 1);
    }

    #[tokio::test]
    async fn gateway_failure_keeps_user_turn_only() {
        let gateway = ScriptedGateway::new(&[]);
        let mut session = Session::new(Box::new(gateway));

        let err = session.submit("hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyCompletion));
        assert_eq!(session.state().history.len(), 2); // welcome + user
        assert!(session.state().tasks.is_empty());
    }

    #[tokio::test]
    async fn declare_profession_sets_state_and_routes_the_template() {
        let gateway = std::sync::Arc::new(ScriptedGateway::new(&["A chef's day starts early."]));
        let mut session = Session::new(Box::new(gateway.clone()));

        session.declare_profession("Chef").await.unwrap();
        assert_eq!(session.state().profession.as_deref(), Some("Chef"));
        assert!(!session.state().routine().is_empty());

        let prompts = gateway.seen_system_prompts.lock().unwrap();
        assert!(prompts[0].contains("they are a chef"));
        assert!(prompts[0].contains("- 11:00 AM: Pre-service meeting"));
    }

    #[tokio::test]
    async fn profession_is_adopted_from_assistant_echo() {
        let gateway = ScriptedGateway::new(&[
            "Here is a routine tailored for your profession: a plan for a chef would typically follow this shape.",
        ]);
        let mut session = Session::new(Box::new(gateway));

        session.submit("help me plan").await.unwrap();
        assert_eq!(session.state().profession.as_deref(), Some("chef"));
    }

    #[tokio::test]
    async fn adopted_profession_is_not_overwritten() {
        let gateway = ScriptedGateway::new(&[
            "A routine for a chef would typically follow this shape.",
        ]);
        let mut session = Session::new(Box::new(gateway));
        session.state_mut().profession = Some("Student".to_string());

        session.submit("help me plan").await.unwrap();
        assert_eq!(session.state().profession.as_deref(), Some("Student"));
    }

    #[test]
    fn direct_task_entry_and_projections() {
        let mut state = SessionState::new();
        state.profession = Some("Student".to_string());
        state.add_task("Dentist", Some("3:00 PM".to_string()));
        state.add_task("Read a chapter", None);

        let routine = state.routine();
        assert!(routine.entries.iter().any(|e| e.activity == "Dentist"));
        assert!(!routine.entries.iter().any(|e| e.activity == "Read a chapter"));

        let suggestions = state.suggestions();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].title, "Read a chapter");

        state.ensure_reminder_defaults();
        let ids: Vec<_> = state.tasks.tasks().iter().map(|t| t.id.clone()).collect();
        for id in ids {
            assert_eq!(state.reminders.rules_for(&id).len(), 1);
        }
    }
}
