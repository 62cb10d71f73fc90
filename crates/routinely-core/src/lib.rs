//! # Routinely Core Library
//!
//! This library provides the core business logic for Routinely, a
//! chat-driven daily routine assistant. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary, with the HTTP server being a thin pass-through layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Chat**: Append-only message history plus the session state
//!   container that owns profession, tasks, and reminders
//! - **Intent/Prompt**: Keyword-based intent classification behind a
//!   pluggable trait, and system-prompt assembly per intent
//! - **Gateway**: Single-attempt client for an OpenAI-compatible
//!   text-generation endpoint
//! - **Task**: Task records, `TASKS:` block extraction, free-time
//!   suggestions
//! - **Routine**: Profession templates, timed-task merging, day timeline
//!   composition and plain-text export
//! - **Reminder**: Per-task reminder rules and daily summary toggles
//!
//! ## Key Components
//!
//! - [`Session`]: Drives one chat turn end to end
//! - [`PromptRouter`]: Classifies the latest user message and builds the
//!   system prompt
//! - [`ModelGateway`]: Trait boundary to the hosted model
//! - [`Routine`]: Composed day timeline

pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod prompt;
pub mod reminder;
pub mod routine;
pub mod task;

pub use chat::{ChatHistory, ChatMessage, Role, Session, SessionState};
pub use config::{Config, GatewayConfig, RemindersConfig, ServerConfig};
pub use error::{ConfigError, CoreError, GatewayError, ValidationError};
pub use gateway::{ModelGateway, OpenAiGateway};
pub use intent::{Intent, IntentClassifier, KeywordClassifier};
pub use prompt::{PromptRouter, RoutedPrompt};
pub use reminder::{ReminderKind, ReminderPlan, ReminderSetting, SummaryToggle};
pub use routine::{Routine, RoutineEntry};
pub use task::{Task, TaskBook};
