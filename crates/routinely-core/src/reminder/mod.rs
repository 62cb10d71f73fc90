//! Per-task reminder rules and daily summary toggles.
//!
//! Reminder state lives entirely in the session: plain CRUD over rules
//! keyed by task id, with one default rule created lazily the first time
//! a task is observed. "Save" is a placeholder acknowledgment -- there is
//! no backing persistence. Rules reference tasks by id only; deleting a
//! task can orphan its rules and nothing prevents that.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::RemindersConfig;
use crate::routine::parse_clock;
use crate::task::Task;

/// When a rule triggers relative to the task's scheduled time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Before,
    At,
    After,
}

/// Fallback clock for tasks without a time of their own.
pub const DEFAULT_RULE_TIME: &str = "9:00 AM";

/// Default lead time for a fresh Before rule, in minutes.
pub const DEFAULT_LEAD_MINUTES: u32 = 15;

/// One reminder rule for one task.
///
/// `minutes_before` is only meaningful for [`ReminderKind::Before`] and
/// [`ReminderKind::After`]; the data model deliberately does not enforce
/// that -- views hide the field where it does not apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderSetting {
    pub id: String,
    pub enabled: bool,
    pub time: String,
    pub kind: ReminderKind,
    pub minutes_before: Option<u32>,
}

impl ReminderSetting {
    /// The default rule a task receives when first observed: enabled,
    /// Before, 15 minutes, at the task's own time (or 9:00 AM).
    pub fn default_for(task: &Task) -> Self {
        Self {
            id: format!("{}-before", task.id),
            enabled: true,
            time: task.time.clone().unwrap_or_else(|| DEFAULT_RULE_TIME.to_string()),
            kind: ReminderKind::Before,
            minutes_before: Some(DEFAULT_LEAD_MINUTES),
        }
    }

    /// Concrete clock time this rule fires at, if its time parses.
    pub fn fire_time(&self) -> Option<NaiveTime> {
        let base = parse_clock(&self.time)?;
        let offset = Duration::minutes(i64::from(self.minutes_before.unwrap_or(0)));
        let fired = match self.kind {
            ReminderKind::Before => base.overflowing_sub_signed(offset).0,
            ReminderKind::At => base,
            ReminderKind::After => base.overflowing_add_signed(offset).0,
        };
        Some(fired)
    }
}

/// Daily summary toggle (morning summary / evening wrap-up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryToggle {
    pub enabled: bool,
    pub time: String,
}

/// All reminder state for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPlan {
    rules: HashMap<String, Vec<ReminderSetting>>,
    pub morning_summary: SummaryToggle,
    pub evening_wrapup: SummaryToggle,
}

impl Default for ReminderPlan {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            morning_summary: SummaryToggle {
                enabled: true,
                time: "7:00 AM".to_string(),
            },
            evening_wrapup: SummaryToggle {
                enabled: true,
                time: "9:00 PM".to_string(),
            },
        }
    }
}

impl ReminderPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the summary toggles from configuration.
    pub fn from_config(config: &RemindersConfig) -> Self {
        Self {
            rules: HashMap::new(),
            morning_summary: SummaryToggle {
                enabled: config.morning_summary,
                time: config.morning_summary_time.clone(),
            },
            evening_wrapup: SummaryToggle {
                enabled: config.evening_wrapup,
                time: config.evening_wrapup_time.clone(),
            },
        }
    }

    /// Create the default rule for `task` if it has none yet.
    pub fn ensure_defaults(&mut self, task: &Task) -> &[ReminderSetting] {
        self.rules
            .entry(task.id.clone())
            .or_insert_with(|| vec![ReminderSetting::default_for(task)])
    }

    /// Rules for a task id, empty when the task was never observed.
    pub fn rules_for(&self, task_id: &str) -> &[ReminderSetting] {
        self.rules.get(task_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flip the enabled flag of one rule. Returns false when no rule
    /// matches.
    pub fn toggle(&mut self, task_id: &str, rule_id: &str) -> bool {
        match self.rule_mut(task_id, rule_id) {
            Some(rule) => {
                rule.enabled = !rule.enabled;
                true
            }
            None => false,
        }
    }

    /// Append a rule with defaults, reusing the first existing rule's time
    /// when there is one. Returns the new rule's id.
    pub fn add(&mut self, task_id: &str) -> String {
        let rules = self.rules.entry(task_id.to_string()).or_default();
        let time = rules
            .first()
            .map(|r| r.time.clone())
            .unwrap_or_else(|| DEFAULT_RULE_TIME.to_string());
        let rule = ReminderSetting {
            id: format!("{}-{}", task_id, Uuid::new_v4()),
            enabled: true,
            time,
            kind: ReminderKind::Before,
            minutes_before: Some(DEFAULT_LEAD_MINUTES),
        };
        let id = rule.id.clone();
        rules.push(rule);
        id
    }

    /// Remove exactly the rule with `rule_id`; other rules keep their
    /// fields untouched. Returns false when no rule matches.
    pub fn remove(&mut self, task_id: &str, rule_id: &str) -> bool {
        match self.rules.get_mut(task_id) {
            Some(rules) => {
                let before = rules.len();
                rules.retain(|r| r.id != rule_id);
                rules.len() < before
            }
            None => false,
        }
    }

    /// Change a rule's trigger kind.
    pub fn set_kind(&mut self, task_id: &str, rule_id: &str, kind: ReminderKind) -> bool {
        match self.rule_mut(task_id, rule_id) {
            Some(rule) => {
                rule.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Change a rule's offset in minutes.
    pub fn set_minutes_before(&mut self, task_id: &str, rule_id: &str, minutes: u32) -> bool {
        match self.rule_mut(task_id, rule_id) {
            Some(rule) => {
                rule.minutes_before = Some(minutes);
                true
            }
            None => false,
        }
    }

    /// Placeholder acknowledgment; nothing is persisted.
    pub fn save(&self) -> &'static str {
        "Reminder settings saved!"
    }

    fn rule_mut(&mut self, task_id: &str, rule_id: &str) -> Option<&mut ReminderSetting> {
        self.rules
            .get_mut(task_id)?
            .iter_mut()
            .find(|r| r.id == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_at(time: Option<&str>) -> Task {
        Task::new("Review notes", time.map(str::to_string))
    }

    #[test]
    fn first_observation_seeds_one_before_rule() {
        let mut plan = ReminderPlan::new();
        let task = task_at(Some("3:00 PM"));

        let rules = plan.ensure_defaults(&task);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, format!("{}-before", task.id));
        assert!(rules[0].enabled);
        assert_eq!(rules[0].time, "3:00 PM");
        assert_eq!(rules[0].kind, ReminderKind::Before);
        assert_eq!(rules[0].minutes_before, Some(DEFAULT_LEAD_MINUTES));

        // A second observation must not duplicate the default.
        plan.ensure_defaults(&task);
        assert_eq!(plan.rules_for(&task.id).len(), 1);
    }

    #[test]
    fn untimed_task_defaults_to_nine_am() {
        let mut plan = ReminderPlan::new();
        let task = task_at(None);
        let rules = plan.ensure_defaults(&task);
        assert_eq!(rules[0].time, DEFAULT_RULE_TIME);
    }

    #[test]
    fn toggle_twice_returns_to_original() {
        let mut plan = ReminderPlan::new();
        let task = task_at(Some("3:00 PM"));
        let rule_id = plan.ensure_defaults(&task)[0].id.clone();

        assert!(plan.toggle(&task.id, &rule_id));
        assert!(!plan.rules_for(&task.id)[0].enabled);
        assert!(plan.toggle(&task.id, &rule_id));
        assert!(plan.rules_for(&task.id)[0].enabled);
    }

    #[test]
    fn remove_deletes_exactly_one_rule() {
        let mut plan = ReminderPlan::new();
        let task = task_at(Some("3:00 PM"));
        plan.ensure_defaults(&task);
        let added = plan.add(&task.id);

        assert!(plan.remove(&task.id, &added));
        let rules = plan.rules_for(&task.id);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, format!("{}-before", task.id));
        assert_eq!(rules[0].minutes_before, Some(DEFAULT_LEAD_MINUTES));

        assert!(!plan.remove(&task.id, &added));
        assert!(!plan.remove("no-such-task", &added));
    }

    #[test]
    fn added_rule_reuses_first_rule_time() {
        let mut plan = ReminderPlan::new();
        let task = task_at(Some("3:00 PM"));
        plan.ensure_defaults(&task);
        let added = plan.add(&task.id);

        let rules = plan.rules_for(&task.id);
        let rule = rules.iter().find(|r| r.id == added).unwrap();
        assert_eq!(rule.time, "3:00 PM");
    }

    #[test]
    fn kind_and_offset_updates() {
        let mut plan = ReminderPlan::new();
        let task = task_at(Some("3:00 PM"));
        let rule_id = plan.ensure_defaults(&task)[0].id.clone();

        assert!(plan.set_kind(&task.id, &rule_id, ReminderKind::After));
        assert!(plan.set_minutes_before(&task.id, &rule_id, 30));
        let rule = &plan.rules_for(&task.id)[0];
        assert_eq!(rule.kind, ReminderKind::After);
        assert_eq!(rule.minutes_before, Some(30));

        // The model keeps the offset even for kinds that ignore it.
        assert!(plan.set_kind(&task.id, &rule_id, ReminderKind::At));
        assert_eq!(plan.rules_for(&task.id)[0].minutes_before, Some(30));
    }

    #[test]
    fn fire_time_applies_the_offset() {
        let base = ReminderSetting {
            id: "r".into(),
            enabled: true,
            time: "3:00 PM".into(),
            kind: ReminderKind::Before,
            minutes_before: Some(30),
        };
        assert_eq!(base.fire_time(), parse_clock("2:30 PM"));

        let at = ReminderSetting {
            kind: ReminderKind::At,
            ..base.clone()
        };
        assert_eq!(at.fire_time(), parse_clock("3:00 PM"));

        let after = ReminderSetting {
            kind: ReminderKind::After,
            ..base.clone()
        };
        assert_eq!(after.fire_time(), parse_clock("3:30 PM"));

        let broken = ReminderSetting {
            time: "whenever".into(),
            ..base
        };
        assert_eq!(broken.fire_time(), None);
    }

    #[test]
    fn save_is_an_acknowledgment_only() {
        let plan = ReminderPlan::new();
        assert_eq!(plan.save(), "Reminder settings saved!");
    }

    #[test]
    fn summary_toggles_default_on() {
        let plan = ReminderPlan::new();
        assert!(plan.morning_summary.enabled);
        assert_eq!(plan.morning_summary.time, "7:00 AM");
        assert!(plan.evening_wrapup.enabled);
        assert_eq!(plan.evening_wrapup.time, "9:00 PM");
    }
}
