//! Interactive chat session.
//!
//! A transcript plus profession quick-select, quick-action prompts, and
//! task/routine/reminder views reachable through slash commands. Session
//! state lives for the run of this command only.

use std::io::Write;

use routinely_core::chat::session::{
    QUICK_FREE_HOUR, QUICK_GENERATE_ROUTINE, QUICK_SET_REMINDERS, QUICK_WHAT_NOW,
};
use routinely_core::chat::WELCOME_MESSAGE;
use routinely_core::gateway::OpenAiGateway;
use routinely_core::reminder::ReminderKind;
use routinely_core::routine::templates::PROFESSIONS;
use routinely_core::{Config, Session, SessionState};

const HELP: &str = "\
/help                         show this help
/professions                  list profession quick-selects
/profession NAME              select a profession and ask for its routine
/tasks                        list tasks
/task add TITLE [@TIME]       add a task directly
/task done N                  toggle completion of task N
/task rm N                    delete task N
/suggest                      propose flexible tasks for free time
/routine                      show the composed day timeline
/export [DIR]                 write the routine as plain text
/reminders                    show reminder rules per task
/reminder add N               add a rule to task N
/reminder toggle N M          enable/disable rule M of task N
/reminder rm N M              remove rule M of task N
/reminder kind N M KIND       set rule kind: before, at, after
/reminder offset N M MINUTES  set rule lead time
/save                         acknowledge reminder settings
/now /free /generate /remind  quick-action prompts
/quit                         leave the session";

pub async fn run(profession: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let gateway = OpenAiGateway::from_config(&config.gateway)?;
    let state = SessionState::with_reminder_config(&config.reminders);
    let mut session = Session::with_state(state, Box::new(gateway));

    println!("assistant> {WELCOME_MESSAGE}");
    println!("(type /help for commands)");

    if let Some(profession) = profession {
        submit_and_print(&mut session, None, Some(profession)).await;
    }

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(&mut session, command).await {
                break;
            }
        } else {
            submit_and_print(&mut session, Some(line.to_string()), None).await;
        }
    }
    Ok(())
}

/// Submit either a plain message or a profession declaration; print the
/// reply, or the error without touching the transcript.
async fn submit_and_print(session: &mut Session, message: Option<String>, profession: Option<String>) {
    let result = match (message, profession) {
        (_, Some(profession)) => session.declare_profession(profession).await,
        (Some(message), None) => session.submit(message).await,
        (None, None) => return,
    };
    match result {
        Ok(reply) => println!("assistant> {reply}"),
        Err(e) => eprintln!("error: {e}"),
    }
}

/// Handle one slash command. Returns false to end the session.
async fn handle_command(session: &mut Session, command: &str) -> bool {
    let mut words = command.split_whitespace();
    let verb = words.next().unwrap_or("");
    let rest: Vec<&str> = words.collect();

    match (verb, rest.as_slice()) {
        ("quit", _) | ("exit", _) => return false,
        ("help", _) => println!("{HELP}"),

        ("professions", _) => {
            for name in PROFESSIONS {
                println!("- {name}");
            }
        }
        ("profession", parts) if !parts.is_empty() => {
            submit_and_print(session, None, Some(parts.join(" "))).await;
        }

        ("now", _) => submit_and_print(session, Some(QUICK_WHAT_NOW.into()), None).await,
        ("free", _) => submit_and_print(session, Some(QUICK_FREE_HOUR.into()), None).await,
        ("generate", _) => {
            submit_and_print(session, Some(QUICK_GENERATE_ROUTINE.into()), None).await
        }
        ("remind", _) => submit_and_print(session, Some(QUICK_SET_REMINDERS.into()), None).await,

        ("tasks", _) => print_tasks(session),
        ("task", parts) => task_command(session, parts),
        ("suggest", _) => {
            let state = session.state();
            let suggestions = state.suggestions();
            if suggestions.is_empty() {
                println!("No flexible tasks to suggest.");
            }
            for task in suggestions {
                println!("- {}", task.title);
            }
        }

        ("routine", _) => {
            let routine = session.state().routine();
            if routine.is_empty() {
                println!("No routine yet. Select a profession first (/professions).");
            }
            for entry in &routine.entries {
                println!("{} - {}", entry.time, entry.activity);
            }
        }
        ("export", parts) => {
            let dir = parts.first().copied().unwrap_or(".");
            match session.state().export_routine(std::path::Path::new(dir)) {
                Ok(path) => println!("Routine written: {}", path.display()),
                Err(e) => eprintln!("error: {e}"),
            }
        }

        ("reminders", _) => print_reminders(session),
        ("reminder", parts) => reminder_command(session, parts),
        ("save", _) => println!("{}", session.state().reminders.save()),

        _ => println!("Unknown command: /{command} (try /help)"),
    }
    true
}

fn print_tasks(session: &Session) {
    let tasks = session.state().tasks.tasks();
    if tasks.is_empty() {
        println!("No tasks yet. Add some tasks to get started.");
        return;
    }
    for (i, task) in tasks.iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        match &task.time {
            Some(time) => println!("{:>2}. [{mark}] {} ({time})", i + 1, task.title),
            None => println!("{:>2}. [{mark}] {}", i + 1, task.title),
        }
    }
}

fn task_command(session: &mut Session, parts: &[&str]) {
    match *parts {
        ["add", ref spec @ ..] if !spec.is_empty() => {
            let spec = spec.join(" ");
            let (title, time) = match spec.rsplit_once('@') {
                Some((title, time)) if !time.trim().is_empty() => {
                    (title.trim().to_string(), Some(time.trim().to_string()))
                }
                _ => (spec.trim().to_string(), None),
            };
            session.state_mut().add_task(title, time);
            print_tasks(session);
        }
        ["done", index] => match task_id_at(session, index) {
            Some(id) => {
                session.state_mut().tasks.toggle(&id);
                print_tasks(session);
            }
            None => eprintln!("error: no task {index}"),
        },
        ["rm", index] => match task_id_at(session, index) {
            Some(id) => {
                session.state_mut().tasks.remove(&id);
                print_tasks(session);
            }
            None => eprintln!("error: no task {index}"),
        },
        _ => println!("Usage: /task add TITLE [@TIME] | /task done N | /task rm N"),
    }
}

fn print_reminders(session: &mut Session) {
    session.state_mut().ensure_reminder_defaults();
    let state = session.state();

    let morning = &state.reminders.morning_summary;
    let evening = &state.reminders.evening_wrapup;
    println!(
        "Morning summary: {} at {}",
        on_off(morning.enabled),
        morning.time
    );
    println!(
        "Evening wrap-up: {} at {}",
        on_off(evening.enabled),
        evening.time
    );

    if state.tasks.is_empty() {
        println!("No tasks added yet. Add tasks in the chat to set reminders.");
        return;
    }
    for (i, task) in state.tasks.iter().enumerate() {
        println!("{:>2}. {}", i + 1, task.title);
        for (j, rule) in state.reminders.rules_for(&task.id).iter().enumerate() {
            let kind = match rule.kind {
                ReminderKind::Before => "before",
                ReminderKind::At => "at",
                ReminderKind::After => "after",
            };
            let offset = match (rule.kind, rule.minutes_before) {
                (ReminderKind::Before | ReminderKind::After, Some(m)) => format!(" ({m} min)"),
                _ => String::new(),
            };
            println!(
                "    {:>2}. [{}] {kind}{offset} -- {}",
                j + 1,
                on_off(rule.enabled),
                rule.time
            );
        }
    }
}

fn reminder_command(session: &mut Session, parts: &[&str]) {
    session.state_mut().ensure_reminder_defaults();
    let applied = match *parts {
        ["add", task] => task_id_at(session, task)
            .map(|id| {
                session.state_mut().reminders.add(&id);
                true
            })
            .unwrap_or(false),
        ["toggle", task, rule] => with_rule(session, task, rule, |state, id, rule_id| {
            state.reminders.toggle(&id, &rule_id)
        }),
        ["rm", task, rule] => with_rule(session, task, rule, |state, id, rule_id| {
            state.reminders.remove(&id, &rule_id)
        }),
        ["kind", task, rule, kind] => {
            let kind = match kind {
                "before" => Some(ReminderKind::Before),
                "at" => Some(ReminderKind::At),
                "after" => Some(ReminderKind::After),
                _ => None,
            };
            match kind {
                Some(kind) => with_rule(session, task, rule, |state, id, rule_id| {
                    state.reminders.set_kind(&id, &rule_id, kind)
                }),
                None => {
                    println!("Rule kind must be one of: before, at, after");
                    return;
                }
            }
        }
        ["offset", task, rule, minutes] => match minutes.parse::<u32>() {
            Ok(minutes) => with_rule(session, task, rule, |state, id, rule_id| {
                state.reminders.set_minutes_before(&id, &rule_id, minutes)
            }),
            Err(_) => {
                println!("Offset must be a number of minutes");
                return;
            }
        },
        _ => {
            println!(
                "Usage: /reminder add N | toggle N M | rm N M | kind N M KIND | offset N M MINUTES"
            );
            return;
        }
    };

    if applied {
        print_reminders(session);
    } else {
        eprintln!("error: no such task or rule");
    }
}

/// Resolve a 1-based task index to its id.
fn task_id_at(session: &Session, index: &str) -> Option<String> {
    let index: usize = index.parse().ok()?;
    session
        .state()
        .tasks
        .tasks()
        .get(index.checked_sub(1)?)
        .map(|t| t.id.clone())
}

/// Resolve task and rule indexes, then run `apply` on the session state.
fn with_rule(
    session: &mut Session,
    task_index: &str,
    rule_index: &str,
    apply: impl FnOnce(&mut SessionState, String, String) -> bool,
) -> bool {
    let Some(task_id) = task_id_at(session, task_index) else {
        return false;
    };
    let rule_index: usize = match rule_index.parse::<usize>() {
        Ok(i) if i > 0 => i - 1,
        _ => return false,
    };
    let Some(rule_id) = session
        .state()
        .reminders
        .rules_for(&task_id)
        .get(rule_index)
        .map(|r| r.id.clone())
    else {
        return false;
    };
    apply(session.state_mut(), task_id, rule_id)
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
