//! Routine composition commands.

use clap::Subcommand;
use routinely_core::error::ValidationError;
use routinely_core::routine::{parse_clock, place_flexible_tasks, Routine};
use routinely_core::task::Task;

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Compose and print the routine for a profession
    Show {
        /// Profession label (e.g. "Student", "Chef")
        #[arg(long)]
        profession: Option<String>,
        /// Extra task, "TITLE" or "TITLE@TIME" (repeatable)
        #[arg(long = "task")]
        tasks: Vec<String>,
        /// Slot untimed tasks into free half-hour steps from this time
        #[arg(long)]
        fill_from: Option<String>,
        /// Print JSON instead of the timeline
        #[arg(long)]
        json: bool,
    },
    /// Compose a routine and write the plain-text export
    Export {
        /// Profession label
        #[arg(long)]
        profession: Option<String>,
        /// Extra task, "TITLE" or "TITLE@TIME" (repeatable)
        #[arg(long = "task")]
        tasks: Vec<String>,
        /// Directory to write into (default: current directory)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

pub fn run(action: RoutineAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RoutineAction::Show {
            profession,
            tasks,
            fill_from,
            json,
        } => {
            let tasks = parse_task_specs(&tasks);
            let mut routine = Routine::compose(profession.as_deref(), &tasks);
            if let Some(start) = fill_from {
                let start = parse_clock(&start).ok_or_else(|| ValidationError::InvalidValue {
                    field: "fill-from".to_string(),
                    message: format!("cannot parse clock time '{start}'"),
                })?;
                place_flexible_tasks(&mut routine, &tasks, start);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&routine)?);
            } else if routine.is_empty() {
                println!("No routine to show. Pass --profession to start from a template.");
            } else {
                for entry in &routine.entries {
                    println!("{} - {}", entry.time, entry.activity);
                }
            }
        }
        RoutineAction::Export {
            profession,
            tasks,
            out,
        } => {
            let tasks = parse_task_specs(&tasks);
            let routine = Routine::compose(profession.as_deref(), &tasks);
            let dir = out.unwrap_or_else(|| std::path::PathBuf::from("."));
            let path = dir.join(Routine::export_filename(profession.as_deref()));
            std::fs::write(&path, routine.export_text())?;
            println!("Routine written: {}", path.display());
        }
    }
    Ok(())
}

/// Parse "TITLE" / "TITLE@TIME" specs from the command line.
fn parse_task_specs(specs: &[String]) -> Vec<Task> {
    specs
        .iter()
        .map(|spec| match spec.rsplit_once('@') {
            Some((title, time)) if !time.trim().is_empty() => {
                Task::new(title.trim(), Some(time.trim().to_string()))
            }
            _ => Task::new(spec.trim(), None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_specs_split_on_the_last_at_sign() {
        let tasks = parse_task_specs(&[
            "Dentist@3:00 PM".to_string(),
            "Read a chapter".to_string(),
            "Mail @ 9:00".to_string(),
        ]);
        assert_eq!(tasks[0].title, "Dentist");
        assert_eq!(tasks[0].time.as_deref(), Some("3:00 PM"));
        assert_eq!(tasks[1].time, None);
        assert_eq!(tasks[2].title, "Mail");
        assert_eq!(tasks[2].time.as_deref(), Some("9:00"));
    }
}
