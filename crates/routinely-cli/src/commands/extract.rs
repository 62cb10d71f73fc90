//! Extract tasks from a `TASKS:` block on stdin, a file, or the command
//! line, and print them as JSON.

use std::io::Read;

use routinely_core::task::extract_tasks;

pub fn run(
    file: Option<std::path::PathBuf>,
    text: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let tasks = extract_tasks(&input);
    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}
