use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "routinely-cli", version, about = "Routinely CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session with the routine assistant
    Chat {
        /// Start the session with this profession already selected
        #[arg(long)]
        profession: Option<String>,
    },
    /// Routine composition and export
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// Extract tasks from a TASKS: block
    Extract {
        /// Read the text from this file instead of stdin
        #[arg(long)]
        file: Option<std::path::PathBuf>,
        /// Use this literal text instead of stdin
        #[arg(long)]
        text: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Chat { profession } => commands::chat::run(profession).await,
        Commands::Routine { action } => commands::routine::run(action),
        Commands::Extract { file, text } => commands::extract::run(file, text),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
