use clap::{Parser, Subcommand};
use streakbloom_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod session;

#[derive(Parser)]
#[command(name = "streakbloom-cli", version, about = "Streak Bloom CLI")]
struct Cli {
    /// Act as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true, env = "STREAKBLOOM_TODAY")]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Check a habit in for today
    CheckIn {
        /// Habit ID or unique ID prefix
        id: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Spend a freeze to cover one missed day
    Freeze {
        /// Habit ID or unique ID prefix
        id: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show streaks, statuses and remaining freezes
    Status {
        /// Only show this habit
        id: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let loaded = Config::load();
    init_logging(loaded.as_ref().unwrap_or(&Config::default()));
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => {
            tracing::warn!(error = %e, "using default configuration");
            (Config::default(), Some(e))
        }
    };

    let today = cli.today.as_deref();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, config, today),
        Commands::CheckIn { id, json } => commands::streak::check_in(&id, json, config, today),
        Commands::Freeze { id, json } => commands::streak::freeze(&id, json, config, today),
        Commands::Status { id, json } => commands::streak::status(id.as_deref(), json, config, today),
        Commands::Config { action } => commands::config::run(action, config, config_error.as_ref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
