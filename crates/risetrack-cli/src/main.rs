use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "risetrack-cli", version, about = "Risetrack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wake-up record management
    Record {
        #[command(subcommand)]
        action: commands::record::RecordAction,
    },
    /// Streak statistics
    Streak(commands::streak::StreakArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Record { action } => commands::record::run(action),
        Commands::Streak(args) => commands::streak::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
