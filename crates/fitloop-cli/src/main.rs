use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fitloop-cli", version, about = "Fitloop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Alarm series authoring
    Series {
        #[command(subcommand)]
        action: commands::series::SeriesAction,
    },
    /// Series playback control
    Play {
        #[command(subcommand)]
        action: commands::play::PlayAction,
    },
    /// Stopwatch and lap timer
    Stopwatch {
        #[command(subcommand)]
        action: commands::stopwatch::StopwatchAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Series { action } => commands::series::run(action),
        Commands::Play { action } => commands::play::run(action),
        Commands::Stopwatch { action } => commands::stopwatch::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
