use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "salahtasker-cli", version, about = "SalahTasker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times and salah periods
    Prayer {
        #[command(subcommand)]
        action: commands::prayer::PrayerAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Default location settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// List the calculation-method vocabulary
    Methods,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Prayer { action } => commands::prayer::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Methods => commands::methods::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
