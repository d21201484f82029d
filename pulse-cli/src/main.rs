//! pulse - terminal dashboard for weather, crypto prices, news and GitHub
//! activity.
//!
//! With no panel flags every panel is shown; any flag restricts the launch
//! set to the named panels. Hidden panels can be toggled back at runtime.

mod commands;
mod error;
mod keys;
mod opener;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};

use pulse::dashboard::VisibilitySet;

use commands::config::ConfigCommands;
use commands::run::RunArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "pulse")]
#[command(version = pulse::VERSION)]
#[command(about = "Terminal dashboard for weather, crypto, news and GitHub activity")]
struct Cli {
    /// Show the weather panel
    #[arg(long)]
    weather: bool,

    /// Show the crypto prices panel
    #[arg(long)]
    crypto: bool,

    /// Show the Hacker News panel
    #[arg(long)]
    news: bool,

    /// Show the GitHub activity panel
    #[arg(long, alias = "github")]
    activity: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// View or edit configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    fn visibility(&self) -> VisibilitySet {
        VisibilitySet::from_cli_flags([self.weather, self.crypto, self.news, self.activity])
    }
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Some(Commands::Config { command }) => commands::config::run(command),
        None => commands::run::run(RunArgs {
            visibility: cli.visibility(),
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
