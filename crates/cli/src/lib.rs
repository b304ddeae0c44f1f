mod routes;
mod walk;

use ahon_api::NavigationParameters;
use ahon_core::ShellConfig;
use ahon_runtime::PageKind;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ahon",
    version,
    about = "Headless shell for the gym management pages",
    long_about = "Ahon wires the record stores and pages of the gym management application \
                  into a service registry and drives them through the page navigator."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every registered page and its route
    Routes,
    /// Navigate through pages in order, printing each navigation
    #[command(
        long_about = "Opens each page in order on a single navigator. The previous page is torn \
                            down before the next one initializes. Parameters are passed to every page."
    )]
    Walk {
        /// Pages to open, e.g. `login dashboard members`. Defaults to the configured start page.
        #[arg(value_name = "PAGE")]
        pages: Vec<PageKind>,
        /// Navigation parameter as key=value; may be repeated
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, Value)>,
        /// Shell configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn parse_param(input: &str) -> Result<(String, Value), String> {
    NavigationParameters::parse_assignment(input)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Walk {
            config: Some(path), ..
        } => ShellConfig::load(path)?,
        _ => ShellConfig::default(),
    };
    let _guard = ahon_runtime::init_logging(&config.logging, "cli");

    match cli.command {
        Commands::Routes => routes::run(),
        Commands::Walk { pages, params, .. } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(walk::run(config, pages, params))
        }
    }
}
