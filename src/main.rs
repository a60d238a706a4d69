use anyhow::Result;
use clap::{Parser, Subcommand};

use pawcare::cli;

#[derive(Debug, Parser)]
#[command(name = "pawcare")]
#[command(about = "Pawcare Strategic Optimizer: pricing & revenue intelligence dashboard")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        /// Listen address (default from config: 127.0.0.1:8501)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open the dashboard in a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Render the dashboard for one scenario in the terminal
    Show {
        /// Scenario: optimized (default) or fragmented; boolean spellings accepted
        #[arg(long)]
        scenario: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show the revenue vs profit comparison of both scenarios
    Compare {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Validate the scenario table and report config and log status
    Check,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.pawcare/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `web.addr 0.0.0.0:8501`
    Set { key: String, value: String },
    /// Overwrite the global config with defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve { addr, no_open } => cli::run_serve(addr, no_open),
        Commands::Show { scenario, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_show(scenario.as_deref(), fmt)
        }
        Commands::Compare { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_compare(fmt)
        }
        Commands::Check => cli::run_check(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
