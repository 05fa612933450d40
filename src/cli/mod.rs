//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Smoke tests for the status-check REST API
#[derive(Parser, Debug)]
#[command(name = "backend-smoke")]
#[command(version)]
#[command(about = "Run sequential smoke tests against the status-check API")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the smoke tests
    Run(RunArgs),

    /// List available checks
    List(ListArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Env file holding the backend URL
    #[arg(short, long)]
    pub env_file: Option<String>,

    /// Key of the backend URL in the env file
    #[arg(short = 'k', long)]
    pub url_key: Option<String>,

    /// Explicit API base URL; skips the env file
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Named environment from the configuration file
    #[arg(long)]
    pub environment: Option<String>,

    /// Client name for created status checks
    #[arg(long)]
    pub client_name: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Checks to run by key or number (repeatable); defaults to the full suite
    #[arg(short, long = "check")]
    pub checks: Vec<String>,

    /// Also check CORS headers
    #[arg(long)]
    pub cors: bool,

    /// Origin sent by the CORS check
    #[arg(long)]
    pub cors_origin: Option<String>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Save results to file
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show detailed check information
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "backend-smoke.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Show environment variable overrides instead
        #[arg(short, long)]
        env: bool,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Validate a configuration file
    Validate {
        /// File to validate; defaults to the discovered configuration file
        #[arg(short, long)]
        file: Option<String>,
    },
}
