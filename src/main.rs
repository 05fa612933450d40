//! backend-smoke - Status-check API smoke tester
//!
//! Runs a fixed, ordered set of HTTP checks against the status-check REST
//! API and exits non-zero unless every check passes.
//!
//! ## Checks
//!
//! - Root endpoint greeting
//! - Create a status check and verify the echoed record
//! - List status checks and verify the record shape
//! - Create-then-list integration
//! - CORS headers (opt-in)
//!
//! ## Usage
//!
//! ```bash
//! # Read EXPO_PUBLIC_BACKEND_URL from frontend/.env and run everything
//! backend-smoke run
//!
//! # Point at an explicit backend
//! backend-smoke run --base-url http://localhost:8001/api
//!
//! # Run selected checks with JSON output
//! backend-smoke run --check root --check list --format json
//!
//! # List available checks
//! backend-smoke list --detailed
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};

mod checks;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod utils;

use cli::{Args, RunArgs};
use config::{AppConfig, ConfigFile, EnvConfig, EnvFileError};
use executor::TestRunner;
use models::{RunSummary, TestCase, TestConfig};
use output::{write_results_to_file, OutputFormat, ResultFormatter};
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let env_config = EnvConfig::load();

    let level = match args.log_level.as_deref() {
        Some(level) => LogLevel::from_str(level)
            .ok_or_else(|| anyhow::anyhow!("Unknown log level: {level}"))?,
        None if args.verbose || env_config.verbose.unwrap_or(false) => LogLevel::Debug,
        None => LogLevel::Info,
    };
    init_logger(level);

    match args.command {
        cli::Command::Run(run_args) => {
            let summary = run_tests(run_args, args.config.as_deref(), &env_config).await?;
            Ok(ExitCode::from(summary.exit_code()))
        }
        cli::Command::List(list_args) => {
            list_tests(list_args);
            Ok(ExitCode::SUCCESS)
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, args.config.as_deref(), &env_config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_tests(
    args: RunArgs,
    config_path: Option<&str>,
    env_config: &EnvConfig,
) -> Result<RunSummary> {
    let environment = args
        .environment
        .as_deref()
        .or(env_config.environment.as_deref());
    let mut app = load_settings(config_path, environment, env_config)?;
    apply_run_args(&mut app, &args);

    let base_url = resolve_base_url(&app).context("Could not determine backend URL")?;
    let config = build_test_config(&app, base_url, &args.checks)?;

    let format = OutputFormat::from_str(&app.format).unwrap_or_else(|| {
        warn!("Unknown output format '{}', using table", app.format);
        OutputFormat::Table
    });
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let runner = TestRunner::new(config)?;
    let summary = runner.run_all().await;

    if format == OutputFormat::Summary {
        for result in &summary.results {
            println!("{}", formatter.format_result(result)?);
        }
    }
    println!("{}", formatter.format_summary(&summary)?);

    if let Some(path) = &args.output {
        write_results_to_file(path, &summary, format)?;
        info!("Results written to {}", path);
    }

    Ok(summary)
}

/// Defaults, then config file (and environment), then `BACKEND_SMOKE_*` variables
fn load_settings(
    config_path: Option<&str>,
    environment: Option<&str>,
    env_config: &EnvConfig,
) -> Result<AppConfig> {
    let file = match config_path.or(env_config.config_file.as_deref()) {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_default()?,
    };

    let mut app = file.settings(environment)?;
    env_config.apply_to(&mut app);
    Ok(app)
}

fn apply_run_args(app: &mut AppConfig, args: &RunArgs) {
    if let Some(env_file) = &args.env_file {
        app.env_file = env_file.clone();
        app.base_url = None;
    }
    if let Some(url_key) = &args.url_key {
        app.url_key = url_key.clone();
    }
    if let Some(base_url) = &args.base_url {
        app.base_url = Some(base_url.clone());
    }
    if let Some(client_name) = &args.client_name {
        app.client_name = client_name.clone();
    }
    if let Some(timeout) = args.timeout {
        app.timeout_secs = timeout;
    }
    if args.cors {
        app.cors = true;
    }
    if let Some(origin) = &args.cors_origin {
        app.cors_origin = origin.clone();
    }
    if let Some(format) = &args.format {
        app.format = format.clone();
    }
}

fn resolve_base_url(app: &AppConfig) -> Result<String, EnvFileError> {
    match app.resolve_base_url() {
        Ok(url) => {
            info!("Testing backend at: {}", url);
            Ok(url)
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}

fn build_test_config(app: &AppConfig, base_url: String, checks: &[String]) -> Result<TestConfig> {
    if app.timeout_secs == 0 {
        anyhow::bail!("Timeout must be at least 1 second");
    }

    let selected = if checks.is_empty() {
        TestCase::default_suite(app.cors)
    } else {
        checks
            .iter()
            .map(|name| {
                TestCase::from_str(name).ok_or_else(|| anyhow::anyhow!("Unknown check: {name}"))
            })
            .collect::<Result<Vec<_>>>()?
    };

    Ok(TestConfig::new(base_url)
        .with_client_name(&app.client_name)
        .with_timeout(app.timeout_secs)
        .with_cors_origin(&app.cors_origin)
        .with_checks(selected))
}

fn list_tests(args: cli::ListArgs) {
    println!("\nStatus-check API checks\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for test_case in TestCase::all() {
        let opt_in = if test_case == TestCase::CorsHeaders {
            " (opt-in: --cors)"
        } else {
            ""
        };
        println!(
            "  {:2}. {:24} {:20}{}",
            test_case.number(),
            test_case.name(),
            test_case.key(),
            opt_in
        );
        if args.detailed {
            println!("      {}", test_case.description());
        }
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn manage_config(
    args: cli::ConfigArgs,
    config_path: Option<&str>,
    env_config: &EnvConfig,
) -> Result<()> {
    use std::path::Path;

    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            ConfigFile::example().save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show { env, format } => {
            if env {
                if env_config.has_any() {
                    env_config.print_summary();
                } else {
                    println!("No BACKEND_SMOKE_* variables are set.\n");
                    config::print_env_help();
                }
            } else {
                let mut config = match config_path.or(env_config.config_file.as_deref()) {
                    Some(path) => ConfigFile::load(path)?,
                    None => ConfigFile::load_default()?,
                };
                env_config.apply_to(&mut config.app);
                let output = if format == "json" {
                    serde_json::to_string_pretty(&config)?
                } else {
                    serde_yaml::to_string(&config)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Validate { file } => {
            let path = file
                .or_else(|| config_path.map(str::to_string))
                .or_else(|| ConfigFile::find().map(|p| p.to_string_lossy().to_string()))
                .unwrap_or_else(|| "./backend-smoke.yaml".to_string());

            match ConfigFile::load(&path) {
                Ok(_) => {
                    println!("✓ Configuration file is valid: {path}");
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {path}");
                    println!("  Error: {e:#}");
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
