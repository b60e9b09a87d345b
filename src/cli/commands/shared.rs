//! Shared components for CLI commands

use crate::app::services::pipeline::EtlRunSummary;
use crate::app::services::quality::{RouteInfoCheck, WorksheetCheck};
use crate::app::services::store::InMemoryStore;
use crate::cli::args::Args;
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Log level to use, letting explicit CLI flags override the configured level
pub fn effective_log_level<'a>(args: &'a Args, configured: &'a str) -> &'a str {
    if args.quiet || args.verbose > 0 {
        args.get_log_level()
    } else {
        configured
    }
}

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over `log_level`.
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ridership_etl={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Config file to load: the explicit path, else the user config file if present
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    }
}

/// Load and validate configuration
///
/// Without a config file the built-in defaults are used.
pub fn load_configuration(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let config_path = resolve_config_path(explicit);

    let config = match &config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => Config::default(),
    };
    config.validate().context("Invalid configuration")?;

    Ok((config, config_path))
}

/// Load configuration, then start logging at the resulting level
pub fn init_command(args: &Args, explicit_config: Option<&Path>) -> Result<Config> {
    let (config, config_path) = load_configuration(explicit_config)?;
    setup_logging(
        effective_log_level(args, &config.logging.level),
        args.quiet,
    );

    info!("Loading configuration");
    match &config_path {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    Ok(config)
}

/// Open the snapshot-backed store named by the configuration
pub fn open_store(config: &Config) -> Result<InMemoryStore> {
    let store = InMemoryStore::open(&config.store.path)
        .with_context(|| format!("Failed to open store {}", config.store.path.display()))?;
    info!("Opened store {}", config.store.path.display());
    Ok(store)
}

/// Spinner shown while a long stage runs; hidden in quiet mode
pub fn create_spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_etl_summary(summary: &EtlRunSummary) {
    println!("\n{}", "Ridership ETL Summary".bright_green().bold());
    println!(
        "  {} {:.2?}",
        "Time elapsed:".bright_cyan(),
        summary.elapsed
    );

    for report in [
        &summary.route_info,
        &summary.daily_ridership,
        &summary.service_hour_ridership,
    ] {
        println!(
            "  {:<24} {} created, {} updated, {} total",
            format!("{}:", report.etl_type).bright_cyan(),
            report.creates.to_string().bright_white().bold(),
            report.updates.to_string().bright_white().bold(),
            report.total_models
        );
    }

    println!(
        "  {:<24} {}",
        "system ridership rows:".bright_cyan(),
        summary.system_ridership_rows.to_string().bright_white().bold()
    );
    println!(
        "  {:<24} {}",
        "system trends:".bright_cyan(),
        summary.system_trends.to_string().bright_white().bold()
    );
    println!(
        "  {:<24} {} created, {} updated",
        "weekly performance:".bright_cyan(),
        summary.weekly_created.to_string().bright_white().bold(),
        summary.weekly_updated.to_string().bright_white().bold()
    );

    let top_routes: Vec<String> = summary
        .high_ridership_routes
        .iter()
        .map(|number| number.to_string())
        .collect();
    if top_routes.is_empty() {
        println!(
            "  {:<24} {}",
            "high ridership:".bright_cyan(),
            "none".bright_yellow()
        );
    } else {
        println!(
            "  {:<24} {}",
            "high ridership:".bright_cyan(),
            top_routes.join(", ").bright_white()
        );
    }
}

pub fn print_worksheet_check(check: &WorksheetCheck) {
    if check.complete {
        println!("{}", "All required worksheets present".bright_green().bold());
        return;
    }

    println!("{}", "Missing worksheets:".bright_red().bold());
    for name in &check.missing {
        println!("  - {}", name.bright_red());
    }
}

pub fn print_ridership_column_check(check: &WorksheetCheck) {
    if check.complete {
        println!("{}", "All ridership worksheets have period columns".bright_green().bold());
        return;
    }

    println!("{}", "Worksheets without ridership period columns:".bright_red().bold());
    for name in &check.missing {
        println!("  - {}", name.bright_red());
    }
}

pub fn print_route_check(worksheet: &str, check: &RouteInfoCheck) {
    println!("\n{} {}", "Routes in".bright_cyan(), worksheet.bold());

    if !check.numbers_available {
        println!("  {}", "No route header found".bright_yellow());
        return;
    }

    for (index, number) in check.route_numbers.iter().enumerate() {
        match check.route_names.get(index) {
            Some(name) => println!("  {:>6}  {}", number.bright_white(), name),
            None => println!("  {:>6}", number.bright_white()),
        }
    }
    println!(
        "  {} {}",
        "Total:".bright_cyan(),
        check.route_numbers.len().to_string().bright_white().bold()
    );
}
