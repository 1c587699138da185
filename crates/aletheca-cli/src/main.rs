//! aletheca - check OpenAlex payloads against the typed entity schema
//!
//! Reads local API responses or snapshot files and reports which records
//! decode, which fail, and why.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use aletheca_core::Verbosity;
use config::Config;

#[derive(Parser)]
#[command(name = "aletheca")]
#[command(about = "Typed decoding checks for OpenAlex entity payloads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ./aletheca.toml or ~/.config/aletheca/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Decode local payload files and report failures
    Check(cmd::check::CheckArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(aletheca_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug, progress bars show activity
    //   non-TTY: info unless --quiet/--debug, logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = cli.quiet || is_tty;
    aletheca_core::init_logging(Verbosity::from_flags(quiet, cli.debug), multi)
        .context("Failed to install logger")?;

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Check(args) => cmd::check::run(args, &config, &progress),
        Command::Config => {
            print_config(&config);
            Ok(())
        }
    }
}

fn print_config(config: &Config) {
    use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

    let on_off = |b: bool| if b { "on" } else { "off" };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let client = &config.client;
    table.add_row(vec!["API base URL", &client.api_base_url]);
    table.add_row(vec!["Timeout", &format!("{}s", client.timeout_secs)]);
    table.add_row(vec![
        "Max retries",
        &format!(
            "{} (backoff factor {})",
            client.max_retries, client.backoff_factor
        ),
    ]);
    table.add_row(vec!["User agent", &client.user_agent_header()]);
    table.add_row(vec![
        "Email",
        if client.email.is_empty() {
            "not set"
        } else {
            client.email.as_str()
        },
    ]);
    table.add_row(vec!["Rate limit", &format!("{}/s", client.rate_limit)]);
    table.add_row(vec!["xpac works", on_off(config.api.enable_xpac)]);
    table.add_row(vec!["Data v1", on_off(config.api.enable_data_v1)]);
    table.add_row(vec![
        "Failures shown",
        &config.check.max_failures_shown.to_string(),
    ]);
    table.add_row(vec!["Parallel decode", on_off(config.check.parallel)]);

    eprintln!("\n{table}");
}
