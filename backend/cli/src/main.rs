mod config;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use pinforge_config::{config_file_path, load_and_prepare, redact, ValidationReport};
use pinforge_discord::DiscordAdapter;
use pinforge_logging::init_logger;

#[derive(Parser)]
#[command(name = "pinforge")]
#[command(about = "pinforge: relocates pinned Discord messages into archive channels")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PINFORGE_CONFIG, then ./pinforge.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and relay pins (default)
    Run,
    /// Validate the configuration and print it with secrets redacted
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let path = config_file_path(cli.config.as_deref());
    let (cfg, report) = load_and_prepare(&path).await?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let _guard = init_logger(&config::logging_settings(&cfg))?;
            report.log();
            if !report.is_valid() {
                bail!("Configuration at {} is invalid", path.display());
            }

            let Some(token) = cfg.discord.token.clone() else {
                bail!("No bot token configured");
            };
            let settings = config::relay_settings(&cfg);
            info!(
                config = %path.display(),
                archive = %settings.routing.default_channel,
                secret_archive = %settings.routing.secret_channel,
                secret_sources = settings.routing.secret_sources.len(),
                "Starting pinforge"
            );

            DiscordAdapter::new(token, settings).start().await?;
        }
        Commands::Check => {
            let value = serde_json::to_value(&cfg)?;
            println!("Config: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&redact(&value))?);
            print_report(&report);
            if !report.is_valid() {
                bail!("{} config error(s)", report.errors.len());
            }
        }
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    for warning in &report.warnings {
        println!("  🟡 {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  🔴 {}: {}", error.path, error.message);
    }
    if report.is_valid() {
        println!("✅ Configuration is valid.");
    }
}
