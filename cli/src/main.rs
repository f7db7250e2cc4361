//! CLI entrypoint for the Book of Answers
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use boa_application::{
    AnswerResolver, NoPhaseNotifier, NoSettingsRepository, PhaseController, PhaseNotifier,
    SettingsRepository, SettingsStore,
};
use boa_infrastructure::{
    ConfigLoader, FileConfig, HttpOracleClient, Severity, TomlSettingsRepository,
    config::APP_DIR,
};
use boa_presentation::{Cli, ConsoleFormatter, ContemplatingSpinner, OracleRepl, StatusView};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "book-of-answers.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = cli.question.is_none() && !cli.is_settings_only() && !cli.show_config;
    // Held until exit so buffered log lines are flushed
    let _log_guard = init_logging(cli.verbose, interactive);

    info!("Starting book-of-answers");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        match TomlSettingsRepository::default_path() {
            Some(path) => println!("Settings file: {}", path.display()),
            None => println!("Settings file: unavailable (no config directory)"),
        }
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    check_config(&config)?;

    let pool = Arc::new(
        config
            .oracle
            .answer_pool()
            .context("No answers available")?,
    );

    // === Settings ===
    let repository: Arc<dyn SettingsRepository> =
        match TomlSettingsRepository::at_default_location() {
            Some(repository) => Arc::new(repository),
            None => {
                warn!("No config directory found; settings will not be saved");
                Arc::new(NoSettingsRepository)
            }
        };
    let settings = Arc::new(SettingsStore::load(repository));

    if cli.clear_key {
        settings.clear();
        println!("{}", ConsoleFormatter::format_notice("API key removed."));
    }
    if let Some(key) = &cli.set_key {
        let provider = settings.set_api_key(key);
        println!(
            "{}",
            ConsoleFormatter::format_notice(&format!(
                "API key saved for {}.",
                provider.display_name()
            ))
        );
    }
    if let Some(provider) = cli.provider {
        settings.set_provider(provider);
        println!(
            "{}",
            ConsoleFormatter::format_notice(&format!(
                "Provider set to {}.",
                provider.display_name()
            ))
        );
    }

    // === Dependency Injection ===
    let client = Arc::new(
        HttpOracleClient::from_config(&config.providers).context("Failed to build HTTP client")?,
    );
    let notifier: Arc<dyn PhaseNotifier> = if cli.quiet {
        Arc::new(NoPhaseNotifier)
    } else {
        Arc::new(ContemplatingSpinner::new())
    };
    let resolver = Arc::new(
        AnswerResolver::new(client, pool)
            .with_params(config.oracle.to_params())
            .with_notifier(notifier),
    );
    let controller =
        Arc::new(PhaseController::new(resolver, settings).with_offline(cli.offline));

    if cli.is_settings_only() {
        println!("{}", ConsoleFormatter::format_status(&status(&controller)));
        return Ok(());
    }

    match cli.question {
        Some(question) => ask_once(&controller, &question, cli.quiet).await,
        None => {
            OracleRepl::new(controller).run().await?;
            Ok(())
        }
    }
}

/// Initialize logging based on verbosity level.
///
/// Interactive sessions log to a file so log lines never land on the prompt.
fn init_logging(verbose: u8, interactive: bool) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    if interactive && let Some(dir) = log_dir() {
        let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    None
}

fn log_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join(APP_DIR).join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        warn!("{}", issue.message);
    }
    if let Some(issue) = issues.iter().find(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration ({}): {}", issue.field, issue.message);
    }
    Ok(())
}

fn status(controller: &PhaseController) -> StatusView {
    let settings = controller.settings();
    StatusView {
        provider: settings.provider(),
        masked_key: settings.masked_key(),
        offline: controller.is_offline(),
        phase: controller.phase(),
        error_message: controller.error_message(),
    }
}

async fn ask_once(controller: &PhaseController, question: &str, quiet: bool) -> Result<()> {
    let result = tokio::select! {
        result = controller.submit(question) => result,
        _ = tokio::signal::ctrl_c() => {
            controller.cancel();
            return Ok(());
        }
    };

    let Some(outcome) = result? else {
        return Ok(());
    };

    if quiet {
        println!("{}", ConsoleFormatter::format_plain(&outcome));
        if let Some(message) = &outcome.error_message {
            eprintln!("{}", message);
        }
    } else {
        println!("{}", ConsoleFormatter::format_outcome(&outcome));
    }
    Ok(())
}
