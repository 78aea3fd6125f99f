//! CLI entrypoint for toolpilot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use toolpilot_application::RunTurnUseCase;
use toolpilot_domain::BaseDirectory;
use toolpilot_infrastructure::{
    ChatCompletionsEngine, ConfigLoader, FileConfig, LocalAttachmentSource, LocalToolExecutor,
    ProviderSettings,
};
use toolpilot_presentation::{ChatRepl, Cli, ReplConfig};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli);

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("Effective configuration:");
        println!("{}", ConfigLoader::render_effective(&config)?);
        return Ok(());
    }
    config.validate().context("Invalid configuration")?;

    info!("Starting toolpilot");

    let base_path = match &cli.base_dir {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };
    let base = BaseDirectory::new(&base_path)
        .with_context(|| format!("Unusable base directory {}", base_path.display()))?;

    // === Dependency Injection ===
    let settings = ProviderSettings::from_config(&config.provider)?;
    let engine_label = format!("{} / {}", settings.kind, settings.model);
    let engine = Arc::new(ChatCompletionsEngine::new(settings)?);

    let tool_executor = Arc::new(
        LocalToolExecutor::new(base.clone())
            .with_blocklist(config.sandbox.to_blocklist())
            .with_shell(config.sandbox.to_shell()),
    );
    let use_case =
        RunTurnUseCase::new(engine, tool_executor).with_limits(config.agent.to_turn_limits());

    let attachments = Arc::new(
        LocalAttachmentSource::new(base.clone())
            .with_max_chars(config.repl.attachment_max_chars),
    );

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress,
        history_file: config.repl.history_path(),
        history_size: config.repl.history_size,
    };

    let mut repl = ChatRepl::new(use_case, attachments, base)
        .with_config(repl_config)
        .with_engine_label(engine_label);
    repl.run().await?;

    Ok(())
}

/// Command-line flags win over every config source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(provider) = &cli.provider {
        config.provider.kind = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.provider.model = Some(model.clone());
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.agent.max_iterations = max_iterations;
    }
    if cli.quiet {
        config.repl.show_progress = false;
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` overrides.
///
/// The returned guard flushes the log file when dropped.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            };
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path {}", path.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
