//! CLI entrypoint for blockagent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use blockagent_application::{
    AuditSink, ExecuteToolInput, ExecuteToolUseCase, NoAuditSink, PolicyGate, ToolRegistry,
};
use blockagent_domain::ToolCall;
use blockagent_infrastructure::{
    ConfigLoader, ConfiguredChainResolver, EnvKeySource, FileConfig, JsonlAuditSink, KeySource,
    LocalKeySigner,
};
use blockagent_presentation::{Cli, Command, ConsoleFormatter, RunArgs, build_params};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting blockagent");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };

    match cli.command {
        Command::Tools => {
            let registry = ToolRegistry::builtin();
            println!("{}", ConsoleFormatter::format_tools(&registry.definitions()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            let sources = if cli.no_config {
                vec![(true, "Default", "built-in defaults".to_string())]
            } else {
                ConfigLoader::config_sources(cli.config.as_ref())
            };
            let issues = config.validate();
            println!("{}", ConsoleFormatter::format_config(&sources, &issues));

            if issues.iter().any(|i| i.is_error()) {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Run(args) => run(args, &config).await,
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over `-v` when set. With `--log-file`, records are also
/// written (without color) to that file.
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
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file {} has no file name", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("cannot create log directory {}", directory.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(args: RunArgs, config: &FileConfig) -> Result<ExitCode> {
    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", ConsoleFormatter::format_issue(issue));
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("configuration has errors; run `blockagent config` for details");
    }

    // === Dependency Injection ===
    let key_env = config.signer.private_key_env.clone();
    let keys: Arc<dyn KeySource> = Arc::new(EnvKeySource::new(key_env.clone()));

    let resolver = ConfiguredChainResolver::from_config(config, keys.clone())
        .map_err(|e| anyhow!("failed to set up chain access: {}", e))?;
    let signer = LocalKeySigner::new(keys, key_env);
    let policy = PolicyGate::new(config.policy.to_policy());

    let audit: Arc<dyn AuditSink> = if config.audit.enabled {
        let path = config.audit.resolved_path();
        match JsonlAuditSink::new(&path) {
            Some(sink) => {
                info!(path = %path.display(), "Audit log enabled");
                Arc::new(sink)
            }
            None => {
                warn!(path = %path.display(), "Audit log unavailable, continuing without it");
                Arc::new(NoAuditSink)
            }
        }
    } else {
        Arc::new(NoAuditSink)
    };

    let use_case = ExecuteToolUseCase::new(
        Arc::new(ToolRegistry::builtin()),
        Arc::new(resolver),
        Arc::new(signer),
        Arc::new(policy),
    )
    .with_audit_sink(audit);

    // Build input
    let mut call = ToolCall::new(args.tool);
    call.chain = args.chain;
    call.params = build_params(args.params_json.as_deref(), &args.params)?;
    let overrides = build_params(None, &args.overrides)?;

    let input = ExecuteToolInput::new(call)
        .with_overrides(overrides)
        .approved(args.approve);

    match use_case.execute(input).await {
        Ok(outcome) => {
            println!("{}", ConsoleFormatter::outcome(&outcome, args.output));
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", ConsoleFormatter::error(&error, args.output));
            Ok(ExitCode::FAILURE)
        }
    }
}
