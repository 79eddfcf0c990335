pub mod args;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::adapters::{PathFilePicker, TomlConfigStore};
use crate::app::AppController;
use crate::domain::{AppConfig, Source, TranscriptionModel, WorkflowEvent};
use crate::infrastructure::init_logging;
use crate::ports::ConfigStore;

pub use args::{Cli, Commands, ListArgs, ProcessArgs};

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let store = match &cli.config {
        Some(path) => TomlConfigStore::at(path),
        None => TomlConfigStore::new()?,
    };

    let mut config = store.load().context("failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    let _log_guard = init_logging(&store.logs_dir(), &config.logging)?;

    match cli.command {
        Commands::List(args) => list(config, args).await,
        Commands::Process(args) => process(config, args).await,
        Commands::Config => show_config(&store, &config),
    }
}

// ==================== List ====================

async fn list(config: AppConfig, args: ListArgs) -> Result<ExitCode> {
    let source = Source::from(args.source);
    if source.is_browse() {
        bail!("the browse source has nothing to list");
    }

    let controller = AppController::connect(config, Arc::new(PathFilePicker::new(Vec::new())))?;
    let items = controller
        .load_files(source)
        .await
        .with_context(|| format!("failed to list files from {}", source))?;

    if items.is_empty() {
        println!("No files available.");
    }
    for (idx, item) in items.iter().enumerate() {
        match item.stream_url(&controller.config().api) {
            Some(url) => println!("{}: {}\t{}", idx, item.name(), url),
            None => println!("{}: {}", idx, item.name()),
        }
    }

    Ok(ExitCode::SUCCESS)
}

// ==================== Process ====================

async fn process(config: AppConfig, args: ProcessArgs) -> Result<ExitCode> {
    let Some(source) = args.source.map(Source::from).or(config.defaults.source) else {
        bail!("no source given and no default source configured");
    };
    let model = args.model.map(TranscriptionModel::from).or(config.defaults.model);

    if source.is_browse() && args.files.is_empty() {
        bail!("--file is required with --source browse");
    }
    if !source.is_browse() && !args.files.is_empty() {
        warn!("--file is ignored unless --source browse is used");
    }

    let controller =
        AppController::connect(config, Arc::new(PathFilePicker::new(args.files)))?;
    controller.set_view(args.view.into());

    let progress = tokio::spawn(print_progress(controller.subscribe()));

    // Without a model the submission alerts and sends nothing.
    if let Some(model) = model {
        controller.select_model(model);
    }
    controller.select_source(source).await;

    let outcome = controller.submit().await;
    let rendered = controller.render();

    // Dropping the controller closes the event channel and ends the printer.
    drop(controller);
    join_progress(progress).await;

    println!();
    println!("{}", rendered);

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn print_progress(mut events: broadcast::Receiver<WorkflowEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => println!("{}", describe(&event)),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Progress output fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn join_progress(progress: JoinHandle<()>) {
    if let Err(e) = progress.await {
        warn!(error = %e, "Progress printer ended abnormally");
    }
}

fn describe(event: &WorkflowEvent) -> String {
    match event {
        WorkflowEvent::Started { total } => format!("Processing {} file(s)", total),
        WorkflowEvent::FileProcessed { name, records } => {
            format!("  done    {} ({} transcription(s))", name, records.len())
        }
        WorkflowEvent::Aborted { name, reason } => format!("  failed  {}: {}", name, reason),
        WorkflowEvent::Finished { processed } => format!("Processed {} file(s)", processed),
    }
}

// ==================== Config ====================

fn show_config(store: &TomlConfigStore, config: &AppConfig) -> Result<ExitCode> {
    println!("# {}", store.config_path().display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(ExitCode::SUCCESS)
}
