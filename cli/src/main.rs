//! CLI entrypoint for Story Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{DiscussionOrchestrator, RoleRegistry};
use council_domain::Role;
use council_infrastructure::{ConfigLoader, OllamaGateway, PresetCatalog, SqliteMemoryStore};
use council_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    // === Dependency Injection ===
    let roles = Arc::new(RoleRegistry::new());
    for role in config.roles() {
        roles.register(role);
    }

    if cli.list_roles {
        for id in roles.ids() {
            let role = roles.lookup(&id)?;
            println!(
                "{:<20} {:<18} {:<12} {}",
                role.id, role.model, role.preset, role.description
            );
        }
        return Ok(());
    }

    let Some(theme) = cli.theme.clone() else {
        bail!("--theme is required to start a session");
    };
    let Some(topic) = cli.topic.clone() else {
        bail!("--topic is required to start a discussion");
    };

    let participants: Vec<String> = if cli.participants.is_empty() {
        Role::default_roles().into_iter().map(|role| role.id).collect()
    } else {
        cli.participants.clone()
    };
    let initiator = cli
        .initiator
        .clone()
        .or_else(|| participants.first().cloned())
        .context("No initiator given and no participants to default to")?;

    let params = config.discussion_params();
    let max_rounds = cli.max_rounds.unwrap_or(params.default_max_rounds);
    let db_path = cli.db.clone().unwrap_or_else(|| config.storage.path.clone());

    let store = Arc::new(
        SqliteMemoryStore::open(&db_path)
            .with_context(|| format!("Failed to open {}", db_path.display()))?,
    );
    let gateway = Arc::new(OllamaGateway::new(
        &config.gateway.base_url,
        config.gateway.timeout(),
        PresetCatalog::new(&config.gateway.presets_dir),
    )?);

    // Ctrl-C stops the run between turns
    let cancellation = CancellationToken::new();
    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping after the current turn");
                cancellation.cancel();
            }
        }
    });

    let orchestrator = DiscussionOrchestrator::new(gateway, store, roles)
        .with_params(params)
        .with_cancellation(cancellation);

    let session_id =
        orchestrator.create_session(theme.clone(), participants.clone(), cli.state.clone())?;
    info!("Starting Story Council session {}", session_id);

    // Print header
    let plain_output = matches!(cli.output, OutputFormat::Draft | OutputFormat::Full);
    if !cli.quiet && plain_output {
        println!();
        println!("+============================================================+");
        println!("|           Story Council - Collaborative Drafting           |");
        println!("+============================================================+");
        println!();
        println!("Theme: {}", theme);
        println!("Topic: {}", topic);
        println!("Participants: {}", participants.join(", "));
        println!("Initiator: {}", initiator);
        println!();
    }

    let result = if cli.quiet {
        orchestrator
            .run(&session_id, &initiator, &topic, max_rounds)
            .await?
    } else {
        let progress = ProgressReporter::new();
        orchestrator
            .run_with_progress(&session_id, &initiator, &topic, max_rounds, &progress)
            .await?
    };

    let output = match cli.output {
        OutputFormat::Draft => ConsoleFormatter::format_draft_only(&result),
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
        OutputFormat::Report => {
            let report = orchestrator.export_report(&session_id).await?;
            ConsoleFormatter::format_report(&report)
        }
    };

    println!("{}", output);

    Ok(())
}
