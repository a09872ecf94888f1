// ABOUTME: CLI entry point for inventory-reconciler
// ABOUTME: Parses commands and routes to appropriate handlers

use clap::{Parser, Subcommand};
use inventory_reconciler::commands;
use inventory_reconciler::ReconcilerConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inventory-reconciler")]
#[command(about = "Reconcile app SKU batches into WMS inventory", long_about = None)]
#[command(version)]
struct Cli {
    /// Set the log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log: String,
    /// Path to reconciler.toml
    #[arg(long = "config", global = true, env = "INVENTORY_RECONCILER_CONFIG")]
    config_path: Option<PathBuf>,
    /// JSON fixture file with warehouses and app/inventory snapshots
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print field-level deltas between the app and inventory snapshots as JSON
    Deltas,
    /// Print the INSERT and UPDATE statements a sync would run
    Plan,
    /// Apply inserts and updates to the inventory database
    Sync {
        /// Target PostgreSQL connection string (falls back to `target set`)
        #[arg(long)]
        target: Option<String>,
        /// Print the statements instead of executing them
        #[arg(long)]
        dry_run: bool,
        /// Allow self-signed TLS certificates (insecure - use only for testing)
        #[arg(long = "allow-self-signed-certs", default_value_t = false)]
        allow_self_signed_certs: bool,
    },
    /// Push new and changed batches to the inventory API
    Push {
        /// Inventory API base URL (defaults to the configured api_base_url)
        #[arg(long = "api-url", env = "INVENTORY_API_URL")]
        api_url: Option<String>,
        /// Use the aggregate endpoint, one call per batch for all warehouses
        #[arg(long)]
        aggregate: bool,
    },
    /// Manage the target database URL
    Target {
        #[command(flatten)]
        args: commands::target::TargetArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --log
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ReconcilerConfig::load_or_default(cli.config_path.as_deref())?;
    let fixtures = cli.fixtures.as_deref();

    match cli.command {
        Commands::Deltas => commands::deltas(&config, fixtures).await,
        Commands::Plan => commands::plan(&config, fixtures).await,
        Commands::Sync {
            target,
            dry_run,
            allow_self_signed_certs,
        } => {
            commands::sync(
                &config,
                fixtures,
                target,
                dry_run,
                allow_self_signed_certs,
            )
            .await
        }
        Commands::Push { api_url, aggregate } => {
            commands::push(&config, fixtures, api_url, aggregate).await
        }
        Commands::Target { args } => commands::target::command(args).await,
    }
}
