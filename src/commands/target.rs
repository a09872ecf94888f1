// ABOUTME: `target` command - manage the persisted target database URL
// ABOUTME: Also stores the inventory API URL used by `push`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::state;
use crate::utils::{strip_password_from_url, validate_connection_string};

#[derive(Args)]
pub struct TargetArgs {
    #[command(subcommand)]
    command: TargetCommands,
}

#[derive(Subcommand)]
enum TargetCommands {
    /// Set the target database URL
    Set {
        /// The PostgreSQL URL of the inventory database
        url: String,
    },
    /// Unset the target database URL
    Unset,
    /// Show the current target database URL
    Get,
    /// Remember the inventory API base URL used by `push`
    SetApi {
        /// http(s) base URL, e.g. https://local-inventory.nabis.dev/v1
        url: String,
    },
}

pub async fn command(args: TargetArgs) -> Result<()> {
    match args.command {
        TargetCommands::Set { url } => {
            validate_connection_string(&url)?;
            let mut state = state::load().context("Failed to load state")?;
            state.target_url = Some(url.clone());
            state::save(&state).context("Failed to save state")?;
            println!("Target database URL set to: {}", display(&url));
        }
        TargetCommands::Unset => {
            let mut state = state::load().context("Failed to load state")?;
            state.target_url = None;
            state::save(&state).context("Failed to save state")?;
            println!("Target database URL unset.");
        }
        TargetCommands::Get => {
            let state = state::load().context("Failed to load state")?;
            match state.target_url {
                Some(url) => println!("Current target database URL: {}", display(&url)),
                None => println!("Target database URL is not set."),
            }
            if let Some(api_url) = state.api_url {
                println!("Inventory API URL: {}", api_url);
            }
        }
        TargetCommands::SetApi { url } => {
            let parsed = url::Url::parse(&url)
                .with_context(|| format!("Invalid inventory API URL '{}'", url))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("Inventory API URL must use http or https, got '{}'", url);
            }
            let mut state = state::load().context("Failed to load state")?;
            state.api_url = Some(url.clone());
            state::save(&state).context("Failed to save state")?;
            println!("Inventory API URL set to: {}", url);
        }
    }
    Ok(())
}

fn display(url: &str) -> String {
    strip_password_from_url(url).unwrap_or_else(|_| url.to_string())
}
