//! Questboard CLI
//!
//! Thin wrapper around questboard-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Where requests go and who we are
//! questboard info
//!
//! # List available quests
//! questboard quests
//!
//! # Start and complete a quest
//! questboard start <quest_id>
//! questboard complete <quest_id>
//!
//! # Note what you actually did
//! questboard record <quest_id> "Called my sister"
//!
//! # Receipt history and sharing
//! questboard receipts --all
//! questboard share <receipt_id>
//!
//! # Local identity mirror
//! questboard identity show
//! questboard identity forget
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use questboard_core::logging::LoggingBuilder;
use questboard_core::{
    identity, ClientConfig, Controller, HttpClient, IdentityStore, Narrative, PlayerState, Quest,
    QuestApi, Receipt, ReceiptScope, RedbIdentityStore,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Questboard - small quests, real world
#[derive(Parser)]
#[command(name = "questboard")]
#[command(version)]
#[command(about = "Questboard - small quests, real world")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Data directory for the identity mirror and logs
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Backend base URL (overrides QUESTBOARD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Local identity mirror
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },

    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Commands that talk to the backend
#[derive(Subcommand)]
enum RemoteCommand {
    /// Show configuration and the mirrored player id
    Info,

    /// Show player stats and flags
    State,

    /// List available quests
    Quests,

    /// Start a quest
    Start {
        /// Quest ID
        quest_id: String,
    },

    /// Complete a quest
    Complete {
        /// Quest ID
        quest_id: String,
    },

    /// List receipts
    Receipts {
        /// Full history instead of the recent page
        #[arg(long)]
        all: bool,
    },

    /// Create a public share link for a receipt
    Share {
        /// Receipt ID
        receipt_id: String,
    },

    /// Record what you did for a quest
    Record {
        /// Quest ID
        quest_id: String,
        /// Free-text description
        text: String,
    },
}

#[derive(Subcommand)]
enum IdentityAction {
    /// Show the mirrored player id
    Show,
    /// Delete the mirrored player id
    Forget,
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    Ok(config)
}

/// Print `value` as pretty JSON, or hand it to `human`.
fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

fn print_quest(quest: &Quest) {
    println!("  {} [{}] {}", quest.id, quest.quest_type.label(), quest.context);
    println!("      Action: {}", quest.real_world_action);
    println!("      Constraint: {}", quest.constraint);
    if let Some(reflection) = &quest.reflection {
        println!("      Reflect: {}", reflection);
    }
}

fn print_narrative(narrative: Option<&Narrative>) {
    let narrative = narrative.cloned().unwrap_or_else(Narrative::idle);
    if let Some(title) = narrative.title.as_deref().filter(|t| !t.is_empty()) {
        println!("  {}", title);
    }
    println!("  \"{}\" ({})", narrative.line, narrative.tone.as_str());
    if let Some(share) = &narrative.share_text {
        println!("  Share: {}", share);
    }
}

fn print_receipt(receipt: &Receipt) {
    println!(
        "  {} {} [{}] {}",
        receipt.id,
        receipt.created_date(),
        receipt.quest_type.label(),
        receipt.title
    );
    println!("      {}", receipt.line);
    if let Some(action) = &receipt.action {
        println!("      What you did: {}", action);
    }
}

fn print_state(state: &PlayerState) {
    println!("Stats:");
    println!("  Agency:  {}", state.stats.agency);
    println!("  Courage: {}", state.stats.courage);
    println!("  Order:   {}", state.stats.order);
    if !state.flags.is_empty() {
        println!("Flags: {}", state.flags.join(", "));
    }
}

/// Identity commands work on the store directly, without the network.
fn identity_command(config: &ClientConfig, action: IdentityAction) -> Result<()> {
    let path = config.identity_path();
    let store = RedbIdentityStore::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    match action {
        IdentityAction::Show => match store.try_read() {
            Some(id) => println!("Player ID: {}", id),
            None => println!("No player id stored yet."),
        },
        IdentityAction::Forget => {
            if store.clear()? {
                println!("Forgot player id.");
            } else {
                println!("No player id stored.");
            }
        }
    }
    Ok(())
}

async fn remote_command(config: &ClientConfig, command: RemoteCommand, json: bool) -> Result<()> {
    let store = identity::open_or_fallback(config.identity_path());
    let client = Arc::new(HttpClient::new(config, store)?);
    let controller = Controller::new(client.clone());

    // Ctrl-C drops any response still in flight
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    match command {
        RemoteCommand::Info => {
            println!("Questboard v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API: {}", config.base_url);
            println!("Environment: {:?}", config.environment);
            println!("Data directory: {}", config.data_dir.display());
            match client.player_id() {
                Some(id) => println!("Player ID: {}", id),
                None => println!("Player ID: (not assigned yet)"),
            }
        }

        RemoteCommand::State => {
            let resp = client.get_state().await?;
            emit(json, &resp, |r| print_state(&r.state))?;
        }

        RemoteCommand::Quests => {
            let quests = client.get_quests().await?;
            emit(json, &quests, |quests| {
                if quests.is_empty() {
                    println!("No quests available at this time.");
                } else {
                    println!("Available quests ({}):", quests.len());
                    for quest in quests {
                        print_quest(quest);
                    }
                }
            })?;
        }

        RemoteCommand::Start { quest_id } => {
            let resp = controller.start_quest(&quest_id, &cancel).await?;
            emit(json, &resp, |r| {
                println!("Started quest {}", quest_id);
                print_narrative(r.narrative.as_ref());
            })?;
        }

        RemoteCommand::Complete { quest_id } => {
            let resp = controller.complete_quest(&quest_id, &cancel).await?;
            emit(json, &resp, |r| {
                println!("Completed quest {}", quest_id);
                print_narrative(r.narrative.as_ref());
                if let Some(receipt) = &r.receipt {
                    println!();
                    println!("Receipt:");
                    print_receipt(receipt);
                    println!("      {}", receipt.share_text);
                }
            })?;
        }

        RemoteCommand::Receipts { all } => {
            let scope = if all {
                ReceiptScope::All
            } else {
                ReceiptScope::Recent
            };
            let receipts = client.get_receipts(scope).await?;
            emit(json, &receipts, |receipts| {
                if receipts.is_empty() {
                    println!("No receipts yet. Complete quests to earn receipts.");
                } else {
                    println!("Receipts ({}):", receipts.len());
                    for receipt in receipts {
                        print_receipt(receipt);
                    }
                }
            })?;
        }

        RemoteCommand::Share { receipt_id } => {
            let link = controller.share_receipt(&receipt_id, &cancel).await?;
            emit(json, &link, |l| println!("{}", l.url))?;
        }

        RemoteCommand::Record { quest_id, text } => {
            let ack = controller.record_action(&quest_id, &text, &cancel).await?;
            emit(json, &ack, |a| {
                println!("Recorded action for {}", quest_id);
                if let Some(receipt) = &a.receipt {
                    print_receipt(receipt);
                }
            })?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    LoggingBuilder::new("cli")
        .verbosity(cli.verbose)
        .jsonl_dir(config.logs_dir())
        .init();

    debug!(
        api = %config.base_url,
        environment = ?config.environment,
        data_dir = %config.data_dir.display(),
        "Resolved configuration"
    );

    let result = match cli.command {
        Commands::Identity { action } => identity_command(&config, action),
        Commands::Remote(command) => remote_command(&config, command, cli.json).await,
    };
    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}
