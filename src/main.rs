#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use questboard_core::logging::LoggingBuilder;
use questboard_core::{identity, ClientConfig, Controller, HttpClient};

/// Questboard - small quests, real world
#[derive(Parser, Debug)]
#[command(name = "questboard-desktop")]
#[command(about = "Questboard desktop client")]
struct Args {
    /// Data directory for the identity mirror and logs
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Backend base URL (overrides QUESTBOARD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn resolve_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid configuration")?;
    if let Some(url) = &args.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(dir) = &args.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    LoggingBuilder::new("desktop")
        .verbosity(args.verbose.max(1))
        .jsonl_dir(config.logs_dir())
        .init();

    tracing::info!(
        api = %config.base_url,
        environment = ?config.environment,
        "Starting with data dir: {:?}",
        config.data_dir
    );

    let store = identity::open_or_fallback(config.identity_path());
    let client = HttpClient::new(&config, store).context("Failed to build HTTP client")?;
    let controller = Controller::new(Arc::new(client));

    let window = WindowBuilder::new()
        .with_title("Questboard")
        .with_inner_size(dioxus::desktop::LogicalSize::new(560.0, 900.0))
        .with_resizable(true);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .with_context(controller)
        .launch(app::App);

    Ok(())
}
