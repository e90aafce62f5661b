//! Questboard Core Library
//!
//! Client side of the quest game: list quests, start and complete them,
//! collect narrative lines and receipts.
//!
//! ## Overview
//!
//! The backend owns every game rule. This crate is the thin layer around it:
//!
//! - **Identity mirror** ([`identity`]): a local copy of the server-assigned
//!   player id, sent as `X-Player-Id` so a player keeps their progress even
//!   when the session cookie is lost.
//! - **HTTP client** ([`client::HttpClient`]): one method per endpoint,
//!   reconciling the identity mirror from every response.
//! - **Controller** ([`controller`]): explicit [`AppState`] plus a reducer,
//!   with all network calls behind the [`QuestApi`] trait.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use questboard_core::{identity, ClientConfig, Controller, HttpClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let store = identity::open_or_fallback(config.identity_path());
//!     let client = HttpClient::new(&config, store)?;
//!     let controller = Controller::new(Arc::new(client));
//!
//!     let cancel = CancellationToken::new();
//!     controller.load(&cancel).await?;
//!     for quest in controller.snapshot().available_quests() {
//!         println!("[{}] {}", quest.quest_type, quest.context);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod identity;
pub mod logging;
pub mod receipts;
pub mod types;

// Re-exports
pub use api::{QuestApi, ReceiptScope};
pub use client::{HttpClient, PLAYER_ID_FIELD, PLAYER_ID_HEADER};
pub use config::{ClientConfig, Environment};
pub use controller::{Action, AppState, Controller, Phase};
pub use error::{QuestError, QuestResult};
pub use identity::{IdentityStore, IdentitySync, MemoryIdentityStore, RedbIdentityStore};
pub use receipts::{ReceiptCache, RECEIPT_CACHE_CAP};
pub use types::*;
