//! The backend operations the client depends on.
//!
//! [`QuestApi`] is the seam between state handling and the network: the
//! controller only ever talks to this trait, so tests can swap in a fake.

use async_trait::async_trait;

use crate::error::QuestResult;
use crate::types::{ActionAck, Quest, QuestActionResponse, Receipt, ShareLink, StateResponse};

/// Which receipts to ask the server for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiptScope {
    /// Whatever the server returns by default
    #[default]
    Recent,
    /// The complete history (`?all=true`)
    All,
}

impl ReceiptScope {
    pub(crate) fn query(&self) -> &'static str {
        match self {
            ReceiptScope::Recent => "",
            ReceiptScope::All => "?all=true",
        }
    }
}

#[async_trait]
pub trait QuestApi: Send + Sync {
    /// `GET /api/state`
    async fn get_state(&self) -> QuestResult<StateResponse>;

    /// `GET /api/quests`
    async fn get_quests(&self) -> QuestResult<Vec<Quest>>;

    /// `POST /api/quests/{id}/start`
    async fn start_quest(&self, quest_id: &str) -> QuestResult<QuestActionResponse>;

    /// `POST /api/quests/{id}/complete`
    async fn complete_quest(&self, quest_id: &str) -> QuestResult<QuestActionResponse>;

    /// `GET /api/receipts`
    async fn get_receipts(&self, scope: ReceiptScope) -> QuestResult<Vec<Receipt>>;

    /// `POST /api/receipts/{id}/share`
    async fn create_share_link(&self, receipt_id: &str) -> QuestResult<ShareLink>;

    /// `POST /api/quests/{id}/action`
    async fn record_action(&self, quest_id: &str, text: &str) -> QuestResult<ActionAck>;
}
