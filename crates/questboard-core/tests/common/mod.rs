//! Shared fixtures for integration tests.
//!
//! [`FakeApi`] implements [`QuestApi`] in memory and records every call, so
//! controller flows can be checked without a network.

#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use questboard_core::{
    ActionAck, Narrative, NarrativeTone, PlayerState, Quest, QuestActionResponse, QuestApi,
    QuestError, QuestResult, QuestType, Receipt, ReceiptScope, ShareLink, StateResponse, Stats,
    TimeContext, TimeRange,
};
use reqwest::StatusCode;

pub fn quest(id: &str, quest_type: QuestType) -> Quest {
    Quest {
        id: id.to_string(),
        quest_type,
        context: format!("Context for {}", id),
        real_world_action: format!("Do {}", id),
        constraint: "Five minutes.".to_string(),
        reflection: None,
    }
}

pub fn receipt(id: &str, created_at_ms: i64) -> Receipt {
    Receipt {
        id: id.to_string(),
        created_at_ms,
        quest_id: "q1".to_string(),
        quest_type: QuestType::Courage,
        tone: NarrativeTone::Warm,
        title: "You went first".to_string(),
        line: "Someone had to.".to_string(),
        share_text: "I went first today.".to_string(),
        action: None,
    }
}

pub fn narrative(tone: NarrativeTone, line: &str) -> Narrative {
    Narrative {
        tone,
        title: None,
        line: line.to_string(),
        share_text: None,
    }
}

pub fn player_state() -> PlayerState {
    PlayerState {
        stats: Stats {
            agency: 1.0,
            courage: 2.0,
            order: 0.0,
        },
        flags: vec![],
        time_context: TimeContext {
            range: TimeRange::Recent,
            now_ms: 1_000,
            last_meaningful_action_ms: None,
        },
    }
}

fn status_error(operation: &'static str, status: StatusCode) -> QuestError {
    QuestError::Status { operation, status }
}

/// Scriptable in-memory backend
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub quests: Mutex<Vec<Quest>>,
    /// Replaces `quests` once a quest is completed
    pub quests_after_complete: Mutex<Option<Vec<Quest>>>,
    pub receipts: Mutex<Vec<Receipt>>,
    pub start_narrative: Mutex<Option<Narrative>>,
    pub complete_narrative: Mutex<Option<Narrative>>,
    pub complete_receipt: Mutex<Option<Receipt>>,
    pub ack_receipt: Mutex<Option<Receipt>>,
    pub fail_quests: Mutex<Option<StatusCode>>,
    pub fail_receipts: Mutex<Option<StatusCode>>,
    pub fail_state: Mutex<Option<StatusCode>>,
    pub fail_start: Mutex<Option<StatusCode>>,
    pub fail_complete: Mutex<Option<StatusCode>>,
    /// Artificial latency for start/complete
    pub action_delay: Mutex<Option<Duration>>,
}

impl FakeApi {
    pub fn with_quests(quests: Vec<Quest>) -> Self {
        let api = Self::default();
        *api.quests.lock() = quests;
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.starts_with(name)).count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    async fn delay(&self) {
        let delay = *self.action_delay.lock();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }
}

#[async_trait]
impl QuestApi for FakeApi {
    async fn get_state(&self) -> QuestResult<StateResponse> {
        self.record("get_state");
        if let Some(status) = *self.fail_state.lock() {
            return Err(status_error("fetch state", status));
        }
        Ok(StateResponse {
            state: player_state(),
        })
    }

    async fn get_quests(&self) -> QuestResult<Vec<Quest>> {
        self.record("get_quests");
        if let Some(status) = *self.fail_quests.lock() {
            return Err(status_error("fetch quests", status));
        }
        Ok(self.quests.lock().clone())
    }

    async fn start_quest(&self, quest_id: &str) -> QuestResult<QuestActionResponse> {
        self.record(format!("start_quest:{}", quest_id));
        self.delay().await;
        if let Some(status) = *self.fail_start.lock() {
            return Err(status_error("start quest", status));
        }
        Ok(QuestActionResponse {
            state: player_state(),
            events: vec![],
            narrative: self.start_narrative.lock().clone(),
            receipt: None,
        })
    }

    async fn complete_quest(&self, quest_id: &str) -> QuestResult<QuestActionResponse> {
        self.record(format!("complete_quest:{}", quest_id));
        self.delay().await;
        if let Some(status) = *self.fail_complete.lock() {
            return Err(status_error("complete quest", status));
        }
        if let Some(next) = self.quests_after_complete.lock().take() {
            *self.quests.lock() = next;
        }
        Ok(QuestActionResponse {
            state: player_state(),
            events: vec![],
            narrative: self.complete_narrative.lock().clone(),
            receipt: self.complete_receipt.lock().clone(),
        })
    }

    async fn get_receipts(&self, scope: ReceiptScope) -> QuestResult<Vec<Receipt>> {
        self.record(format!("get_receipts:{:?}", scope));
        if let Some(status) = *self.fail_receipts.lock() {
            return Err(status_error("fetch receipts", status));
        }
        Ok(self.receipts.lock().clone())
    }

    async fn create_share_link(&self, receipt_id: &str) -> QuestResult<ShareLink> {
        self.record(format!("create_share_link:{}", receipt_id));
        Ok(ShareLink {
            url: format!("https://example.test/r/{}", receipt_id),
            token: format!("tok-{}", receipt_id),
        })
    }

    async fn record_action(&self, quest_id: &str, text: &str) -> QuestResult<ActionAck> {
        self.record(format!("record_action:{}:{}", quest_id, text));
        Ok(ActionAck {
            ok: true,
            receipt: self.ack_receipt.lock().clone(),
        })
    }
}
