//! Core types for Questboard
//!
//! Wire shapes mirror the backend JSON (camelCase field names).

use serde::{Deserialize, Serialize};

/// Server-assigned player identifier.
///
/// Opaque to the client. It correlates this installation with server-side
/// state and is only ever taken from a server response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap a value reported by the server
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quest category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Agency,
    Courage,
    Order,
}

impl QuestType {
    pub const ALL: [QuestType; 3] = [QuestType::Agency, QuestType::Courage, QuestType::Order];

    /// Display label for badges
    pub fn label(&self) -> &'static str {
        match self {
            QuestType::Agency => "Agency",
            QuestType::Courage => "Courage",
            QuestType::Order => "Order",
        }
    }

    /// Badge background color
    pub fn color(&self) -> &'static str {
        match self {
            QuestType::Agency => "#6b8e9f",
            QuestType::Courage => "#d4a574",
            QuestType::Order => "#8b6f7e",
        }
    }

    /// Lowercase wire name, also used as a CSS modifier
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestType::Agency => "agency",
            QuestType::Courage => "courage",
            QuestType::Order => "order",
        }
    }
}

impl std::fmt::Display for QuestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tone tag carried by narratives and receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeTone {
    #[default]
    Calm,
    Warm,
    Firm,
}

impl NarrativeTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeTone::Calm => "calm",
            NarrativeTone::Warm => "warm",
            NarrativeTone::Firm => "firm",
        }
    }
}

/// A quest offered to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub context: String,
    pub real_world_action: String,
    pub constraint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

/// Flavor text returned alongside quest start/complete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub tone: NarrativeTone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_text: Option<String>,
}

impl Narrative {
    /// Line shown when the server has nothing to say
    pub const DEFAULT_LINE: &'static str = "Nothing urgent. Return when ready.";

    /// The calm placeholder narrative
    pub fn idle() -> Self {
        Self {
            tone: NarrativeTone::Calm,
            title: None,
            line: Self::DEFAULT_LINE.to_string(),
            share_text: None,
        }
    }
}

/// Permanent record of a completed quest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub created_at_ms: i64,
    pub quest_id: String,
    pub quest_type: QuestType,
    pub tone: NarrativeTone,
    pub title: String,
    pub line: String,
    pub share_text: String,
    /// Free-text note of what the player actually did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Receipt {
    /// Creation time as a UTC datetime, if the timestamp is in range
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.created_at_ms)
    }

    /// Short date for list display (e.g. `2026-10-16`)
    pub fn created_date(&self) -> String {
        self.created_at()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Per-category stat totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub agency: f64,
    pub courage: f64,
    pub order: f64,
}

/// How long since the player last did something meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    Recent,
    Gap,
    LongGap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeContext {
    pub range: TimeRange,
    pub now_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_meaningful_action_ms: Option<i64>,
}

/// Player stats, flags and time context as tracked by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub stats: Stats,
    #[serde(default)]
    pub flags: Vec<String>,
    pub time_context: TimeContext,
}

// ═══════════════════════════════════════════════════════════════════════
// Response envelopes
// ═══════════════════════════════════════════════════════════════════════

/// `GET /api/state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResponse {
    pub state: PlayerState,
}

/// `GET /api/quests`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestsResponse {
    pub quests: Vec<Quest>,
}

/// `POST /api/quests/{id}/start` and `/complete`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestActionResponse {
    pub state: PlayerState,
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub narrative: Option<Narrative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
}

/// `GET /api/receipts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptsResponse {
    pub receipts: Vec<Receipt>,
}

/// `POST /api/receipts/{id}/share`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub url: String,
    pub token: String,
}

/// Body of `POST /api/quests/{id}/action`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActionRequest {
    pub quest_id: String,
    pub text: String,
}

/// Acknowledgement of a recorded action
///
/// The server may hand back the annotated receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionAck {
    #[serde(default = "ack_default")]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
}

fn ack_default() -> bool {
    true
}
