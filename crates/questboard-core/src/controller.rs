//! Application state and the controller that drives it.
//!
//! [`AppState`] is plain data; [`AppState::apply`] is the only way it changes.
//! [`Controller`] runs the async side (calls into [`QuestApi`]) and turns
//! every outcome into an [`Action`]. The current state is published on a
//! `tokio::sync::watch` channel so any number of views can follow it.
//!
//! Quest actions (start, complete, record) are serialized by
//! `action_in_progress`: a second action is refused, without touching the
//! network, while one is in flight.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::api::{QuestApi, ReceiptScope};
use crate::error::{QuestError, QuestResult};
use crate::receipts::ReceiptCache;
use crate::types::{
    ActionAck, Narrative, PlayerState, Quest, QuestActionResponse, Receipt, ShareLink,
};

/// Top-level lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initial fetch in flight
    #[default]
    Loading,
    Ready,
}

/// Everything the views render from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub phase: Phase,
    pub quests: Vec<Quest>,
    pub active_quest_id: Option<String>,
    pub narrative: Option<Narrative>,
    pub receipts: ReceiptCache,
    /// Receipt from the most recent completion, shown until dismissed
    pub latest_receipt: Option<Receipt>,
    pub player: Option<PlayerState>,
    pub error: Option<String>,
    pub action_in_progress: bool,
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    /// Initial load abandoned; nothing fetched is committed
    LoadCancelled,
    QuestsLoaded(Vec<Quest>),
    QuestsFailed(String),
    ReceiptsLoaded(Vec<Receipt>),
    PlayerStateLoaded(PlayerState),
    ActionStarted,
    QuestStarted {
        quest_id: String,
        narrative: Option<Narrative>,
        player: PlayerState,
    },
    QuestCompleted {
        narrative: Option<Narrative>,
        receipt: Option<Receipt>,
        player: PlayerState,
    },
    ReceiptRecorded(Receipt),
    ActionFailed(String),
    ActionFinished,
    Abandon,
    DismissError,
    DismissReceipt,
}

impl AppState {
    /// Apply one transition.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadStarted => {
                self.phase = Phase::Loading;
                self.error = None;
            }
            Action::LoadCancelled => {
                self.phase = Phase::Ready;
            }
            Action::QuestsLoaded(quests) => {
                self.quests = quests;
                self.phase = Phase::Ready;
            }
            Action::QuestsFailed(message) => {
                self.quests.clear();
                self.error = Some(message);
                self.phase = Phase::Ready;
            }
            Action::ReceiptsLoaded(receipts) => {
                self.receipts.merge(receipts);
            }
            Action::PlayerStateLoaded(player) => {
                self.player = Some(player);
            }
            Action::ActionStarted => {
                self.action_in_progress = true;
                self.error = None;
            }
            Action::QuestStarted {
                quest_id,
                narrative,
                player,
            } => {
                self.active_quest_id = Some(quest_id);
                self.narrative = narrative;
                self.player = Some(player);
            }
            Action::QuestCompleted {
                narrative,
                receipt,
                player,
            } => {
                self.active_quest_id = None;
                self.narrative = narrative;
                self.player = Some(player);
                if let Some(receipt) = receipt {
                    self.receipts.insert(receipt.clone());
                    self.latest_receipt = Some(receipt);
                }
            }
            Action::ReceiptRecorded(receipt) => {
                if self
                    .latest_receipt
                    .as_ref()
                    .is_some_and(|r| r.id == receipt.id)
                {
                    self.latest_receipt = Some(receipt.clone());
                }
                self.receipts.insert(receipt);
            }
            Action::ActionFailed(message) => {
                self.error = Some(message);
            }
            Action::ActionFinished => {
                self.action_in_progress = false;
            }
            Action::Abandon => {
                self.active_quest_id = None;
            }
            Action::DismissError => {
                self.error = None;
            }
            Action::DismissReceipt => {
                self.latest_receipt = None;
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The active quest, looked up by id in the quest list
    pub fn active_quest(&self) -> Option<&Quest> {
        let id = self.active_quest_id.as_deref()?;
        self.quests.iter().find(|q| q.id == id)
    }

    /// Quest list minus the active entry
    pub fn available_quests(&self) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| Some(q.id.as_str()) != self.active_quest_id.as_deref())
            .collect()
    }

    /// Whether a quest may be started right now
    pub fn can_start(&self) -> bool {
        !self.action_in_progress && self.active_quest_id.is_none()
    }
}

/// Drives [`AppState`] from user intents and backend responses.
#[derive(Clone)]
pub struct Controller {
    api: Arc<dyn QuestApi>,
    state: Arc<watch::Sender<AppState>>,
}

impl Controller {
    pub fn new(api: Arc<dyn QuestApi>) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: Action) {
        self.state.send_modify(|state| state.apply(action));
    }

    /// Claim the action slot, refusing if it is taken.
    fn begin_action(&self, requires_idle_quest: bool) -> QuestResult<()> {
        let mut refusal = None;
        self.state.send_if_modified(|state| {
            if state.action_in_progress {
                refusal = Some(QuestError::ActionInProgress);
                return false;
            }
            if requires_idle_quest {
                if let Some(active) = &state.active_quest_id {
                    refusal = Some(QuestError::QuestAlreadyActive(active.clone()));
                    return false;
                }
            }
            state.apply(Action::ActionStarted);
            true
        });
        match refusal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Record a failure in state unless it was a cancellation.
    fn fail(&self, operation: &str, err: &QuestError) {
        if matches!(err, QuestError::Cancelled) {
            info!("{} cancelled", operation);
            return;
        }
        error!("Error during {}: {}", operation, err);
        self.dispatch(Action::ActionFailed(err.to_string()));
    }

    /// Initial load: quests, receipts and player state, concurrently.
    ///
    /// Receipts and player state are optional; only a quest failure is
    /// reported as an error. The phase leaves `Loading` on every path,
    /// cancellation included.
    pub async fn load(&self, cancel: &CancellationToken) -> QuestResult<()> {
        self.dispatch(Action::LoadStarted);

        let fetched = guarded(cancel, async {
            Ok(tokio::join!(
                self.api.get_quests(),
                self.api.get_receipts(ReceiptScope::All),
                self.api.get_state(),
            ))
        })
        .await;
        let (quests, receipts, player) = match fetched {
            Ok(results) => results,
            Err(e) => {
                info!("Initial load cancelled");
                self.dispatch(Action::LoadCancelled);
                return Err(e);
            }
        };

        match receipts {
            Ok(list) => self.dispatch(Action::ReceiptsLoaded(list)),
            Err(e) => warn!("Failed to load receipts, continuing without: {}", e),
        }

        match player {
            Ok(resp) => self.dispatch(Action::PlayerStateLoaded(resp.state)),
            Err(e) => warn!("Failed to load player state: {}", e),
        }

        match quests {
            Ok(list) => {
                info!(count = list.len(), "Quests loaded");
                self.dispatch(Action::QuestsLoaded(list));
                Ok(())
            }
            Err(e) => {
                error!("Error fetching quests: {}", e);
                self.dispatch(Action::QuestsFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Start `quest_id`. Refused while another action runs or a quest is active.
    pub async fn start_quest(
        &self,
        quest_id: &str,
        cancel: &CancellationToken,
    ) -> QuestResult<QuestActionResponse> {
        self.begin_action(true)?;

        let outcome = match guarded(cancel, self.api.start_quest(quest_id)).await {
            Ok(resp) => {
                info!(quest_id, "Quest started");
                self.dispatch(Action::QuestStarted {
                    quest_id: quest_id.to_string(),
                    narrative: resp.narrative.clone(),
                    player: resp.state.clone(),
                });
                Ok(resp)
            }
            Err(e) => {
                self.fail("start quest", &e);
                Err(e)
            }
        };

        self.dispatch(Action::ActionFinished);
        outcome
    }

    /// Complete `quest_id`, then refetch the quest list.
    pub async fn complete_quest(
        &self,
        quest_id: &str,
        cancel: &CancellationToken,
    ) -> QuestResult<QuestActionResponse> {
        self.begin_action(false)?;

        let outcome = self.complete_and_refresh(quest_id, cancel).await;
        if let Err(e) = &outcome {
            self.fail("complete quest", e);
        }

        self.dispatch(Action::ActionFinished);
        outcome
    }

    async fn complete_and_refresh(
        &self,
        quest_id: &str,
        cancel: &CancellationToken,
    ) -> QuestResult<QuestActionResponse> {
        let resp = guarded(cancel, self.api.complete_quest(quest_id)).await?;
        info!(quest_id, receipt = resp.receipt.is_some(), "Quest completed");
        self.dispatch(Action::QuestCompleted {
            narrative: resp.narrative.clone(),
            receipt: resp.receipt.clone(),
            player: resp.state.clone(),
        });

        // The server may have generated a fresh set
        let quests = guarded(cancel, self.api.get_quests()).await?;
        self.dispatch(Action::QuestsLoaded(quests));
        Ok(resp)
    }

    /// Client-side only: forget the active quest. No request is sent.
    pub fn abandon(&self) -> Option<String> {
        let previous = self.state.borrow().active_quest_id.clone();
        if let Some(id) = &previous {
            info!(quest_id = %id, "Quest abandoned locally");
        }
        self.dispatch(Action::Abandon);
        previous
    }

    /// Attach a free-text note of what the player did to `quest_id`.
    pub async fn record_action(
        &self,
        quest_id: &str,
        text: &str,
        cancel: &CancellationToken,
    ) -> QuestResult<ActionAck> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QuestError::EmptyActionText);
        }
        self.begin_action(false)?;

        let outcome = match guarded(cancel, self.api.record_action(quest_id, text)).await {
            Ok(ack) => {
                info!(quest_id, ok = ack.ok, "Action recorded");
                if let Some(receipt) = &ack.receipt {
                    self.dispatch(Action::ReceiptRecorded(receipt.clone()));
                }
                Ok(ack)
            }
            Err(e) => {
                self.fail("record action", &e);
                Err(e)
            }
        };

        self.dispatch(Action::ActionFinished);
        outcome
    }

    /// Create a public share link for a receipt.
    pub async fn share_receipt(
        &self,
        receipt_id: &str,
        cancel: &CancellationToken,
    ) -> QuestResult<ShareLink> {
        let result = guarded(cancel, self.api.create_share_link(receipt_id)).await;
        if let Err(e) = &result {
            self.fail("create share link", e);
        }
        result
    }

    /// Fresh receipt history straight from the server.
    ///
    /// Does not touch the cached receipts in [`AppState`].
    pub async fn fetch_receipts(&self, cancel: &CancellationToken) -> QuestResult<Vec<Receipt>> {
        guarded(cancel, self.api.get_receipts(ReceiptScope::All)).await
    }

    /// Refresh stats and flags.
    pub async fn refresh_player(&self, cancel: &CancellationToken) -> QuestResult<PlayerState> {
        let resp = guarded(cancel, self.api.get_state()).await?;
        self.dispatch(Action::PlayerStateLoaded(resp.state.clone()));
        Ok(resp.state)
    }

    pub fn dismiss_error(&self) {
        self.dispatch(Action::DismissError);
    }

    pub fn dismiss_receipt(&self) {
        self.dispatch(Action::DismissReceipt);
    }
}

/// Run `fut` unless `cancel` fires first; a response that arrives after
/// cancellation is discarded.
async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = QuestResult<T>>,
) -> QuestResult<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(QuestError::Cancelled),
        result = fut => {
            if cancel.is_cancelled() {
                Err(QuestError::Cancelled)
            } else {
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NarrativeTone, QuestType, Stats, TimeContext, TimeRange};

    fn quest(id: &str) -> Quest {
        Quest {
            id: id.to_string(),
            quest_type: QuestType::Courage,
            context: "ctx".to_string(),
            real_world_action: "act".to_string(),
            constraint: "limit".to_string(),
            reflection: None,
        }
    }

    fn player() -> PlayerState {
        PlayerState {
            stats: Stats::default(),
            flags: vec![],
            time_context: TimeContext {
                range: TimeRange::Recent,
                now_ms: 0,
                last_meaningful_action_ms: None,
            },
        }
    }

    fn receipt(id: &str) -> Receipt {
        Receipt {
            id: id.to_string(),
            created_at_ms: 1,
            quest_id: "q1".to_string(),
            quest_type: QuestType::Courage,
            tone: NarrativeTone::Warm,
            title: "t".to_string(),
            line: "l".to_string(),
            share_text: "s".to_string(),
            action: None,
        }
    }

    #[test]
    fn test_default_state_is_loading() {
        let state = AppState::default();
        assert!(state.is_loading());
        assert!(state.can_start());
    }

    #[test]
    fn test_available_excludes_active() {
        let mut state = AppState::default();
        state.apply(Action::QuestsLoaded(vec![quest("q1"), quest("q2")]));
        state.active_quest_id = Some("q1".to_string());

        let ids: Vec<_> = state.available_quests().iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids, ["q2"]);
        assert_eq!(state.active_quest().unwrap().id, "q1");
    }

    #[test]
    fn test_available_is_all_when_active_unknown() {
        let mut state = AppState::default();
        state.apply(Action::QuestsLoaded(vec![quest("q1"), quest("q2")]));
        assert_eq!(state.available_quests().len(), 2);

        state.active_quest_id = Some("gone".to_string());
        assert_eq!(state.available_quests().len(), 2);
        assert!(state.active_quest().is_none());
    }

    #[test]
    fn test_quests_failed_clears_list_and_sets_error() {
        let mut state = AppState::default();
        state.apply(Action::QuestsLoaded(vec![quest("q1")]));
        state.apply(Action::QuestsFailed("Failed to fetch quests: Bad Gateway".into()));

        assert!(state.quests.is_empty());
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to fetch quests: Bad Gateway")
        );
    }

    #[test]
    fn test_action_started_clears_error() {
        let mut state = AppState {
            error: Some("old".into()),
            ..Default::default()
        };
        state.apply(Action::ActionStarted);
        assert!(state.action_in_progress);
        assert!(state.error.is_none());
        assert!(!state.can_start());
    }

    #[test]
    fn test_completion_tracks_latest_receipt() {
        let mut state = AppState {
            active_quest_id: Some("q1".into()),
            ..Default::default()
        };
        state.apply(Action::QuestCompleted {
            narrative: None,
            receipt: Some(receipt("r1")),
            player: player(),
        });

        assert!(state.active_quest_id.is_none());
        assert_eq!(state.latest_receipt.as_ref().unwrap().id, "r1");
        assert_eq!(state.receipts.len(), 1);

        let mut annotated = receipt("r1");
        annotated.action = Some("Called my sister".into());
        state.apply(Action::ReceiptRecorded(annotated));
        assert_eq!(
            state.latest_receipt.as_ref().unwrap().action.as_deref(),
            Some("Called my sister")
        );
        assert_eq!(state.receipts.len(), 1);

        state.apply(Action::DismissReceipt);
        assert!(state.latest_receipt.is_none());
    }

    #[test]
    fn test_abandon_only_clears_active() {
        let mut state = AppState {
            active_quest_id: Some("q1".into()),
            narrative: Some(Narrative::idle()),
            ..Default::default()
        };
        state.apply(Action::Abandon);
        assert!(state.active_quest_id.is_none());
        assert!(state.narrative.is_some());
    }
}
