//! reqwest-backed implementation of [`QuestApi`].
//!
//! Every request carries the session cookie (shared cookie store) and, when
//! the identity mirror holds a value, an `X-Player-Id` header. Every
//! successful JSON body is checked for a `playerId` field which is written
//! back to the mirror when it changed.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::api::{QuestApi, ReceiptScope};
use crate::config::ClientConfig;
use crate::error::{QuestError, QuestResult};
use crate::identity::{sync_identity, IdentityStore};
use crate::types::{
    ActionAck, PlayerId, Quest, QuestActionResponse, QuestsResponse, Receipt, ReceiptsResponse,
    RecordActionRequest, ShareLink, StateResponse,
};

/// Header carrying the mirrored player id
pub const PLAYER_ID_HEADER: &str = "X-Player-Id";

/// Response body field carrying the server-assigned player id
pub const PLAYER_ID_FIELD: &str = "playerId";

/// HTTP client for the quest backend
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base: Url,
    identity: Arc<dyn IdentityStore>,
}

impl HttpClient {
    /// Build a client for `config`, mirroring identity into `identity`.
    pub fn new(config: &ClientConfig, identity: Arc<dyn IdentityStore>) -> QuestResult<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| QuestError::Config(format!("invalid API URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(concat!("questboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuestError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base,
            identity,
        })
    }

    /// Current mirrored player id, if any
    pub fn player_id(&self) -> Option<PlayerId> {
        self.identity.try_read()
    }

    /// Build `<base>/<segments...>[?query]`, percent-encoding each segment.
    fn url(&self, segments: &[&str], query: &str) -> QuestResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| QuestError::Config(format!("API URL cannot be a base: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        if let Some(q) = query.strip_prefix('?') {
            url.set_query(Some(q));
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method.clone(), url);
        let builder = if method == Method::POST {
            builder.header(CONTENT_TYPE, "application/json")
        } else {
            builder
        };
        match self.identity.try_read() {
            Some(id) => builder.header(PLAYER_ID_HEADER, id.as_str()),
            None => builder,
        }
    }

    /// Send, check status, parse JSON, reconcile identity, then decode `T`.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> QuestResult<T> {
        let response = request
            .send()
            .await
            .map_err(|source| QuestError::Network { operation, source })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(QuestError::Status { operation, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| QuestError::Network { operation, source })?;

        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|source| QuestError::Decode { operation, source })?;

        self.reconcile_identity(&value);

        serde_json::from_value(value).map_err(|source| QuestError::Decode { operation, source })
    }

    fn reconcile_identity(&self, body: &serde_json::Value) {
        if let Some(reported) = body.get(PLAYER_ID_FIELD).and_then(|v| v.as_str()) {
            if !reported.is_empty() {
                sync_identity(self.identity.as_ref(), &PlayerId::new(reported));
            }
        }
    }
}

#[async_trait]
impl QuestApi for HttpClient {
    #[instrument(skip(self))]
    async fn get_state(&self) -> QuestResult<StateResponse> {
        let url = self.url(&["api", "state"], "")?;
        self.send("fetch state", self.request(Method::GET, url)).await
    }

    #[instrument(skip(self))]
    async fn get_quests(&self) -> QuestResult<Vec<Quest>> {
        let url = self.url(&["api", "quests"], "")?;
        let resp: QuestsResponse = self
            .send("fetch quests", self.request(Method::GET, url))
            .await?;
        Ok(resp.quests)
    }

    #[instrument(skip(self))]
    async fn start_quest(&self, quest_id: &str) -> QuestResult<QuestActionResponse> {
        let url = self.url(&["api", "quests", quest_id, "start"], "")?;
        self.send("start quest", self.request(Method::POST, url))
            .await
    }

    #[instrument(skip(self))]
    async fn complete_quest(&self, quest_id: &str) -> QuestResult<QuestActionResponse> {
        let url = self.url(&["api", "quests", quest_id, "complete"], "")?;
        self.send("complete quest", self.request(Method::POST, url))
            .await
    }

    #[instrument(skip(self))]
    async fn get_receipts(&self, scope: ReceiptScope) -> QuestResult<Vec<Receipt>> {
        let url = self.url(&["api", "receipts"], scope.query())?;
        let resp: ReceiptsResponse = self
            .send("fetch receipts", self.request(Method::GET, url))
            .await?;
        Ok(resp.receipts)
    }

    #[instrument(skip(self))]
    async fn create_share_link(&self, receipt_id: &str) -> QuestResult<ShareLink> {
        let url = self.url(&["api", "receipts", receipt_id, "share"], "")?;
        self.send("create share link", self.request(Method::POST, url))
            .await
    }

    #[instrument(skip(self, text))]
    async fn record_action(&self, quest_id: &str, text: &str) -> QuestResult<ActionAck> {
        let url = self.url(&["api", "quests", quest_id, "action"], "")?;
        let body = RecordActionRequest {
            quest_id: quest_id.to_string(),
            text: text.to_string(),
        };
        self.send("record action", self.request(Method::POST, url).json(&body))
            .await
    }
}
