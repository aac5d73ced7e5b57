//! HTTP client for the NLUServer REST API.
//!
//! Deploys a bot (create + initialize), trains it, and asks it to classify
//! utterances. Deploy and train report failures as `false` after logging a
//! warning; the provider escalates. Predict failures are returned as errors.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Serialize;
use uuid::Uuid;

use crate::config::NluServerConfig;
use crate::dsl::{BotData, NluContext, Prediction};
use crate::error::{NluServerError, NluServerResult};
use crate::wire::{
    InitializeRequest, NewBotRequest, NewBotResponse, PredictRequest, PredictResponse,
    TrainRequest,
};

/// Upper bound for a single backoff delay.
const MAX_RETRY_DELAY_MS: u64 = 10_000;

/// Which failed requests may be sent again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryPolicy {
    /// Only requests that never reached the server. Create, initialize and
    /// train change server state and may still be running after a timeout.
    ConnectOnly,
    /// Connection failures and timeouts.
    Transient,
}

impl RetryPolicy {
    fn allows(self, err: &NluServerError) -> bool {
        match self {
            Self::ConnectOnly => err.is_connect(),
            Self::Transient => err.is_transient(),
        }
    }
}

/// Lifecycle of the server-side bot, as seen by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Created,
    Deployed,
    Trained,
    Shutdown,
}

/// Server-side record of a deployed bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub uuid: Uuid,
    pub deployed_at: DateTime<Utc>,
}

pub struct NluServerClient {
    http: reqwest::Client,
    base_url: Url,
    config: NluServerConfig,
    state: ClientState,
    deployment: Option<Deployment>,
}

impl NluServerClient {
    pub fn new(config: NluServerConfig) -> NluServerResult<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| NluServerError::InvalidUrl(format!("{}: {e}", config.url)))?;
        if base_url.cannot_be_a_base() {
            return Err(NluServerError::InvalidUrl(config.url.clone()));
        }
        let http = reqwest::Client::builder()
            .connect_timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url,
            config,
            state: ClientState::Created,
            deployment: None,
        })
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn deployment(&self) -> Option<&Deployment> {
        self.deployment.as_ref()
    }

    pub fn is_shutdown(&self) -> bool {
        self.state == ClientState::Shutdown
    }

    /// Create the bot on the server, then upload its contexts.
    ///
    /// Returns `false` on any failure. A failed deploy leaves the client in
    /// its previous state.
    pub async fn deploy(&mut self, bot: &BotData) -> bool {
        if self.is_shutdown() {
            tracing::warn!(bot = %bot.bot_name(), "deploy requested on a shut down client");
            return false;
        }
        if !self.is_configured_bot(bot) {
            return false;
        }
        let deployment = match self.create_bot(bot).await {
            Ok(deployment) => deployment,
            Err(e) => {
                tracing::warn!(bot = %bot.bot_name(), error = %e, "bot creation failed");
                return false;
            }
        };
        tracing::info!(bot = %bot.bot_name(), uuid = %deployment.uuid, "bot created");

        if let Err(e) = self.initialize_bot(bot).await {
            tracing::warn!(bot = %bot.bot_name(), error = %e, "bot initialization failed");
            return false;
        }
        tracing::info!(
            bot = %bot.bot_name(),
            contexts = bot.nlu_contexts().len(),
            intents = bot.intents().len(),
            "bot initialized"
        );

        self.deployment = Some(deployment);
        self.state = ClientState::Deployed;
        true
    }

    /// Train the deployed bot. Can take minutes.
    pub async fn train(&mut self, bot: &BotData) -> bool {
        if !matches!(self.state, ClientState::Deployed | ClientState::Trained) {
            tracing::warn!(bot = %bot.bot_name(), state = ?self.state, "cannot train a bot that is not deployed");
            return false;
        }
        if !self.is_configured_bot(bot) {
            return false;
        }
        match self.train_bot().await {
            Ok(()) => {
                tracing::info!(bot = %bot.bot_name(), "bot trained");
                self.state = ClientState::Trained;
                true
            }
            Err(e) => {
                tracing::warn!(bot = %bot.bot_name(), error = %e, "bot training failed");
                false
            }
        }
    }

    /// Every request targets `config.bot_name`; a bot with another name is refused.
    fn is_configured_bot(&self, bot: &BotData) -> bool {
        if bot.bot_name() == self.config.bot_name {
            return true;
        }
        tracing::warn!(
            bot = %bot.bot_name(),
            configured = %self.config.bot_name,
            "bot name does not match the configured bot"
        );
        false
    }

    /// Deploy then train; training is skipped when the deploy fails.
    pub async fn deploy_and_train(&mut self, bot: &BotData) -> bool {
        self.deploy(bot).await && self.train(bot).await
    }

    /// Classify `utterance` within `context`.
    pub async fn predict(&self, context: &NluContext, utterance: &str) -> NluServerResult<Prediction> {
        if self.is_shutdown() {
            return Err(NluServerError::Shutdown);
        }
        let bot_name = &self.config.bot_name;
        let url = self.endpoint("predict")?;
        let body = PredictRequest {
            utterance,
            context: &context.name,
        };
        let response = self
            .post_json(url, &body, self.config.request_timeout(), RetryPolicy::Transient)
            .await?;
        let response = ensure_success(response, |s| s.is_success()).await?;
        let decoded: PredictResponse = response
            .json()
            .await
            .map_err(|e| NluServerError::Decode(e.to_string()))?;
        let prediction = Prediction::from(decoded);
        tracing::debug!(
            bot = %bot_name,
            context = %context.name,
            classifications = prediction.classifications.len(),
            "prediction received"
        );
        Ok(prediction)
    }

    /// Mark the client as shut down. No network call; calling twice is harmless.
    pub fn shutdown(&mut self) {
        if !self.is_shutdown() {
            tracing::info!(bot = %self.config.bot_name, "NLUServer client shut down");
        }
        self.state = ClientState::Shutdown;
    }

    async fn create_bot(&self, bot: &BotData) -> NluServerResult<Deployment> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NluServerError::InvalidUrl(self.config.url.clone()))?
            .pop_if_empty()
            .extend(["bot", "new", ""]);
        let body = NewBotRequest {
            name: bot.bot_name(),
            force_overwrite: self.config.force_overwrite,
        };
        let response = self
            .post_json(url, &body, self.config.request_timeout(), RetryPolicy::ConnectOnly)
            .await?;
        let response = ensure_success(response, |s| s == reqwest::StatusCode::OK).await?;
        let created: NewBotResponse = response
            .json()
            .await
            .map_err(|e| NluServerError::Decode(e.to_string()))?;
        let uuid = created
            .uuid
            .ok_or_else(|| NluServerError::Decode("bot creation response has no uuid".into()))?;
        let uuid = Uuid::parse_str(&uuid)
            .map_err(|e| NluServerError::Decode(format!("invalid bot uuid '{uuid}': {e}")))?;
        Ok(Deployment {
            uuid,
            deployed_at: Utc::now(),
        })
    }

    async fn train_bot(&self) -> NluServerResult<()> {
        let url = self.endpoint("train")?;
        let body = TrainRequest::from_config(&self.config);
        let response = self
            .post_json(url, &body, self.config.training_timeout(), RetryPolicy::ConnectOnly)
            .await?;
        ensure_success(response, |s| s.is_success()).await?;
        Ok(())
    }

    async fn initialize_bot(&self, bot: &BotData) -> NluServerResult<()> {
        let url = self.endpoint("initialize")?;
        let body = InitializeRequest::from_bot(bot);
        let response = self
            .post_json(url, &body, self.config.request_timeout(), RetryPolicy::ConnectOnly)
            .await?;
        ensure_success(response, |s| s == reqwest::StatusCode::OK).await?;
        Ok(())
    }

    /// `{base}/bot/{bot_name}/{action}/` for the configured bot, percent-encoded.
    fn endpoint(&self, action: &str) -> NluServerResult<Url> {
        let bot_name = self.config.bot_name.as_str();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NluServerError::InvalidUrl(self.config.url.clone()))?
            .pop_if_empty()
            .extend(["bot", bot_name, action, ""]);
        Ok(url)
    }

    /// POST a JSON body, retrying the failures `retry` allows with
    /// exponential backoff. HTTP responses are returned whatever their status.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> NluServerResult<reqwest::Response> {
        let mut attempt: u32 = 0;
        loop {
            let result = self
                .http
                .post(url.clone())
                .timeout(timeout)
                .header(reqwest::header::ACCEPT, "application/json")
                .json(body)
                .send()
                .await;
            match result {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let err = NluServerError::from(e);
                    if !retry.allows(&err) || attempt >= self.config.max_retries {
                        return Err(err);
                    }
                    let backoff = self
                        .config
                        .retry_base_delay_ms
                        .saturating_mul(1u64 << attempt.min(16));
                    let wait_ms = backoff.min(MAX_RETRY_DELAY_MS);
                    tracing::warn!(
                        url = %url,
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        wait_ms,
                        error = %err,
                        "NLUServer request failed, backing off"
                    );
                    tokio::time::sleep(Duration::from_millis(wait_ms)).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Turn a response whose status fails `accept` into [`NluServerError::Status`].
async fn ensure_success(
    response: reqwest::Response,
    accept: impl Fn(reqwest::StatusCode) -> bool,
) -> NluServerResult<reqwest::Response> {
    let status = response.status();
    if accept(status) {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NluServerError::Status {
        status: status.as_u16(),
        body,
    })
}
