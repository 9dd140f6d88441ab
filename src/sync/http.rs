//! HTTP implementation of the service contract.

use super::wire::{Envelope, MoveRequest, WireAck, WireMoveResponse, WireState};
use super::{Ack, MoveResult, SyncClient, SyncSnapshot};
use crate::error::GameError;
use crate::games::tictactoe::Cell;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for the opponent service's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpSyncClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSyncClient {
    /// Creates a client for the service at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GameError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!("HTTP sync client ready");
        Ok(Self { base_url, client })
    }

    /// Service base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads a response body, mapping error statuses onto the error taxonomy.
    ///
    /// Client-error statuses on a move submission mean the service refused
    /// the move; every other non-2xx status is a service failure.
    async fn read<T: DeserializeOwned>(
        response: reqwest::Response,
        rejects_moves: bool,
    ) -> Result<Option<T>, GameError> {
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "Service response");

        if !status.is_success() {
            let is_rejection = matches!(
                status,
                StatusCode::BAD_REQUEST
                    | StatusCode::FORBIDDEN
                    | StatusCode::CONFLICT
                    | StatusCode::UNPROCESSABLE_ENTITY
            );
            if rejects_moves && is_rejection {
                warn!(status = %status, "Service rejected move");
                return Err(GameError::illegal_move(format!("HTTP {}: {}", status, body)));
            }
            warn!(status = %status, "Service returned error status");
            return Err(GameError::service(format!("HTTP {}", status)));
        }

        if body.trim().is_empty() {
            return Ok(None);
        }
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(Some(envelope.into_inner()))
    }

    async fn respond(&self, body: serde_json::Value) -> Result<MoveResult, GameError> {
        let response = self
            .client
            .put(self.url("/action/respond"))
            .json(&body)
            .send()
            .await?;
        let payload: WireMoveResponse = Self::read(response, true)
            .await?
            .ok_or_else(|| GameError::service("Empty move response"))?;
        let result = payload.into_move_result()?;
        info!(response = ?result.response, status = ?result.status, "Computer responded");
        Ok(result)
    }
}

#[async_trait]
impl SyncClient for HttpSyncClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_snapshot(&self) -> Result<SyncSnapshot, GameError> {
        debug!("Fetching snapshot");
        let response = self.client.get(self.url("/state")).send().await?;
        let state: WireState = Self::read(response, false)
            .await?
            .ok_or_else(|| GameError::service("Empty state response"))?;
        state.into_snapshot()
    }

    #[instrument(skip(self), fields(base_url = %self.base_url, cell = %cell))]
    async fn submit_move(&self, cell: Cell) -> Result<MoveResult, GameError> {
        info!("Submitting move");
        let body = serde_json::to_value(MoveRequest::from(cell))?;
        self.respond(body).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn request_remote_move(&self) -> Result<MoveResult, GameError> {
        info!("Requesting computer move");
        self.respond(serde_json::json!({})).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn request_restart(&self) -> Result<Ack, GameError> {
        info!("Requesting restart");
        let response = self
            .client
            .put(self.url("/action/restart"))
            .send()
            .await?;
        let ack: Option<WireAck> = Self::read(response, false).await?;
        Ok(ack.map(Ack::from).unwrap_or_else(|| Ack::new("OK".to_string())))
    }
}
