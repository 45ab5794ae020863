//! HTTP client for a server's room directory.

use anyhow::{Context, Result};
use inarow_board::RoomSummary;
use tracing::{debug, instrument};

/// Fetches `GET /rooms` from a running server.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl DirectoryClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists live rooms.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn rooms(&self) -> Result<Vec<RoomSummary>> {
        let url = format!("{}/rooms", self.base_url);
        let rooms: Vec<RoomSummary> = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?
            .error_for_status()
            .context("Directory request failed")?
            .json()
            .await
            .context("Malformed directory response")?;
        debug!(count = rooms.len(), "Fetched directory");
        Ok(rooms)
    }
}
