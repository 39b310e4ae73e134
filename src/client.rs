//! HTTP client for the meeting API

use anyhow::{Context, Result};
use calgrid_core::protocol::{ApiResponse, EventsQueryParams, EventsResponse, meeting_url, meetings_url};
use calgrid_core::{Event, NewEvent};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the `/mock/meeting` endpoints
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// GET /mock/meeting
    pub async fn list_events(&self, params: &EventsQueryParams) -> Result<EventsResponse> {
        let url = meetings_url(&self.base_url);
        tracing::debug!(%url, ?params, "Listing events");

        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Ok(read_envelope(resp).await?.into_data()?)
    }

    /// POST /mock/meeting
    pub async fn create_event(&self, draft: &NewEvent) -> Result<Event> {
        let url = meetings_url(&self.base_url);
        tracing::debug!(%url, title = %draft.title, "Creating event");

        let resp = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Ok(read_envelope(resp).await?.into_data()?)
    }

    /// PUT /mock/meeting/:id
    pub async fn update_event(&self, id: u64, draft: &NewEvent) -> Result<Event> {
        let url = meeting_url(&self.base_url, id);
        tracing::debug!(%url, "Updating event");

        let resp = self
            .http
            .put(&url)
            .json(draft)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Ok(read_envelope(resp).await?.into_data()?)
    }

    /// DELETE /mock/meeting/:id
    pub async fn delete_event(&self, id: u64) -> Result<()> {
        let url = meeting_url(&self.base_url, id);
        tracing::debug!(%url, "Deleting event");

        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        read_envelope(resp).await?.into_data::<serde_json::Value>()?;
        Ok(())
    }
}

/// Decode the response envelope, turning HTTP failures into errors that
/// carry the API's own message when there is one.
async fn read_envelope(resp: reqwest::Response) -> Result<ApiResponse> {
    let status = resp.status();
    let body = resp.text().await.context("Failed to read response body")?;

    parse_envelope(status, &body)
}

fn parse_envelope(status: reqwest::StatusCode, body: &str) -> Result<ApiResponse> {
    match serde_json::from_str::<ApiResponse>(body) {
        Ok(envelope) if status.is_success() || !envelope.success => Ok(envelope),
        Ok(_) => anyhow::bail!("Meeting API returned {}", status),
        Err(_) if !status.is_success() => anyhow::bail!("Meeting API returned {}", status),
        Err(e) => Err(e).context("Invalid response from meeting API"),
    }
}
