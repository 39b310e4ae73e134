//! Wire types of the mock meeting API.
//!
//! Every response is wrapped in an envelope: `{"success": bool, "data": ..., "error": "..."}`.
//! On failure `data` is usually an empty object, so it is kept as raw JSON
//! until the envelope has been checked.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};
use crate::event::{Event, EventStatus};

/// Path of the meeting collection, relative to the API base URL.
pub const MEETINGS_PATH: &str = "/mock/meeting";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Check the envelope and decode its payload.
    pub fn into_data<T: DeserializeOwned>(self) -> CalGridResult<T> {
        if !self.success {
            return Err(CalGridError::Api(
                self.error.unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Payload of a list request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub total: usize,
}

/// Optional filters for a list request, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

impl EventsQueryParams {
    /// True when the query narrows the result to part of the calendar.
    pub fn is_filtered(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some() || self.user_id.is_some() || self.status.is_some()
    }
}

/// URL of the meeting collection.
pub fn meetings_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), MEETINGS_PATH)
}

/// URL of a single meeting.
pub fn meeting_url(base_url: &str, id: u64) -> String {
    format!("{}/{}", meetings_url(base_url), id)
}
