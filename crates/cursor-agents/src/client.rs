//! HTTP client for the Background Agents API.
//!
//! Requests are synchronous (`reqwest::blocking`). Async callers are expected
//! to run them on a blocking worker (e.g. `tokio::task::spawn_blocking`).

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

#[cfg(feature = "blocking")]
use crate::types::{
    Agent, AgentPage, ApiKeyInfo, Conversation, FollowupAck, FollowupRequest, Prompt,
};
#[cfg(feature = "blocking")]
use crate::AgentApi;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cursor.com/v0";

/// Upper bound for a single request, connect and body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest page the list endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Builder for [`Client`].
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Starts a builder with the production base URL and a 30 second timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API root (trailing slashes are ignored).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// Must be called outside of an async context: the blocking client owns
    /// its own runtime.
    #[cfg(feature = "blocking")]
    pub fn build(self) -> Result<Client, ApiError> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::InvalidRequest("API key is empty".to_string()));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("cursor-agents/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Client {
            http,
            base_url: self.base_url,
            api_key: self.api_key,
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Blocking Background Agents API client.
#[cfg(feature = "blocking")]
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

#[cfg(feature = "blocking")]
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "blocking")]
impl Client {
    /// Creates a client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        ClientBuilder::new(api_key).build()
    }

    /// Returns the API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieves information about the API key in use (`GET /me`).
    pub fn api_key_info(&self) -> Result<ApiKeyInfo, ApiError> {
        self.get("/me", &[])
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(&map_response(response)?)
    }

    fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(&map_response(response)?)
    }
}

#[cfg(feature = "blocking")]
impl AgentApi for Client {
    fn list_agents(&self, limit: Option<u32>, cursor: Option<&str>) -> Result<AgentPage, ApiError> {
        let query = list_query(limit, cursor)?;
        self.get("/agents", &query)
    }

    fn get_agent(&self, agent_id: &str) -> Result<Agent, ApiError> {
        self.get(&agent_path(agent_id, "")?, &[])
    }

    fn get_conversation(&self, agent_id: &str) -> Result<Conversation, ApiError> {
        self.get(&agent_path(agent_id, "/conversation")?, &[])
    }

    fn send_followup(&self, agent_id: &str, text: &str) -> Result<FollowupAck, ApiError> {
        let path = agent_path(agent_id, "/followup")?;
        if text.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "follow-up text is empty".to_string(),
            ));
        }
        let body = FollowupRequest {
            prompt: Prompt { text },
        };
        self.post(&path, &body)
    }
}

/// Map an HTTP response to its body, turning error statuses into [`ApiError`].
#[cfg(feature = "blocking")]
fn map_response(response: reqwest::blocking::Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = response
        .text()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(status, body, retry_after)
}

/// Classifies a status code. Any 2xx passes the body through.
pub(crate) fn check_status(
    status: u16,
    body: String,
    retry_after: Option<String>,
) -> Result<String, ApiError> {
    match status {
        200..=299 => Ok(body),
        401 | 403 => Err(ApiError::Unauthorized),
        429 => Err(ApiError::RateLimited { retry_after }),
        _ => Err(ApiError::Status {
            status,
            body: body.trim().to_string(),
        }),
    }
}

/// Parses a JSON body.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Builds the query pairs for the list endpoint.
pub(crate) fn list_query(
    limit: Option<u32>,
    cursor: Option<&str>,
) -> Result<Vec<(&'static str, String)>, ApiError> {
    let mut query = Vec::new();
    if let Some(limit) = limit {
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ApiError::InvalidRequest(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"
            )));
        }
        query.push(("limit", limit.to_string()));
    }
    if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
        query.push(("cursor", cursor.to_string()));
    }
    Ok(query)
}

/// Builds `/agents/{id}{suffix}`, rejecting ids that would escape the path.
pub(crate) fn agent_path(agent_id: &str, suffix: &str) -> Result<String, ApiError> {
    let id = agent_id.trim();
    if id.is_empty() {
        return Err(ApiError::InvalidRequest("agent id is empty".to_string()));
    }
    if id
        .chars()
        .any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace())
    {
        return Err(ApiError::InvalidRequest(format!(
            "agent id contains invalid characters: {id:?}"
        )));
    }
    Ok(format!("/agents/{id}{suffix}"))
}
