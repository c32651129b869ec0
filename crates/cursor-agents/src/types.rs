//! Type definitions for Background Agents API payloads.
//!
//! These structures map to the JSON documents exchanged with
//! `https://api.cursor.com/v0`. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a background agent.
///
/// Parsing is case-insensitive (`"running"`, `"RUNNING"` and `"Running"` are
/// all [`AgentStatus::Running`]). Unrecognized values become
/// [`AgentStatus::Unknown`] instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentStatus {
    /// Agent is still working and accepts follow-ups.
    Running,
    /// Agent finished successfully.
    Completed,
    /// Agent stopped with an error.
    Failed,
    /// Agent was cancelled by a user.
    Cancelled,
    /// Agent aged out; hidden from the default dashboard listing.
    Expired,
    /// Any status this client does not know about.
    Unknown,
}

impl AgentStatus {
    /// Upper-case wire spelling, as shown in listings.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Running => "RUNNING",
            AgentStatus::Completed => "COMPLETED",
            AgentStatus::Failed => "FAILED",
            AgentStatus::Cancelled => "CANCELLED",
            AgentStatus::Expired => "EXPIRED",
            AgentStatus::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` if follow-up instructions can be sent to the agent.
    pub fn accepts_followup(self) -> bool {
        self == AgentStatus::Running
    }

    /// Returns `true` for agents hidden by the default "active" filter.
    pub fn is_expired(self) -> bool {
        self == AgentStatus::Expired
    }
}

impl FromStr for AgentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_uppercase().as_str() {
            "RUNNING" => AgentStatus::Running,
            "COMPLETED" | "FINISHED" => AgentStatus::Completed,
            "FAILED" | "ERROR" => AgentStatus::Failed,
            "CANCELLED" | "CANCELED" => AgentStatus::Cancelled,
            "EXPIRED" => AgentStatus::Expired,
            _ => AgentStatus::Unknown,
        };
        Ok(status)
    }
}

impl From<String> for AgentStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<AgentStatus> for String {
    fn from(value: AgentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository the agent was started from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Source {
    /// Repository URL or `owner/name` slug.
    pub repository: String,
    /// Git ref the agent branched from.
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl Source {
    /// Short `owner/name` form of the repository, taken from the last two
    /// path segments of the URL.
    pub fn short_repository(&self) -> String {
        let parts: Vec<&str> = self
            .repository
            .trim_end_matches('/')
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() >= 2 {
            parts[parts.len() - 2..].join("/")
        } else {
            self.repository.clone()
        }
    }
}

/// Where the agent pushes its work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Target {
    /// Branch the agent commits to.
    pub branch_name: String,
    /// Web URL of the agent.
    pub url: String,
    /// Pull request URL, once one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
    /// Whether the agent opens a pull request when done.
    pub auto_create_pr: bool,
}

/// A background agent as returned by the list and get endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Agent identifier (e.g. `bc_abc123`).
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Current status.
    pub status: AgentStatus,
    /// Source repository information.
    #[serde(default)]
    pub source: Source,
    /// Target branch and PR information.
    #[serde(default)]
    pub target: Target,
    /// Free-text summary written by the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Summary text if the agent wrote a non-blank one.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Pull request URL if one was opened.
    pub fn pr_url(&self) -> Option<&str> {
        self.target.pr_url.as_deref().filter(|s| !s.is_empty())
    }
}

/// One page of the agent listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPage {
    /// Agents on this page, in the order the API returned them.
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Cursor for the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    /// Instruction written by a user (initial prompt or follow-up).
    UserMessage,
    /// Output produced by the agent.
    AgentMessage,
    /// Message emitted by the platform.
    SystemMessage,
    /// Unrecognized message type.
    Unknown,
}

impl MessageKind {
    /// Wire spelling of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::UserMessage => "user_message",
            MessageKind::AgentMessage => "agent_message",
            MessageKind::SystemMessage => "system_message",
            MessageKind::Unknown => "unknown",
        }
    }
}

impl From<String> for MessageKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "user_message" => MessageKind::UserMessage,
            "assistant_message" | "agent_message" => MessageKind::AgentMessage,
            "system_message" => MessageKind::SystemMessage,
            _ => MessageKind::Unknown,
        }
    }
}

impl From<MessageKind> for String {
    fn from(value: MessageKind) -> Self {
        value.as_str().to_string()
    }
}

/// A single message of an agent conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Who wrote the message.
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Message body.
    #[serde(default)]
    pub text: String,
}

/// Full transcript of an agent, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation identifier (the agent id).
    pub id: String,
    /// Messages in the order returned by the API.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Request body for `POST /agents/{id}/followup`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct FollowupRequest<'a> {
    pub prompt: Prompt<'a>,
}

/// Prompt payload of a follow-up request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Prompt<'a> {
    pub text: &'a str,
}

/// Acknowledgement of an accepted follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupAck {
    /// Identifier echoed back by the API.
    pub id: String,
}

/// Details about the API key in use (`GET /me`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyInfo {
    /// Key identifier.
    #[serde(default)]
    pub id: String,
    /// Human-readable key name.
    #[serde(default, alias = "apiKeyName")]
    pub name: String,
    /// When the key was created.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    /// Email of the owning user.
    #[serde(default)]
    pub user_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT_JSON: &str = r#"{
        "id": "bc_abc123",
        "name": "Add README",
        "status": "RUNNING",
        "source": { "repository": "https://github.com/acme/widgets", "ref": "main" },
        "target": {
            "branchName": "cursor/add-readme",
            "url": "https://cursor.com/agents?id=bc_abc123",
            "autoCreatePr": true
        },
        "summary": "Added a README",
        "createdAt": "2024-01-15T10:30:00Z"
    }"#;

    #[test]
    fn deserialize_agent() {
        let agent: Agent = serde_json::from_str(AGENT_JSON).expect("valid agent json");
        assert_eq!(agent.id, "bc_abc123");
        assert_eq!(agent.status, AgentStatus::Running);
        assert_eq!(agent.source.git_ref, "main");
        assert_eq!(agent.target.branch_name, "cursor/add-readme");
        assert!(agent.target.auto_create_pr);
        assert_eq!(agent.pr_url(), None);
        assert_eq!(agent.summary_text(), Some("Added a README"));
        assert_eq!(agent.created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!("expired".parse::<AgentStatus>(), Ok(AgentStatus::Expired));
        assert_eq!("Expired".parse::<AgentStatus>(), Ok(AgentStatus::Expired));
        assert_eq!(" RUNNING ".parse::<AgentStatus>(), Ok(AgentStatus::Running));
        assert_eq!("CREATING".parse::<AgentStatus>(), Ok(AgentStatus::Unknown));
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&AgentStatus::Cancelled).expect("serialize");
        assert_eq!(json, r#""CANCELLED""#);
    }

    #[test]
    fn unknown_status_does_not_fail_listing() {
        let page: AgentPage = serde_json::from_str(
            r#"{"agents":[{"id":"a1","status":"PENDING"}],"nextCursor":"abc"}"#,
        )
        .expect("valid page");
        assert_eq!(page.agents[0].status, AgentStatus::Unknown);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn short_repository_keeps_owner_and_name() {
        let source = Source {
            repository: "https://github.com/acme/widgets/".to_string(),
            git_ref: "main".to_string(),
        };
        assert_eq!(source.short_repository(), "acme/widgets");

        let bare = Source {
            repository: "widgets".to_string(),
            git_ref: String::new(),
        };
        assert_eq!(bare.short_repository(), "widgets");
    }

    #[test]
    fn conversation_message_kinds() {
        let conv: Conversation = serde_json::from_str(
            r#"{"id":"bc_1","messages":[
                {"id":"m1","type":"user_message","text":"hi"},
                {"id":"m2","type":"assistant_message","text":"hello"},
                {"id":"m3","type":"tool_call","text":"?"}
            ]}"#,
        )
        .expect("valid conversation");
        let kinds: Vec<MessageKind> = conv.messages.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MessageKind::UserMessage,
                MessageKind::AgentMessage,
                MessageKind::Unknown
            ]
        );
    }

    #[test]
    fn blank_summary_is_treated_as_absent() {
        let mut agent: Agent = serde_json::from_str(AGENT_JSON).expect("valid agent json");
        agent.summary = Some("   ".to_string());
        assert_eq!(agent.summary_text(), None);
    }

    #[test]
    fn followup_request_shape() {
        let body = FollowupRequest {
            prompt: Prompt { text: "ping" },
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(json, r#"{"prompt":{"text":"ping"}}"#);
    }
}
