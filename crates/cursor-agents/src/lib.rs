//! # cursor-agents
//!
//! A blocking client for the Cursor Background Agents API.
//!
//! The [`AgentApi`] trait describes the four operations the console relies on
//! (list, get, conversation, follow-up). [`Client`] implements it over HTTP;
//! tests and alternative transports can provide their own implementation.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cursor_agents::{AgentApi, Client};
//!
//! let client = Client::new(std::env::var("CURSOR_API_KEY")?)?;
//! for agent in client.list_agents(Some(20), None)?.agents {
//!     println!("{} {} {}", agent.id, agent.status, agent.name);
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, MAX_PAGE_SIZE};
#[cfg(feature = "blocking")]
pub use client::Client;
pub use error::ApiError;
pub use types::{
    Agent, AgentPage, AgentStatus, ApiKeyInfo, Conversation, FollowupAck, Message, MessageKind,
    Source, Target,
};

/// The remote operations the console consumes.
///
/// Every call blocks until the service answers or the request times out.
pub trait AgentApi: Send + Sync {
    /// Lists agents, newest first, one page at a time.
    fn list_agents(&self, limit: Option<u32>, cursor: Option<&str>) -> Result<AgentPage, ApiError>;

    /// Fetches a single agent.
    fn get_agent(&self, agent_id: &str) -> Result<Agent, ApiError>;

    /// Fetches the conversation transcript of an agent.
    fn get_conversation(&self, agent_id: &str) -> Result<Conversation, ApiError>;

    /// Sends an additional instruction to a running agent.
    fn send_followup(&self, agent_id: &str, text: &str) -> Result<FollowupAck, ApiError>;
}
