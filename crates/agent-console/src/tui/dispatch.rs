//! Command dispatcher: runs remote calls off the loop and reports back.
//!
//! # Design
//!
//! - The API client is blocking, so each call runs on
//!   `tokio::task::spawn_blocking`.
//! - Each call is bounded by a timeout. A timed-out worker is abandoned, and
//!   its late result is discarded.
//! - Every dispatched command produces exactly one [`AppMessage`] on the event
//!   queue. Errors, panics and timeouts become `OperationFailed`.

use crate::tui::command::{Command, Operation};
use crate::tui::event::{AppMessage, Event, EventSender};
use cursor_agents::AgentApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default upper bound for a single remote call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Starts remote calls and feeds their results into the event queue.
pub struct Dispatcher {
    api: Arc<dyn AgentApi>,
    tx: EventSender,
    timeout: Duration,
    page_size: u32,
}

impl Dispatcher {
    /// Creates a dispatcher. `page_size` is used for `ListAgents`.
    pub fn new(api: Arc<dyn AgentApi>, tx: EventSender, timeout: Duration, page_size: u32) -> Self {
        Self {
            api,
            tx,
            timeout,
            page_size,
        }
    }

    /// Starts `command` concurrently and returns immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let timeout = self.timeout;
        let page_size = self.page_size;

        tokio::spawn(async move {
            let origin = command.operation();
            debug!(?command, "dispatching");
            let worker = tokio::task::spawn_blocking(move || execute(api.as_ref(), command, page_size));

            let message = match tokio::time::timeout(timeout, worker).await {
                Ok(Ok(message)) => message,
                Ok(Err(join_error)) => {
                    warn!(%origin, "worker failed: {}", join_error);
                    AppMessage::OperationFailed {
                        origin,
                        message: format!("Failed to {origin}: internal error"),
                    }
                }
                Err(_) => {
                    warn!(%origin, "timed out after {:?}", timeout);
                    AppMessage::OperationFailed {
                        origin,
                        message: format!(
                            "Failed to {origin}: timed out after {}",
                            humantime::format_duration(timeout)
                        ),
                    }
                }
            };

            if tx.send(Event::Message(message)).is_err() {
                debug!(%origin, "event queue closed, dropping result");
            }
        })
    }
}

/// Runs one command synchronously and converts the outcome into a message.
pub(crate) fn execute(api: &dyn AgentApi, command: Command, page_size: u32) -> AppMessage {
    let origin = command.operation();
    let result = match command {
        Command::ListAgents => api
            .list_agents(Some(page_size), None)
            .map(|page| AppMessage::AgentsFetched(page.agents)),
        Command::GetAgent { agent_id } => api.get_agent(&agent_id).map(AppMessage::AgentFetched),
        Command::FetchConversation { agent_id } => api
            .get_conversation(&agent_id)
            .map(|conversation| AppMessage::ConversationFetched {
                agent_id,
                conversation,
            }),
        Command::SendFollowup { agent_id, text } => api
            .send_followup(&agent_id, &text)
            .map(|ack| AppMessage::FollowupSent { agent_id, ack }),
    };

    result.unwrap_or_else(|e| {
        debug!(%origin, "remote call failed: {}", e);
        failure(origin, e)
    })
}

fn failure(origin: Operation, error: cursor_agents::ApiError) -> AppMessage {
    AppMessage::OperationFailed {
        origin,
        message: format!("Failed to {origin}: {error}"),
    }
}
