//! Requests for remote work issued by the transition function.

use std::fmt;

/// A unit of remote work. The dispatcher answers each with exactly one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the first page of agents.
    ListAgents,
    /// Fetch one agent.
    GetAgent {
        /// Agent to fetch.
        agent_id: String,
    },
    /// Fetch an agent's conversation.
    FetchConversation {
        /// Agent whose transcript to fetch.
        agent_id: String,
    },
    /// Send a follow-up instruction to a running agent.
    SendFollowup {
        /// Target agent.
        agent_id: String,
        /// Instruction text.
        text: String,
    },
}

impl Command {
    /// The remote operation this command performs.
    pub fn operation(&self) -> Operation {
        match self {
            Command::ListAgents => Operation::ListAgents,
            Command::GetAgent { .. } => Operation::GetAgent,
            Command::FetchConversation { .. } => Operation::GetConversation,
            Command::SendFollowup { .. } => Operation::SendFollowup,
        }
    }
}

/// Remote operation kinds, used to route failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List agents.
    ListAgents,
    /// Get a single agent.
    GetAgent,
    /// Get a conversation.
    GetConversation,
    /// Send a follow-up.
    SendFollowup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::ListAgents => "fetch agents",
            Operation::GetAgent => "fetch agent",
            Operation::GetConversation => "fetch conversation",
            Operation::SendFollowup => "send follow-up",
        };
        write!(f, "{}", s)
    }
}
