//! Agent commands: `list`, `status`, `conversation` and `followup`.
//!
//! Each command is a blocking request followed by printing. The printing
//! halves take a writer so they can be tested without a server.

use super::CliError;
use agent_console::format::{
    message_icon, message_label, pad, status_symbol, timestamp, truncate,
};
use cursor_agents::{Agent, AgentApi, AgentPage, Conversation, FollowupAck};
use std::io::{self, Write};

const ID_WIDTH: usize = 16;
const STATUS_WIDTH: usize = 12;
const NAME_WIDTH: usize = 32;
const REPO_WIDTH: usize = 32;

/// Options for `bac list`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ListOptions {
    /// Page size.
    pub limit: u32,
    /// Pagination cursor from a previous call.
    pub cursor: Option<String>,
    /// Include expired agents.
    pub all: bool,
    /// Print the raw page as JSON.
    pub json: bool,
}

/// `bac list`: one page of agents as a table (or JSON).
pub(crate) fn run_list_command(api: &dyn AgentApi, options: &ListOptions) -> Result<(), CliError> {
    let page = api.list_agents(Some(options.limit), options.cursor.as_deref())?;
    let mut out = io::stdout().lock();
    if options.json {
        serde_json::to_writer_pretty(&mut out, &page)?;
        writeln!(out)?;
        return Ok(());
    }
    write_agent_table(&mut out, &page, options.all)?;
    Ok(())
}

/// Writes the agent table, the hidden-count note and the next-page hint.
pub(crate) fn write_agent_table(
    out: &mut impl Write,
    page: &AgentPage,
    show_all: bool,
) -> io::Result<()> {
    let rows: Vec<&Agent> = page
        .agents
        .iter()
        .filter(|agent| show_all || !agent.status.is_expired())
        .collect();
    let hidden = page.agents.len() - rows.len();

    if rows.is_empty() {
        writeln!(out, "No agents found.")?;
    } else {
        writeln!(
            out,
            "{:<ID_WIDTH$}  {:<STATUS_WIDTH$}  {:<NAME_WIDTH$}  {:<REPO_WIDTH$}  CREATED",
            "ID", "STATUS", "NAME", "REPOSITORY"
        )?;
        for agent in &rows {
            let status = format!("{} {}", status_symbol(agent.status), agent.status);
            writeln!(
                out,
                "{}  {}  {}  {}  {}",
                column(&agent.id, ID_WIDTH),
                column(&status, STATUS_WIDTH),
                column(&agent.name, NAME_WIDTH),
                column(&agent.source.short_repository(), REPO_WIDTH),
                timestamp(&agent.created_at),
            )?;
        }
    }

    if hidden > 0 {
        writeln!(out, "\n{hidden} expired agent(s) hidden. Use --all to show them.")?;
    }
    if let Some(cursor) = &page.next_cursor {
        writeln!(out, "\nMore agents available: bac list --cursor {cursor}")?;
    }
    Ok(())
}

fn column(text: &str, width: usize) -> String {
    pad(&truncate(text, width), width)
}

/// `bac status <id>`: one agent's details.
pub(crate) fn run_status_command(
    api: &dyn AgentApi,
    agent_id: &str,
    json: bool,
) -> Result<(), CliError> {
    let agent = api.get_agent(agent_id)?;
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &agent)?;
        writeln!(out)?;
    } else {
        write_agent_details(&mut out, &agent)?;
    }
    Ok(())
}

/// Writes a labelled block for one agent.
pub(crate) fn write_agent_details(out: &mut impl Write, agent: &Agent) -> io::Result<()> {
    writeln!(out, "Agent {}", agent.id)?;
    writeln!(out, "  Name:        {}", agent.name)?;
    writeln!(
        out,
        "  Status:      {} {}",
        status_symbol(agent.status),
        agent.status
    )?;
    writeln!(out, "  Created:     {}", timestamp(&agent.created_at))?;
    writeln!(out, "  Repository:  {}", agent.source.repository)?;
    writeln!(out, "  Reference:   {}", agent.source.git_ref)?;
    writeln!(out, "  Branch:      {}", agent.target.branch_name)?;
    writeln!(out, "  URL:         {}", agent.target.url)?;
    if let Some(pr) = agent.pr_url() {
        writeln!(out, "  PR:          {pr}")?;
    }
    if let Some(summary) = agent.summary_text() {
        writeln!(out, "\nSummary:\n{summary}")?;
    }
    Ok(())
}

/// `bac conversation <id>`: the full transcript.
pub(crate) fn run_conversation_command(api: &dyn AgentApi, agent_id: &str) -> Result<(), CliError> {
    let conversation = api.get_conversation(agent_id)?;
    write_conversation(&mut io::stdout().lock(), &conversation)?;
    Ok(())
}

/// Writes one block per message, separated by blank lines.
pub(crate) fn write_conversation(out: &mut impl Write, conversation: &Conversation) -> io::Result<()> {
    if conversation.messages.is_empty() {
        writeln!(out, "No messages in this conversation.")?;
        return Ok(());
    }
    for (i, message) in conversation.messages.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "{} {} #{}",
            message_icon(message.kind),
            message_label(message.kind),
            i + 1
        )?;
        writeln!(out, "{}", message.text)?;
    }
    Ok(())
}

/// `bac followup <id> <prompt>`.
pub(crate) fn run_followup_command(
    api: &dyn AgentApi,
    agent_id: &str,
    prompt: &str,
) -> Result<(), CliError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(CliError::Usage("follow-up prompt is empty".to_string()));
    }
    let ack = api.send_followup(agent_id, prompt)?;
    write_followup_ack(&mut io::stdout().lock(), agent_id, &ack)?;
    Ok(())
}

fn write_followup_ack(out: &mut impl Write, agent_id: &str, ack: &FollowupAck) -> io::Result<()> {
    writeln!(out, "Follow-up sent to {agent_id} (id: {})", ack.id)
}
