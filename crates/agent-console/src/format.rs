//! Text helpers shared by the one-shot commands and the console views.

use chrono::{DateTime, Utc};
use cursor_agents::{AgentStatus, MessageKind};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Timestamp format used in tables and detail panels.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats a creation timestamp (UTC).
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Single-character marker for a status.
pub fn status_symbol(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Running => "●",
        AgentStatus::Completed => "✓",
        AgentStatus::Failed => "✗",
        AgentStatus::Cancelled => "⊘",
        AgentStatus::Expired => "◌",
        AgentStatus::Unknown => "?",
    }
}

/// Icon shown in front of a conversation message.
pub fn message_icon(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::UserMessage => "👤",
        MessageKind::AgentMessage => "🤖",
        MessageKind::SystemMessage => "🔧",
        MessageKind::Unknown => "💬",
    }
}

/// Human label for a message kind.
pub fn message_label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::UserMessage => "User",
        MessageKind::AgentMessage => "Agent",
        MessageKind::SystemMessage => "System",
        MessageKind::Unknown => "Message",
    }
}

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncates `text` to at most `max` columns, ending with `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let limit = max - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > limit {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

/// Pads `text` with spaces to `width` columns. Longer text is returned as is.
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Word wrap to `width` columns.
///
/// Explicit newlines start a new line; blank lines are kept. Words wider than
/// `width` are split. A `width` of zero is treated as one.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.lines()
        .flat_map(|paragraph| textwrap::wrap(paragraph, width))
        .map(|line| line.into_owned())
        .collect()
}
