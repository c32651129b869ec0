//! Conversation view: scrollable transcript of the selected agent.

use crate::format::{message_icon, message_label, wrap};
use crate::tui::theme::Theme;
use crate::tui::views::scroll::ScrollState;
use cursor_agents::{Agent, Conversation, MessageKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BODY_INDENT: &str = "   ";

/// One logical line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// Message header: 1-based position and author.
    Header {
        /// Position in the conversation, starting at 1.
        index: usize,
        /// Author of the message.
        kind: MessageKind,
    },
    /// Wrapped body text.
    Body(String),
    /// Rule between two messages.
    Separator,
}

/// Builds transcript lines in conversation order, wrapping bodies to `width`.
pub fn content(conversation: &Conversation, width: usize) -> Vec<TranscriptLine> {
    let body_width = width.saturating_sub(BODY_INDENT.len());
    let mut lines = Vec::new();
    for (i, message) in conversation.messages.iter().enumerate() {
        if i > 0 {
            lines.push(TranscriptLine::Separator);
        }
        lines.push(TranscriptLine::Header {
            index: i + 1,
            kind: message.kind,
        });
        lines.extend(
            wrap(&message.text, body_width)
                .into_iter()
                .map(TranscriptLine::Body),
        );
    }
    lines
}

fn to_line(line: &TranscriptLine, width: usize, theme: &Theme) -> Line<'static> {
    match line {
        TranscriptLine::Header { index, kind } => Line::from(Span::styled(
            format!("{} {} #{}", message_icon(*kind), message_label(*kind), index),
            Style::default()
                .fg(theme.message(*kind))
                .add_modifier(Modifier::BOLD),
        )),
        TranscriptLine::Body(text) => Line::from(format!("{}{}", BODY_INDENT, text)),
        TranscriptLine::Separator => Line::from(Span::styled(
            "─".repeat(width),
            Style::default().fg(theme.muted),
        )),
    }
}

/// Renders the transcript of `agent`.
///
/// Shows a loading hint while `conversation` is absent.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    agent: Option<&Agent>,
    conversation: Option<&Conversation>,
    scroll: ScrollState,
    theme: &Theme,
) {
    let title = match agent {
        Some(agent) => format!(" Conversation: {} ", agent.name),
        None => " Conversation ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint = match (agent, conversation) {
        (None, _) => Some(("No agent selected", theme.error)),
        (Some(_), None) => Some(("Loading conversation...", theme.muted)),
        (Some(_), Some(c)) if c.messages.is_empty() => {
            Some(("No messages in this conversation.", theme.muted))
        }
        _ => None,
    };
    if let Some((text, color)) = hint {
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(color))),
            inner,
        );
        return;
    }
    let Some(conversation) = conversation else {
        return;
    };

    let width = inner.width as usize;
    let lines: Vec<Line> = content(conversation, width)
        .iter()
        .skip(scroll.offset())
        .take(inner.height as usize)
        .map(|line| to_line(line, width, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
