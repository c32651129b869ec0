//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helper functions for creating test terminals, extracting buffer
//! content, asserting colors, and creating agent and conversation fixtures.

#![cfg(test)]

use crate::tui::app::App;
use crate::tui::theme::Theme;
use chrono::{TimeZone, Utc};
use cursor_agents::{Agent, AgentStatus, Conversation, Message, MessageKind, Source, Target};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|&row| row_contains(buffer, row, text))
}

/// Returns `true` if any row contains the given text.
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    find_row_with_text(buffer, text).is_some()
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Finds the first occurrence of `text` in the specified row and checks
/// if the first character of that text has the specified foreground color.
///
/// Columns are counted in characters, so `text` must come after single-width
/// content only.
pub fn assert_text_fg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    let row_string = row_text(buffer, row);
    let byte_index = row_string
        .find(text)
        .unwrap_or_else(|| panic!("text '{}' not found in row {}: '{}'", text, row, row_string));
    let col = row_string[..byte_index].chars().count();
    assert_fg_color(buffer, col as u16, row, color);
}

/// Creates a Running-style agent fixture with predictable fields.
pub fn make_agent(id: &str, status: AgentStatus) -> Agent {
    Agent {
        id: id.to_string(),
        name: format!("Agent {}", id),
        status,
        source: Source {
            repository: "https://github.com/acme/widgets".to_string(),
            git_ref: "main".to_string(),
        },
        target: Target {
            branch_name: format!("cursor/{}", id),
            url: format!("https://cursor.com/agents?id={}", id),
            pr_url: None,
            auto_create_pr: false,
        },
        summary: None,
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// Creates a conversation with one message per `(kind, text)` pair.
pub fn make_conversation(agent_id: &str, messages: &[(MessageKind, &str)]) -> Conversation {
    Conversation {
        id: agent_id.to_string(),
        messages: messages
            .iter()
            .enumerate()
            .map(|(i, (kind, text))| Message {
                id: format!("m{}", i + 1),
                kind: *kind,
                text: text.to_string(),
            })
            .collect(),
    }
}

/// Renders the whole console to a buffer and returns it for inspection.
pub fn render_app_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let theme = Theme::default();
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            crate::tui::ui::render(frame, app, &theme);
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_terminal_creates_terminal() {
        let terminal = test_terminal(80, 24);
        let size = terminal.size().expect("should have size");
        assert_eq!(size.width, 80);
        assert_eq!(size.height, 24);
    }

    #[test]
    fn test_row_text_extracts_row_content() {
        let mut terminal = test_terminal(20, 5);
        terminal
            .draw(|frame| {
                let area = frame.area();
                let para = ratatui::widgets::Paragraph::new("Hello World");
                frame.render_widget(para, area);
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 0).contains("Hello World"));
        assert_eq!(row_text(buffer, 99), "");
    }

    #[test]
    fn test_find_row_with_text_returns_row_index() {
        let mut terminal = test_terminal(40, 10);
        terminal
            .draw(|frame| {
                let area = frame.area();
                use ratatui::layout::{Constraint, Direction, Layout};
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Length(1)])
                    .split(area);
                frame.render_widget(ratatui::widgets::Paragraph::new("First Line"), chunks[0]);
                frame.render_widget(ratatui::widgets::Paragraph::new("Target Row"), chunks[1]);
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert_eq!(find_row_with_text(buffer, "Target Row"), Some(1));
        assert!(!buffer_contains(buffer, "Missing"));
    }

    #[test]
    fn test_make_agent_uses_given_id_and_status() {
        let agent = make_agent("a1", AgentStatus::Expired);
        assert_eq!(agent.id, "a1");
        assert_eq!(agent.status, AgentStatus::Expired);
        assert_eq!(agent.source.short_repository(), "acme/widgets");
    }

    #[test]
    fn test_make_conversation_keeps_order() {
        let conversation = make_conversation(
            "a1",
            &[
                (MessageKind::UserMessage, "first"),
                (MessageKind::AgentMessage, "second"),
            ],
        );
        assert_eq!(conversation.messages[0].text, "first");
        assert_eq!(conversation.messages[1].id, "m2");
    }
}
