//! Color palette for the console.
//!
//! A [`Theme`] is built once from config and handed to the render functions.

use crate::config::schema::ThemeName;
use cursor_agents::{AgentStatus, MessageKind};
use ratatui::style::{Color, Modifier, Style};

/// Colors used by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Title bar text.
    pub title: Color,
    /// Muted text (hints, timestamps, version).
    pub muted: Color,
    /// Borders of view panels.
    pub border: Color,
    /// Section headers in Details and Help.
    pub heading: Color,
    /// Background of the highlighted row.
    pub highlight_bg: Color,
    /// Error banner text.
    pub error: Color,
    /// Success messages.
    pub success: Color,
    /// In-progress messages.
    pub pending: Color,
    /// Running agents.
    pub running: Color,
    /// Completed agents.
    pub completed: Color,
    /// Failed agents.
    pub failed: Color,
    /// Cancelled and expired agents.
    pub inactive: Color,
    /// User messages in the transcript.
    pub user: Color,
    /// Agent messages in the transcript.
    pub agent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Cyan,
            muted: Color::DarkGray,
            border: Color::Gray,
            heading: Color::Yellow,
            highlight_bg: Color::DarkGray,
            error: Color::Red,
            success: Color::Green,
            pending: Color::Yellow,
            running: Color::Green,
            completed: Color::Blue,
            failed: Color::Red,
            inactive: Color::Gray,
            user: Color::Cyan,
            agent: Color::Magenta,
        }
    }
}

impl Theme {
    /// Monochrome palette for terminals without reliable colors.
    pub fn mono() -> Self {
        Self {
            title: Color::White,
            muted: Color::Gray,
            border: Color::Gray,
            heading: Color::White,
            highlight_bg: Color::Gray,
            error: Color::White,
            success: Color::White,
            pending: Color::White,
            running: Color::White,
            completed: Color::White,
            failed: Color::White,
            inactive: Color::Gray,
            user: Color::White,
            agent: Color::White,
        }
    }

    /// Palette for a configured theme name.
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Mono => Self::mono(),
        }
    }

    /// Color for an agent status.
    pub fn status(&self, status: AgentStatus) -> Color {
        match status {
            AgentStatus::Running => self.running,
            AgentStatus::Completed => self.completed,
            AgentStatus::Failed => self.failed,
            AgentStatus::Cancelled | AgentStatus::Expired | AgentStatus::Unknown => self.inactive,
        }
    }

    /// Color for a conversation message author.
    pub fn message(&self, kind: MessageKind) -> Color {
        match kind {
            MessageKind::UserMessage => self.user,
            MessageKind::AgentMessage => self.agent,
            MessageKind::SystemMessage | MessageKind::Unknown => self.muted,
        }
    }

    /// Style for the selected row in lists and tables.
    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Bold heading style.
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }
}
