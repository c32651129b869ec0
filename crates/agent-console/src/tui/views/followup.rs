//! Followup view: input buffer plus the send lifecycle.
//!
//! ```text
//! Idle --submit--> Sending --FollowupSent--> Sent
//!                     |
//!                     +--OperationFailed---> Error
//! Sent | Error --reset or re-entry--> Idle
//! ```
//!
//! Submit is accepted only in `Idle` with non-blank input. The input mode
//! changes which key submits, nothing else.

use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cursor_agents::Agent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Character limit in single-line mode.
pub const SINGLE_LINE_LIMIT: usize = 200;

/// Character limit in multi-line mode.
pub const MULTI_LINE_LIMIT: usize = 4000;

/// How keystrokes are captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Enter submits.
    #[default]
    SingleLine,
    /// Enter inserts a newline, Ctrl+S submits.
    MultiLine,
}

impl InputMode {
    fn limit(self) -> usize {
        match self {
            InputMode::SingleLine => SINGLE_LINE_LIMIT,
            InputMode::MultiLine => MULTI_LINE_LIMIT,
        }
    }

    fn label(self) -> &'static str {
        match self {
            InputMode::SingleLine => "Short message",
            InputMode::MultiLine => "Long message",
        }
    }
}

/// Send lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FollowupPhase {
    /// Ready to accept a submit.
    #[default]
    Idle,
    /// A send command is in flight.
    Sending,
    /// The service acknowledged the follow-up.
    Sent {
        /// Acknowledgement id.
        ack_id: String,
    },
    /// The send failed.
    Error {
        /// Display text.
        message: String,
    },
}

/// Outcome of a key press in the followup view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowupAction {
    /// Nothing for the orchestrator to do.
    None,
    /// Send this text; the phase is already `Sending`.
    Submit(String),
    /// Submit pressed with blank input.
    EmptyInput,
}

/// Local state of the followup view.
#[derive(Debug, Clone, Default)]
pub struct FollowupState {
    input: String,
    mode: InputMode,
    phase: FollowupPhase,
}

impl FollowupState {
    /// Current input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current input mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> &FollowupPhase {
        &self.phase
    }

    /// Called when the view becomes active. Finished sends start over.
    pub fn on_enter(&mut self) {
        if matches!(
            self.phase,
            FollowupPhase::Sent { .. } | FollowupPhase::Error { .. }
        ) {
            self.reset();
        }
    }

    /// Clears input and returns to `Idle`. Ignored while a send is in flight.
    pub fn reset(&mut self) {
        if self.phase == FollowupPhase::Sending {
            return;
        }
        self.input.clear();
        self.phase = FollowupPhase::Idle;
    }

    /// Tries to start a send.
    ///
    /// Only `Idle` with non-blank input moves to `Sending`; any other phase
    /// returns [`FollowupAction::None`].
    pub fn submit(&mut self) -> FollowupAction {
        if self.phase != FollowupPhase::Idle {
            return FollowupAction::None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            return FollowupAction::EmptyInput;
        }
        let text = text.to_string();
        self.phase = FollowupPhase::Sending;
        FollowupAction::Submit(text)
    }

    /// Records a successful send. Only applies while `Sending`.
    pub fn sent(&mut self, ack_id: String) -> bool {
        if self.phase != FollowupPhase::Sending {
            return false;
        }
        self.phase = FollowupPhase::Sent { ack_id };
        true
    }

    /// Records a failed send. Only applies while `Sending`.
    pub fn fail(&mut self, message: String) -> bool {
        if self.phase != FollowupPhase::Sending {
            return false;
        }
        self.phase = FollowupPhase::Error { message };
        true
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            InputMode::SingleLine => InputMode::MultiLine,
            InputMode::MultiLine => {
                let flattened = self.input.replace('\n', " ");
                self.input = flattened.chars().take(SINGLE_LINE_LIMIT).collect();
                InputMode::SingleLine
            }
        };
    }

    fn push(&mut self, c: char) {
        if self.phase == FollowupPhase::Idle && self.input.chars().count() < self.mode.limit() {
            self.input.push(c);
        }
    }

    /// Handles a key press that the orchestrator did not consume.
    pub fn handle_key(&mut self, key: KeyEvent) -> FollowupAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('t') if ctrl => self.toggle_mode(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('s') if ctrl && self.mode == InputMode::MultiLine => {
                return self.submit()
            }
            KeyCode::Enter => match self.mode {
                InputMode::SingleLine => return self.submit(),
                InputMode::MultiLine => self.push('\n'),
            },
            KeyCode::Backspace => {
                if self.phase == FollowupPhase::Idle {
                    self.input.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => self.push(c),
            _ => {}
        }
        FollowupAction::None
    }
}

fn help_text(state: &FollowupState) -> &'static str {
    match (&state.phase, state.mode) {
        (FollowupPhase::Sent { .. }, _) | (FollowupPhase::Error { .. }, _) => {
            "Ctrl+R: New message | Esc: Back | Ctrl+C: Quit"
        }
        (_, InputMode::SingleLine) => {
            "Enter: Send | Ctrl+T: Toggle input mode | Esc: Back | Ctrl+C: Quit"
        }
        (_, InputMode::MultiLine) => {
            "Ctrl+S: Send | Enter: Newline | Ctrl+T: Toggle input mode | Esc: Back | Ctrl+C: Quit"
        }
    }
}

/// Renders the followup form for `agent`.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    agent: Option<&Agent>,
    state: &FollowupState,
    theme: &Theme,
) {
    let title = match agent {
        Some(agent) => format!(" Send Follow-up: {} ", agent.name),
        None => " Send Follow-up ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(agent) = agent else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No agent selected",
                Style::default().fg(theme.error),
            )),
            inner,
        );
        return;
    };
    if !agent.status.accepts_followup() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Can only send follow-up messages to running agents",
                Style::default().fg(theme.error),
            )),
            inner,
        );
        return;
    }

    let input_height = match state.mode {
        InputMode::SingleLine => 3,
        InputMode::MultiLine => 8,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // mode line
            Constraint::Length(input_height), // input box
            Constraint::Min(1),               // phase message
            Constraint::Length(1),            // help
        ])
        .split(inner);

    let mode_line = Line::from(vec![
        Span::raw("Enter additional instructions for the agent. "),
        Span::styled(
            format!("Mode: {} ({}/{})", state.mode.label(), state.input.chars().count(), state.mode.limit()),
            Style::default().fg(theme.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(mode_line), chunks[0]);

    let input_style = if state.phase == FollowupPhase::Idle {
        Style::default().fg(theme.title)
    } else {
        Style::default().fg(theme.muted)
    };
    let input = Paragraph::new(format!("{}▏", state.input))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(input_style)
                .title(" Message "),
        );
    frame.render_widget(input, chunks[1]);

    let status = match &state.phase {
        FollowupPhase::Idle => Line::default(),
        FollowupPhase::Sending => Line::from(Span::styled(
            "Sending follow-up message...",
            Style::default().fg(theme.pending),
        )),
        FollowupPhase::Sent { ack_id } => Line::from(Span::styled(
            format!("Follow-up message sent successfully ({})", ack_id),
            Style::default().fg(theme.success),
        )),
        FollowupPhase::Error { message } => Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(theme.error),
        )),
    };
    frame.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), chunks[2]);

    frame.render_widget(
        Paragraph::new(Span::styled(help_text(state), Style::default().fg(theme.muted))),
        chunks[3],
    );
}
