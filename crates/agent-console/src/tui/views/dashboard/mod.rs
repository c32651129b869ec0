//! Dashboard view: the agent table with its active/all filter.
//!
//! The cursor is tracked by agent id and resolved against the filtered rows
//! after every recompute, so a refresh that reorders or removes agents never
//! leaves it pointing at a different agent.

use crate::format::{pad, status_symbol, timestamp, truncate};
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use cursor_agents::Agent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph},
    Frame,
};

const ID_WIDTH: usize = 14;
const STATUS_WIDTH: usize = 13;
const REPO_WIDTH: usize = 22;
/// A full `YYYY-MM-DD HH:MM` timestamp plus the gutter.
const CREATED_WIDTH: usize = 17;
const MIN_NAME_WIDTH: usize = 10;

/// Highlight marker (2) plus every fixed column.
const FIXED_WIDTH: usize = 2 + ID_WIDTH + STATUS_WIDTH + REPO_WIDTH + CREATED_WIDTH;

/// Below this width only the status symbol and name are shown.
const NARROW_THRESHOLD: u16 = (FIXED_WIDTH + MIN_NAME_WIDTH) as u16;

/// Local state of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    show_all: bool,
    rows: Vec<Agent>,
    cursor: Option<String>,
}

impl DashboardState {
    /// Creates an empty dashboard with the given filter.
    pub fn new(show_all: bool) -> Self {
        Self {
            show_all,
            ..Self::default()
        }
    }

    /// `true` when expired agents are listed too.
    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Rows after filtering, in the order the service returned them.
    pub fn rows(&self) -> &[Agent] {
        &self.rows
    }

    /// Id of the agent under the cursor.
    pub fn cursor_id(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Row index of the cursor in the filtered rows.
    pub fn cursor_index(&self) -> Option<usize> {
        let id = self.cursor.as_deref()?;
        self.rows.iter().position(|agent| agent.id == id)
    }

    /// Agent under the cursor.
    pub fn cursor_agent(&self) -> Option<&Agent> {
        self.cursor_index().and_then(|i| self.rows.get(i))
    }

    /// Rebuilds the filtered rows from the full list and re-resolves the cursor.
    ///
    /// If the agent under the cursor is gone, the cursor stays at the same row
    /// position, clamped to the new length.
    pub fn recompute(&mut self, agents: &[Agent]) {
        let previous_index = self.cursor_index();
        self.rows = agents
            .iter()
            .filter(|agent| self.show_all || !agent.status.is_expired())
            .cloned()
            .collect();

        let still_present = self
            .cursor
            .as_deref()
            .is_some_and(|id| self.rows.iter().any(|agent| agent.id == id));
        if still_present {
            return;
        }

        self.cursor = if self.rows.is_empty() {
            None
        } else {
            let index = previous_index
                .unwrap_or(0)
                .min(self.rows.len().saturating_sub(1));
            Some(self.rows[index].id.clone())
        };
    }

    /// Flips between active-only and all agents.
    pub fn toggle_filter(&mut self, agents: &[Agent]) {
        self.set_show_all(!self.show_all, agents);
    }

    /// Sets the filter and recomputes the rows.
    pub fn set_show_all(&mut self, show_all: bool, agents: &[Agent]) {
        self.show_all = show_all;
        self.recompute(agents);
    }

    fn move_to(&mut self, index: usize) {
        if let Some(agent) = self.rows.get(index) {
            self.cursor = Some(agent.id.clone());
        }
    }

    /// Moves the cursor one row down, stopping at the last row.
    pub fn select_next(&mut self) {
        let next = self
            .cursor_index()
            .map_or(0, |i| (i + 1).min(self.rows.len().saturating_sub(1)));
        self.move_to(next);
    }

    /// Moves the cursor one row up, stopping at the first row.
    pub fn select_previous(&mut self) {
        let previous = self.cursor_index().map_or(0, |i| i.saturating_sub(1));
        self.move_to(previous);
    }

    /// Handles a dashboard key.
    ///
    /// Returns the id of the chosen agent when the user confirms a row. Cursor
    /// movement never triggers a fetch.
    pub fn handle_key(&mut self, key: KeyEvent, agents: &[Agent]) -> Option<String> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Home | KeyCode::Char('g') => self.move_to(0),
            KeyCode::End | KeyCode::Char('G') => self.move_to(self.rows.len().saturating_sub(1)),
            KeyCode::Char('t') => self.toggle_filter(agents),
            KeyCode::Enter => return self.cursor_agent().map(|agent| agent.id.clone()),
            _ => {}
        }
        None
    }
}

/// Title of the table block, e.g. ` Agents (active: 3) `.
pub fn title(state: &DashboardState) -> String {
    let filter = if state.show_all { "all" } else { "active" };
    format!(" Agents ({}: {}) ", filter, state.rows.len())
}

/// Formats one table row for the given width.
pub fn format_agent_line(agent: &Agent, width: u16, theme: &Theme) -> Line<'static> {
    let status_style = Style::default().fg(theme.status(agent.status));
    let symbol = status_symbol(agent.status);

    if width < NARROW_THRESHOLD {
        return Line::from(vec![
            Span::styled(format!("{} ", symbol), status_style),
            Span::raw(display_name(agent)),
        ]);
    }

    let name_width = (width as usize).saturating_sub(FIXED_WIDTH);
    let status_text = format!("{} {}", symbol, agent.status);
    Line::from(vec![
        Span::styled(
            cell(&agent.id, ID_WIDTH),
            Style::default().fg(theme.muted),
        ),
        Span::raw(cell(&display_name(agent), name_width)),
        Span::styled(cell(&status_text, STATUS_WIDTH), status_style),
        Span::raw(cell(&agent.source.short_repository(), REPO_WIDTH)),
        Span::styled(
            cell(&timestamp(&agent.created_at), CREATED_WIDTH),
            Style::default().fg(theme.muted),
        ),
    ])
}

/// Column titles aligned with [`format_agent_line`]. Empty in narrow mode.
pub fn format_header_line(width: u16, theme: &Theme) -> Line<'static> {
    if width < NARROW_THRESHOLD {
        return Line::from(vec![]);
    }
    let style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);
    let name_width = (width as usize).saturating_sub(FIXED_WIDTH);
    Line::from(vec![
        Span::styled("  ", style),
        Span::styled(cell("ID", ID_WIDTH), style),
        Span::styled(cell("Name", name_width), style),
        Span::styled(cell("Status", STATUS_WIDTH), style),
        Span::styled(cell("Repository", REPO_WIDTH), style),
        Span::styled(cell("Created", CREATED_WIDTH), style),
    ])
}

/// Renders the dashboard table into `area`.
///
/// `loaded` is false until the first list call has completed.
pub fn render(frame: &mut Frame, area: Rect, state: &DashboardState, loaded: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title(state));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.rows.is_empty() {
        let text = if loaded {
            "No agents found. Press t to include expired agents."
        } else {
            "Loading agents..."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(theme.muted))),
            inner,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(format_header_line(inner.width, theme)),
        chunks[0],
    );

    let items: Vec<ListItem> = state
        .rows
        .iter()
        .map(|agent| ListItem::new(format_agent_line(agent, inner.width, theme)))
        .collect();

    let list = List::new(items)
        .highlight_style(theme.highlight())
        .highlight_symbol("▶ ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut list_state = ListState::default();
    list_state.select(state.cursor_index());
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn display_name(agent: &Agent) -> String {
    if agent.name.trim().is_empty() {
        "(unnamed)".to_string()
    } else {
        agent.name.clone()
    }
}

/// Truncates to `width - 1` columns and pads to `width`, leaving one space of gutter.
fn cell(text: &str, width: usize) -> String {
    pad(&truncate(text, width.saturating_sub(1)), width)
}

#[cfg(test)]
mod tests;
