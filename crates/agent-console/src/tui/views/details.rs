//! Details view: read-only panel describing the selected agent.

use crate::format::{status_symbol, timestamp, wrap};
use crate::tui::theme::Theme;
use crate::tui::views::scroll::ScrollState;
use cursor_agents::{Agent, AgentStatus};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Indent of field rows and summary text.
const INDENT: &str = "  ";

/// One logical line of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine {
    /// Section heading.
    Section(&'static str),
    /// `label: value` row.
    Field(&'static str, String),
    /// Status row, colored by status.
    Status(AgentStatus),
    /// Free text (summary).
    Text(String),
    /// Spacer between sections.
    Blank,
}

/// Builds the panel content for `agent`, wrapping the summary to `width`.
///
/// The same list drives rendering and scroll bounds.
pub fn content(agent: &Agent, width: usize) -> Vec<DetailLine> {
    let mut lines = vec![
        DetailLine::Section("Basic Information"),
        DetailLine::Field("ID", agent.id.clone()),
        DetailLine::Field("Name", agent.name.clone()),
        DetailLine::Status(agent.status),
        DetailLine::Field("Created", timestamp(&agent.created_at)),
        DetailLine::Blank,
        DetailLine::Section("Source Information"),
        DetailLine::Field("Repository", agent.source.repository.clone()),
        DetailLine::Field("Reference", agent.source.git_ref.clone()),
        DetailLine::Blank,
        DetailLine::Section("Target Information"),
        DetailLine::Field("Branch", agent.target.branch_name.clone()),
        DetailLine::Field("Agent URL", agent.target.url.clone()),
        DetailLine::Field(
            "Auto Create PR",
            if agent.target.auto_create_pr { "yes" } else { "no" }.to_string(),
        ),
    ];
    if let Some(pr) = agent.pr_url() {
        lines.push(DetailLine::Field("Pull Request", pr.to_string()));
    }

    if let Some(summary) = agent.summary_text() {
        lines.push(DetailLine::Blank);
        lines.push(DetailLine::Section("Summary"));
        let text_width = width.saturating_sub(INDENT.len());
        lines.extend(wrap(summary, text_width).into_iter().map(DetailLine::Text));
    }

    lines
}

fn to_line(line: &DetailLine, theme: &Theme) -> Line<'static> {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    match line {
        DetailLine::Section(title) => Line::from(Span::styled(*title, theme.heading_style())),
        DetailLine::Field(label, value) => Line::from(vec![
            Span::raw(INDENT),
            Span::styled(format!("{}: ", label), label_style),
            Span::raw(value.clone()),
        ]),
        DetailLine::Status(status) => Line::from(vec![
            Span::raw(INDENT),
            Span::styled("Status: ", label_style),
            Span::styled(
                format!("{} {}", status_symbol(*status), status),
                Style::default().fg(theme.status(*status)),
            ),
        ]),
        DetailLine::Text(text) => Line::from(format!("{}{}", INDENT, text)),
        DetailLine::Blank => Line::default(),
    }
}

/// Renders the panel for `agent`, or a hint when nothing is selected.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    agent: Option<&Agent>,
    scroll: ScrollState,
    theme: &Theme,
) {
    let title = match agent {
        Some(agent) => format!(" Agent Details: {} ", agent.name),
        None => " Agent Details ".to_string(),
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

    let lines: Vec<Line> = content(agent, inner.width as usize)
        .iter()
        .skip(scroll.offset())
        .take(inner.height as usize)
        .map(|line| to_line(line, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_utils::{buffer_contains, find_row_with_text, make_agent, test_terminal};
    use ratatui::buffer::Buffer;

    fn render_to_buffer(agent: Option<&Agent>, scroll: ScrollState, height: u16) -> Buffer {
        let theme = Theme::default();
        let mut terminal = test_terminal(80, height);
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, agent, scroll, &theme);
            })
            .expect("draw failed");
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_content_has_all_sections_in_order() {
        let mut agent = make_agent("a1", AgentStatus::Running);
        agent.summary = Some("Did the thing".to_string());
        let sections: Vec<&str> = content(&agent, 80)
            .into_iter()
            .filter_map(|line| match line {
                DetailLine::Section(title) => Some(title),
                _ => None,
            })
            .collect();
        assert_eq!(
            sections,
            vec![
                "Basic Information",
                "Source Information",
                "Target Information",
                "Summary"
            ]
        );
    }

    #[test]
    fn test_content_omits_empty_summary_and_pr() {
        let agent = make_agent("a1", AgentStatus::Running);
        let lines = content(&agent, 80);
        assert!(!lines.contains(&DetailLine::Section("Summary")));
        assert!(!lines
            .iter()
            .any(|line| matches!(line, DetailLine::Field("Pull Request", _))));
    }

    #[test]
    fn test_content_includes_pr_url() {
        let mut agent = make_agent("a1", AgentStatus::Completed);
        agent.target.pr_url = Some("https://github.com/acme/widgets/pull/7".to_string());
        let lines = content(&agent, 80);
        assert!(lines.contains(&DetailLine::Field(
            "Pull Request",
            "https://github.com/acme/widgets/pull/7".to_string()
        )));
    }

    #[test]
    fn test_summary_is_wrapped_to_width() {
        let mut agent = make_agent("a1", AgentStatus::Running);
        agent.summary = Some("alpha beta gamma delta".to_string());
        let narrow = content(&agent, 14);
        let wide = content(&agent, 80);
        assert!(narrow.len() > wide.len());
        for line in &narrow {
            if let DetailLine::Text(text) = line {
                assert!(text.chars().count() <= 12, "line too long: {text}");
            }
        }
    }

    #[test]
    fn test_render_without_agent() {
        let buffer = render_to_buffer(None, ScrollState::default(), 10);
        assert!(buffer_contains(&buffer, "No agent selected"));
    }

    #[test]
    fn test_render_shows_fields() {
        let agent = make_agent("a1", AgentStatus::Running);
        let buffer = render_to_buffer(Some(&agent), ScrollState::default(), 24);
        assert!(buffer_contains(&buffer, "Agent Details: Agent a1"));
        assert!(buffer_contains(&buffer, "ID: a1"));
        assert!(buffer_contains(&buffer, "Status: ● RUNNING"));
        assert!(buffer_contains(&buffer, "Branch: cursor/a1"));
    }

    #[test]
    fn test_render_respects_scroll_offset() {
        let agent = make_agent("a1", AgentStatus::Running);
        let mut scroll = ScrollState::default();
        let len = content(&agent, 78).len();
        scroll.clamp(len, 5);
        for _ in 0..3 {
            scroll.handle_key(
                crossterm::event::KeyEvent::new(
                    crossterm::event::KeyCode::Down,
                    crossterm::event::KeyModifiers::NONE,
                ),
                len,
                5,
            );
        }
        let buffer = render_to_buffer(Some(&agent), scroll, 7);
        assert!(find_row_with_text(&buffer, "Basic Information").is_none());
        assert!(buffer_contains(&buffer, "Created: 2024-01-15 10:30"));
    }
}
