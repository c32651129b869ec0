//! Help view: static keymap and tips.

use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("q, Ctrl+C", "Quit"),
    ("?, F1", "Show this help"),
    ("Esc", "Back to the dashboard"),
    ("r, F5", "Refresh agents"),
    ("d", "Agent details"),
    ("c", "Conversation"),
    ("f", "Send follow-up (running agents)"),
    ("s", "Settings"),
];

const DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("j/k, ↑/↓", "Move the cursor"),
    ("g/G, Home/End", "First / last agent"),
    ("Enter", "Open details"),
    ("t", "Toggle active / all agents"),
];

const VIEW_KEYS: &[(&str, &str)] = &[
    ("j/k, PgUp/PgDn", "Scroll details and conversation"),
    ("Ctrl+T", "Follow-up: toggle short / long message"),
    ("Ctrl+S", "Follow-up: send a long message"),
    ("Ctrl+R", "Follow-up: start a new message"),
    ("Enter, Space", "Settings: toggle the selected option"),
];

fn section(title: &'static str, keys: &[(&str, &str)], theme: &Theme) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(title, theme.heading_style()))];
    lines.extend(keys.iter().map(|(key, description)| {
        Line::from(vec![
            Span::styled(format!("  {:<16}", key), key_style),
            Span::raw(description.to_string()),
        ])
    }));
    lines.push(Line::default());
    lines
}

/// Renders the help screen. `refresh_interval` is quoted in the tips.
pub fn render(frame: &mut Frame, area: Rect, refresh_interval: Duration, theme: &Theme) {
    let mut lines = Vec::new();
    lines.extend(section("Global", GLOBAL_KEYS, theme));
    lines.extend(section("Dashboard", DASHBOARD_KEYS, theme));
    lines.extend(section("Views", VIEW_KEYS, theme));
    lines.push(Line::from(Span::styled("Tips", theme.heading_style())));
    for tip in [
        format!(
            "• Agents auto-refresh every {} when enabled",
            humantime::format_duration(refresh_interval)
        ),
        "• Expired agents are hidden until you press t".to_string(),
        "• Follow-ups can only be sent to running agents".to_string(),
    ] {
        lines.push(Line::from(format!("  {}", tip)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Help ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
