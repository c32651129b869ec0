use super::*;
use crate::tui::test_utils::{
    assert_text_fg_in_row, buffer_contains, find_row_with_text, row_text, test_terminal,
};
use ratatui::buffer::Buffer;

fn render_to_buffer(state: &DashboardState, loaded: bool, width: u16, height: u16) -> Buffer {
    let theme = Theme::default();
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            let area = frame.area();
            render(frame, area, state, loaded, &theme);
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[test]
fn test_format_agent_line_standard_has_five_columns() {
    let agent = make_agent("a1", AgentStatus::Running);
    let line = format_agent_line(&agent, 100, &Theme::default());
    assert_eq!(line.spans.len(), 5);
    assert!(line.spans[0].content.starts_with("a1"));
    assert!(line.spans[1].content.starts_with("Agent a1"));
    assert!(line.spans[2].content.contains("RUNNING"));
    assert!(line.spans[3].content.starts_with("acme/widgets"));
    assert!(line.spans[4].content.starts_with("2024-01-15 10:30"));
}

#[test]
fn test_format_agent_line_status_uses_theme_color() {
    let theme = Theme::default();
    let agent = make_agent("a1", AgentStatus::Failed);
    let line = format_agent_line(&agent, 100, &theme);
    assert_eq!(line.spans[2].style.fg, Some(theme.failed));
}

#[test]
fn test_format_agent_line_narrow_shows_symbol_and_name() {
    let agent = make_agent("a1", AgentStatus::Completed);
    let line = format_agent_line(&agent, 40, &Theme::default());
    assert_eq!(line.spans.len(), 2);
    assert_eq!(line.spans[0].content, "✓ ");
    assert_eq!(line.spans[1].content, "Agent a1");
}

#[test]
fn test_format_agent_line_unnamed_agent() {
    let mut agent = make_agent("a1", AgentStatus::Running);
    agent.name = "  ".to_string();
    let line = format_agent_line(&agent, 40, &Theme::default());
    assert_eq!(line.spans[1].content, "(unnamed)");
}

#[test]
fn test_long_id_is_truncated_to_column() {
    let agent = make_agent("bc_0123456789abcdef", AgentStatus::Running);
    let line = format_agent_line(&agent, 100, &Theme::default());
    assert_eq!(line.spans[0].content.chars().count(), ID_WIDTH);
    assert!(line.spans[0].content.contains('…'));
}

#[test]
fn test_created_column_shows_full_timestamp() {
    let agent = make_agent("a1", AgentStatus::Running);
    let line = format_agent_line(&agent, 100, &Theme::default());
    assert_eq!(line.spans[4].content.trim_end(), "2024-01-15 10:30");
    assert!(!line.spans[4].content.contains('…'));
}

#[test]
fn test_wide_name_keeps_columns_aligned() {
    let mut agent = make_agent("a1", AgentStatus::Running);
    agent.name = "日本語のとても長いエージェント名前です".to_string();
    let line = format_agent_line(&agent, 100, &Theme::default());
    let plain = format_agent_line(&make_agent("a2", AgentStatus::Running), 100, &Theme::default());
    assert_eq!(
        crate::format::display_width(&line.spans[1].content),
        crate::format::display_width(&plain.spans[1].content)
    );
    assert!(line.spans[1].content.contains('…'));
}

#[test]
fn test_narrow_threshold_leaves_room_for_names() {
    let agent = make_agent("a1", AgentStatus::Running);
    let narrow = format_agent_line(&agent, NARROW_THRESHOLD - 1, &Theme::default());
    assert_eq!(narrow.spans.len(), 2);
    let standard = format_agent_line(&agent, NARROW_THRESHOLD, &Theme::default());
    assert_eq!(standard.spans.len(), 5);
    assert_eq!(standard.spans[1].content.chars().count(), MIN_NAME_WIDTH);
}

#[test]
fn test_header_line_empty_in_narrow_mode() {
    assert!(format_header_line(40, &Theme::default()).spans.is_empty());
    let header = format_header_line(100, &Theme::default());
    let text: String = header.spans.iter().map(|s| s.content.as_ref()).collect();
    assert!(text.contains("Status"));
    assert!(text.contains("Repository"));
}

#[test]
fn test_render_shows_loading_before_first_fetch() {
    let state = DashboardState::new(false);
    let buffer = render_to_buffer(&state, false, 100, 10);
    assert!(buffer_contains(&buffer, "Loading agents..."));
}

#[test]
fn test_render_shows_empty_hint_after_fetch() {
    let state = DashboardState::new(false);
    let buffer = render_to_buffer(&state, true, 100, 10);
    assert!(buffer_contains(&buffer, "No agents found"));
}

#[test]
fn test_render_lists_filtered_rows_only() {
    let mut state = DashboardState::new(false);
    state.recompute(&mixed_agents());
    let buffer = render_to_buffer(&state, true, 100, 10);
    assert!(buffer_contains(&buffer, "Agent a1"));
    assert!(buffer_contains(&buffer, "Agent a3"));
    assert!(!buffer_contains(&buffer, "Agent a2"));
    assert!(buffer_contains(&buffer, "Agents (active: 2)"));
}

#[test]
fn test_render_marks_cursor_row() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(true);
    state.recompute(&agents);
    state.select_next();
    let buffer = render_to_buffer(&state, true, 100, 10);
    let row = find_row_with_text(&buffer, "Agent a2").expect("a2 row");
    assert!(row_text(&buffer, row).contains("▶"));
}

#[test]
fn test_render_header_precedes_rows() {
    let mut state = DashboardState::new(true);
    state.recompute(&mixed_agents());
    let buffer = render_to_buffer(&state, true, 100, 10);
    let header = find_row_with_text(&buffer, "Repository").expect("header row");
    let first = find_row_with_text(&buffer, "Agent a1").expect("first row");
    assert!(header < first);
    assert_text_fg_in_row(&buffer, header, "Name", Theme::default().title);
}
