use super::*;
use crossterm::event::KeyModifiers;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// --- filter tests ---

#[test]
fn test_active_filter_excludes_only_expired() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(false);
    state.recompute(&agents);
    assert_eq!(row_ids(&state), vec!["a1", "a3"]);
}

#[test]
fn test_show_all_includes_every_agent() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(true);
    state.recompute(&agents);
    assert_eq!(row_ids(&state), vec!["a1", "a2", "a3"]);
}

#[test]
fn test_toggle_twice_restores_rows() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(false);
    state.recompute(&agents);
    let before: Vec<String> = row_ids(&state).iter().map(|s| s.to_string()).collect();

    state.toggle_filter(&agents);
    assert!(state.show_all());
    state.toggle_filter(&agents);
    assert!(!state.show_all());

    let after: Vec<String> = row_ids(&state).iter().map(|s| s.to_string()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_lowercase_expired_status_is_filtered() {
    let mut agent = make_agent("a9", AgentStatus::Running);
    agent.status = "expired".parse().unwrap_or(AgentStatus::Unknown);
    let mut state = DashboardState::new(false);
    state.recompute(&[agent]);
    assert!(state.rows().is_empty());
}

#[test]
fn test_title_reflects_filter_and_count() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(false);
    state.recompute(&agents);
    assert_eq!(title(&state), " Agents (active: 2) ");
    state.toggle_filter(&agents);
    assert_eq!(title(&state), " Agents (all: 3) ");
}

// --- cursor tests ---

#[test]
fn test_cursor_starts_on_first_row() {
    let mut state = DashboardState::new(false);
    assert_eq!(state.cursor_id(), None);
    state.recompute(&mixed_agents());
    assert_eq!(state.cursor_id(), Some("a1"));
    assert_eq!(state.cursor_index(), Some(0));
}

#[test]
fn test_cursor_movement_is_clamped() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(true);
    state.recompute(&agents);

    state.select_previous();
    assert_eq!(state.cursor_id(), Some("a1"));
    for _ in 0..10 {
        state.select_next();
    }
    assert_eq!(state.cursor_id(), Some("a3"));
}

#[test]
fn test_cursor_follows_agent_across_reorder() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(true);
    state.recompute(&agents);
    state.select_next();
    assert_eq!(state.cursor_id(), Some("a2"));

    let reordered = vec![agents[2].clone(), agents[0].clone(), agents[1].clone()];
    state.recompute(&reordered);
    assert_eq!(state.cursor_id(), Some("a2"));
    assert_eq!(state.cursor_index(), Some(2));
}

#[test]
fn test_cursor_clamps_when_agent_is_filtered_out() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(true);
    state.recompute(&agents);
    state.handle_key(key(KeyCode::End), &agents);
    assert_eq!(state.cursor_id(), Some("a3"));

    // Hide a2 and a3 vanishes from the service: cursor lands on the last row.
    let remaining = vec![agents[0].clone(), agents[1].clone()];
    state.set_show_all(false, &remaining);
    assert_eq!(row_ids(&state), vec!["a1"]);
    assert_eq!(state.cursor_id(), Some("a1"));
}

#[test]
fn test_cursor_cleared_when_rows_empty() {
    let mut state = DashboardState::new(false);
    state.recompute(&mixed_agents());
    state.recompute(&[]);
    assert_eq!(state.cursor_id(), None);
    assert!(state.cursor_agent().is_none());
}

// --- key handling tests ---

#[test]
fn test_enter_selects_agent_from_filtered_rows() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(false);
    state.recompute(&agents);
    state.handle_key(key(KeyCode::Char('j')), &agents);

    // Second filtered row is a3, not the second backing agent a2.
    let selected = state.handle_key(key(KeyCode::Enter), &agents);
    assert_eq!(selected.as_deref(), Some("a3"));
}

#[test]
fn test_enter_on_empty_table_selects_nothing() {
    let mut state = DashboardState::new(false);
    assert_eq!(state.handle_key(key(KeyCode::Enter), &[]), None);
}

#[test]
fn test_movement_keys_return_no_selection() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(false);
    state.recompute(&agents);
    for code in [KeyCode::Down, KeyCode::Up, KeyCode::Home, KeyCode::End] {
        assert_eq!(state.handle_key(key(code), &agents), None);
    }
}

#[test]
fn test_t_key_toggles_filter() {
    let agents = mixed_agents();
    let mut state = DashboardState::new(false);
    state.recompute(&agents);
    state.handle_key(key(KeyCode::Char('t')), &agents);
    assert!(state.show_all());
    assert_eq!(state.rows().len(), 3);
}
