pub(crate) use super::*;
pub(crate) use crate::tui::command::Operation;
pub(crate) use crate::tui::event::AppMessage;
pub(crate) use crate::tui::test_utils::{make_agent, make_conversation};
pub(crate) use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
pub(crate) use cursor_agents::{AgentStatus, FollowupAck, MessageKind};


pub(crate) fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub(crate) fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

pub(crate) fn msg(message: AppMessage) -> Event {
    Event::Message(message)
}

/// App with `a1` Running, `a2` Expired, `a3` Completed already fetched.
pub(crate) fn make_app_with_agents() -> App {
    let mut app = App::default();
    app.update(msg(AppMessage::AgentsFetched(vec![
        make_agent("a1", AgentStatus::Running),
        make_agent("a2", AgentStatus::Expired),
        make_agent("a3", AgentStatus::Completed),
    ])));
    app
}

/// Same as [`make_app_with_agents`] with `id` selected (view becomes Details).
pub(crate) fn make_app_with_selection(id: &str) -> App {
    let mut app = make_app_with_agents();
    app.update(msg(AppMessage::AgentSelected(id.to_string())));
    app
}

pub(crate) fn dashboard_ids(app: &App) -> Vec<String> {
    app.dashboard
        .rows()
        .iter()
        .map(|agent| agent.id.clone())
        .collect()
}
