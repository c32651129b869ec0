pub(crate) use super::*;
pub(crate) use crate::tui::test_utils::make_agent;
pub(crate) use cursor_agents::AgentStatus;

mod rendering;
mod unit;

/// `a1` Running, `a2` Expired, `a3` Completed.
pub(crate) fn mixed_agents() -> Vec<Agent> {
    vec![
        make_agent("a1", AgentStatus::Running),
        make_agent("a2", AgentStatus::Expired),
        make_agent("a3", AgentStatus::Completed),
    ]
}

pub(crate) fn row_ids(state: &DashboardState) -> Vec<&str> {
    state.rows().iter().map(|agent| agent.id.as_str()).collect()
}
