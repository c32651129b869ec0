//! The transition function: `(state, event) -> (state', commands)`.
//!
//! Handling order for every event:
//! 1. global key bindings,
//! 2. remote results,
//! 3. ticks (auto-refresh),
//! 4. dashboard selections,
//! 5. everything else goes to the active view.

use super::*;
use crate::tui::command::Operation;
use crate::tui::event::AppMessage;
use crate::tui::views::followup::{FollowupAction, FollowupPhase};
use crate::tui::views::settings::SettingsItem;
use crate::tui::views::{conversation, details};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

impl App {
    /// Applies one event and returns the remote work to start.
    ///
    /// Never performs I/O and never fails: errors arrive as events and end up
    /// in [`App::last_error`].
    pub fn update(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Resize(width, height) => {
                self.terminal_size = (width, height);
                self.clamp_scroll();
                Vec::new()
            }
            Event::Tick(now) => self.on_tick(now),
            Event::Message(message) => self.on_message(message),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if let Some(commands) = self.on_global_key(key) {
            return commands;
        }
        self.on_view_key(key)
    }

    /// Bindings that apply in every view.
    ///
    /// The followup view captures printable characters, so only the
    /// non-printable bindings apply there.
    fn on_global_key(&mut self, key: KeyEvent) -> Option<Vec<Command>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let plain = !ctrl && self.view != View::Followup;
        let commands = match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('q') if plain => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::F(1) => self.enter_view(View::Help),
            KeyCode::Char('?') if plain => self.enter_view(View::Help),
            KeyCode::Esc => self.back(),
            KeyCode::Backspace if plain => self.back(),
            KeyCode::F(5) => self.request_refresh(),
            KeyCode::Char('r') if plain => self.request_refresh(),
            KeyCode::Char('d') if plain => self.enter_view(View::Details),
            KeyCode::Char('c') if plain => self.enter_view(View::Conversation),
            KeyCode::Char('f') if plain => self.enter_view(View::Followup),
            KeyCode::Char('s') if plain => self.enter_view(View::Settings),
            _ => return None,
        };
        Some(commands)
    }

    fn back(&mut self) -> Vec<Command> {
        if self.view != View::Dashboard {
            self.view = View::Dashboard;
        }
        Vec::new()
    }

    fn request_refresh(&mut self) -> Vec<Command> {
        self.pending_lists += 1;
        vec![Command::ListAgents]
    }

    /// Switches view if the target's guard holds. A failed guard is a no-op.
    pub(crate) fn enter_view(&mut self, target: View) -> Vec<Command> {
        match target {
            View::Dashboard | View::Settings | View::Help => {
                self.view = target;
                Vec::new()
            }
            View::Details => {
                let Some(agent_id) = self.selected_id() else {
                    return Vec::new();
                };
                self.view = View::Details;
                self.details_scroll.reset();
                vec![Command::GetAgent { agent_id }]
            }
            View::Conversation => {
                let Some(agent_id) = self.selected_id() else {
                    return Vec::new();
                };
                self.view = View::Conversation;
                self.conversation_scroll.reset();
                vec![Command::FetchConversation { agent_id }]
            }
            View::Followup => {
                let running = self
                    .selected_agent
                    .as_ref()
                    .is_some_and(|agent| agent.status.accepts_followup());
                if running {
                    self.view = View::Followup;
                    self.followup.on_enter();
                }
                Vec::new()
            }
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_agent.as_ref().map(|agent| agent.id.clone())
    }

    fn on_tick(&mut self, now: Instant) -> Vec<Command> {
        self.clock = Some(now);
        if !self.refresh_due(now) {
            return Vec::new();
        }
        debug!("auto-refresh due");
        self.last_auto_request = Some(now);
        self.request_refresh()
    }

    /// Auto-refresh fires once the interval has passed since the later of the
    /// last successful refresh and the last automatic request.
    pub(crate) fn refresh_due(&self, now: Instant) -> bool {
        if !self.auto_refresh {
            return false;
        }
        let reference = match (self.last_refresh, self.last_auto_request) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        match reference {
            Some(at) => now.saturating_duration_since(at) > self.refresh_interval,
            None => true,
        }
    }

    fn on_message(&mut self, message: AppMessage) -> Vec<Command> {
        match message {
            AppMessage::AgentsFetched(agents) => {
                debug!(count = agents.len(), "agents fetched");
                self.pending_lists = self.pending_lists.saturating_sub(1);
                self.agents = agents;
                self.last_error = None;
                self.loaded = true;
                // Stamped with the latest tick so refresh timing uses one clock.
                self.last_refresh = self.clock;
                self.dashboard.recompute(&self.agents);
                // A vanished agent stays selected with its last known data.
                let fresh = self
                    .selected_agent
                    .as_ref()
                    .and_then(|selected| self.agents.iter().find(|a| a.id == selected.id))
                    .cloned();
                if fresh.is_some() {
                    self.selected_agent = fresh;
                }
                self.clamp_scroll();
                Vec::new()
            }
            AppMessage::AgentFetched(agent) => {
                if self.selected_id().as_deref() != Some(agent.id.as_str()) {
                    debug!(agent_id = %agent.id, "dropping result for unselected agent");
                    return Vec::new();
                }
                if let Some(slot) = self.agents.iter_mut().find(|a| a.id == agent.id) {
                    *slot = agent.clone();
                    self.dashboard.recompute(&self.agents);
                }
                self.selected_agent = Some(agent);
                self.clamp_scroll();
                Vec::new()
            }
            AppMessage::ConversationFetched {
                agent_id,
                conversation,
            } => {
                if self.selected_id().as_deref() != Some(agent_id.as_str()) {
                    debug!(%agent_id, "dropping conversation for unselected agent");
                    return Vec::new();
                }
                self.conversation = Some(conversation);
                self.clamp_scroll();
                Vec::new()
            }
            AppMessage::FollowupSent { agent_id, ack } => {
                if self.followup.sent(ack.id) {
                    debug!(%agent_id, "follow-up accepted");
                    self.last_error = None;
                } else {
                    debug!(%agent_id, "ignoring follow-up ack outside of a send");
                }
                Vec::new()
            }
            AppMessage::OperationFailed { origin, message } => {
                warn!(%origin, "{}", message);
                match origin {
                    Operation::ListAgents => {
                        self.pending_lists = self.pending_lists.saturating_sub(1);
                    }
                    Operation::SendFollowup => {
                        self.followup.fail(message.clone());
                    }
                    Operation::GetAgent | Operation::GetConversation => {}
                }
                self.last_error = Some(message);
                Vec::new()
            }
            AppMessage::AgentSelected(agent_id) => self.select_agent(&agent_id),
        }
    }

    /// Makes `agent_id` the selection and opens its details.
    fn select_agent(&mut self, agent_id: &str) -> Vec<Command> {
        let Some(agent) = self.agents.iter().find(|a| a.id == agent_id).cloned() else {
            debug!(%agent_id, "selected agent is not in the current list");
            return Vec::new();
        };
        if self.selected_id().as_deref() != Some(agent_id) {
            self.conversation = None;
            self.conversation_scroll.reset();
            if self.followup.phase() != &FollowupPhase::Sending {
                self.followup.reset();
            }
        }
        self.selected_agent = Some(agent);
        self.enter_view(View::Details)
    }

    fn on_view_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match self.view {
            View::Dashboard => match self.dashboard.handle_key(key, &self.agents) {
                Some(agent_id) => self.on_message(AppMessage::AgentSelected(agent_id)),
                None => Vec::new(),
            },
            View::Details => {
                let (len, viewport) = self.details_extent();
                self.details_scroll.handle_key(key, len, viewport);
                Vec::new()
            }
            View::Conversation => {
                let (len, viewport) = self.conversation_extent();
                self.conversation_scroll.handle_key(key, len, viewport);
                Vec::new()
            }
            View::Followup => self.on_followup_key(key),
            View::Settings => {
                match self.settings.handle_key(key) {
                    Some(SettingsItem::AutoRefresh) => self.auto_refresh = !self.auto_refresh,
                    Some(SettingsItem::ShowExpired) => self.dashboard.toggle_filter(&self.agents),
                    Some(SettingsItem::RefreshInterval | SettingsItem::ApiKey) | None => {}
                }
                Vec::new()
            }
            View::Help => Vec::new(),
        }
    }

    fn on_followup_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match self.followup.handle_key(key) {
            FollowupAction::None => Vec::new(),
            FollowupAction::EmptyInput => {
                self.last_error = Some(format!(
                    "Failed to {}: message is empty",
                    Operation::SendFollowup
                ));
                Vec::new()
            }
            FollowupAction::Submit(text) => match self.selected_id() {
                Some(agent_id) => vec![Command::SendFollowup { agent_id, text }],
                None => {
                    let message = format!("Failed to {}: no agent selected", Operation::SendFollowup);
                    self.followup.fail(message.clone());
                    self.last_error = Some(message);
                    Vec::new()
                }
            },
        }
    }

    /// Content length and viewport height of the details panel.
    pub(crate) fn details_extent(&self) -> (usize, usize) {
        let (width, height) = ui::body_viewport(self.terminal_size);
        let len = self
            .selected_agent
            .as_ref()
            .map_or(0, |agent| details::content(agent, width).len());
        (len, height)
    }

    /// Content length and viewport height of the transcript.
    pub(crate) fn conversation_extent(&self) -> (usize, usize) {
        let (width, height) = ui::body_viewport(self.terminal_size);
        let len = self
            .conversation
            .as_ref()
            .map_or(0, |c| conversation::content(c, width).len());
        (len, height)
    }

    fn clamp_scroll(&mut self) {
        let (len, viewport) = self.details_extent();
        self.details_scroll.clamp(len, viewport);
        let (len, viewport) = self.conversation_extent();
        self.conversation_scroll.clamp(len, viewport);
    }
}
