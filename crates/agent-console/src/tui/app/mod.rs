//! Application state and main event loop for the TUI.
//!
//! [`App`] is the root of all console state. It is mutated only by
//! [`App::update`], which runs on the loop task. Terminal setup, teardown and
//! the panic hook live here too.

mod update;

use crate::tui::command::Command;
use crate::tui::dispatch::Dispatcher;
use crate::tui::event::{Event, EventHandler};
use crate::tui::theme::Theme;
use crate::tui::ui;
use crate::tui::views::dashboard::DashboardState;
use crate::tui::views::followup::FollowupState;
use crate::tui::views::scroll::ScrollState;
use crate::tui::views::settings::SettingsState;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use cursor_agents::{Agent, AgentApi, Conversation};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-refresh period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Default ticker period.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_secs(1);

/// Active view. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Agent table.
    Dashboard,
    /// Selected agent's details.
    Details,
    /// Selected agent's transcript.
    Conversation,
    /// Follow-up form for the selected agent.
    Followup,
    /// Runtime settings.
    Settings,
    /// Keymap.
    Help,
}

impl View {
    /// Name shown in the header.
    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Details => "Details",
            View::Conversation => "Conversation",
            View::Followup => "Follow-up",
            View::Settings => "Settings",
            View::Help => "Help",
        }
    }
}

/// Startup options taken from config.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Whether the ticker triggers list refreshes.
    pub auto_refresh: bool,
    /// Minimum time between automatic refreshes.
    pub refresh_interval: Duration,
    /// Initial dashboard filter.
    pub show_expired: bool,
    /// Masked API key for the settings view.
    pub api_key_hint: String,
    /// Config file location for the settings view.
    pub config_path: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            show_expired: false,
            api_key_hint: "(not set)".to_string(),
            config_path: String::new(),
        }
    }
}

/// Knobs for the event loop and the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Ticker period.
    pub tick_rate: Duration,
    /// Upper bound for each remote call.
    pub timeout: Duration,
    /// Page size for list calls.
    pub page_size: u32,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            timeout: crate::tui::dispatch::DEFAULT_TIMEOUT,
            page_size: 100,
        }
    }
}

/// Core application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Current active view.
    pub view: View,
    /// Last known terminal size (width, height).
    pub terminal_size: (u16, u16),
    /// Agents from the most recent successful list call.
    pub agents: Vec<Agent>,
    /// Agent chosen on the dashboard.
    pub selected_agent: Option<Agent>,
    /// Transcript of the selected agent, once fetched.
    pub conversation: Option<Conversation>,
    /// Most recent failure, cleared by a successful list call.
    pub last_error: Option<String>,
    /// Tick time at which the last successful list call was applied.
    pub last_refresh: Option<Instant>,
    /// Whether any list call has succeeded.
    loaded: bool,
    /// When the ticker last requested a refresh.
    last_auto_request: Option<Instant>,
    /// Time carried by the latest tick.
    clock: Option<Instant>,
    /// List calls issued but not yet answered.
    pending_lists: usize,
    /// Whether ticks trigger list refreshes.
    pub auto_refresh: bool,
    /// Minimum time between automatic refreshes.
    pub refresh_interval: Duration,
    /// Dashboard sub-state.
    pub dashboard: DashboardState,
    /// Details scroll position.
    pub details_scroll: ScrollState,
    /// Conversation scroll position.
    pub conversation_scroll: ScrollState,
    /// Follow-up input and send lifecycle.
    pub followup: FollowupState,
    /// Settings cursor.
    pub settings: SettingsState,
    api_key_hint: String,
    config_path: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl App {
    /// Creates the initial state: dashboard view, nothing fetched.
    pub fn new(settings: AppSettings) -> Self {
        Self {
            should_quit: false,
            view: View::Dashboard,
            terminal_size: (80, 24),
            agents: Vec::new(),
            selected_agent: None,
            conversation: None,
            last_error: None,
            last_refresh: None,
            loaded: false,
            last_auto_request: None,
            clock: None,
            pending_lists: 0,
            auto_refresh: settings.auto_refresh,
            refresh_interval: settings.refresh_interval,
            dashboard: DashboardState::new(settings.show_expired),
            details_scroll: ScrollState::default(),
            conversation_scroll: ScrollState::default(),
            followup: FollowupState::default(),
            settings: SettingsState::default(),
            api_key_hint: settings.api_key_hint,
            config_path: settings.config_path,
        }
    }

    /// Commands to run before the first event: the initial agent list.
    pub fn startup_commands(&mut self, now: Instant) -> Vec<Command> {
        self.last_auto_request = Some(now);
        self.clock = Some(now);
        self.pending_lists += 1;
        vec![Command::ListAgents]
    }

    /// `true` while at least one list call is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.pending_lists > 0
    }

    /// `true` once any list call has succeeded.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Time since the last successful refresh, as of the latest tick.
    pub fn since_refresh(&self) -> Option<Duration> {
        let last = self.last_refresh?;
        let now = self.clock.unwrap_or(last);
        Some(now.saturating_duration_since(last))
    }

    /// Masked API key.
    pub fn api_key_hint(&self) -> &str {
        &self.api_key_hint
    }

    /// Config file location.
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(
        &mut self,
        api: Arc<dyn AgentApi>,
        options: LoopOptions,
        theme: &Theme,
    ) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop(api, options, theme).await;

        restore_terminal()?;
        result
    }

    /// Main event loop: applies events in arrival order and redraws.
    ///
    /// Events already queued are drained before drawing, so a burst of
    /// results costs one frame.
    async fn event_loop(
        &mut self,
        api: Arc<dyn AgentApi>,
        options: LoopOptions,
        theme: &Theme,
    ) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let size = terminal.size()?;
        self.terminal_size = (size.width, size.height);

        let mut events = EventHandler::new(options.tick_rate);
        events.listen_terminal();
        let dispatcher = Dispatcher::new(api, events.sender(), options.timeout, options.page_size);

        for command in self.startup_commands(Instant::now()) {
            dispatcher.dispatch(command);
        }
        terminal.draw(|frame| ui::render(frame, self, theme))?;

        while !self.should_quit {
            let Some(event) = events.next().await else {
                break;
            };
            self.apply(event, &dispatcher);
            while !self.should_quit {
                match events.try_next() {
                    Some(event) => self.apply(event, &dispatcher),
                    None => break,
                }
            }
            if self.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, self, theme))?;
        }

        tracing::debug!("event loop finished");
        Ok(())
    }

    fn apply(&mut self, event: Event, dispatcher: &Dispatcher) {
        for command in self.update(event) {
            dispatcher.dispatch(command);
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests;
