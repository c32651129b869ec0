//! Settings view: runtime toggles and read-only connection info.

use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

/// Rows of the settings list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    /// Toggles automatic agent refresh.
    AutoRefresh,
    /// Shows the refresh interval.
    RefreshInterval,
    /// Toggles the dashboard's expired-agent filter.
    ShowExpired,
    /// Shows the masked API key.
    ApiKey,
}

impl SettingsItem {
    /// All rows.
    pub const ALL: [SettingsItem; 4] = [
        SettingsItem::AutoRefresh,
        SettingsItem::RefreshInterval,
        SettingsItem::ShowExpired,
        SettingsItem::ApiKey,
    ];

    fn label(self) -> &'static str {
        match self {
            SettingsItem::AutoRefresh => "Auto-refresh agents",
            SettingsItem::RefreshInterval => "Refresh interval",
            SettingsItem::ShowExpired => "Show expired agents",
            SettingsItem::ApiKey => "API key",
        }
    }
}

/// Values displayed next to each row.
#[derive(Debug, Clone, Copy)]
pub struct SettingsValues<'a> {
    /// Auto-refresh flag.
    pub auto_refresh: bool,
    /// Auto-refresh period.
    pub refresh_interval: Duration,
    /// Dashboard filter flag.
    pub show_expired: bool,
    /// Masked API key.
    pub api_key: &'a str,
}

impl SettingsValues<'_> {
    fn value(&self, item: SettingsItem) -> String {
        let on_off = |flag: bool| if flag { "Enabled" } else { "Disabled" }.to_string();
        match item {
            SettingsItem::AutoRefresh => on_off(self.auto_refresh),
            SettingsItem::RefreshInterval => {
                humantime::format_duration(self.refresh_interval).to_string()
            }
            SettingsItem::ShowExpired => on_off(self.show_expired),
            SettingsItem::ApiKey => self.api_key.to_string(),
        }
    }
}

/// Local state of the settings view.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsState {
    selected: usize,
}

impl SettingsState {
    /// Row under the cursor.
    pub fn selected(&self) -> SettingsItem {
        SettingsItem::ALL[self.selected.min(SettingsItem::ALL.len() - 1)]
    }

    /// Moves the cursor, or returns the row to toggle on Enter/Space.
    ///
    /// Read-only rows are never returned.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SettingsItem> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(SettingsItem::ALL.len() - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let item = self.selected();
                if matches!(item, SettingsItem::AutoRefresh | SettingsItem::ShowExpired) {
                    return Some(item);
                }
            }
            _ => {}
        }
        None
    }
}

/// Renders the settings list.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &SettingsState,
    values: &SettingsValues<'_>,
    config_path: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Settings ");

    let mut lines = vec![
        Line::from(Span::styled("Configuration", theme.heading_style())),
        Line::default(),
    ];
    for item in SettingsItem::ALL {
        let text = format!("{}: {}", item.label(), values.value(item));
        if item == state.selected() {
            lines.push(Line::from(Span::styled(format!("▶ {}", text), theme.highlight())));
        } else {
            lines.push(Line::from(format!("  {}", text)));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Configuration file: {}", config_path),
        Style::default().fg(theme.muted),
    )));
    lines.push(Line::from(Span::styled(
        "Changes apply to this session only.",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
