//! Main rendering orchestration for the console.
//!
//! Provides the top-level [`render`] function that composes the header, the
//! active view, the status line and the footer. Rendering reads state only.

use crate::format::display_width;
use crate::tui::app::{App, View};
use crate::tui::theme::Theme;
use crate::tui::views::{conversation, dashboard, details, followup, help, settings};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Header text displayed at the top of every view.
const HEADER_TEXT: &str = "Background Agent Console";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Rows taken by header, status line and footer.
const CHROME_ROWS: u16 = 3;

/// Inner (width, height) of the body panel for a terminal of `size`.
///
/// The body is bordered on all sides.
pub fn body_viewport(size: (u16, u16)) -> (usize, usize) {
    let (width, height) = size;
    (
        width.saturating_sub(2) as usize,
        height.saturating_sub(CHROME_ROWS + 2) as usize,
    )
}

/// Key hints for the footer of each view.
pub fn footer_text(view: View) -> &'static str {
    match view {
        View::Dashboard => {
            "[j/k] Move  [Enter] Open  [t] Filter  [c] Chat  [f] Follow-up  [r] Refresh  [?] Help  [q] Quit"
        }
        View::Details => "[j/k] Scroll  [c] Conversation  [f] Follow-up  [Esc] Back  [q] Quit",
        View::Conversation => "[j/k] Scroll  [PgUp/PgDn] Page  [d] Details  [Esc] Back  [q] Quit",
        View::Followup => "[Esc] Back  [F1] Help  [F5] Refresh  [Ctrl+C] Quit",
        View::Settings => "[j/k] Move  [Enter/Space] Toggle  [Esc] Back  [q] Quit",
        View::Help => "[Esc] Back  [q] Quit",
    }
}

/// Renders the whole console for the current state.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // active view
            Constraint::Length(1), // status line
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app, theme);
    render_body(frame, chunks[1], app, theme);
    frame.render_widget(Paragraph::new(status_line(app, theme)), chunks[2]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            footer_text(app.view),
            Style::default().fg(theme.muted),
        )),
        chunks[3],
    );
}

/// Title and view name (left), version (right-aligned).
fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title = format!("{} · {}", HEADER_TEXT, app.view.title());
    let padding_len = (area.width as usize)
        .saturating_sub(display_width(&title))
        .saturating_sub(VERSION_TEXT.len());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(VERSION_TEXT, Style::default().fg(theme.muted)),
    ]));
    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let selected = app.selected_agent.as_ref();
    match app.view {
        View::Dashboard => dashboard::render(frame, area, &app.dashboard, app.has_loaded(), theme),
        View::Details => details::render(frame, area, selected, app.details_scroll, theme),
        View::Conversation => conversation::render(
            frame,
            area,
            selected,
            app.conversation.as_ref(),
            app.conversation_scroll,
            theme,
        ),
        View::Followup => followup::render(frame, area, selected, &app.followup, theme),
        View::Settings => {
            let values = settings::SettingsValues {
                auto_refresh: app.auto_refresh,
                refresh_interval: app.refresh_interval,
                show_expired: app.dashboard.show_all(),
                api_key: app.api_key_hint(),
            };
            settings::render(frame, area, &app.settings, &values, app.config_path(), theme)
        }
        View::Help => help::render(frame, area, app.refresh_interval, theme),
    }
}

/// Error if any, otherwise refresh state.
pub(crate) fn status_line(app: &App, theme: &Theme) -> Line<'static> {
    if let Some(error) = &app.last_error {
        return Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(theme.error),
        ));
    }

    let mut spans = Vec::new();
    if app.is_refreshing() {
        spans.push(Span::styled(
            "Refreshing... ",
            Style::default().fg(theme.pending),
        ));
    }
    if let Some(elapsed) = app.since_refresh() {
        spans.push(Span::styled(
            format!("Updated {}s ago", elapsed.as_secs()),
            Style::default().fg(theme.muted),
        ));
    }
    let auto = if app.auto_refresh {
        format!(
            " · auto-refresh every {}",
            humantime::format_duration(app.refresh_interval)
        )
    } else {
        " · auto-refresh off".to_string()
    };
    spans.push(Span::styled(auto, Style::default().fg(theme.muted)));
    Line::from(spans)
}
