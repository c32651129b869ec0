//! Vertical scroll offset shared by the read-only panels.

use crossterm::event::{KeyCode, KeyEvent};

/// Scroll position of a panel, always within `[0, content_len - viewport]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
}

impl ScrollState {
    /// First visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Jumps back to the top.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Largest valid offset for the given content and viewport height.
    pub fn max_offset(content_len: usize, viewport: usize) -> usize {
        content_len.saturating_sub(viewport)
    }

    /// Re-applies the bounds after content or viewport changed.
    pub fn clamp(&mut self, content_len: usize, viewport: usize) {
        self.offset = self.offset.min(Self::max_offset(content_len, viewport));
    }

    /// Applies a navigation key. Returns `true` if the key was a scroll key.
    pub fn handle_key(&mut self, key: KeyEvent, content_len: usize, viewport: usize) -> bool {
        let max = Self::max_offset(content_len, viewport);
        let page = viewport.max(1);
        self.offset = match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.offset.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.offset.saturating_sub(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.offset.saturating_add(page),
            KeyCode::PageUp => self.offset.saturating_sub(page),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => max,
            _ => return false,
        }
        .min(max);
        true
    }
}
