//! Interactive console for background agents.
//!
//! Built on ratatui and crossterm. Every input, timer tick and remote result
//! is an [`event::Event`] applied by [`app::App::update`]; remote work is
//! returned as [`command::Command`]s and executed by [`dispatch::Dispatcher`].

pub mod app;
pub mod command;
pub mod dispatch;
pub mod event;
pub mod theme;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
