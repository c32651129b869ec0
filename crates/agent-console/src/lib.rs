//! Background agent console library
//!
//! Terminal tooling for Cursor background agents: an interactive console
//! (`bac` with no subcommand) plus the configuration and logging layers shared
//! with the one-shot commands.
//!
//! The interactive console is an event-driven state machine. Key presses,
//! timer ticks and remote-call results all arrive on one queue and are applied
//! by [`tui::app::App::update`], which returns the remote work to start next.
//! Remote calls run on blocking workers via [`tui::dispatch::Dispatcher`] and
//! report back through the same queue, so application state is only touched
//! by the loop.

/// Configuration loading, defaults and path resolution.
pub mod config;

/// Text helpers shared by commands and views.
pub mod format;

/// `tracing` subscriber setup.
pub mod logging;

/// Interactive terminal console.
pub mod tui;
