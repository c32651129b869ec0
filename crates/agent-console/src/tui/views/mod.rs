//! One module per console view.
//!
//! Each view owns its local state and a `render` function. The orchestrator
//! in [`crate::tui::app`] decides which one is active.

pub mod conversation;
pub mod dashboard;
pub mod details;
pub mod followup;
pub mod help;
pub mod scroll;
pub mod settings;
