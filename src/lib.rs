//! Terminal documentation and tutorial browser for the One Click plugin.
//!
//! The library exposes the catalog model, sidebar state, persistence and the
//! TUI so integration tests and the binary share one implementation.

pub mod app;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod keybindings;
pub mod modal;
pub mod panel;
pub mod preferences;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
pub mod watched;
