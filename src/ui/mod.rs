//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `mouse` - Mouse input: sidebar resize drag and click selection
//! - `render` - View rendering dispatch
//! - `sidebar` - Navigation panel widget
//! - `detail` - Topic documentation widget
//! - `tutorials` - Tutorial list widget
//! - `modal` - Video detail overlay
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay
//! - `pointer` - Terminal pointer override used during resize drags

mod detail;
mod help;
mod input;
mod loop_runner;
mod modal;
mod mouse;
mod pointer;
mod render;
mod sidebar;
mod status;
mod tutorials;

// Re-export the public API
pub use loop_runner::{run, Action};
pub use pointer::TerminalPointer;
