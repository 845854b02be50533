//! Terminal implementation of the sidebar drag pointer override.
//!
//! Engaging switches the mouse pointer to a horizontal-resize shape with the
//! OSC 22 sequence (xterm, kitty, foot and WezTerm honor it; other terminals
//! ignore it). The shape is written only on state changes.

use crate::panel::PointerOverride;
use crossterm::{execute, style::Print};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

const RESIZE_SHAPE: &str = "\x1b]22;ew-resize\x1b\\";
const DEFAULT_SHAPE: &str = "\x1b]22;\x1b\\";

/// Reset the pointer shape without touching any override state. Used by the
/// panic hook, which runs before the drag guard is dropped.
pub(super) fn reset_shape() {
    TerminalPointer::write_shape(DEFAULT_SHAPE);
}

#[derive(Debug, Default)]
pub struct TerminalPointer {
    engaged: AtomicBool,
}

impl TerminalPointer {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_shape(shape: &str) {
        if let Err(e) = execute!(io::stdout(), Print(shape)) {
            tracing::debug!(error = %e, "Failed to set pointer shape");
        }
    }
}

impl PointerOverride for TerminalPointer {
    fn engage(&self) {
        if !self.engaged.swap(true, Ordering::SeqCst) {
            Self::write_shape(RESIZE_SHAPE);
        }
    }

    fn release(&self) {
        if self.engaged.swap(false, Ordering::SeqCst) {
            Self::write_shape(DEFAULT_SHAPE);
        }
    }
}
