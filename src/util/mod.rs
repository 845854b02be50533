//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width calculation, truncation and
//!   control-character stripping for catalog text drawn to the terminal
//! - **Video references**: validation before handing a reference to the
//!   system opener

mod reference;
mod text;

pub use reference::{validate_video_ref, ReferenceError};
pub use text::{display_width, strip_control_chars, truncate_to_width};
