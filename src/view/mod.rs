//! UI-agnostic view models.
//!
//! The TUI maps these to ratatui widgets for rendering.

mod dashboard;

pub use dashboard::{
    BANNER, BodyLine, HttpClass, KEY_HELP, SPINNER_GLYPHS, ServiceBlock, StatusClass, StatusLine,
    footer_text, format_latency, project, separator_width, skeleton_len, truncate_value,
};
