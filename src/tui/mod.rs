//! Terminal User Interface for the charming dashboard.
//!
//! Renders the dashboard state with ratatui, maps terminal input to
//! dashboard events and drives the poll loop.

mod app;
mod event;
mod input;
mod render;
mod style;
mod viewport;
mod widgets;

pub use app::App;
pub use input::map_key;
pub use viewport::Viewport;
