//! TUI widgets.

mod footer;
mod header;
mod services;

pub use footer::render_footer;
pub use header::render_header;
pub use services::{render_services, service_lines};
