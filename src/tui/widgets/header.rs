//! Header banner.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;

use crate::tui::style::Styles;
use crate::view::BANNER;

/// Renders the banner centered across the full width.
pub fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(BANNER)
        .style(Styles::header())
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}
