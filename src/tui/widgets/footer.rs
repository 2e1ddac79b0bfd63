//! Footer: last update, scroll position, key help and the latest warning.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::poll::DashboardState;
use crate::tui::style::Styles;
use crate::view::footer_text;

/// Renders the footer into a three line area: padding, status, warning.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    scroll_percent: Option<u16>,
) {
    let [_, status, warning] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .horizontal_margin(1)
    .areas(area);

    let text = Paragraph::new(footer_text(state, scroll_percent)).style(Styles::footer());
    frame.render_widget(text, status);

    if let Some(message) = &state.last_warning {
        let line = Line::styled(format!("⚠ {}", message), Styles::warning());
        frame.render_widget(Paragraph::new(line), warning);
    }
}
