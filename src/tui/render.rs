//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;

use crate::config::GlobalConfig;
use crate::poll::{self, DashboardState};
use crate::view::project;

use super::viewport::Viewport;
use super::widgets::{render_footer, render_header, render_services, service_lines};

/// Main render function. Updates the viewport to the rendered content.
pub fn render(
    frame: &mut Frame,
    state: &DashboardState,
    config: &GlobalConfig,
    layout: Option<poll::Layout>,
    viewport: &mut Viewport,
) {
    let area = frame.area();

    let Some(layout) = layout else {
        frame.render_widget(Paragraph::new("Loading..."), area);
        return;
    };

    // Margin, header, margin, services, footer (padding + status + warning)
    let [_, header, _, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    let blocks = project(state, config);
    let lines = service_lines(&blocks, layout.width);
    viewport.resize(usize::from(layout.viewport_height()), lines.len());

    render_header(frame, header);
    render_services(frame, body, lines, viewport.offset());
    render_footer(frame, footer, state, viewport.percent());
}
