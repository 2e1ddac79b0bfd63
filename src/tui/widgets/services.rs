//! Scrollable list of service blocks.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::style::Styles;
use crate::view::{BodyLine, ServiceBlock, StatusLine, separator_width};

/// Flattens blocks into styled lines. `width` is the terminal width.
pub fn service_lines(blocks: &[ServiceBlock], width: u16) -> Vec<Line<'static>> {
    let separator = "─".repeat(separator_width(width));
    let mut lines = Vec::with_capacity(blocks.iter().map(ServiceBlock::height).sum());

    for block in blocks {
        lines.push(Line::from(vec![
            Span::styled(block.status.glyph(), Styles::status(block.status)),
            Span::raw(" "),
            Span::styled(block.title.clone(), Styles::title()),
            Span::raw(" "),
            Span::styled(block.url.clone(), Styles::dim()),
        ]));

        lines.push(match &block.status_line {
            StatusLine::Placeholder { code, latency } => {
                Line::styled(format!("  {} • {}", code, latency), Styles::dim())
            }
            StatusLine::Http {
                code,
                class,
                latency,
            } => Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("HTTP {}", code), Styles::http(*class)),
                Span::styled(" • ", Styles::dim()),
                Span::styled(latency.clone(), Styles::latency()),
            ]),
            StatusLine::Blank => Line::default(),
        });

        for body in &block.body {
            lines.push(match body {
                BodyLine::Error(message) => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("⚠ {}", message), Styles::error()),
                ]),
                BodyLine::Skeleton { label, bar } => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(label.clone(), Styles::label(false)),
                    Span::raw(" "),
                    Span::styled(bar.clone(), Styles::skeleton()),
                ]),
                BodyLine::Field { label, value } => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(label.clone(), Styles::label(true)),
                    Span::raw(" "),
                    Span::styled(value.clone(), Styles::value()),
                ]),
            });
        }

        lines.push(Line::styled(separator.clone(), Styles::separator()));
    }
    lines
}

/// Renders `lines` starting at `offset`.
pub fn render_services(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>, offset: usize) {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}
