//! Dashboard view model.
//!
//! Turns a [`DashboardState`] into plain text blocks with style classes.
//! No ratatui types appear here; the TUI maps classes to colors.

use std::fmt::Write;
use std::time::Duration;

use crate::config::GlobalConfig;
use crate::poll::{DashboardState, ServiceState};

/// Header banner text.
pub const BANNER: &str = "/////////////// CHARMING ///////////////";

/// Key help shown in the footer.
pub const KEY_HELP: &str = "Press 'q' to quit, 'r' or space to refresh • ↑↓ to scroll";

/// Braille spinner frames, indexed by `DashboardState::spinner_frame`.
pub const SPINNER_GLYPHS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const MAX_VALUE_CHARS: usize = 50;
const TRUNCATED_CHARS: usize = 47;
const MAX_SEPARATOR: usize = 80;
const PLACEHOLDER_CODE: usize = 12;
const PLACEHOLDER_LATENCY: usize = 8;

/// Overall condition of a service, in display precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Error,
    Loading { frame: usize },
    Ok,
    Empty,
}

impl StatusClass {
    pub fn of(service: &ServiceState, spinner_frame: usize) -> Self {
        if service.error.is_some() {
            StatusClass::Error
        } else if service.loading {
            StatusClass::Loading {
                frame: spinner_frame,
            }
        } else if !service.fields.is_empty() {
            StatusClass::Ok
        } else {
            StatusClass::Empty
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            StatusClass::Error => "✗",
            StatusClass::Loading { frame } => SPINNER_GLYPHS[frame % SPINNER_GLYPHS.len()],
            StatusClass::Ok => "✓",
            StatusClass::Empty => "○",
        }
    }
}

/// Coloring bucket for an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpClass {
    Success,
    Redirect,
    Failure,
}

impl HttpClass {
    pub fn of(code: u16) -> Self {
        match code {
            400.. => HttpClass::Failure,
            300.. => HttpClass::Redirect,
            _ => HttpClass::Success,
        }
    }
}

/// Second line of a service block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Shaded bars shown while a fetch is in flight.
    Placeholder { code: String, latency: String },
    Http {
        code: u16,
        class: HttpClass,
        latency: String,
    },
    /// No response has been seen.
    Blank,
}

/// One line under the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    Error(String),
    Skeleton { label: String, bar: String },
    Field { label: String, value: String },
}

/// Everything shown for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBlock {
    pub status: StatusClass,
    pub title: String,
    pub url: String,
    pub status_line: StatusLine,
    pub body: Vec<BodyLine>,
}

impl ServiceBlock {
    /// Lines this block occupies, separator included.
    pub fn height(&self) -> usize {
        2 + self.body.len() + 1
    }
}

/// Builds one block per configured service, in configuration order.
pub fn project(state: &DashboardState, config: &GlobalConfig) -> Vec<ServiceBlock> {
    config
        .services
        .iter()
        .zip(&state.services)
        .map(|(spec, service)| {
            let status = StatusClass::of(service, state.spinner_frame);

            let status_line = if service.loading {
                StatusLine::Placeholder {
                    code: "▒".repeat(PLACEHOLDER_CODE),
                    latency: "▒".repeat(PLACEHOLDER_LATENCY),
                }
            } else if let Some(code) = service.http_status.filter(|c| *c > 0) {
                StatusLine::Http {
                    code,
                    class: HttpClass::of(code),
                    latency: service.latency.map(format_latency).unwrap_or_default(),
                }
            } else {
                StatusLine::Blank
            };

            let body = if let Some(error) = &service.error {
                vec![BodyLine::Error(error.clone())]
            } else if service.loading {
                spec.selectors
                    .iter()
                    .map(|s| BodyLine::Skeleton {
                        label: format!("{}:", s.name),
                        bar: "▒".repeat(skeleton_len(&s.name)),
                    })
                    .collect()
            } else {
                spec.selectors
                    .iter()
                    .map(|s| BodyLine::Field {
                        label: format!("{}:", s.name),
                        value: truncate_value(service.fields.get(&s.name).unwrap_or("N/A")),
                    })
                    .collect()
            };

            ServiceBlock {
                status,
                title: spec.title.clone(),
                url: spec.url.clone(),
                status_line,
                body,
            }
        })
        .collect()
}

/// Skeleton bar length for a selector, varied by name so bars do not line
/// up into a block.
pub fn skeleton_len(name: &str) -> usize {
    20 + name.len() % 15
}

/// Caps a value at 50 characters, replacing the tail with `...`.
pub fn truncate_value(value: &str) -> String {
    if value.chars().count() > MAX_VALUE_CHARS {
        let mut out: String = value.chars().take(TRUNCATED_CHARS).collect();
        out.push_str("...");
        out
    } else {
        value.to_string()
    }
}

/// Separator width for a terminal `width` columns wide.
pub fn separator_width(width: u16) -> usize {
    usize::from(width.saturating_sub(4)).min(MAX_SEPARATOR)
}

/// Formats a latency rounded to the millisecond: `25ms`, `1.5s`, `1m2.003s`.
pub fn format_latency(latency: Duration) -> String {
    let ms = (latency.as_nanos() + 500_000) / 1_000_000;
    if ms == 0 {
        return "0s".to_string();
    }
    if ms < 1000 {
        return format!("{}ms", ms);
    }

    let hours = ms / 3_600_000;
    let minutes = ms / 60_000 % 60;
    let seconds = ms / 1000 % 60;
    let millis = ms % 1000;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    let _ = write!(out, "{}", seconds);
    if millis > 0 {
        let frac = format!("{:03}", millis);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push('s');
    out
}

/// Footer status text, without the warning.
pub fn footer_text(state: &DashboardState, scroll_percent: Option<u16>) -> String {
    let mut text = match state.last_successful_update {
        Some(at) => format!("Last update: {}", at.format("%H:%M:%S")),
        None => "Loading initial data...".to_string(),
    };
    if let Some(percent) = scroll_percent {
        let _ = write!(text, " • {}%", percent);
    }
    let _ = write!(text, " • {}", KEY_HELP);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Selector, ServiceSpec};
    use crate::service::{FetchError, Fields, Outcome};
    use chrono::{Local, TimeZone};

    fn config() -> GlobalConfig {
        GlobalConfig {
            refresh_interval: None,
            services: vec![ServiceSpec {
                url: "http://api.local/health".to_string(),
                title: "API".to_string(),
                selectors: vec![Selector::new("status", "status"), Selector::new("db", "db")],
                ..ServiceSpec::default()
            }],
        }
    }

    #[test]
    fn test_loading_block() {
        let state = DashboardState::new(1);
        let blocks = project(&state, &config());
        let block = &blocks[0];

        assert_eq!(block.status, StatusClass::Loading { frame: 0 });
        assert_eq!(block.status.glyph(), "⠋");
        assert_eq!(
            block.status_line,
            StatusLine::Placeholder {
                code: "▒".repeat(12),
                latency: "▒".repeat(8)
            }
        );
        assert_eq!(
            block.body,
            vec![
                BodyLine::Skeleton {
                    label: "status:".to_string(),
                    bar: "▒".repeat(26)
                },
                BodyLine::Skeleton {
                    label: "db:".to_string(),
                    bar: "▒".repeat(22)
                },
            ]
        );
        assert_eq!(block.height(), 5);
    }

    #[test]
    fn test_success_block_with_missing_field() {
        let mut state = DashboardState::new(1);
        state.services[0].apply(Outcome::Success {
            fields: [("status", "ok")].into_iter().collect::<Fields>(),
            http_status: 302,
            latency: Duration::from_micros(41_600),
        });

        let block = &project(&state, &config())[0];
        assert_eq!(block.status, StatusClass::Ok);
        assert_eq!(
            block.status_line,
            StatusLine::Http {
                code: 302,
                class: HttpClass::Redirect,
                latency: "42ms".to_string()
            }
        );
        assert_eq!(
            block.body,
            vec![
                BodyLine::Field {
                    label: "status:".to_string(),
                    value: "ok".to_string()
                },
                BodyLine::Field {
                    label: "db:".to_string(),
                    value: "N/A".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_error_takes_precedence() {
        let mut state = DashboardState::new(1);
        state.services[0].apply(Outcome::Failure {
            error: FetchError::Transport("connection refused".to_string()),
            http_status: None,
            latency: Duration::from_millis(2),
        });

        let block = &project(&state, &config())[0];
        assert_eq!(block.status, StatusClass::Error);
        assert_eq!(block.status_line, StatusLine::Blank);
        assert_eq!(
            block.body,
            vec![BodyLine::Error(
                "request failed: connection refused".to_string()
            )]
        );
    }

    #[test]
    fn test_empty_status() {
        let mut state = DashboardState::new(1);
        state.services[0].loading = false;
        assert_eq!(
            StatusClass::of(&state.services[0], 0),
            StatusClass::Empty
        );
    }

    #[test]
    fn test_http_class_boundaries() {
        assert_eq!(HttpClass::of(200), HttpClass::Success);
        assert_eq!(HttpClass::of(299), HttpClass::Success);
        assert_eq!(HttpClass::of(300), HttpClass::Redirect);
        assert_eq!(HttpClass::of(399), HttpClass::Redirect);
        assert_eq!(HttpClass::of(400), HttpClass::Failure);
        assert_eq!(HttpClass::of(503), HttpClass::Failure);
    }

    #[test]
    fn test_truncate_value() {
        let short = "a".repeat(50);
        assert_eq!(truncate_value(&short), short);

        let long = "b".repeat(51);
        let cut = truncate_value(&long);
        assert_eq!(cut.chars().count(), 50);
        assert!(cut.ends_with("..."));

        let wide = "é".repeat(60);
        assert_eq!(truncate_value(&wide), format!("{}...", "é".repeat(47)));
    }

    #[test]
    fn test_separator_width() {
        assert_eq!(separator_width(40), 36);
        assert_eq!(separator_width(200), 80);
        assert_eq!(separator_width(3), 0);
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(Duration::ZERO), "0s");
        assert_eq!(format_latency(Duration::from_micros(400)), "0s");
        assert_eq!(format_latency(Duration::from_micros(1_500)), "2ms");
        assert_eq!(format_latency(Duration::from_millis(999)), "999ms");
        assert_eq!(format_latency(Duration::from_millis(1_500)), "1.5s");
        assert_eq!(format_latency(Duration::from_millis(2_000)), "2s");
        assert_eq!(format_latency(Duration::from_millis(62_003)), "1m2.003s");
        assert_eq!(format_latency(Duration::from_secs(3_600)), "1h0m0s");
    }

    #[test]
    fn test_footer_text() {
        let mut state = DashboardState::new(0);
        assert_eq!(
            footer_text(&state, None),
            format!("Loading initial data... • {}", KEY_HELP)
        );

        state.last_successful_update = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).single();
        assert_eq!(
            footer_text(&state, Some(42)),
            format!("Last update: 09:05:07 • 42% • {}", KEY_HELP)
        );
    }
}
