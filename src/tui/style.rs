//! Color scheme and styles (soft lavender).

use ratatui::style::{Color, Modifier, Style};

use crate::view::{HttpClass, StatusClass};

/// Lavender palette.
pub struct Theme;

impl Theme {
    // Header and footer
    pub const HEADER_FG: Color = Color::Rgb(0xF8, 0xF6, 0xFC);
    pub const HEADER_BG: Color = Color::Rgb(0x9B, 0x6F, 0xC7);
    pub const FOOTER_FG: Color = Color::Rgb(0xC2, 0xA4, 0xD8);

    // Service blocks
    pub const TITLE: Color = Color::Rgb(0xB9, 0x6E, 0xBE);
    pub const SKELETON: Color = Color::Rgb(0xA8, 0x9B, 0xB2);
    pub const LABEL: Color = Color::Rgb(0x8F, 0x7A, 0xAB);
    pub const VALUE: Color = Color::Rgb(0xED, 0xE7, 0xF6);
    pub const ERROR: Color = Color::Rgb(0xD7, 0x74, 0x9C);
    pub const SEPARATOR: Color = Color::Rgb(0xB3, 0x9D, 0xDB);

    // Status colors (xterm 256)
    pub const OK: Color = Color::Indexed(42);
    pub const WARN: Color = Color::Indexed(214);
    pub const FAIL: Color = Color::Indexed(196);
    pub const DIM: Color = Color::Indexed(240);
    pub const ACCENT: Color = Color::Indexed(33);
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Banner style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer() -> Style {
        Style::default()
            .fg(Theme::FOOTER_FG)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Theme::TITLE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim() -> Style {
        Style::default().fg(Theme::DIM)
    }

    pub fn skeleton() -> Style {
        Style::default()
            .fg(Theme::SKELETON)
            .add_modifier(Modifier::ITALIC)
    }

    /// Field label. Accent blue once real values are shown.
    pub fn label(loaded: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if loaded {
            style.fg(Theme::ACCENT)
        } else {
            style.fg(Theme::LABEL)
        }
    }

    pub fn value() -> Style {
        Style::default().fg(Theme::VALUE)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Theme::ERROR)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn latency() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    pub fn separator() -> Style {
        Style::default().fg(Theme::SEPARATOR)
    }

    /// Warning line in the footer.
    pub fn warning() -> Style {
        Style::default().fg(Theme::WARN)
    }

    /// Status glyph color.
    pub fn status(class: StatusClass) -> Style {
        let color = match class {
            StatusClass::Error => Theme::FAIL,
            StatusClass::Loading { .. } => Theme::WARN,
            StatusClass::Ok => Theme::OK,
            StatusClass::Empty => Theme::DIM,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// HTTP status code color.
    pub fn http(class: HttpClass) -> Style {
        let color = match class {
            HttpClass::Success => Theme::OK,
            HttpClass::Redirect => Theme::WARN,
            HttpClass::Failure => Theme::FAIL,
        };
        Style::default().fg(color)
    }
}
