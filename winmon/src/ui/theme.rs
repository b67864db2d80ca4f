//! Shared UI theme constants.

use ratatui::style::Color;

use crate::dashboard::Severity;

pub const FOCUS_BORDER: Color = Color::Cyan;
pub const ERROR_FG: Color = Color::Red;
pub const SUCCESS_FG: Color = Color::Green;
pub const MUTED_FG: Color = Color::Rgb(170, 170, 180);

pub fn severity_color(s: Severity) -> Color {
    match s {
        Severity::Normal => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}
