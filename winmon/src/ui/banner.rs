//! Single dismissible status line for connection errors and successes.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::Banner;
use crate::ui::theme::{ERROR_FG, MUTED_FG, SUCCESS_FG};

pub fn draw_banner(f: &mut ratatui::Frame<'_>, area: Rect, banner: &Banner) {
    let (prefix, msg, color) = match banner {
        Banner::Error(m) => ("Connection Error: ", m, ERROR_FG),
        Banner::Success(m) => ("", m, SUCCESS_FG),
    };
    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(msg.as_str(), Style::default().fg(color)),
        Span::styled("  (Esc to dismiss)", Style::default().fg(MUTED_FG)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
