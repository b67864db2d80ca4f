//! Top header with backend address and request status.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::app::App;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let status = if app.loading() {
        "fetching metrics...".to_string()
    } else if let Some(r) = &app.report {
        format!("monitoring: {}", r.server)
    } else {
        "idle".to_string()
    };
    let title = format!(
        "winmon | backend: {} | {}  (Tab: switch panel, Esc: quit)",
        app.endpoint(),
        status
    );
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
