//! CPU usage gauge.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::dashboard::Severity;
use crate::types::MetricsSnapshot;
use crate::ui::theme::severity_color;
use crate::ui::util::ratio;

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&MetricsSnapshot>) {
    let block = Block::default().borders(Borders::ALL).title("CPU Usage");
    let Some(s) = s else {
        f.render_widget(block, area);
        return;
    };
    let pct = s.cpu.percent;
    let g = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(severity_color(Severity::from_percent(pct))))
        .ratio(ratio(pct))
        .label(format!("{pct:.2}%"));
    f.render_widget(g, area);
}
