//! Memory gauge with total / used / free line.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::dashboard::Severity;
use crate::types::MetricsSnapshot;
use crate::ui::theme::severity_color;
use crate::ui::util::{gb, ratio};

pub fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&MetricsSnapshot>) {
    let title = match s {
        Some(s) => format!("Memory Usage ({:.2}%)", s.memory.percent_used),
        None => "Memory Usage".into(),
    };
    f.render_widget(Block::default().borders(Borders::ALL).title(title), area);
    let Some(s) = s else { return; };

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height == 0 { return; }

    let m = &s.memory;
    let g = Gauge::default()
        .gauge_style(Style::default().fg(severity_color(Severity::from_percent(m.percent_used))))
        .ratio(ratio(m.percent_used))
        .label(format!("{} / {}", gb(m.used_gb), gb(m.total_gb)));
    f.render_widget(g, Rect { height: 1, ..inner });

    if inner.height > 1 {
        let line = format!(
            "Total {}   Used {}   Free {}",
            gb(m.total_gb),
            gb(m.used_gb),
            gb(m.free_gb)
        );
        f.render_widget(Paragraph::new(line), Rect { y: inner.y + 1, height: 1, ..inner });
    }
}
