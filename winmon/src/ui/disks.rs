//! Disk cards with per-drive gauge and title line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::dashboard::Severity;
use crate::types::MetricsSnapshot;
use crate::ui::theme::{severity_color, MUTED_FG};
use crate::ui::util::{gb, ratio, truncate_middle};

pub fn draw_disks(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&MetricsSnapshot>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Disk Space"), area);
    let Some(s) = s else { return; };

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height == 0 { return; }

    if s.disk.is_empty() {
        let p = Paragraph::new("No disk information available").style(Style::default().fg(MUTED_FG));
        f.render_widget(p, inner);
        return;
    }
    if inner.height < 3 { return; }

    let per_disk_h = 3u16;
    let max_cards = (inner.height / per_disk_h).min(s.disk.len() as u16) as usize;

    let constraints: Vec<Constraint> = (0..max_cards).map(|_| Constraint::Length(per_disk_h)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (d, slot) in s.disk.iter().zip(rows.iter()) {
        let color = severity_color(Severity::from_percent(d.percent_used));

        let title = format!(
            "{}   {} used / {}  ({} free, {:.2}%)",
            truncate_middle(&d.name, (slot.width.saturating_sub(6)) as usize / 3),
            gb(d.used_gb),
            gb(d.total_gb),
            gb(d.free_gb),
            d.percent_used
        );

        let card = Block::default().borders(Borders::ALL).title(title);
        f.render_widget(card, *slot);

        let inner_card = Rect {
            x: slot.x + 1,
            y: slot.y + 1,
            width: slot.width.saturating_sub(2),
            height: slot.height.saturating_sub(2),
        };
        if inner_card.height == 0 { continue; }

        let g = Gauge::default()
            .ratio(ratio(d.percent_used))
            .label(format!("{:.1}%", d.percent_used))
            .gauge_style(Style::default().fg(color));

        f.render_widget(g, Rect { height: 1, ..inner_card });
    }
}
