//! Saved servers table with last-used times and delete confirmation state.

use std::time::Instant;

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::panel::{relative_time, SavedPanel};
use crate::types::Transport;
use crate::ui::theme::{FOCUS_BORDER, MUTED_FG};
use crate::ui::util::truncate_middle;

pub fn draw_saved(f: &mut ratatui::Frame<'_>, area: Rect, panel: &SavedPanel, focused: bool, now: Instant) {
    let entries = panel.entries();
    let title = if entries.is_empty() {
        "Saved Servers".to_string()
    } else {
        format!("Saved Servers ({})  Enter: monitor  d: delete  r: reload", entries.len())
    };
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block = block.border_style(Style::default().fg(FOCUS_BORDER));
    }

    if entries.is_empty() {
        let p = Paragraph::new(
            "No saved servers yet. Connect to a server using the form above, and it will be saved automatically.",
        )
        .style(Style::default().fg(MUTED_FG))
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let wall = Utc::now();
    let server_w = area.width.saturating_sub(50).max(8) as usize;
    let rows: Vec<Row> = entries
        .iter()
        .map(|p| {
            let armed = panel.confirm_state().is_armed_for(&p.id, now);
            let action = if armed { "Confirm?" } else { "" };
            let auth_color = if p.transport == Transport::Ntlm { Color::Blue } else { Color::Yellow };
            Row::new(vec![
                Cell::from(truncate_middle(&p.server, server_w)),
                Cell::from(p.username.clone()),
                Cell::from(p.port.to_string()),
                Cell::from(p.transport.as_str().to_ascii_uppercase())
                    .style(Style::default().fg(auth_color)),
                Cell::from(relative_time(p.last_used, wall)),
                Cell::from(action)
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Server", "Username", "Port", "Auth", "Last Used", ""])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Min(8),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(13),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if focused {
        state.select(Some(panel.selected()));
    }
    f.render_stateful_widget(table, area, &mut state);
}
