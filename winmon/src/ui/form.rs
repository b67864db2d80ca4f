//! Connection form: one line per field, inline validation messages.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::form::{Field, ServerForm};
use crate::ui::theme::{ERROR_FG, FOCUS_BORDER, MUTED_FG};
use crate::ui::util::mask;

pub fn draw_form(f: &mut ratatui::Frame<'_>, area: Rect, form: &ServerForm, focused: bool, busy: bool) {
    let title = if busy {
        "Connect to Windows Server - connecting..."
    } else {
        "Connect to Windows Server (Enter to monitor)"
    };
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block = block.border_style(Style::default().fg(FOCUS_BORDER));
    }

    let lines: Vec<Line> = Field::ORDER
        .iter()
        .map(|&field| {
            let active = focused && form.focus == field;
            let value = match field {
                Field::Password => mask(&form.password),
                Field::Transport => format!("< {} >", form.transport.as_str().to_ascii_uppercase()),
                _ => form.value(field).to_string(),
            };
            let marker = if active { "> " } else { "  " };
            let mut label_style = Style::default();
            if active {
                label_style = label_style.add_modifier(Modifier::BOLD);
            }
            let value_style = if busy { Style::default().fg(MUTED_FG) } else { Style::default() };
            let mut spans = vec![
                Span::styled(format!("{marker}{:<21}", field.label()), label_style),
                Span::styled(value, value_style),
            ];
            if active && !busy && field != Field::Transport {
                spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
            }
            if let Some(err) = form.errors.get(field) {
                spans.push(Span::styled(format!("  {err}"), Style::default().fg(ERROR_FG)));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
