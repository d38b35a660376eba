use crate::form::FormField;
use crate::{App, InputMode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the "add new item" form
pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Adding;
    let form = &app.form;

    let border_style = if is_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut lines = Vec::new();

    for field in FormField::ALL {
        let focused = is_active && form.focus == field;

        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = form.value(field);
        let value_span = if field != FormField::Downloaded && value.is_empty() && !focused {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else if focused && field != FormField::Downloaded {
            Span::styled(format!("{}█", value), Style::default().fg(Color::Cyan))
        } else {
            Span::raw(value)
        };

        lines.push(Line::from(Span::styled(
            if field == FormField::Name {
                format!("{} *", field.label())
            } else {
                field.label().to_string()
            },
            label_style,
        )));
        lines.push(Line::from(vec![Span::raw("  "), value_span]));
    }

    lines.push(Line::from(""));
    if let Some(notice) = form.notice {
        lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::Red))));
    }
    lines.push(Line::from(Span::styled(
        if is_active {
            "TAB: next field | SPACE: toggle | ENTER: add | ESC: close"
        } else {
            "Press 'a' to add an item"
        },
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Add New Item ")
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
