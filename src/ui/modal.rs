//! Modal overlays: forms, delete confirmation, error popup

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered, Theme};
use crate::form::{Form, TextField};
use crate::views::admin::PendingDelete;
use crate::views::{ApplyForm, CastingEditor};

pub fn render_apply(frame: &mut Frame, area: Rect, apply: &ApplyForm) {
    let mut footer = Vec::new();
    if let Some(ref err) = apply.error {
        footer.push(Line::from(Span::styled(format!("✗ {}", err), Theme::error())));
    }
    footer.push(if apply.submitting {
        Line::from(Span::styled("⟳ Submitting...", Theme::loading()))
    } else {
        Line::from(vec![
            Span::styled("ctrl+s", Theme::keybind()),
            Span::styled(" Submit Application  ", Theme::dimmed()),
            Span::styled("esc", Theme::keybind()),
            Span::styled(" Close", Theme::dimmed()),
        ])
    });

    render_form(
        frame,
        area,
        &format!(" Apply for {} ", apply.casting_title),
        &apply.form,
        footer,
    );
}

pub fn render_editor(frame: &mut Frame, area: Rect, editor: &CastingEditor) {
    let title = if editor.is_new() {
        " Add New Casting ".to_string()
    } else {
        " Edit Casting ".to_string()
    };

    let mut footer = Vec::new();
    if let Some(ref err) = editor.error {
        footer.push(Line::from(Span::styled(format!("✗ {}", err), Theme::error())));
    }
    if editor.discard_pending {
        footer.push(Line::from(Span::styled(
            "Unsaved changes. Press esc again to discard.",
            Theme::warning(),
        )));
    }
    footer.push(if editor.submitting {
        Line::from(Span::styled("⟳ Saving...", Theme::loading()))
    } else {
        Line::from(vec![
            Span::styled("ctrl+s", Theme::keybind()),
            Span::styled(
                if editor.is_new() {
                    " Create Casting  "
                } else {
                    " Update Casting  "
                },
                Theme::dimmed(),
            ),
            Span::styled("esc", Theme::keybind()),
            Span::styled(" Cancel", Theme::dimmed()),
        ])
    });

    render_form(frame, area, &title, &editor.form, footer);
}

/// Lines for one field: label, then each value line with the cursor drawn
/// when focused
pub fn field_lines(field: &TextField, focused: bool) -> Vec<Line<'_>> {
    let marker = if field.required { " *" } else { "" };
    let mut lines = vec![Line::from(vec![
        Span::styled(
            field.label,
            if focused {
                Theme::accent()
            } else {
                Theme::dimmed()
            },
        ),
        Span::styled(marker, Theme::error()),
    ])];

    if !focused && field.value.is_empty() {
        let hint = field.placeholder.unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled("  ", Theme::input()),
            Span::styled(hint, Theme::dimmed()),
        ]));
        return lines;
    }

    if !focused {
        for row in field.value.split('\n') {
            lines.push(Line::from(vec![
                Span::styled("  ", Theme::input()),
                Span::styled(row, Theme::input()),
            ]));
        }
        return lines;
    }

    let (before, after) = field.split_at_cursor();
    let mut rows: Vec<Vec<Span>> = vec![vec![Span::styled("  ", Theme::input())]];
    for (i, part) in before.split('\n').enumerate() {
        if i > 0 {
            rows.push(vec![Span::styled("  ", Theme::input())]);
        }
        if let Some(row) = rows.last_mut() {
            row.push(Span::styled(part, Theme::input()));
        }
    }

    let mut after_rows = after.split('\n');
    let first_after = after_rows.next().unwrap_or("");
    let mut chars = first_after.chars();
    let (cursor_char, rest) = match chars.next() {
        Some(c) => (c.to_string(), chars.as_str()),
        None => (" ".to_string(), ""),
    };
    if let Some(row) = rows.last_mut() {
        row.push(Span::styled(cursor_char, Theme::input_cursor()));
        row.push(Span::styled(rest, Theme::input()));
    }
    for part in after_rows {
        rows.push(vec![
            Span::styled("  ", Theme::input()),
            Span::styled(part, Theme::input()),
        ]);
    }

    lines.extend(rows.into_iter().map(Line::from));
    lines
}

fn render_form(frame: &mut Frame, area: Rect, title: &str, form: &Form, footer: Vec<Line>) {
    let popup = centered(area, 72, area.height.saturating_sub(4).max(12));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(title.to_string(), Theme::title()))
        .style(Theme::modal());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let footer_height = footer.len() as u16;
    let body_height = inner.height.saturating_sub(footer_height + 1);

    let mut lines: Vec<Line> = Vec::new();
    let mut focus_row = 0usize;
    for (i, field) in form.fields.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        if i == form.focus {
            focus_row = lines.len();
        }
        lines.extend(field_lines(field, i == form.focus));
    }

    // Scroll so the focused field's label stays in view
    let scroll = focus_row.saturating_sub(body_height as usize / 2) as u16;
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(
        body,
        Rect {
            height: body_height,
            ..inner
        },
    );

    let footer_area = Rect {
        y: inner.y + inner.height.saturating_sub(footer_height),
        height: footer_height.min(inner.height),
        ..inner
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}

pub fn render_confirm_delete(frame: &mut Frame, area: Rect, pending: &PendingDelete) {
    let popup = centered(area, 56, 7);
    frame.render_widget(Clear, popup);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Delete ", Theme::text()),
            Span::styled(pending.title.as_str(), Theme::accent()),
            Span::styled("?", Theme::text()),
        ]),
        Line::from(Span::styled("This cannot be undone.", Theme::dimmed())),
        Line::from(vec![
            Span::styled("y", Theme::keybind()),
            Span::styled(" delete  ", Theme::dimmed()),
            Span::styled("n", Theme::keybind()),
            Span::styled(" keep", Theme::dimmed()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::warning())
            .title(Span::styled(" CONFIRM DELETE ", Theme::warning()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(body, popup);
}

/// Render error popup overlay
pub fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup = centered(area, 60, 6);
    frame.render_widget(Clear, popup);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
        Line::from(Span::styled("Press any key", Theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_required_marker_and_placeholder() {
        let field = TextField::new("Social Media Links").placeholder("Instagram, TikTok, etc.");
        let lines = text(&field_lines(&field, false));
        assert_eq!(lines[0], "Social Media Links");
        assert!(lines[1].contains("Instagram"));

        let field = TextField::new("Email").required();
        assert_eq!(text(&field_lines(&field, false))[0], "Email *");
    }

    #[test]
    fn test_focused_multiline_keeps_rows() {
        let field = TextField::new("Requirements").multiline().with_value("a\nb");
        let lines = text(&field_lines(&field, true));
        // Label, "a", "b" plus the trailing cursor cell
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].trim(), "a");
        assert_eq!(lines[2].trim(), "b");
    }

    #[test]
    fn test_cursor_mid_value() {
        let mut field = TextField::new("Name").with_value("Jane");
        field.cursor_home();
        let lines = text(&field_lines(&field, true));
        assert_eq!(lines[1], "  Jane");
    }
}
