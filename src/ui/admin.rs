//! Casting management table

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::Theme;
use crate::views::{AdminView, Badge, LoadState};

pub fn render(frame: &mut Frame, area: Rect, view: &AdminView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" CASTINGS ({}) ", view.castings().len()),
            Theme::title(),
        ))
        .title_bottom(Line::from(vec![
            Span::styled(" n", Theme::keybind()),
            Span::styled(" Add New Casting ", Theme::dimmed()),
        ]));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match view.state() {
        LoadState::Idle | LoadState::Loading => {
            let loading = Paragraph::new("⟳ Loading castings...")
                .style(Theme::loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }
        LoadState::Failed(msg) => {
            let failed = Paragraph::new(Span::styled(format!("✗ {}", msg), Theme::error()))
                .alignment(Alignment::Center);
            frame.render_widget(failed, inner);
            return;
        }
        LoadState::Loaded(castings) if castings.is_empty() => {
            let empty = Paragraph::new("No castings yet. Press n to add one.")
                .style(Theme::dimmed())
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }
        LoadState::Loaded(_) => {}
    }

    let visible = inner.height as usize;
    let offset = if visible > 0 && view.list.selected >= visible {
        view.list.selected + 1 - visible
    } else {
        0
    };

    let items: Vec<ListItem> = view
        .castings()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, casting)| {
            let is_selected = i == view.list.selected;
            let is_deleting = view.deleting.as_ref() == Some(&casting.id);
            let marker = if is_selected { "▸ " } else { "  " };
            let badge_style = match Badge::for_status(&casting.status) {
                Badge::Affirmative => Theme::success(),
                Badge::Negative => Theme::error(),
            };

            let mut spans = vec![
                Span::styled(
                    marker,
                    if is_selected {
                        Theme::accent()
                    } else {
                        Theme::dimmed()
                    },
                ),
                Span::styled(
                    casting.title.as_str(),
                    if is_selected {
                        Theme::highlighted()
                    } else {
                        Theme::text()
                    },
                ),
                Span::raw("  "),
                Span::styled(format!("[{}]", casting.status), badge_style),
                Span::raw("  "),
                Span::styled(casting.format_deadline(), Theme::deadline()),
            ];
            if let Some(ref link) = casting.external_link {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(link.as_str(), Theme::link()));
            }
            if is_deleting {
                spans.push(Span::styled("  deleting...", Theme::warning()));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), inner);
}
