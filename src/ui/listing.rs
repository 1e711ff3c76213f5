//! Casting cards for the public list

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::Theme;
use crate::views::listing::Card;
use crate::views::{Badge, ListingView, LoadState};

/// Render the list screen: loading, error, empty or cards
pub fn render(frame: &mut Frame, area: Rect, view: &ListingView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" OPPORTUNITIES ({}) ", view.castings().len()),
            Theme::title(),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match view.state() {
        LoadState::Idle | LoadState::Loading => {
            let loading = Paragraph::new("⟳ Loading opportunities...")
                .style(Theme::loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
        }
        LoadState::Failed(msg) => {
            let failed = Paragraph::new(vec![
                Line::from(Span::styled(format!("✗ {}", msg), Theme::error())),
                Line::from(""),
                Line::from(Span::styled("Press r to retry", Theme::dimmed())),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(failed, inner);
        }
        LoadState::Loaded(castings) if castings.is_empty() => {
            let empty = Paragraph::new("No casting opportunities right now. Check back soon!")
                .style(Theme::dimmed())
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
        }
        LoadState::Loaded(_) => render_cards(frame, inner, view),
    }
}

fn render_cards(frame: &mut Frame, area: Rect, view: &ListingView) {
    let cards = view.cards();
    let heights: Vec<u16> = cards.iter().map(|c| card_height(c, area.width)).collect();
    let start = first_card(&heights, view.list.selected, area.height);

    let mut y = area.y;
    for (i, card) in cards.iter().enumerate().skip(start) {
        let remaining = (area.y + area.height).saturating_sub(y);
        if remaining == 0 {
            break;
        }
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height: heights[i].min(remaining),
        };
        render_card(frame, rect, card, i == view.list.selected);
        y += rect.height;
    }
}

/// First card to draw so the selected one is fully on screen
pub fn first_card(heights: &[u16], selected: usize, available: u16) -> usize {
    let mut start = selected.min(heights.len().saturating_sub(1));
    let mut used = heights.get(start).copied().unwrap_or(0);
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }
    start
}

/// Rows a card occupies at `width` columns, including its border
pub fn card_height(card: &Card, width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    let rows: usize = card_lines(card)
        .iter()
        .map(|line| line.width().div_ceil(inner).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

/// Body lines of a card, below the title
pub fn card_lines<'a>(card: &Card<'a>) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(card.description, Theme::text()))];

    if !card.requirements.is_empty() {
        lines.push(Line::from(Span::styled("Requirements:", Theme::dimmed())));
        for req in card.requirements {
            lines.push(Line::from(vec![
                Span::styled("  • ", Theme::accent()),
                Span::raw(req.as_str()),
            ]));
        }
    }

    lines.push(Line::from(vec![
        Span::styled("Deadline: ", Theme::dimmed()),
        Span::styled(card.deadline.clone(), Theme::deadline()),
    ]));

    if let Some(link) = card.external_link {
        lines.push(Line::from(vec![
            Span::styled("More info: ", Theme::dimmed()),
            Span::styled(link, Theme::link()),
        ]));
    }

    lines
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card, selected: bool) {
    let badge = match card.badge {
        Badge::Affirmative => Span::styled(format!(" {} ", card.status), Theme::badge_open()),
        Badge::Negative => Span::styled(format!(" {} ", card.status), Theme::badge_closed()),
    };

    let title = Line::from(vec![
        Span::styled(if selected { " ▸ " } else { "   " }, Theme::accent()),
        Span::styled(
            card.title,
            if selected {
                Theme::highlighted()
            } else {
                Theme::title()
            },
        ),
        Span::raw(" "),
        badge,
        Span::raw(" "),
    ]);

    let body = Paragraph::new(card_lines(card))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if selected {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(title),
        );
    frame.render_widget(body, area);
}
