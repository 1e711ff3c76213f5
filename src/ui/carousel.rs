//! Featured castings strip

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::carousel::Carousel;
use crate::models::Casting;
use crate::views::Badge;

/// Columns per carousel card, including the gap
pub const CARD_WIDTH: u16 = 30;

pub fn render(frame: &mut Frame, area: Rect, carousel: &Carousel, items: &[Casting]) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" FEATURED ", Theme::title()));
    if carousel.paused {
        block = block.title(Span::styled(" ⏸ paused ", Theme::dimmed()));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing to feature yet")
                .style(Theme::dimmed())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // One card more than fits, so the partially scrolled card has a follower
    let take = (inner.width / CARD_WIDTH) as usize + 2;
    let order = carousel.visible_items(take);
    let shift = (carousel.scroll_fraction() * CARD_WIDTH as f32) as u16;

    frame.render_widget(Paragraph::new(strip_lines(items, &order)).scroll((0, shift)), inner);
}

/// Three text rows of fixed-width cards laid side by side
pub fn strip_lines<'a>(items: &'a [Casting], order: &[usize]) -> Vec<Line<'a>> {
    let width = CARD_WIDTH as usize - 2;
    let mut titles = Vec::new();
    let mut deadlines = Vec::new();
    let mut statuses = Vec::new();

    for &i in order {
        let Some(casting) = items.get(i) else {
            continue;
        };
        titles.push(Span::styled(fit(&casting.title, width), Theme::accent()));
        titles.push(Span::raw("  "));

        deadlines.push(Span::styled(
            fit(&casting.format_deadline(), width),
            Theme::deadline(),
        ));
        deadlines.push(Span::raw("  "));

        let style = match Badge::for_status(&casting.status) {
            Badge::Affirmative => Theme::success(),
            Badge::Negative => Theme::error(),
        };
        statuses.push(Span::styled(fit(&format!("● {}", casting.status), width), style));
        statuses.push(Span::raw("  "));
    }

    vec![Line::from(titles), Line::from(deadlines), Line::from(statuses)]
}

/// Truncate or pad to exactly `width` chars
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}
