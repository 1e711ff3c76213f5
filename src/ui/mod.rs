//! Terminal UI
//!
//! Built with ratatui. Every function here is a pure projection of `App`
//! onto a frame; input handling lives in `app`.

pub mod admin;
pub mod carousel;
pub mod listing;
pub mod modal;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Overlay, Screen};

/// Height of the carousel strip on the listings screen
const CAROUSEL_HEIGHT: u16 = 5;

/// Screen regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub carousel: Option<Rect>,
    pub content: Rect,
    pub status: Rect,
}

/// Split the frame for the given screen
pub fn regions(area: Rect, screen: Screen) -> Regions {
    match screen {
        Screen::Listings => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(CAROUSEL_HEIGHT),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(area);
            Regions {
                header: chunks[0],
                carousel: Some(chunks[1]),
                content: chunks[2],
                status: chunks[3],
            }
        }
        Screen::Admin => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(area);
            Regions {
                header: chunks[0],
                carousel: None,
                content: chunks[1],
                status: chunks[2],
            }
        }
    }
}

/// Whether a terminal cell lies inside the carousel
pub fn is_over_carousel(area: Rect, screen: Screen, column: u16, row: u16) -> bool {
    regions(area, screen)
        .carousel
        .map(|r| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        })
        .unwrap_or(false)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(ratatui::style::Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let regions = regions(area, app.screen);

    render_header(frame, regions.header, app);
    if let Some(strip) = regions.carousel {
        carousel::render(frame, strip, &app.carousel, app.featured());
    }
    match app.screen {
        Screen::Listings => listing::render(frame, regions.content, &app.listing),
        Screen::Admin => admin::render(frame, regions.content, &app.admin),
    }
    render_status_bar(frame, regions.status, app);

    match &app.overlay {
        Overlay::None => {}
        Overlay::Apply(form) => modal::render_apply(frame, area, form),
        Overlay::Editor(editor) => modal::render_editor(frame, area, editor),
        Overlay::ConfirmDelete(pending) => modal::render_confirm_delete(frame, area, pending),
    }

    if let Some(ref error) = app.error {
        modal::render_error_popup(frame, area, error);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let heading = match app.screen {
        Screen::Listings => "Want to Feature on Cruise?",
        Screen::Admin => "Manage Casting Opportunities",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "CRUISE",
            ratatui::style::Style::default()
                .fg(Theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" TV  ", Theme::accent()),
        Span::styled(heading, Theme::dimmed()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let screen = Span::styled(
        match app.screen {
            Screen::Listings => " CASTINGS ",
            Screen::Admin => " ADMIN ",
        },
        ratatui::style::Style::default()
            .fg(Theme::BACKGROUND)
            .bg(Theme::PRIMARY),
    );

    let help = match (&app.overlay, app.screen) {
        (Overlay::None, Screen::Listings) => {
            " ↑↓:select  ↵:apply  r:reload  p:pause  tab:admin  q:quit "
        }
        (Overlay::None, Screen::Admin) => {
            " n:new  e:edit  d:delete  r:reload  tab:castings  q:quit "
        }
        (Overlay::ConfirmDelete(_), _) => " y:delete  n:keep ",
        _ => " tab:next field  ctrl+s:submit  esc:close ",
    };

    let mut spans = vec![screen, Span::styled(help, Theme::dimmed())];
    if let Some(ref notice) = app.notice {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(notice.clone(), Theme::success()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Theme::status_bar()),
        area,
    );
}

/// Centered rect of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
