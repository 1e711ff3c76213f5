//! UI rendering tests for cruisecast
//!
//! Renders the whole app into a `TestBackend` and checks what lands on
//! screen.
//!
//! ## Test Cases
//! - listing cards: title, requirements, deadline, link and status badge
//! - loading / failure / empty states
//! - carousel strip and pause indicator
//! - modals: apply form, editor, delete confirmation, error popup

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use cruisecast::app::{App, Effect, Outcome, Screen};
use cruisecast::models::{Casting, CastingId, CastingStatus};
use cruisecast::ui;
use cruisecast::ui::theme::{color_to_rgb, meets_wcag_aa, Theme};

// =============================================================================
// Helpers
// =============================================================================

fn casting(id: u64, title: &str, status: CastingStatus) -> Casting {
    Casting {
        id: CastingId::Number(id),
        title: title.into(),
        description: format!("{} wanted", title),
        requirements: vec!["Confident".into(), "Funny".into()],
        external_link: Some(format!("https://cruise.tv/{}", id)),
        deadline: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        status,
    }
}

fn loaded(screen: Screen, castings: Vec<Casting>) -> App {
    let mut app = App::new(screen);
    let Effect::LoadCastings { screen, ticket } = app.start() else {
        panic!("expected initial load");
    };
    app.apply(Outcome::CastingsLoaded {
        screen,
        ticket,
        result: Ok(castings),
    });
    app
}

fn draw(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_theme_colors_are_rgb_and_readable() {
    for color in [
        Theme::BACKGROUND,
        Theme::SURFACE,
        Theme::TEXT,
        Theme::DIM,
        Theme::PRIMARY,
        Theme::SUCCESS,
        Theme::ERROR,
        Theme::WARNING,
        Theme::BORDER,
    ] {
        assert!(color_to_rgb(color).is_some());
    }
    assert!(meets_wcag_aa(
        color_to_rgb(Theme::TEXT).unwrap(),
        color_to_rgb(Theme::BACKGROUND).unwrap()
    ));
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_listing_renders_card_fields() {
    let app = loaded(
        Screen::Listings,
        vec![casting(1, "Host", CastingStatus::Open)],
    );
    let screen = draw(&app, 100, 40);

    assert!(screen.contains("Host"));
    assert!(screen.contains("Host wanted"));
    assert!(screen.contains("• Confident"));
    assert!(screen.contains("January 31, 2025"));
    assert!(screen.contains("https://cruise.tv/1"));
    assert!(screen.contains(" open "));
}

#[test]
fn test_listing_badges_follow_status() {
    let app = loaded(
        Screen::Listings,
        vec![
            casting(1, "Host", CastingStatus::Open),
            casting(2, "Chef", CastingStatus::Closed),
        ],
    );
    let backend = TestBackend::new(100, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, &app)).unwrap();
    let buffer = terminal.backend().buffer();

    // Find the badge text below the header and carousel and check its
    // background colour
    let text = buffer_text(buffer);
    let lines: Vec<&str> = text.lines().collect();
    let badge_bg = |label: &str| {
        lines.iter().enumerate().skip(8).find_map(|(y, line)| {
            line.find(label).map(|byte_x| {
                let x = line[..byte_x].chars().count() as u16 + 1;
                buffer[(x, y as u16)].bg
            })
        })
    };

    assert_eq!(badge_bg(" open "), Some(Theme::SUCCESS));
    assert_eq!(badge_bg(" closed "), Some(Theme::ERROR));
}

#[test]
fn test_loading_and_failure_states() {
    let mut app = App::new(Screen::Listings);
    let Effect::LoadCastings { ticket, .. } = app.start() else {
        panic!("expected initial load");
    };
    assert!(draw(&app, 80, 24).contains("Loading opportunities"));

    app.apply(Outcome::CastingsLoaded {
        screen: Screen::Listings,
        ticket,
        result: Err("Failed to fetch opportunities".into()),
    });
    let screen = draw(&app, 80, 24);
    assert!(screen.contains("Failed to fetch opportunities"));
    assert!(!screen.contains("Loading opportunities"));
}

#[test]
fn test_empty_listing() {
    let app = loaded(Screen::Listings, vec![]);
    assert!(draw(&app, 80, 24).contains("No casting opportunities"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let app = loaded(
        Screen::Listings,
        (1..=10)
            .map(|i| casting(i, "Role", CastingStatus::Open))
            .collect(),
    );
    draw(&app, 20, 8);
    draw(&app, 80, 24);
    draw(&app, 200, 60);
}

// =============================================================================
// Carousel
// =============================================================================

#[test]
fn test_carousel_strip_and_pause_indicator() {
    let mut app = loaded(
        Screen::Listings,
        vec![
            casting(1, "Host", CastingStatus::Open),
            casting(2, "Chef", CastingStatus::Open),
        ],
    );
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("FEATURED"));
    assert!(!screen.contains("paused"));

    app.set_pointer_over_carousel(true);
    assert!(draw(&app, 100, 40).contains("paused"));
}

#[test]
fn test_admin_has_no_carousel() {
    let app = loaded(Screen::Admin, vec![casting(1, "Host", CastingStatus::Open)]);
    let screen = draw(&app, 100, 30);
    assert!(!screen.contains("FEATURED"));
    assert!(screen.contains("Manage Casting Opportunities"));
    assert!(screen.contains("Host"));
}

// =============================================================================
// Modals
// =============================================================================

#[test]
fn test_apply_modal_renders_fields() {
    let mut app = loaded(
        Screen::Listings,
        vec![casting(1, "Host", CastingStatus::Open)],
    );
    app.handle_key(key(KeyCode::Enter));

    let screen = draw(&app, 100, 40);
    assert!(screen.contains("Apply for Host"));
    assert!(screen.contains("Full Name"));
    assert!(screen.contains("Social Media Links"));
    assert!(screen.contains("Submit Application"));
}

#[test]
fn test_editor_titles() {
    let mut app = loaded(Screen::Admin, vec![casting(1, "Host", CastingStatus::Open)]);
    app.handle_key(key(KeyCode::Char('n')));
    assert!(draw(&app, 100, 40).contains("Add New Casting"));

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Char('e')));
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("Edit Casting"));
    assert!(screen.contains("Update Casting"));
}

#[test]
fn test_delete_confirmation_names_casting() {
    let mut app = loaded(Screen::Admin, vec![casting(1, "Host", CastingStatus::Open)]);
    app.handle_key(key(KeyCode::Char('d')));
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("CONFIRM DELETE"));
    assert!(screen.contains("Delete Host?"));
}

#[test]
fn test_error_popup() {
    let mut app = loaded(Screen::Admin, vec![]);
    app.apply(Outcome::CastingDeleted(Err("Failed to delete casting".into())));
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("ERROR"));
    assert!(screen.contains("Error deleting casting: Failed to delete casting"));
}
