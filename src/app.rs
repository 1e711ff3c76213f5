//! App state and core application logic
//!
//! Owns the screen, the single exclusive overlay and every view. Input is
//! turned into `Effect`s for the runtime to execute; their results come
//! back as `Outcome`s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::CastingClient;
use crate::carousel::Carousel;
use crate::form::{FormError, FormKey};
use crate::models::{ApplicationFields, Casting, CastingFields, CastingId};
use crate::views::admin::{CloseRequest, PendingDelete};
use crate::views::apply::SUBMITTED_NOTICE;
use crate::views::{AdminView, ApplyForm, CastingEditor, ListingView, Ticket};

// =============================================================================
// Screens & Overlays
// =============================================================================

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Public casting list
    #[default]
    Listings,
    /// Casting management
    Admin,
}

impl Screen {
    pub fn toggle(self) -> Self {
        match self {
            Screen::Listings => Screen::Admin,
            Screen::Admin => Screen::Listings,
        }
    }
}

/// The one modal that may be open. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Overlay {
    #[default]
    None,
    Apply(ApplyForm),
    Editor(CastingEditor),
    ConfirmDelete(PendingDelete),
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }
}

// =============================================================================
// Effects & Outcomes
// =============================================================================

/// Side effect requested by the app
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadCastings { screen: Screen, ticket: Ticket },
    SaveCasting {
        ticket: Ticket,
        id: Option<CastingId>,
        fields: CastingFields,
    },
    DeleteCasting { id: CastingId },
    SubmitApplication {
        ticket: Ticket,
        fields: ApplicationFields,
    },
}

/// Result of an effect, or a timer tick
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    CastingsLoaded {
        screen: Screen,
        ticket: Ticket,
        result: Result<Vec<Casting>, String>,
    },
    CastingSaved {
        ticket: Ticket,
        result: Result<Casting, String>,
    },
    CastingDeleted(Result<(), String>),
    ApplicationSubmitted {
        ticket: Ticket,
        result: Result<(), String>,
    },
    CarouselTick,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub overlay: Overlay,
    pub running: bool,
    /// Blocking error popup; dismissed by any key
    pub error: Option<String>,
    /// Transient confirmation, cleared by the next key
    pub notice: Option<String>,

    pub listing: ListingView,
    pub admin: AdminView,
    pub carousel: Carousel,

    pointer_over_carousel: bool,
    manual_pause: bool,
    /// Last ticket handed to an apply form or editor
    form_ticket: Ticket,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Screen::Listings)
    }
}

impl App {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            overlay: Overlay::None,
            running: true,
            error: None,
            notice: None,
            listing: ListingView::new(),
            admin: AdminView::new(),
            carousel: Carousel::new(0),
            pointer_over_carousel: false,
            manual_pause: false,
            form_ticket: 0,
        }
    }

    /// Initial fetch for the starting screen
    pub fn start(&mut self) -> Effect {
        self.load(self.screen)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Show a screen, re-fetching its data
    pub fn switch_to(&mut self, screen: Screen) -> Effect {
        self.screen = screen;
        self.load(screen)
    }

    fn load(&mut self, screen: Screen) -> Effect {
        let ticket = match screen {
            Screen::Listings => self.listing.begin_load(),
            Screen::Admin => self.admin.begin_load(),
        };
        tracing::debug!(?screen, ticket, "loading castings");
        Effect::LoadCastings { screen, ticket }
    }

    fn next_form_ticket(&mut self) -> Ticket {
        self.form_ticket += 1;
        self.form_ticket
    }

    /// The open apply form, if it sent the request behind `ticket`
    fn apply_form_for(&mut self, ticket: Ticket) -> Option<&mut ApplyForm> {
        match &mut self.overlay {
            Overlay::Apply(form) if form.ticket == ticket => Some(form),
            _ => None,
        }
    }

    /// The open editor, if it sent the request behind `ticket`
    fn editor_for(&mut self, ticket: Ticket) -> Option<&mut CastingEditor> {
        match &mut self.overlay {
            Overlay::Editor(editor) if editor.ticket == ticket => Some(editor),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Carousel Pause
    // -------------------------------------------------------------------------

    /// Pointer entered or left the carousel
    pub fn set_pointer_over_carousel(&mut self, over: bool) {
        self.pointer_over_carousel = over;
        self.sync_pause();
    }

    pub fn toggle_carousel_pause(&mut self) {
        self.manual_pause = !self.manual_pause;
        self.sync_pause();
    }

    fn sync_pause(&mut self) {
        self.carousel.paused = self.pointer_over_carousel || self.manual_pause;
    }

    /// Castings shown in the carousel
    pub fn featured(&self) -> &[Casting] {
        self.listing.castings()
    }

    // -------------------------------------------------------------------------
    // Outcomes
    // -------------------------------------------------------------------------

    /// Apply the result of an effect; may request a follow-up
    pub fn apply(&mut self, outcome: Outcome) -> Option<Effect> {
        match outcome {
            Outcome::CastingsLoaded {
                screen,
                ticket,
                result,
            } => {
                match screen {
                    Screen::Listings => {
                        self.listing.finish_load(ticket, result);
                        let count = self.listing.castings().len();
                        self.carousel.set_count(count);
                    }
                    Screen::Admin => self.admin.finish_load(ticket, result),
                }
                None
            }

            // Replies only touch the form that sent them; a form opened
            // since then is left alone
            Outcome::ApplicationSubmitted {
                ticket,
                result: Ok(()),
            } => {
                if self.apply_form_for(ticket).is_some() {
                    self.overlay = Overlay::None;
                }
                self.notice = Some(SUBMITTED_NOTICE.to_string());
                None
            }
            Outcome::ApplicationSubmitted {
                ticket,
                result: Err(msg),
            } => {
                match self.apply_form_for(ticket) {
                    Some(form) => form.on_failure(msg),
                    None => self.set_error(format!("Error submitting application: {}", msg)),
                }
                None
            }

            Outcome::CastingSaved {
                ticket,
                result: Ok(casting),
            } => {
                tracing::debug!(id = %casting.id, "casting saved");
                if self.editor_for(ticket).is_some() {
                    self.overlay = Overlay::None;
                }
                Some(self.load(Screen::Admin))
            }
            Outcome::CastingSaved {
                ticket,
                result: Err(msg),
            } => {
                if let Some(editor) = self.editor_for(ticket) {
                    editor.on_failure();
                }
                self.set_error(format!("Error saving casting: {}", msg));
                None
            }

            Outcome::CastingDeleted(Ok(())) => {
                self.admin.deleting = None;
                Some(self.load(Screen::Admin))
            }
            Outcome::CastingDeleted(Err(msg)) => {
                self.admin.deleting = None;
                self.set_error(format!("Error deleting casting: {}", msg));
                None
            }

            Outcome::CarouselTick => {
                self.carousel.tick();
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returning the effect it triggers
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        // Error popup swallows the key that dismisses it
        if self.error.take().is_some() {
            return None;
        }
        self.notice = None;

        match std::mem::take(&mut self.overlay) {
            Overlay::None => self.handle_screen_key(key),
            Overlay::Apply(form) => self.handle_apply_key(form, key),
            Overlay::Editor(editor) => self.handle_editor_key(editor, key),
            Overlay::ConfirmDelete(pending) => self.handle_confirm_key(pending, key),
        }
    }

    fn handle_apply_key(&mut self, mut form: ApplyForm, key: KeyEvent) -> Option<Effect> {
        let effect = match form.handle_key(key) {
            FormKey::Cancel => return None,
            FormKey::Submit => match form.submit() {
                Ok(fields) => Some(Effect::SubmitApplication {
                    ticket: form.ticket,
                    fields,
                }),
                Err(FormError::InFlight) => None,
                Err(e) => {
                    tracing::debug!(error = %e, "application form incomplete");
                    None
                }
            },
            FormKey::Handled | FormKey::Ignored => None,
        };
        self.overlay = Overlay::Apply(form);
        effect
    }

    fn handle_editor_key(&mut self, mut editor: CastingEditor, key: KeyEvent) -> Option<Effect> {
        let effect = match editor.handle_key(key) {
            FormKey::Cancel => match editor.request_close() {
                CloseRequest::Close => return None,
                CloseRequest::ConfirmDiscard => None,
            },
            FormKey::Submit => match editor.submit() {
                Ok((id, fields)) => Some(Effect::SaveCasting {
                    ticket: editor.ticket,
                    id,
                    fields,
                }),
                Err(_) => None,
            },
            FormKey::Handled | FormKey::Ignored => None,
        };
        self.overlay = Overlay::Editor(editor);
        effect
    }

    fn handle_confirm_key(&mut self, pending: PendingDelete, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                tracing::info!(id = %pending.id, "delete confirmed");
                self.admin.deleting = Some(pending.id.clone());
                Some(Effect::DeleteCasting { id: pending.id })
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => None,
            _ => {
                self.overlay = Overlay::ConfirmDelete(pending);
                None
            }
        }
    }

    fn handle_screen_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return None;
            }
            KeyCode::Tab => return Some(self.switch_to(self.screen.toggle())),
            KeyCode::Char('r') => return Some(self.load(self.screen)),
            KeyCode::Char('p') => {
                self.toggle_carousel_pause();
                return None;
            }
            _ => {}
        }

        match self.screen {
            Screen::Listings => self.handle_listings_key(key),
            Screen::Admin => self.handle_admin_key(key),
        }
    }

    fn handle_listings_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.listing.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.listing.list.down(),
            KeyCode::Home => self.listing.list.first(),
            KeyCode::End => self.listing.list.last(),
            KeyCode::Enter => {
                if let Some(casting) = self.listing.selected() {
                    let form = ApplyForm::new(casting);
                    self.overlay = Overlay::Apply(form.with_ticket(self.next_form_ticket()));
                }
            }
            _ => {}
        }
        None
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.admin.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.admin.list.down(),
            KeyCode::Home => self.admin.list.first(),
            KeyCode::End => self.admin.list.last(),
            KeyCode::Char('n') => {
                let ticket = self.next_form_ticket();
                self.overlay = Overlay::Editor(CastingEditor::create().with_ticket(ticket));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(casting) = self.admin.selected() {
                    let editor = CastingEditor::edit(casting);
                    self.overlay = Overlay::Editor(editor.with_ticket(self.next_form_ticket()));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(pending) = self.admin.request_delete() {
                    self.overlay = Overlay::ConfirmDelete(pending);
                }
            }
            _ => {}
        }
        None
    }
}

// =============================================================================
// Effect Execution
// =============================================================================

/// Run one effect against the backend and report its outcome
pub async fn execute(client: &CastingClient, effect: Effect) -> Outcome {
    match effect {
        Effect::LoadCastings { screen, ticket } => Outcome::CastingsLoaded {
            screen,
            ticket,
            result: client.list_castings().await.map_err(|e| e.to_string()),
        },
        Effect::SaveCasting {
            ticket,
            id: None,
            fields,
        } => Outcome::CastingSaved {
            ticket,
            result: client
                .create_casting(&fields)
                .await
                .map_err(|e| e.to_string()),
        },
        Effect::SaveCasting {
            ticket,
            id: Some(id),
            fields,
        } => Outcome::CastingSaved {
            ticket,
            result: client
                .update_casting(&id, &fields)
                .await
                .map_err(|e| e.to_string()),
        },
        Effect::DeleteCasting { id } => {
            Outcome::CastingDeleted(client.delete_casting(&id).await.map_err(|e| e.to_string()))
        }
        Effect::SubmitApplication { ticket, fields } => Outcome::ApplicationSubmitted {
            ticket,
            result: client
                .create_application(&fields)
                .await
                .map_err(|e| e.to_string()),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
