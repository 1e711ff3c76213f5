//! Casting management: list, reusable create/edit form, delete confirmation

use crossterm::event::KeyEvent;

use crate::form::{Form, FormError, FormKey, TextField};
use crate::models::{
    join_requirements, normalize_optional, parse_date, split_requirements, Casting,
    CastingFields, CastingId, CastingStatus,
};
use crate::views::{ListState, LoadState, Loader, Ticket};

pub const TITLE: &str = "Title";
pub const DESCRIPTION: &str = "Description";
pub const REQUIREMENTS: &str = "Requirements (one per line)";
pub const EXTERNAL_LINK: &str = "External Link (Optional)";
pub const DEADLINE: &str = "Deadline (YYYY-MM-DD)";

// =============================================================================
// Editor
// =============================================================================

/// What closing the editor should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    Close,
    /// Unsaved edits; ask again before discarding
    ConfirmDiscard,
}

/// Create/edit form for one casting
#[derive(Debug, Clone, PartialEq)]
pub struct CastingEditor {
    /// `None` creates, `Some` replaces
    pub id: Option<CastingId>,
    /// Tags this editor's saves; see `ApplyForm::ticket`
    pub ticket: Ticket,
    /// Carried through unchanged on edit
    pub status: CastingStatus,
    pub form: Form,
    pub submitting: bool,
    /// Set after the first close attempt on a dirty form
    pub discard_pending: bool,
    /// Validation message shown inside the form
    pub error: Option<String>,
    original: Vec<String>,
}

impl CastingEditor {
    /// Empty form for a new casting
    pub fn create() -> Self {
        Self::build(None, CastingStatus::Open, "", "", "", "", "")
    }

    /// Form pre-populated from an existing casting
    pub fn edit(casting: &Casting) -> Self {
        Self::build(
            Some(casting.id.clone()),
            casting.status.clone(),
            &casting.title,
            &casting.description,
            &join_requirements(&casting.requirements),
            casting.external_link.as_deref().unwrap_or(""),
            &casting.deadline.format("%Y-%m-%d").to_string(),
        )
    }

    fn build(
        id: Option<CastingId>,
        status: CastingStatus,
        title: &str,
        description: &str,
        requirements: &str,
        link: &str,
        deadline: &str,
    ) -> Self {
        let form = Form::new(vec![
            TextField::new(TITLE).required().with_value(title),
            TextField::new(DESCRIPTION)
                .required()
                .multiline()
                .with_value(description),
            TextField::new(REQUIREMENTS)
                .required()
                .multiline()
                .with_value(requirements),
            TextField::new(EXTERNAL_LINK)
                .placeholder("https://example.com")
                .with_value(link),
            TextField::new(DEADLINE)
                .required()
                .placeholder("2025-01-31")
                .with_value(deadline),
        ]);
        let original = form.values();
        Self {
            id,
            ticket: 0,
            status,
            form,
            submitting: false,
            discard_pending: false,
            error: None,
            original,
        }
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.ticket = ticket;
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Values differ from what the editor opened with
    pub fn is_dirty(&self) -> bool {
        self.form.values() != self.original
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
        let result = self.form.handle_key(key);
        if result == FormKey::Handled {
            self.discard_pending = false;
        }
        result
    }

    /// First attempt on a dirty form arms the discard warning
    pub fn request_close(&mut self) -> CloseRequest {
        if self.is_dirty() && !self.discard_pending {
            self.discard_pending = true;
            CloseRequest::ConfirmDiscard
        } else {
            CloseRequest::Close
        }
    }

    /// Validate and build the payload, marking the editor in flight
    pub fn submit(&mut self) -> Result<(Option<CastingId>, CastingFields), FormError> {
        if self.submitting {
            return Err(FormError::InFlight);
        }
        let result = self.validate();
        match &result {
            Ok(_) => {
                self.submitting = true;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }

    fn validate(&mut self) -> Result<(Option<CastingId>, CastingFields), FormError> {
        self.form.check_required()?;

        let requirements = split_requirements(self.form.value(REQUIREMENTS));
        if requirements.is_empty() {
            return Err(FormError::Missing(REQUIREMENTS));
        }
        let deadline = parse_date(self.form.value(DEADLINE)).ok_or_else(|| {
            FormError::Invalid(format!(
                "Deadline must be a date like 2025-01-31, got '{}'",
                self.form.value(DEADLINE).trim()
            ))
        })?;

        let fields = CastingFields {
            title: self.form.value(TITLE).trim().to_string(),
            description: self.form.value(DESCRIPTION).trim().to_string(),
            requirements,
            external_link: normalize_optional(Some(self.form.value(EXTERNAL_LINK).to_string())),
            deadline,
            status: self.status.clone(),
        };

        Ok((self.id.clone(), fields))
    }

    pub fn on_failure(&mut self) {
        self.submitting = false;
    }
}

// =============================================================================
// Admin View
// =============================================================================

/// Delete awaiting confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub id: CastingId,
    pub title: String,
}

/// Admin list state
#[derive(Debug, Clone, Default)]
pub struct AdminView {
    pub loader: Loader<Vec<Casting>>,
    pub list: ListState,
    /// A confirmed delete is in flight
    pub deleting: Option<CastingId>,
}

impl AdminView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<Vec<Casting>> {
        &self.loader.state
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loader.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Casting>, String>) {
        if self.loader.finish(ticket, result) {
            let len = self.castings().len();
            self.list.set_len(len);
        }
    }

    pub fn castings(&self) -> &[Casting] {
        self.loader.state.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<&Casting> {
        self.castings().get(self.list.selected)
    }

    /// Ask for confirmation before deleting the selected casting
    pub fn request_delete(&self) -> Option<PendingDelete> {
        if self.deleting.is_some() {
            return None;
        }
        self.selected().map(|c| PendingDelete {
            id: c.id.clone(),
            title: c.title.clone(),
        })
    }
}
