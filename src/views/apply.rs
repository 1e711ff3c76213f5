//! Application form bound to one casting
//!
//! Required: full name, email, role fit, experience. Optional: phone,
//! social media links. A failed submission keeps every entered value.

use crossterm::event::KeyEvent;

use crate::form::{Form, FormError, FormKey, TextField};
use crate::models::{ApplicationFields, Casting, CastingId};
use crate::views::Ticket;

pub const FULL_NAME: &str = "Full Name";
pub const EMAIL: &str = "Email";
pub const PHONE: &str = "Phone";
pub const SOCIAL: &str = "Social Media Links";
pub const ROLE_FIT: &str = "Why are you a fit for this role?";
pub const EXPERIENCE: &str = "Relevant experience";

/// Notice shown after a successful submission
pub const SUBMITTED_NOTICE: &str = "Application submitted! We'll be in touch.";

/// Apply modal state
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyForm {
    pub casting: CastingId,
    pub casting_title: String,
    /// Tags this form's requests so late replies can't land on another form
    pub ticket: Ticket,
    pub form: Form,
    /// A request is outstanding; resubmission is blocked until it resolves
    pub submitting: bool,
    /// Last submission error, shown inside the modal
    pub error: Option<String>,
}

impl ApplyForm {
    pub fn new(casting: &Casting) -> Self {
        Self {
            casting: casting.id.clone(),
            casting_title: casting.title.clone(),
            ticket: 0,
            form: Form::new(vec![
                TextField::new(FULL_NAME).required(),
                TextField::new(EMAIL).required(),
                TextField::new(PHONE),
                TextField::new(SOCIAL).placeholder("Instagram, TikTok, etc."),
                TextField::new(ROLE_FIT).required().multiline(),
                TextField::new(EXPERIENCE).required().multiline(),
            ]),
            submitting: false,
            error: None,
        }
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.ticket = ticket;
        self
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
        self.form.handle_key(key)
    }

    /// Validate and build the payload, marking the form in flight
    pub fn submit(&mut self) -> Result<ApplicationFields, FormError> {
        if self.submitting {
            return Err(FormError::InFlight);
        }
        if let Err(e) = self.form.check_required() {
            self.error = Some(e.to_string());
            return Err(e);
        }

        let fields = ApplicationFields {
            casting: self.casting.clone(),
            full_name: self.form.value(FULL_NAME).trim().to_string(),
            email: self.form.value(EMAIL).trim().to_string(),
            phone: self.form.field(PHONE).and_then(TextField::optional),
            social_media_links: self.form.field(SOCIAL).and_then(TextField::optional),
            role_fit: self.form.value(ROLE_FIT).trim().to_string(),
            experience: self.form.value(EXPERIENCE).trim().to_string(),
        };

        self.submitting = true;
        self.error = None;
        Ok(fields)
    }

    /// Server rejected the submission or it never arrived
    pub fn on_failure(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CastingStatus;
    use chrono::NaiveDate;

    fn host() -> Casting {
        Casting {
            id: CastingId::Number(1),
            title: "Host".into(),
            description: "...".into(),
            requirements: vec!["Reliable".into()],
            external_link: None,
            deadline: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: CastingStatus::Open,
        }
    }

    fn fill(form: &mut ApplyForm) {
        for (label, value) in [
            (FULL_NAME, "Jane"),
            (EMAIL, "j@x.com"),
            (ROLE_FIT, "I love boats"),
            (EXPERIENCE, "Ten years on deck"),
        ] {
            form.form.field_mut(label).unwrap().set_value(value);
        }
    }

    #[test]
    fn test_submit_requires_fields() {
        let mut form = ApplyForm::new(&host());
        form.form.field_mut(FULL_NAME).unwrap().set_value("Jane");

        assert_eq!(form.submit(), Err(FormError::Missing(EMAIL)));
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("Email is required"));
    }

    #[test]
    fn test_submit_builds_payload_and_blocks_resubmit() {
        let mut form = ApplyForm::new(&host());
        fill(&mut form);

        let fields = form.submit().unwrap();
        assert_eq!(fields.casting, CastingId::Number(1));
        assert_eq!(fields.full_name, "Jane");
        assert_eq!(fields.phone, None);
        assert!(form.submitting);

        assert_eq!(form.submit(), Err(FormError::InFlight));
    }

    #[test]
    fn test_failure_preserves_values_and_allows_retry() {
        let mut form = ApplyForm::new(&host());
        fill(&mut form);
        form.submit().unwrap();

        form.on_failure("Casting closed");
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("Casting closed"));
        assert_eq!(form.form.value(FULL_NAME), "Jane");

        assert!(form.submit().is_ok());
    }
}
