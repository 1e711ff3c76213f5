//! Text input primitives shared by the apply and casting forms
//!
//! A `TextField` is a labelled, optionally multi-line buffer with a cursor.
//! `Form` is an ordered set of fields with one focused at a time.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

/// Why a form refused to submit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0}")]
    Invalid(String),

    #[error("A submission is already in progress")]
    InFlight,
}

/// Single editable field
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Cursor position in chars
    pub cursor: usize,
    pub required: bool,
    pub multiline: bool,
    pub placeholder: Option<&'static str>,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
            required: false,
            multiline: false,
            placeholder: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    /// Replace the value and park the cursor at the end
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Trimmed value, `None` when blank
    pub fn optional(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.value.trim().to_string())
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Value split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index(self.cursor))
    }
}

/// Outcome of feeding a key to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    /// Key edited or moved within the form
    Handled,
    /// Ctrl+S: caller should try to submit
    Submit,
    /// Esc: caller should try to close
    Cancel,
    Ignored,
}

/// Ordered fields with a single focus
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focused(&self) -> Option<&TextField> {
        self.fields.get(self.focus)
    }

    fn focused_mut(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focus)
    }

    pub fn field(&self, label: &str) -> Option<&TextField> {
        self.fields.iter().find(|f| f.label == label)
    }

    pub fn field_mut(&mut self, label: &str) -> Option<&mut TextField> {
        self.fields.iter_mut().find(|f| f.label == label)
    }

    /// Value of the named field, empty if the field doesn't exist
    pub fn value(&self, label: &str) -> &str {
        self.field(label).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Check required fields; focuses the first blank one
    pub fn check_required(&mut self) -> Result<(), FormError> {
        if let Some(idx) = self.fields.iter().position(|f| f.required && f.is_blank()) {
            self.focus = idx;
            return Err(FormError::Missing(self.fields[idx].label));
        }
        Ok(())
    }

    /// Snapshot of all values, for dirty tracking
    pub fn values(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.value.clone()).collect()
    }

    /// Route a key to the focused field
    pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => FormKey::Submit,
                _ => FormKey::Ignored,
            };
        }

        match key.code {
            KeyCode::Esc => FormKey::Cancel,
            KeyCode::F(2) => FormKey::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormKey::Handled
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                FormKey::Handled
            }
            KeyCode::Enter => {
                let multiline = self.focused().map(|f| f.multiline).unwrap_or(false);
                if multiline {
                    if let Some(field) = self.focused_mut() {
                        field.insert('\n');
                    }
                } else {
                    self.focus_next();
                }
                FormKey::Handled
            }
            KeyCode::Char(c) => self.edit(|f| f.insert(c)),
            KeyCode::Backspace => self.edit(TextField::backspace),
            KeyCode::Delete => self.edit(TextField::delete),
            KeyCode::Left => self.edit(TextField::cursor_left),
            KeyCode::Right => self.edit(TextField::cursor_right),
            KeyCode::Home => self.edit(TextField::cursor_home),
            KeyCode::End => self.edit(TextField::cursor_end),
            _ => FormKey::Ignored,
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut TextField)) -> FormKey {
        match self.focused_mut() {
            Some(field) => {
                f(field);
                FormKey::Handled
            }
            None => FormKey::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::new("Name");

        for c in "hello".chars() {
            field.insert(c);
        }
        assert_eq!(field.value, "hello");
        assert_eq!(field.cursor, 5);

        field.cursor_left();
        field.cursor_left();
        field.insert('X');
        assert_eq!(field.value, "helXlo");

        field.backspace();
        assert_eq!(field.value, "hello");

        field.cursor_home();
        field.delete();
        assert_eq!(field.value, "ello");
    }

    #[test]
    fn test_text_field_multibyte() {
        let mut field = TextField::new("Name").with_value("Zoë");
        field.backspace();
        assert_eq!(field.value, "Zo");
        field.insert('é');
        assert_eq!(field.value, "Zoé");
        assert_eq!(field.split_at_cursor(), ("Zoé", ""));
    }

    #[test]
    fn test_optional_value() {
        assert_eq!(TextField::new("Phone").with_value("   ").optional(), None);
        assert_eq!(
            TextField::new("Phone").with_value(" 555 ").optional(),
            Some("555".into())
        );
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut form = Form::new(vec![TextField::new("A"), TextField::new("B")]);
        form.focus_next();
        assert_eq!(form.focus, 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_prev();
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_enter_in_multiline_inserts_newline() {
        let mut form = Form::new(vec![
            TextField::new("Title"),
            TextField::new("Requirements").multiline(),
        ]);

        form.handle_key(key(KeyCode::Char('a')));
        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.focus, 1);

        form.handle_key(key(KeyCode::Char('x')));
        form.handle_key(key(KeyCode::Enter));
        form.handle_key(key(KeyCode::Char('y')));
        assert_eq!(form.value("Requirements"), "x\ny");
    }

    #[test]
    fn test_check_required_focuses_blank_field() {
        let mut form = Form::new(vec![
            TextField::new("Name").required().with_value("Jane"),
            TextField::new("Phone"),
            TextField::new("Email").required(),
        ]);
        assert_eq!(form.check_required(), Err(FormError::Missing("Email")));
        assert_eq!(form.focus, 2);
    }

    #[test]
    fn test_submit_and_cancel_keys() {
        let mut form = Form::new(vec![TextField::new("A")]);
        assert_eq!(
            form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            FormKey::Submit
        );
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormKey::Cancel);
        assert_eq!(form.value("A"), "");
    }
}
