//! # Comment Draft Model
//!
//! Transient state of the new-comment form. A draft exists only while the
//! form is open and is dropped together with it.

use bitflags::bitflags;

/// Input fields of the new-comment form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Body,
}

impl FormField {
    /// Next field in tab order, wrapping around
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Body,
            FormField::Body => FormField::Name,
        }
    }

    /// Invalid flag that belongs to this field
    pub fn flag(self) -> InvalidFields {
        match self {
            FormField::Name => InvalidFields::NAME,
            FormField::Email => InvalidFields::EMAIL,
            FormField::Body => InvalidFields::BODY,
        }
    }

    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Author Name",
            FormField::Email => "Author Email",
            FormField::Body => "Comment Text",
        }
    }

    /// Message shown under the input while it is invalid
    pub fn error_message(self) -> &'static str {
        match self {
            FormField::Name => "Name is required",
            FormField::Email => "Email is required",
            FormField::Body => "Enter some text",
        }
    }
}

bitflags! {
    /// Per-field validity of the draft; a set bit marks the field invalid
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvalidFields: u8 {
        const NAME  = 0b001;
        const EMAIL = 0b010;
        const BODY  = 0b100;

        const ALL = Self::NAME.bits() | Self::EMAIL.bits() | Self::BODY.bits();
    }
}

/// The new-comment form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub name: String,
    pub email: String,
    pub body: String,
    invalid: InvalidFields,
    active_field: Option<FormField>,
    submitting: bool,
}

impl CommentDraft {
    pub fn new() -> Self {
        Self {
            active_field: Some(FormField::Name),
            ..Self::default()
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Body => &self.body,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Body => &mut self.body,
        }
    }

    /// Replace a field's value. Editing a field clears its invalid flag.
    pub fn set_value<S: Into<String>>(&mut self, field: FormField, value: S) {
        *self.value_mut(field) = value.into();
        self.invalid.remove(field.flag());
    }

    /// Append a character to the active field
    pub fn push_char(&mut self, ch: char) {
        let field = self.active_field();
        self.value_mut(field).push(ch);
        self.invalid.remove(field.flag());
    }

    /// Remove the last character of the active field
    pub fn pop_char(&mut self) {
        let field = self.active_field();
        self.value_mut(field).pop();
        self.invalid.remove(field.flag());
    }

    pub fn active_field(&self) -> FormField {
        self.active_field.unwrap_or(FormField::Name)
    }

    pub fn focus_field(&mut self, field: FormField) {
        self.active_field = Some(field);
    }

    pub fn focus_next_field(&mut self) {
        self.active_field = Some(self.active_field().next());
    }

    pub fn invalid_fields(&self) -> InvalidFields {
        self.invalid
    }

    pub fn is_invalid(&self, field: FormField) -> bool {
        self.invalid.contains(field.flag())
    }

    pub fn mark_invalid(&mut self, fields: InvalidFields) {
        self.invalid |= fields;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Reset every field and flag ("Clear" button)
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.body.clear();
        self.invalid = InvalidFields::empty();
    }

    /// Keep the author so the next comment can be written right away
    pub fn reset_after_submit(&mut self) {
        self.body.clear();
        self.submitting = false;
        self.active_field = Some(FormField::Body);
    }
}
