//! # Form Validation
//!
//! A field is valid when its trimmed value is not empty. There is no format
//! checking, so any non-blank email is accepted.

use crate::app::models::{CommentDraft, FormField, InvalidFields};

/// Client-side validation failure; never reaches the network layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required fields are empty: {0:?}")]
    MissingFields(InvalidFields),
}

impl ValidationError {
    pub fn fields(&self) -> InvalidFields {
        match self {
            ValidationError::MissingFields(fields) => *fields,
        }
    }
}

pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check every field of the draft and report all blank ones at once
pub fn validate_draft(draft: &CommentDraft) -> Result<(), ValidationError> {
    let mut missing = InvalidFields::empty();
    for field in [FormField::Name, FormField::Email, FormField::Body] {
        if !is_filled(draft.value(field)) {
            missing |= field.flag();
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
