//! Required-field and e-mail validation for page forms

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::page::{ElementRef, Page};

/// Loose `local@domain.tld` shape (compiled once)
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Class toggled on fields that fail validation
pub const ERROR_CLASS: &str = "error";

/// Tags that can carry a `required` constraint
const FIELD_TAGS: [&str; 3] = ["input", "textarea", "select"];

/// How a field's value is checked beyond being non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

impl FieldKind {
    /// Derive the kind from an input's `type` attribute
    pub fn from_input_type(input_type: Option<&str>) -> Self {
        match input_type {
            Some(t) if t.eq_ignore_ascii_case("email") => FieldKind::Email,
            _ => FieldKind::Text,
        }
    }
}

/// Why a required field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("this field is required")]
    Empty,
    #[error("enter a valid email address")]
    InvalidEmail,
}

/// Check an e-mail address against the `local@domain.tld` pattern
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check a required field's value
pub fn check_field(value: &str, kind: FieldKind) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Empty);
    }
    if kind == FieldKind::Email && !validate_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// Required `input`, `textarea` and `select` elements inside `form`
pub fn required_fields<P: Page + ?Sized>(page: &P, form: ElementRef) -> Vec<ElementRef> {
    page.descendants(form)
        .into_iter()
        .filter(|el| {
            FIELD_TAGS.contains(&page.tag_name(*el).as_str())
                && page.attribute(*el, "required").is_some()
        })
        .collect()
}

/// Validate every required field of the form with id `form_id`
///
/// Each field's `error` class is set to match its own result. A missing
/// form is reported as invalid.
pub fn validate_form<P: Page + ?Sized>(page: &mut P, form_id: &str) -> bool {
    let Some(form) = page.element_by_id(form_id) else {
        tracing::debug!("Form #{} not found", form_id);
        return false;
    };

    let mut all_valid = true;
    for field in required_fields(page, form) {
        let kind = FieldKind::from_input_type(page.attribute(field, "type").as_deref());
        let outcome = check_field(&page.value(field), kind);
        page.set_class(field, ERROR_CLASS, outcome.is_err());
        if let Err(e) = outcome {
            tracing::debug!("Field rejected: {}", e);
            all_valid = false;
        }
    }
    all_valid
}
