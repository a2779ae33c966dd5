//! Quiz answer and form validation
//!
//! The `check_*` functions hold the decisions and never touch a page;
//! `validate_answers` and `validate_form` read the page and delegate.

pub mod answers;
pub mod form;

pub use answers::{AnswerCheck, Question, check_answer, check_answers, score_answers, validate_answers};
pub use form::{FieldError, FieldKind, check_field, validate_email, validate_form};
