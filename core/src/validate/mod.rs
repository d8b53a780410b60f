//! Contact form validation.
//!
//! Every check is pure. [`validate`] reports all violations at once rather
//! than stopping at the first.

use crate::types::{ContactForm, Field};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Field-scoped validation failures, keyed by field.
pub type FieldErrors = BTreeMap<Field, String>;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const PHONE_INVALID: &str = "Please enter a valid phone number";
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// `local@domain.tld`, each part free of whitespace and `@`.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Optional `+`, one to four (optionally parenthesised) groups of 1-4 digits
/// each followed by an optional `-`, space or `.`, then a final group of 1-9 digits.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(?:\(?[0-9]{1,4}\)?[-\s.]?){1,4}[0-9]{1,9}$").expect("Invalid phone regex")
});

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Phone is optional: blank input is valid. Anything else is matched as typed.
pub fn validate_phone(phone: &str) -> bool {
    phone.trim().is_empty() || PHONE_REGEX.is_match(phone)
}

/// Checks every field independently. An empty map means the form can be submitted.
pub fn validate(form: &ContactForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED.to_string());
    }

    if form.email.trim().is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED.to_string());
    } else if !validate_email(&form.email) {
        errors.insert(Field::Email, EMAIL_INVALID.to_string());
    }

    if !validate_phone(&form.phone) {
        errors.insert(Field::Phone, PHONE_INVALID.to_string());
    }

    if form.message.trim().is_empty() {
        errors.insert(Field::Message, MESSAGE_REQUIRED.to_string());
    }

    errors
}
