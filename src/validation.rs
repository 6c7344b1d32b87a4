// Validation Layer - Field Rules
// This module provides pure validation of candidate contact records.
// Rules are evaluated independently per field and all errors are
// collected, never short-circuited, so forms can surface every problem
// at once. Re-run on every field change; no side effects.

use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::types::{Contact, ContactDraft, ContactId};

/// Field keys used in [`FieldErrors`]
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{10,15}$").expect("phone regex is valid"));

/// Mapping from field name to a human-readable error message.
///
/// Preserves the order fields were validated in so forms render errors in
/// a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: IndexMap<&'static str, String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for one field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn record(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.errors.insert(field, message);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for FieldErrors {}

/// Validate the first name field
pub fn validate_first_name(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("First Name is required".to_string());
    }
    Ok(())
}

/// Validate the last name field
pub fn validate_last_name(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Last Name is required".to_string());
    }
    Ok(())
}

/// Validate the email field against grammar and uniqueness.
///
/// Uniqueness is a case-sensitive exact match against every other
/// contact's email; `exclude` names the contact being edited so its own
/// prior value does not count as a duplicate.
pub fn validate_email(
    value: &str,
    contacts: &[Contact],
    exclude: Option<&ContactId>,
) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if !EMAIL_RE.is_match(value) {
        return Err("Invalid email".to_string());
    }
    let duplicate = contacts
        .iter()
        .any(|contact| contact.email == value && Some(&contact.id) != exclude);
    if duplicate {
        return Err("Email already exists".to_string());
    }
    Ok(())
}

/// Validate the phone field against the international format
pub fn validate_phone(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Phone is required".to_string());
    }
    if !PHONE_RE.is_match(value) {
        return Err("Phone must be in international format, e.g. +1234567890".to_string());
    }
    Ok(())
}

/// Run the full rule set over a candidate draft.
///
/// `contacts` is the current full contact list used for the email
/// uniqueness check; `exclude` is the id being edited, if any. Returns
/// `Ok(())` when every field passes, otherwise the collected errors.
pub fn validate_draft(
    draft: &ContactDraft,
    contacts: &[Contact],
    exclude: Option<&ContactId>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    errors.record(FIRST_NAME, validate_first_name(&draft.first_name));
    errors.record(LAST_NAME, validate_last_name(&draft.last_name));
    errors.record(EMAIL, validate_email(&draft.email, contacts, exclude));
    errors.record(PHONE, validate_phone(&draft.phone));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
