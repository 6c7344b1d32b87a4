// Validated Types - Contact Domain Model
// This module provides strongly-typed wrappers that enforce invariants at construction.
// These types cannot be built with invalid data, eliminating entire classes of bugs.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque contact identifier assigned by the document store.
///
/// Guaranteed non-empty. The store carries it out-of-band as the document
/// key, so it never appears inside the wire document itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId {
    inner: String,
}

impl ContactId {
    /// Create an id from a store-assigned key
    ///
    /// # Invariants
    /// - Non-empty after trimming
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        ensure!(!id.trim().is_empty(), "Contact id cannot be empty");
        Ok(Self { inner: id })
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// The sole persisted entity: a person's name, email, phone, and active flag.
///
/// Timestamps are ISO-8601 strings stamped by the repository; `created_at`
/// is set once at creation and `updated_at` is refreshed on every
/// successful update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Candidate field values for a contact create/edit form.
///
/// `Default` mirrors the form's initial values: empty fields with
/// `active = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub active: bool,
}

impl Default for ContactDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            active: true,
        }
    }
}

impl ContactDraft {
    /// Start building a draft fluently
    pub fn builder() -> crate::builders::ContactDraftBuilder {
        crate::builders::ContactDraftBuilder::new()
    }
}

/// Partial field replacement for an update.
///
/// Only fields that are `Some` are merged into the target; everything else
/// retains its prior value. The repository refreshes `updated_at` itself,
/// so the patch never carries timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

impl ContactPatch {
    /// Start building a patch fluently
    pub fn builder() -> crate::builders::ContactPatchBuilder {
        crate::builders::ContactPatchBuilder::new()
    }

    /// A patch that only flips the active flag
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.active.is_none()
    }

    /// Merge the set fields into an in-memory contact
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(first_name) = &self.first_name {
            contact.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            contact.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
        }
        if let Some(active) = self.active {
            contact.active = active;
        }
    }
}
