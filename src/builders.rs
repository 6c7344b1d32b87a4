// Builder Patterns - Fluent Construction
// This module provides fluent builder APIs for constructing drafts and
// patches with sensible defaults.

use crate::types::{ContactDraft, ContactPatch};

/// Fluent builder for creating a [`ContactDraft`]
///
/// Starts from the form's initial values: empty fields with
/// `active = true`. Field-level validation is a separate concern; run
/// [`crate::validation::validate_draft`] before handing the draft to the
/// repository.
#[derive(Debug, Clone, Default)]
pub struct ContactDraftBuilder {
    draft: ContactDraft,
}

impl ContactDraftBuilder {
    /// Create a new draft builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.draft.first_name = value.into();
        self
    }

    /// Set the last name
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.draft.last_name = value.into();
        self
    }

    /// Set the email address
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.draft.email = value.into();
        self
    }

    /// Set the phone number
    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.draft.phone = value.into();
        self
    }

    /// Override the active flag (defaults to `true`)
    pub fn active(mut self, active: bool) -> Self {
        self.draft.active = active;
        self
    }

    /// Build the draft
    pub fn build(self) -> ContactDraft {
        self.draft
    }
}

/// Fluent builder for creating a [`ContactPatch`]
///
/// Fields never set stay untouched when the patch is merged.
#[derive(Debug, Clone, Default)]
pub struct ContactPatchBuilder {
    patch: ContactPatch,
}

impl ContactPatchBuilder {
    /// Create a new patch builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the first name
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.patch.first_name = Some(value.into());
        self
    }

    /// Replace the last name
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.patch.last_name = Some(value.into());
        self
    }

    /// Replace the email address
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.patch.email = Some(value.into());
        self
    }

    /// Replace the phone number
    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.patch.phone = Some(value.into());
        self
    }

    /// Replace the active flag
    pub fn active(mut self, active: bool) -> Self {
        self.patch.active = Some(active);
        self
    }

    /// Build the patch
    pub fn build(self) -> ContactPatch {
        self.patch
    }
}
