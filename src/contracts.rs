// Contract-First Design - Document Store Boundary
// This module defines the contract the repository depends on: a
// collection-oriented client over one logical collection of contact
// documents. Hosted-store adapters implement this trait out of tree.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Contact, ContactDraft, ContactId, ContactPatch};

/// Name of the single collection this layer operates on
pub const CONTACTS_COLLECTION: &str = "contacts";

/// Failure surfaced by the underlying document store.
///
/// Carries the store's error code and message verbatim so the repository
/// can wrap them with a human-readable context string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code: {code})")]
pub struct StoreFailure {
    pub code: String,
    pub message: String,
}

impl StoreFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Failure for a write against a key the store does not hold
    pub fn unknown_key(id: &ContactId) -> Self {
        Self::new("not-found", format!("no document with key {id}"))
    }

    /// Failure for a lost connection to the hosted store
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new("unavailable", message)
    }
}

/// Equality filter accepted by [`DocumentStore::query`].
///
/// The hosted client offers only simple equality plus order-by, so this is
/// deliberately narrow: an optional match on the `active` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub active: Option<bool>,
}

impl ListFilter {
    /// No filter: the whole collection
    pub fn all() -> Self {
        Self::default()
    }

    /// Only documents with `active == true`
    pub fn active_only() -> Self {
        Self { active: Some(true) }
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active {
            Some(active) => write!(f, "active == {active}"),
            None => write!(f, "unfiltered"),
        }
    }
}

/// The contact document as it travels on the wire.
///
/// The store-assigned id is carried out-of-band as the document key and
/// never appears inside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContact {
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

impl StoredContact {
    /// Build a wire document from candidate form fields.
    ///
    /// Timestamps start unset; the repository stamps them.
    pub fn from_draft(draft: &ContactDraft) -> Self {
        Self {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            active: draft.active,
            created_at: None,
            updated_at: None,
        }
    }

    /// Merge the set fields of a patch into this document
    pub fn merge_patch(&mut self, patch: &ContactPatch) {
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }

    /// Attach the out-of-band key to produce the domain entity
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Core trait for the collection-oriented document store client.
///
/// All operations are asynchronous and may suspend the caller while
/// awaiting network I/O. No operation is cancellable once started and no
/// timeout is enforced at this layer; the client's own defaults apply.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document
    ///
    /// # Preconditions
    /// - `doc` is a well-formed contact document
    ///
    /// # Postconditions
    /// - The document is durably stored
    /// - Returns the store-assigned, non-empty key
    async fn insert(&self, doc: StoredContact) -> Result<ContactId, StoreFailure>;

    /// Retrieve a document by key
    ///
    /// # Postconditions
    /// - Returns `Some(doc)` if the key exists
    /// - Returns `None` if it does not; absence is not a failure
    /// - Does not modify any state
    async fn fetch(&self, id: &ContactId) -> Result<Option<StoredContact>, StoreFailure>;

    /// Replace an existing document
    ///
    /// # Preconditions
    /// - A document with `id` exists (callers pre-check; see the repository)
    ///
    /// # Postconditions
    /// - The stored document equals `doc`
    /// - Fails with an `unknown_key` code when the key is absent
    async fn apply(&self, id: &ContactId, doc: StoredContact) -> Result<(), StoreFailure>;

    /// Permanently remove a document
    ///
    /// # Postconditions
    /// - The key no longer resolves
    /// - Fails with an `unknown_key` code when the key is absent
    async fn remove(&self, id: &ContactId) -> Result<(), StoreFailure>;

    /// Query the collection with an equality filter
    ///
    /// # Postconditions
    /// - Results are ordered by `last_name` ascending
    /// - Only documents matching the filter are returned
    async fn query(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<(ContactId, StoredContact)>, StoreFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> StoredContact {
        StoredContact {
            first_name: "Ann".to_string(),
            last_name: "Archer".to_string(),
            email: "ann@example.com".to_string(),
            phone: "+12025550100".to_string(),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn draft_round_trips_through_wire_shape() {
        let draft = ContactDraft {
            first_name: "Ann".to_string(),
            last_name: "Archer".to_string(),
            email: "ann@example.com".to_string(),
            phone: "+12025550100".to_string(),
            active: true,
        };

        let doc = StoredContact::from_draft(&draft);
        assert_eq!(doc, sample_doc());

        let contact = doc.into_contact(ContactId::new("c-1").unwrap());
        assert_eq!(contact.first_name, "Ann");
        assert_eq!(contact.id.as_str(), "c-1");
    }

    #[test]
    fn merge_patch_leaves_unset_fields_alone() {
        let mut doc = sample_doc();
        doc.merge_patch(&ContactPatch::active(false));

        assert!(!doc.active);
        assert_eq!(doc.email, "ann@example.com");
    }

    #[test]
    fn store_failure_formats_code_and_message() {
        let failure = StoreFailure::unavailable("connection reset");
        assert_eq!(failure.to_string(), "connection reset (code: unavailable)");
    }
}
