// Contact Repository
// Translates the six logical contact operations into document-store calls,
// normalizes results into the Contact shape, and maps store failures into
// a single error type. Owns translation to/from the wire representation
// and the stamping of created_at/updated_at.

use chrono::Utc;
use tracing::{debug, instrument};

use crate::contracts::{DocumentStore, ListFilter, StoreFailure, StoredContact};
use crate::types::{Contact, ContactDraft, ContactId, ContactPatch};

/// Errors surfaced by repository operations.
///
/// Absence on a read is not an error (`get_by_id` returns `Ok(None)`);
/// `NotFound` is reserved for writes against an id that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The target id no longer exists, e.g. deleted concurrently elsewhere
    #[error("Contact with id {id} not found")]
    NotFound { id: ContactId },

    /// Any underlying store failure, wrapping the original code/message
    /// with a human-readable context string
    #[error("{context}: {message} (code: {code})")]
    Store {
        context: String,
        code: String,
        message: String,
    },
}

impl RepositoryError {
    fn store(context: impl Into<String>, failure: StoreFailure) -> Self {
        Self::Store {
            context: context.into(),
            code: failure.code,
            message: failure.message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Repository over any [`DocumentStore`], constructor-injected.
pub struct ContactRepository<S> {
    store: S,
}

impl<S: DocumentStore> ContactRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new contact.
    ///
    /// Stamps `created_at`/`updated_at` to now and returns the contact
    /// with the store-assigned id.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: ContactDraft) -> Result<Contact, RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let mut doc = StoredContact::from_draft(&draft);
        doc.created_at = Some(now.clone());
        doc.updated_at = Some(now);

        let id = self
            .store
            .insert(doc.clone())
            .await
            .map_err(|failure| RepositoryError::store("Failed to add contact", failure))?;

        debug!(id = %id, "contact created");
        Ok(doc.into_contact(id))
    }

    /// List all contacts ordered by `last_name` ascending.
    ///
    /// With `active_only`, filters to `active == true` store-side before
    /// ordering.
    #[instrument(skip(self))]
    pub async fn list(&self, active_only: bool) -> Result<Vec<Contact>, RepositoryError> {
        let filter = if active_only {
            ListFilter::active_only()
        } else {
            ListFilter::all()
        };

        let rows = self
            .store
            .query(filter)
            .await
            .map_err(|failure| RepositoryError::store("Failed to get contacts", failure))?;

        Ok(rows
            .into_iter()
            .map(|(id, doc)| doc.into_contact(id))
            .collect())
    }

    /// Get one contact by id; `Ok(None)` when no such document exists.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &ContactId) -> Result<Option<Contact>, RepositoryError> {
        let doc = self.store.fetch(id).await.map_err(|failure| {
            RepositoryError::store(format!("Failed to get contact with id {id}"), failure)
        })?;

        Ok(doc.map(|doc| doc.into_contact(id.clone())))
    }

    /// Merge a partial update into an existing contact and refresh
    /// `updated_at`.
    ///
    /// Existence is checked before writing so a vanished id surfaces as
    /// [`RepositoryError::NotFound`] rather than a store-level write
    /// failure. Costs a second round-trip to the store.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &ContactId, patch: ContactPatch) -> Result<(), RepositoryError> {
        let context = format!("Failed to update contact with id {id}");

        let existing = self
            .store
            .fetch(id)
            .await
            .map_err(|failure| RepositoryError::store(context.clone(), failure))?;

        let Some(mut doc) = existing else {
            return Err(RepositoryError::NotFound { id: id.clone() });
        };

        doc.merge_patch(&patch);
        doc.updated_at = Some(Utc::now().to_rfc3339());

        self.store
            .apply(id, doc)
            .await
            .map_err(|failure| RepositoryError::store(context, failure))?;

        debug!(id = %id, "contact updated");
        Ok(())
    }

    /// Permanently delete a contact; [`RepositoryError::NotFound`] when the
    /// id does not exist, including on a repeated delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ContactId) -> Result<(), RepositoryError> {
        let context = format!("Failed to delete contact with id {id}");

        let existing = self
            .store
            .fetch(id)
            .await
            .map_err(|failure| RepositoryError::store(context.clone(), failure))?;

        if existing.is_none() {
            return Err(RepositoryError::NotFound { id: id.clone() });
        }

        self.store
            .remove(id)
            .await
            .map_err(|failure| RepositoryError::store(context, failure))?;

        debug!(id = %id, "contact deleted");
        Ok(())
    }

    /// Search contacts by name, surname, email, or phone.
    ///
    /// Fetches the full collection and scans client-side: case-insensitive
    /// substring match against `first_name`, `last_name`, and `email`, and
    /// a plain substring match against `phone`. A contact matching any of
    /// the four fields is returned. The store has no native full-text
    /// search, so there is no server-side alternative.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Contact>, RepositoryError> {
        let rows = self
            .store
            .query(ListFilter::all())
            .await
            .map_err(|failure| RepositoryError::store("Failed to search contacts", failure))?;

        let needle = query.trim().to_lowercase();
        let matches: Vec<Contact> = rows
            .into_iter()
            .map(|(id, doc)| doc.into_contact(id))
            .filter(|contact| contact_matches(contact, &needle))
            .collect();

        debug!(query = %query, result_count = matches.len(), "search completed");
        Ok(matches)
    }
}

/// Case-insensitive substring match on names and email, plain substring
/// match on phone; logical OR across the four fields.
fn contact_matches(contact: &Contact, needle: &str) -> bool {
    contact.first_name.to_lowercase().contains(needle)
        || contact.last_name.to_lowercase().contains(needle)
        || contact.email.to_lowercase().contains(needle)
        || contact.phone.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: &str, last: &str, email: &str, phone: &str) -> Contact {
        Contact {
            id: ContactId::new("c-1").unwrap(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn match_is_case_insensitive_on_names_and_email() {
        let c = contact("Ann", "Archer", "x@ann.io", "+12025550100");

        assert!(contact_matches(&c, "ann"));
        assert!(contact_matches(&c, "archer"));
        assert!(contact_matches(&c, "x@ann"));
        assert!(!contact_matches(&c, "bob"));
    }

    #[test]
    fn phone_match_is_plain_substring() {
        let c = contact("Ann", "Archer", "ann@example.com", "+12025550100");

        assert!(contact_matches(&c, "2025550"));
        assert!(contact_matches(&c, "+1202"));
        assert!(!contact_matches(&c, "555-01"));
    }

    #[test]
    fn not_found_formats_the_id() {
        let err = RepositoryError::NotFound {
            id: ContactId::new("abc").unwrap(),
        };
        assert_eq!(err.to_string(), "Contact with id abc not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn store_error_carries_context_code_and_message() {
        let err = RepositoryError::store(
            "Failed to add contact",
            StoreFailure::unavailable("connection reset"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to add contact: connection reset (code: unavailable)"
        );
        assert!(!err.is_not_found());
    }
}
