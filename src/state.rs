// Contacts State Container
// Holds the canonical in-memory list of contacts plus loading/error flags,
// and reconciles it after each confirmed repository write. One instance per
// session; the repository is injected at construction and presentation
// collaborators only read snapshots and invoke handlers.
//
// Mutating handlers are serialized FIFO through an async mutex held for
// the full span of each operation, so concurrent completions cannot
// interleave their read-modify-write of the list. Local state is never
// updated speculatively ahead of confirmed persistence.

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::warn;

use crate::contracts::DocumentStore;
use crate::repository::{ContactRepository, RepositoryError};
use crate::types::{Contact, ContactDraft, ContactId, ContactPatch};

/// Point-in-time read view of the container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub contacts: Vec<Contact>,
    pub selected_contact: Option<Contact>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The single source of truth consumed by presentation collaborators.
pub struct ContactsState<S> {
    repository: ContactRepository<S>,
    snapshot: RwLock<StateSnapshot>,
    // FIFO queue for state-mutating operations
    op_lock: Mutex<()>,
}

/// Sets the loading flag for the span of one operation and guarantees it
/// is cleared again on every exit path.
struct LoadingGuard<'a> {
    snapshot: &'a RwLock<StateSnapshot>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(snapshot: &'a RwLock<StateSnapshot>) -> Self {
        snapshot.write().loading = true;
        Self { snapshot }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.snapshot.write().loading = false;
    }
}

impl<S: DocumentStore> ContactsState<S> {
    pub fn new(repository: ContactRepository<S>) -> Self {
        Self {
            repository,
            snapshot: RwLock::new(StateSnapshot::default()),
            op_lock: Mutex::new(()),
        }
    }

    /// Access the injected repository
    pub fn repository(&self) -> &ContactRepository<S> {
        &self.repository
    }

    // ---- snapshot reads -------------------------------------------------

    /// Current full read view
    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot.read().clone()
    }

    /// Current contact list
    pub fn contacts(&self) -> Vec<Contact> {
        self.snapshot.read().contacts.clone()
    }

    /// Currently selected contact, if any
    pub fn selected_contact(&self) -> Option<Contact> {
        self.snapshot.read().selected_contact.clone()
    }

    /// Whether an operation is in flight
    pub fn loading(&self) -> bool {
        self.snapshot.read().loading
    }

    /// Last recorded error message, if any
    pub fn error(&self) -> Option<String> {
        self.snapshot.read().error.clone()
    }

    /// Select a contact (or clear the selection)
    pub fn select(&self, contact: Option<Contact>) {
        self.snapshot.write().selected_contact = contact;
    }

    // ---- handlers -------------------------------------------------------

    /// Replace the list with the repository's `list` result.
    ///
    /// Failures are recorded in `error` and the previous list is kept.
    pub async fn fetch(&self, active_only: bool) {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::begin(&self.snapshot);

        match self.repository.list(active_only).await {
            Ok(contacts) => {
                let mut state = self.snapshot.write();
                state.contacts = contacts;
                state.error = None;
            }
            Err(err) => {
                warn!(error = %err, "fetch failed");
                self.snapshot.write().error = Some("Failed to fetch contacts".to_string());
            }
        }
    }

    /// Replace the list with the repository's `search` result.
    ///
    /// An empty or whitespace-only query behaves as an unfiltered fetch.
    pub async fn search(&self, query: &str) {
        if query.trim().is_empty() {
            return self.fetch(false).await;
        }

        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::begin(&self.snapshot);

        match self.repository.search(query).await {
            Ok(contacts) => {
                let mut state = self.snapshot.write();
                state.contacts = contacts;
                state.error = None;
            }
            Err(err) => {
                warn!(error = %err, "search failed");
                self.snapshot.write().error = Some("Failed to search contacts".to_string());
            }
        }
    }

    /// Create a contact and append it to the list.
    ///
    /// The new item is appended at the end rather than re-sorted; avoiding
    /// a re-query is a deliberate simplification. Returns the created
    /// contact, or re-throws the repository error after recording it.
    pub async fn add_contact(&self, draft: ContactDraft) -> Result<Contact, RepositoryError> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::begin(&self.snapshot);

        match self.repository.create(draft).await {
            Ok(contact) => {
                let mut state = self.snapshot.write();
                state.contacts.push(contact.clone());
                state.error = None;
                Ok(contact)
            }
            Err(err) => {
                warn!(error = %err, "add failed");
                self.snapshot.write().error = Some("Failed to add contact".to_string());
                Err(err)
            }
        }
    }

    /// Update a contact and merge the patch into the in-memory copy.
    ///
    /// Also merges into `selected_contact` when it is the same contact.
    /// On failure local state is left unchanged and the error re-thrown.
    pub async fn update_contact(
        &self,
        id: &ContactId,
        patch: ContactPatch,
    ) -> Result<(), RepositoryError> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::begin(&self.snapshot);

        match self.repository.update(id, patch.clone()).await {
            Ok(()) => {
                let mut state = self.snapshot.write();
                if let Some(contact) = state.contacts.iter_mut().find(|c| &c.id == id) {
                    patch.apply_to(contact);
                }
                if let Some(selected) = state.selected_contact.as_mut() {
                    if &selected.id == id {
                        patch.apply_to(selected);
                    }
                }
                state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "update failed");
                self.snapshot.write().error = Some("Failed to update contact".to_string());
                Err(err)
            }
        }
    }

    /// Delete a contact and remove it from the list.
    ///
    /// Clears `selected_contact` when it was the deleted contact. On
    /// failure local state is left unchanged and the error re-thrown.
    pub async fn delete_contact(&self, id: &ContactId) -> Result<(), RepositoryError> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::begin(&self.snapshot);

        match self.repository.delete(id).await {
            Ok(()) => {
                let mut state = self.snapshot.write();
                state.contacts.retain(|c| &c.id != id);
                if state
                    .selected_contact
                    .as_ref()
                    .is_some_and(|selected| &selected.id == id)
                {
                    state.selected_contact = None;
                }
                state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "delete failed");
                self.snapshot.write().error = Some("Failed to delete contact".to_string());
                Err(err)
            }
        }
    }

    /// Flip a contact's active flag
    pub async fn toggle_active(
        &self,
        id: &ContactId,
        current_active: bool,
    ) -> Result<(), RepositoryError> {
        self.update_contact(id, ContactPatch::active(!current_active))
            .await
    }

    /// Fetch one contact by id.
    ///
    /// A miss returns `Ok(None)` without touching `error`; a true
    /// repository failure records it and re-throws.
    pub async fn get_contact(&self, id: &ContactId) -> Result<Option<Contact>, RepositoryError> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::begin(&self.snapshot);

        match self.repository.get_by_id(id).await {
            Ok(contact) => {
                self.snapshot.write().error = None;
                Ok(contact)
            }
            Err(err) => {
                warn!(error = %err, "get failed");
                self.snapshot.write().error = Some("Failed to fetch contact".to_string());
                Err(err)
            }
        }
    }
}

/// Create a state container over the given store and run the initial
/// unfiltered fetch. A failing initial fetch is recorded in `error` rather
/// than propagated, matching the session's lazy startup.
pub async fn create_contacts_state<S: DocumentStore>(store: S) -> ContactsState<S> {
    let state = ContactsState::new(ContactRepository::new(store));
    state.fetch(false).await;
    state
}
