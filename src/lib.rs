// Rolodex - Contact Data-Access and State-Synchronization Layer
// Root library module

pub mod builders;
pub mod contracts;
pub mod memory_store;
pub mod observability;
pub mod repository;
pub mod state;
pub mod types;
pub mod validation;
pub mod wrappers;

// Re-export key types
pub use observability::{
    init_logging, init_logging_with_level, log_operation, metrics_snapshot, record_metric,
    with_trace_id, ContactOperation, MetricType, OperationContext,
};

pub use contracts::{DocumentStore, ListFilter, StoreFailure, StoredContact, CONTACTS_COLLECTION};

// Re-export validated types
pub use types::{Contact, ContactDraft, ContactId, ContactPatch};

// Re-export validation entry points
pub use validation::{
    validate_draft, validate_email, validate_first_name, validate_last_name, validate_phone,
    FieldErrors,
};

// Re-export builders
pub use builders::{ContactDraftBuilder, ContactPatchBuilder};

// Re-export wrappers
pub use wrappers::{create_traced_store, TracedStore};

// Re-export store implementations
pub use memory_store::{create_memory_store, MemoryDocumentStore};

// Re-export the repository and state container
pub use repository::{ContactRepository, RepositoryError};
pub use state::{create_contacts_state, ContactsState, StateSnapshot};
