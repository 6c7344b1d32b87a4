// In-memory Document Store Implementation
// This implements the DocumentStore trait over a process-local map with
// store-assigned keys. It is the reference backend for tests and for
// embedders running without a hosted store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::contracts::{DocumentStore, ListFilter, StoreFailure, StoredContact};
use crate::types::ContactId;

/// Process-local document store.
///
/// Keys are uuid-v4 strings assigned on insert, mirroring a hosted store's
/// opaque document keys. Ordering and filtering happen inside `query`
/// exactly as the hosted client would apply them server-side.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, StoredContact>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

/// Create a memory-backed document store
pub fn create_memory_store() -> MemoryDocumentStore {
    MemoryDocumentStore::new()
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, doc: StoredContact) -> Result<ContactId, StoreFailure> {
        let key = Uuid::new_v4().to_string();
        self.documents.write().insert(key.clone(), doc);

        ContactId::new(key).map_err(|e| StoreFailure::new("internal", e.to_string()))
    }

    async fn fetch(&self, id: &ContactId) -> Result<Option<StoredContact>, StoreFailure> {
        Ok(self.documents.read().get(id.as_str()).cloned())
    }

    async fn apply(&self, id: &ContactId, doc: StoredContact) -> Result<(), StoreFailure> {
        let mut documents = self.documents.write();
        match documents.get_mut(id.as_str()) {
            Some(slot) => {
                *slot = doc;
                Ok(())
            }
            None => Err(StoreFailure::unknown_key(id)),
        }
    }

    async fn remove(&self, id: &ContactId) -> Result<(), StoreFailure> {
        let mut documents = self.documents.write();
        match documents.remove(id.as_str()) {
            Some(_) => Ok(()),
            None => Err(StoreFailure::unknown_key(id)),
        }
    }

    async fn query(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<(ContactId, StoredContact)>, StoreFailure> {
        let documents = self.documents.read();

        let mut rows = Vec::with_capacity(documents.len());
        for (key, doc) in documents.iter() {
            if let Some(active) = filter.active {
                if doc.active != active {
                    continue;
                }
            }
            let id = ContactId::new(key.clone())
                .map_err(|e| StoreFailure::new("internal", e.to_string()))?;
            rows.push((id, doc.clone()));
        }

        // Order by last_name ascending; the key breaks ties deterministically
        rows.sort_by(|(a_id, a), (b_id, b)| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a_id.cmp(b_id))
        });

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn doc(first: &str, last: &str, active: bool) -> StoredContact {
        StoredContact {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "+12025550100".to_string(),
            active,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_unique_keys() -> Result<()> {
        let store = create_memory_store();

        let a = store.insert(doc("Ann", "Archer", true)).await?;
        let b = store.insert(doc("Bob", "Baker", true)).await?;

        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
        assert_eq!(store.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_miss_is_none_not_failure() -> Result<()> {
        let store = create_memory_store();
        let id = ContactId::new("missing")?;

        assert!(store.fetch(&id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn writes_against_unknown_keys_fail() -> Result<()> {
        let store = create_memory_store();
        let id = ContactId::new("missing")?;

        let apply = store.apply(&id, doc("Ann", "Archer", true)).await;
        assert_eq!(apply.unwrap_err().code, "not-found");

        let remove = store.remove(&id).await;
        assert_eq!(remove.unwrap_err().code, "not-found");
        Ok(())
    }

    #[tokio::test]
    async fn query_orders_by_last_name_and_filters_active() -> Result<()> {
        let store = create_memory_store();
        store.insert(doc("Carol", "Young", true)).await?;
        store.insert(doc("Ann", "Archer", false)).await?;
        store.insert(doc("Bob", "Miller", true)).await?;

        let all = store.query(ListFilter::all()).await?;
        let last_names: Vec<_> = all.iter().map(|(_, d)| d.last_name.as_str()).collect();
        assert_eq!(last_names, vec!["Archer", "Miller", "Young"]);

        let active = store.query(ListFilter::active_only()).await?;
        let last_names: Vec<_> = active.iter().map(|(_, d)| d.last_name.as_str()).collect();
        assert_eq!(last_names, vec!["Miller", "Young"]);
        Ok(())
    }
}
