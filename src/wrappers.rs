// Wrapper Components - Store Decorators
// This module provides high-level wrappers that automatically apply
// tracing and timing to any document store. There is deliberately no
// retry wrapper: the error policy is no-automatic-retry, failures surface
// immediately to the repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::contracts::{
    DocumentStore, ListFilter, StoreFailure, StoredContact, CONTACTS_COLLECTION,
};
use crate::observability::{
    log_operation, record_metric, ContactOperation, MetricType, OperationContext,
};
use crate::types::ContactId;

/// Store wrapper that adds automatic tracing to all operations
pub struct TracedStore<S: DocumentStore> {
    inner: S,
    trace_id: Uuid,
    operation_count: AtomicU64,
}

impl<S: DocumentStore> TracedStore<S> {
    /// Wrap a store implementation with tracing
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            trace_id: Uuid::new_v4(),
            operation_count: AtomicU64::new(0),
        }
    }

    /// Get the wrapper's trace ID
    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// Get the number of operations performed through this wrapper
    pub fn operation_count(&self) -> u64 {
        self.operation_count.load(Ordering::Relaxed)
    }

    fn increment_op_count(&self) {
        self.operation_count.fetch_add(1, Ordering::Relaxed);
    }

    fn as_unit_result<T>(result: &Result<T, StoreFailure>) -> anyhow::Result<()> {
        result
            .as_ref()
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{e}"))
    }
}

/// Create a traced store over the given backend
pub fn create_traced_store<S: DocumentStore>(inner: S) -> TracedStore<S> {
    TracedStore::new(inner)
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for TracedStore<S> {
    async fn insert(&self, doc: StoredContact) -> Result<ContactId, StoreFailure> {
        self.increment_op_count();
        debug!("[{}] inserting contact document", self.trace_id);

        let mut ctx = OperationContext::new("store.insert");
        ctx.add_attribute("collection", CONTACTS_COLLECTION);
        let result = self.inner.insert(doc).await;

        let assigned = result
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|_| "unassigned".to_string());
        log_operation(
            &ctx,
            &ContactOperation::StoreWrite { id: assigned },
            &Self::as_unit_result(&result),
        );

        result
    }

    async fn fetch(&self, id: &ContactId) -> Result<Option<StoredContact>, StoreFailure> {
        self.increment_op_count();
        debug!("[{}] fetching contact document: {}", self.trace_id, id);

        let ctx = OperationContext::new("store.fetch");
        let result = self.inner.fetch(id).await;

        let found = matches!(&result, Ok(Some(_)));
        log_operation(
            &ctx,
            &ContactOperation::StoreRead {
                id: id.to_string(),
                found,
            },
            &Self::as_unit_result(&result),
        );

        result
    }

    async fn apply(&self, id: &ContactId, doc: StoredContact) -> Result<(), StoreFailure> {
        self.increment_op_count();
        debug!("[{}] replacing contact document: {}", self.trace_id, id);

        let ctx = OperationContext::new("store.apply");
        let result = self.inner.apply(id, doc).await;

        log_operation(
            &ctx,
            &ContactOperation::StoreWrite { id: id.to_string() },
            &Self::as_unit_result(&result),
        );

        result
    }

    async fn remove(&self, id: &ContactId) -> Result<(), StoreFailure> {
        self.increment_op_count();
        debug!("[{}] removing contact document: {}", self.trace_id, id);

        let ctx = OperationContext::new("store.remove");
        let result = self.inner.remove(id).await;

        log_operation(
            &ctx,
            &ContactOperation::StoreDelete { id: id.to_string() },
            &Self::as_unit_result(&result),
        );

        result
    }

    async fn query(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<(ContactId, StoredContact)>, StoreFailure> {
        self.increment_op_count();
        debug!("[{}] querying contacts: {}", self.trace_id, filter);

        let mut ctx = OperationContext::new("store.query");
        ctx.add_attribute("collection", CONTACTS_COLLECTION);
        let start = Instant::now();
        let result = self.inner.query(filter).await;
        let duration = start.elapsed();

        let count = result.as_ref().map(|rows| rows.len()).unwrap_or(0);
        record_metric(MetricType::Histogram {
            name: "store.query.duration",
            value: duration.as_millis() as f64,
            unit: "ms",
        });
        record_metric(MetricType::Gauge {
            name: "store.query.count",
            value: count as f64,
        });

        log_operation(
            &ctx,
            &ContactOperation::StoreQuery {
                active_only: filter.active == Some(true),
                result_count: count,
            },
            &Self::as_unit_result(&result),
        );

        result
    }
}
