use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{entities::document::Document, errors::AppError};

/// Key-value document interface over the persistence substrate.
///
/// Documents live in named groups (`users`, `clothing_items`, ...) and are
/// keyed by a string id. Every method is a single-document operation; the
/// `increment` and `array_*` primitives are atomic per document so callers
/// never need a read-modify-write cycle.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document. Fails with `DuplicateId` if the id is taken.
    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<(), AppError>;

    /// Fails with `NotFound` when absent.
    async fn fetch(&self, collection: &str, id: &str) -> Result<Document, AppError>;

    /// Shallow-merges `fields` into the document and returns the result.
    async fn patch(&self, collection: &str, id: &str, fields: Document) -> Result<Document, AppError>;

    async fn remove(&self, collection: &str, id: &str) -> Result<(), AppError>;

    /// All documents whose top-level `field` equals `value`, in store order.
    async fn query_by_field(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>, AppError>;

    /// Adds `by` to a numeric field (missing counts as 0) and merges `fields`.
    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        by: i64,
        fields: Document,
    ) -> Result<Document, AppError>;

    /// Appends `value` to an array field, duplicates included, and merges `fields`.
    async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError>;

    /// Drops every element equal to `value` from an array field and merges `fields`.
    async fn array_remove(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError>;

    async fn check_connection(&self) -> Result<(), AppError>;

    /// Releases the underlying connections. Later calls fail with `StoreUnavailable`.
    async fn close(&self);
}

pub type SharedStore = Arc<dyn DocumentStore>;
