use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use serde_json::Value;

use crate::{
    entities::document::Document,
    errors::AppError,
    repositories::document_store::DocumentStore,
};

type Key = (String, String);

/// In-process document store. Each document sits behind its shard lock,
/// so the atomic primitives hold that lock for the whole update.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<Key, Document>,
    closed: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(AppError::StoreUnavailable("Memory store is closed".into()));
        }
        Ok(())
    }

    fn key(collection: &str, id: &str) -> Key {
        (collection.to_string(), id.to_string())
    }

    /// Runs `update` against the live document while holding its lock.
    fn modify<F>(&self, collection: &str, id: &str, update: F) -> Result<Document, AppError>
    where
        F: FnOnce(&mut Document) -> Result<(), AppError>,
    {
        self.ensure_open()?;
        let mut entry = self
            .documents
            .get_mut(&Self::key(collection, id))
            .ok_or_else(|| not_found(collection, id))?;

        let mut staged = entry.value().clone();
        update(&mut staged)?;
        *entry.value_mut() = staged.clone();
        Ok(staged)
    }
}

fn not_found(collection: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{}/{}", collection, id))
}

fn merge(target: &mut Document, fields: Document) {
    for (key, value) in fields {
        target.insert(key, value);
    }
}

fn array_field<'a>(document: &'a mut Document, field: &str) -> Result<&'a mut Vec<Value>, AppError> {
    let slot = document
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    slot.as_array_mut()
        .ok_or_else(|| AppError::InternalError(format!("Field {} is not an array", field)))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<(), AppError> {
        self.ensure_open()?;
        match self.documents.entry(Self::key(collection, id)) {
            Entry::Occupied(_) => Err(AppError::DuplicateId(format!("{}/{}", collection, id))),
            Entry::Vacant(slot) => {
                slot.insert(document);
                Ok(())
            }
        }
    }

    async fn fetch(&self, collection: &str, id: &str) -> Result<Document, AppError> {
        self.ensure_open()?;
        self.documents
            .get(&Self::key(collection, id))
            .map(|doc| doc.value().clone())
            .ok_or_else(|| not_found(collection, id))
    }

    async fn patch(&self, collection: &str, id: &str, fields: Document) -> Result<Document, AppError> {
        self.modify(collection, id, |doc| {
            merge(doc, fields);
            Ok(())
        })
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.ensure_open()?;
        self.documents
            .remove(&Self::key(collection, id))
            .map(|_| ())
            .ok_or_else(|| not_found(collection, id))
    }

    async fn query_by_field(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>, AppError> {
        self.ensure_open()?;
        let documents = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .filter(|entry| entry.value().get(field) == Some(value))
            .map(|entry| entry.value().clone())
            .collect();

        Ok(documents)
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        by: i64,
        fields: Document,
    ) -> Result<Document, AppError> {
        self.modify(collection, id, |doc| {
            let current = match doc.get(field) {
                None | Some(Value::Null) => 0,
                Some(v) => v.as_i64().ok_or_else(|| {
                    AppError::InternalError(format!("Field {} is not an integer", field))
                })?,
            };
            doc.insert(field.to_string(), Value::from(current + by));
            merge(doc, fields);
            Ok(())
        })
    }

    async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError> {
        self.modify(collection, id, |doc| {
            array_field(doc, field)?.push(value);
            merge(doc, fields);
            Ok(())
        })
    }

    async fn array_remove(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError> {
        self.modify(collection, id, |doc| {
            array_field(doc, field)?.retain(|existing| existing != &value);
            merge(doc, fields);
            Ok(())
        })
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        tracing::info!("Memory document store closed ({} documents dropped)", self.documents.len());
        self.documents.clear();
    }
}
