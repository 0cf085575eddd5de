use std::{future::Future, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::{
    entities::document::Document,
    errors::AppError,
    repositories::document_store::DocumentStore,
    settings::AppConfig,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorePolicy {
    pub timeout: Duration,
    /// Extra attempts for reads after a `StoreUnavailable` failure.
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl StorePolicy {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let timeout = config
            .store_timeout()
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        let retry_backoff = config
            .store_retry_backoff()
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(StorePolicy {
            timeout,
            max_retries: config.store_max_retries,
            retry_backoff,
        })
    }
}

impl Default for StorePolicy {
    fn default() -> Self {
        StorePolicy {
            timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_backoff: Duration::from_millis(100),
        }
    }
}

/// Wraps any store with a per-call deadline. Reads are retried with
/// doubling backoff on transport failures. Writes run exactly once.
pub struct GuardedStore<S> {
    inner: S,
    policy: StorePolicy,
}

impl<S: DocumentStore> GuardedStore<S> {
    pub fn new(inner: S, policy: StorePolicy) -> Self {
        GuardedStore { inner, policy }
    }

    async fn once<T, F>(&self, op: &'static str, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.policy.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, timeout = ?self.policy.timeout, "Store call timed out");
                Err(AppError::Timeout(format!(
                    "{} exceeded {}",
                    op,
                    humantime::format_duration(self.policy.timeout)
                )))
            }
        }
    }

    async fn read<T, F, Fut>(&self, op: &'static str, mut call: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut attempt = 0;
        let mut backoff = self.policy.retry_backoff;

        loop {
            match self.once(op, call()).await {
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    warn!(
                        op,
                        attempt,
                        max_retries = self.policy.max_retries,
                        error = %e,
                        "Store read failed, retrying in {}",
                        humantime::format_duration(backoff)
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for GuardedStore<S> {
    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<(), AppError> {
        self.once("put", self.inner.put(collection, id, document)).await
    }

    async fn fetch(&self, collection: &str, id: &str) -> Result<Document, AppError> {
        self.read("fetch", || self.inner.fetch(collection, id)).await
    }

    async fn patch(&self, collection: &str, id: &str, fields: Document) -> Result<Document, AppError> {
        self.once("patch", self.inner.patch(collection, id, fields)).await
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.once("remove", self.inner.remove(collection, id)).await
    }

    async fn query_by_field(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>, AppError> {
        self.read("query_by_field", || self.inner.query_by_field(collection, field, value))
            .await
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        by: i64,
        fields: Document,
    ) -> Result<Document, AppError> {
        self.once("increment", self.inner.increment(collection, id, field, by, fields))
            .await
    }

    async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError> {
        self.once("array_append", self.inner.array_append(collection, id, field, value, fields))
            .await
    }

    async fn array_remove(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError> {
        self.once("array_remove", self.inner.array_remove(collection, id, field, value, fields))
            .await
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        self.read("check_connection", || self.inner.check_connection()).await
    }

    async fn close(&self) {
        self.inner.close().await;
    }
}
