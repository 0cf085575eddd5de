use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    types::Json,
};
use tracing::{info, warn};

use crate::{
    entities::document::Document,
    errors::AppError,
    repositories::document_store::DocumentStore,
};

const CONNECT_ATTEMPTS: u32 = 5;

/// Field every owned document carries; `migrations/0001_documents.sql` indexes it.
const OWNER_FIELD: &str = "user_id";

/// Opens the pool, backing off 2s, 4s, 8s... between failed attempts.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    let mut backoff = Duration::from_secs(2);

    loop {
        let connected = PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await;

        match connected {
            Ok(pool) => {
                info!(attempt, "Connected to Postgres document store");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                attempt += 1;
                warn!(
                    attempt,
                    max_attempts = CONNECT_ATTEMPTS,
                    error = %e,
                    "Postgres connection failed, retrying in {}",
                    humantime::format_duration(backoff)
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Documents kept as JSONB rows in a single `documents` table keyed by
/// `(collection, id)`. Each atomic primitive is one UPDATE statement, so the
/// row lock makes it safe under concurrent callers.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        PgDocumentStore { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = create_pool(database_url).await?;
        let store = PgDocumentStore::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Migration failed: {}", e)))
    }
}

fn not_found(collection: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{}/{}", collection, id))
}

fn into_document(body: Json<Value>, collection: &str, id: &str) -> Result<Document, AppError> {
    match body.0 {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::InternalError(format!("{}/{} is not a JSON object", collection, id))),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<(), AppError> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(Json(Value::Object(document)))
            .execute(&self.pool)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::DuplicateId(_) => AppError::DuplicateId(format!("{}/{}", collection, id)),
                other => other,
            })?;

        Ok(())
    }

    async fn fetch(&self, collection: &str, id: &str) -> Result<Document, AppError> {
        let body: Option<Json<Value>> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let body = body.ok_or_else(|| not_found(collection, id))?;
        into_document(body, collection, id)
    }

    async fn patch(&self, collection: &str, id: &str, fields: Document) -> Result<Document, AppError> {
        let body: Option<Json<Value>> = sqlx::query_scalar(
            r#"
            UPDATE documents SET body = body || $3
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .fetch_optional(&self.pool)
        .await?;

        let body = body.ok_or_else(|| not_found(collection, id))?;
        into_document(body, collection, id)
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(collection, id));
        }
        Ok(())
    }

    async fn query_by_field(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Document>, AppError> {
        let rows: Vec<(String, Json<Value>)> = match value {
            // Spelled out so the planner can use idx_documents_owner.
            Value::String(owner) if field == OWNER_FIELD => {
                sqlx::query_as(
                    r#"
                    SELECT id, body FROM documents
                    WHERE collection = $1 AND body ->> 'user_id' = $2
                    ORDER BY id
                    "#,
                )
                .bind(collection)
                .bind(owner.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as(
                    r#"
                    SELECT id, body FROM documents
                    WHERE collection = $1 AND body -> $2 = $3
                    ORDER BY id
                    "#,
                )
                .bind(collection)
                .bind(field)
                .bind(Json(value))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter()
            .map(|(id, body)| into_document(body, collection, &id))
            .collect()
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        by: i64,
        fields: Document,
    ) -> Result<Document, AppError> {
        let body: Option<Json<Value>> = sqlx::query_scalar(
            r#"
            UPDATE documents
            SET body = jsonb_set(
                    body,
                    ARRAY[$3::text],
                    to_jsonb(COALESCE((body ->> $3)::bigint, 0) + $4)
                ) || $5
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .bind(by)
        .bind(Json(Value::Object(fields)))
        .fetch_optional(&self.pool)
        .await?;

        let body = body.ok_or_else(|| not_found(collection, id))?;
        into_document(body, collection, id)
    }

    async fn array_append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError> {
        let body: Option<Json<Value>> = sqlx::query_scalar(
            r#"
            UPDATE documents
            SET body = jsonb_set(
                    body,
                    ARRAY[$3::text],
                    COALESCE(NULLIF(body -> $3, 'null'::jsonb), '[]'::jsonb) || jsonb_build_array($4::jsonb)
                ) || $5
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .bind(Json(value))
        .bind(Json(Value::Object(fields)))
        .fetch_optional(&self.pool)
        .await?;

        let body = body.ok_or_else(|| not_found(collection, id))?;
        into_document(body, collection, id)
    }

    async fn array_remove(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
        fields: Document,
    ) -> Result<Document, AppError> {
        let body: Option<Json<Value>> = sqlx::query_scalar(
            r#"
            UPDATE documents
            SET body = jsonb_set(
                    body,
                    ARRAY[$3::text],
                    COALESCE(
                        (
                            SELECT jsonb_agg(elem ORDER BY idx)
                            FROM jsonb_array_elements(COALESCE(NULLIF(body -> $3, 'null'::jsonb), '[]'::jsonb))
                                WITH ORDINALITY AS t(elem, idx)
                            WHERE elem <> $4::jsonb
                        ),
                        '[]'::jsonb
                    )
                ) || $5
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .bind(Json(value))
        .bind(Json(Value::Object(fields)))
        .fetch_optional(&self.pool)
        .await?;

        let body = body.ok_or_else(|| not_found(collection, id))?;
        into_document(body, collection, id)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed.");
    }
}
