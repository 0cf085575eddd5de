use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    constants::COLLECTIONS,
    entities::{
        collection::{Collection, CollectionInsert},
        document::{from_document, to_document, Document},
    },
    errors::AppError,
    repositories::{
        document_store::SharedStore,
        store_repo::{assign_id, prepare_patch, touch, StoreCollectionRepo},
    },
};

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    async fn create_collection(&self, insert: &CollectionInsert) -> Result<Collection, AppError>;

    async fn get_collection(&self, id: &str) -> Result<Collection, AppError>;

    async fn update_collection(&self, id: &str, fields: Document) -> Result<Collection, AppError>;

    async fn delete_collection(&self, id: &str) -> Result<(), AppError>;

    async fn list_collections_by_user(&self, user_id: &str) -> Result<Vec<Collection>, AppError>;

    /// Always appends, even when the id is already present.
    async fn append_outfit_id(&self, id: &str, outfit_id: &str) -> Result<Collection, AppError>;

    /// Removes every occurrence of `outfit_id`.
    async fn remove_outfit_id(&self, id: &str, outfit_id: &str) -> Result<Collection, AppError>;
}

impl StoreCollectionRepo {
    pub fn new(store: SharedStore) -> Self {
        StoreCollectionRepo { store }
    }
}

#[async_trait]
impl CollectionRepository for StoreCollectionRepo {
    async fn create_collection(&self, insert: &CollectionInsert) -> Result<Collection, AppError> {
        let id = assign_id(insert.id.clone());
        let collection = insert.clone().into_collection(id, Utc::now());

        self.store.put(COLLECTIONS, &collection.id, to_document(&collection)?).await?;

        info!(collection_id = %collection.id, user_id = %collection.user_id, "Created collection");
        Ok(collection)
    }

    async fn get_collection(&self, id: &str) -> Result<Collection, AppError> {
        debug!(collection_id = id, "Fetching collection");
        from_document(self.store.fetch(COLLECTIONS, id).await?)
    }

    async fn update_collection(&self, id: &str, fields: Document) -> Result<Collection, AppError> {
        let patch = prepare_patch(fields, Utc::now())?;
        let document = self.store.patch(COLLECTIONS, id, patch).await?;

        info!(collection_id = id, "Updated collection");
        from_document(document)
    }

    async fn delete_collection(&self, id: &str) -> Result<(), AppError> {
        self.store.remove(COLLECTIONS, id).await?;

        info!(collection_id = id, "Deleted collection");
        Ok(())
    }

    async fn list_collections_by_user(&self, user_id: &str) -> Result<Vec<Collection>, AppError> {
        let documents = self
            .store
            .query_by_field(COLLECTIONS, "user_id", &Value::from(user_id))
            .await?;

        debug!(user_id, count = documents.len(), "Listed collections");
        documents.into_iter().map(from_document).collect()
    }

    async fn append_outfit_id(&self, id: &str, outfit_id: &str) -> Result<Collection, AppError> {
        let document = self
            .store
            .array_append(COLLECTIONS, id, "outfit_ids", Value::from(outfit_id), touch(Utc::now())?)
            .await?;

        info!(collection_id = id, outfit_id, "Added outfit to collection");
        from_document(document)
    }

    async fn remove_outfit_id(&self, id: &str, outfit_id: &str) -> Result<Collection, AppError> {
        let document = self
            .store
            .array_remove(COLLECTIONS, id, "outfit_ids", Value::from(outfit_id), touch(Utc::now())?)
            .await?;

        info!(collection_id = id, outfit_id, "Removed outfit from collection");
        from_document(document)
    }
}
