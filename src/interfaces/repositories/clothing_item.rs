use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    constants::CLOTHING_ITEMS,
    entities::{
        clothing_item::{ClothingItem, ClothingItemInsert},
        document::{from_document, to_document, Document},
    },
    errors::AppError,
    repositories::{
        document_store::SharedStore,
        store_repo::{assign_id, prepare_patch, touch, StoreClothingItemRepo},
    },
};

#[async_trait]
pub trait ClothingItemRepository: Send + Sync {
    /// Stores a new item; fails with `DuplicateId` if a supplied id is taken.
    async fn create_item(&self, insert: &ClothingItemInsert) -> Result<ClothingItem, AppError>;

    async fn get_item(&self, id: &str) -> Result<ClothingItem, AppError>;

    async fn update_item(&self, id: &str, fields: Document) -> Result<ClothingItem, AppError>;

    async fn delete_item(&self, id: &str) -> Result<(), AppError>;

    async fn list_items_by_user(&self, user_id: &str) -> Result<Vec<ClothingItem>, AppError>;

    /// Appends one image URL to the end of the item's image list.
    async fn append_image(&self, id: &str, url: &str) -> Result<ClothingItem, AppError>;
}

impl StoreClothingItemRepo {
    pub fn new(store: SharedStore) -> Self {
        StoreClothingItemRepo { store }
    }
}

#[async_trait]
impl ClothingItemRepository for StoreClothingItemRepo {
    async fn create_item(&self, insert: &ClothingItemInsert) -> Result<ClothingItem, AppError> {
        let id = assign_id(insert.id.clone());
        let item = insert.clone().into_item(id, Utc::now());

        self.store.put(CLOTHING_ITEMS, &item.id, to_document(&item)?).await?;

        info!(item_id = %item.id, user_id = %item.user_id, category = %item.category, "Created clothing item");
        Ok(item)
    }

    async fn get_item(&self, id: &str) -> Result<ClothingItem, AppError> {
        debug!(item_id = id, "Fetching clothing item");
        from_document(self.store.fetch(CLOTHING_ITEMS, id).await?)
    }

    async fn update_item(&self, id: &str, fields: Document) -> Result<ClothingItem, AppError> {
        let patch = prepare_patch(fields, Utc::now())?;
        let document = self.store.patch(CLOTHING_ITEMS, id, patch).await?;

        info!(item_id = id, "Updated clothing item");
        from_document(document)
    }

    async fn delete_item(&self, id: &str) -> Result<(), AppError> {
        self.store.remove(CLOTHING_ITEMS, id).await?;

        info!(item_id = id, "Deleted clothing item");
        Ok(())
    }

    async fn list_items_by_user(&self, user_id: &str) -> Result<Vec<ClothingItem>, AppError> {
        let documents = self
            .store
            .query_by_field(CLOTHING_ITEMS, "user_id", &Value::from(user_id))
            .await?;

        debug!(user_id, count = documents.len(), "Listed clothing items");
        documents.into_iter().map(from_document).collect()
    }

    async fn append_image(&self, id: &str, url: &str) -> Result<ClothingItem, AppError> {
        let document = self
            .store
            .array_append(CLOTHING_ITEMS, id, "images", Value::from(url), touch(Utc::now())?)
            .await?;

        info!(item_id = id, "Appended image to clothing item");
        from_document(document)
    }
}
