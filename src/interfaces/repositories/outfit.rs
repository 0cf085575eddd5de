use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    constants::OUTFITS,
    entities::{
        document::{from_document, to_document, Document},
        outfit::{Outfit, OutfitInsert},
    },
    errors::AppError,
    repositories::{
        document_store::SharedStore,
        store_repo::{assign_id, prepare_patch, timestamp, StoreOutfitRepo},
    },
};

#[async_trait]
pub trait OutfitRepository: Send + Sync {
    async fn create_outfit(&self, insert: &OutfitInsert) -> Result<Outfit, AppError>;

    async fn get_outfit(&self, id: &str) -> Result<Outfit, AppError>;

    async fn update_outfit(&self, id: &str, fields: Document) -> Result<Outfit, AppError>;

    async fn delete_outfit(&self, id: &str) -> Result<(), AppError>;

    async fn list_outfits_by_user(&self, user_id: &str) -> Result<Vec<Outfit>, AppError>;

    /// Adds one to `times_worn` and sets `last_worn` in a single store call.
    async fn increment_times_worn(&self, id: &str, now: DateTime<Utc>) -> Result<Outfit, AppError>;
}

impl StoreOutfitRepo {
    pub fn new(store: SharedStore) -> Self {
        StoreOutfitRepo { store }
    }
}

#[async_trait]
impl OutfitRepository for StoreOutfitRepo {
    async fn create_outfit(&self, insert: &OutfitInsert) -> Result<Outfit, AppError> {
        let id = assign_id(insert.id.clone());
        let outfit = insert.clone().into_outfit(id, Utc::now());

        self.store.put(OUTFITS, &outfit.id, to_document(&outfit)?).await?;

        info!(outfit_id = %outfit.id, user_id = %outfit.user_id, "Created outfit");
        Ok(outfit)
    }

    async fn get_outfit(&self, id: &str) -> Result<Outfit, AppError> {
        debug!(outfit_id = id, "Fetching outfit");
        from_document(self.store.fetch(OUTFITS, id).await?)
    }

    async fn update_outfit(&self, id: &str, mut fields: Document) -> Result<Outfit, AppError> {
        // Wear history only moves through increment_times_worn.
        fields.remove("times_worn");
        fields.remove("last_worn");

        let patch = prepare_patch(fields, Utc::now())?;
        let document = self.store.patch(OUTFITS, id, patch).await?;

        info!(outfit_id = id, "Updated outfit");
        from_document(document)
    }

    async fn delete_outfit(&self, id: &str) -> Result<(), AppError> {
        self.store.remove(OUTFITS, id).await?;

        info!(outfit_id = id, "Deleted outfit");
        Ok(())
    }

    async fn list_outfits_by_user(&self, user_id: &str) -> Result<Vec<Outfit>, AppError> {
        let documents = self
            .store
            .query_by_field(OUTFITS, "user_id", &Value::from(user_id))
            .await?;

        debug!(user_id, count = documents.len(), "Listed outfits");
        documents.into_iter().map(from_document).collect()
    }

    async fn increment_times_worn(&self, id: &str, now: DateTime<Utc>) -> Result<Outfit, AppError> {
        let mut fields = Document::new();
        fields.insert("last_worn".to_string(), timestamp(now)?);
        fields.insert("updated_at".to_string(), timestamp(now)?);

        let document = self.store.increment(OUTFITS, id, "times_worn", 1, fields).await?;
        let outfit: Outfit = from_document(document)?;

        info!(outfit_id = id, times_worn = outfit.times_worn, "Marked outfit worn");
        Ok(outfit)
    }
}
