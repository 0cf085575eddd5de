use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    entities::{
        collection::{Collection, CollectionWithOutfits},
        outfit::{Outfit, OutfitWithItems},
    },
    errors::AppError,
    repositories::{
        clothing_item::ClothingItemRepository,
        collection::CollectionRepository,
        outfit::OutfitRepository,
    },
};

/// Expands weak id references and applies the relationship mutations.
///
/// A referenced record that has gone missing is skipped; the root record of a
/// by-id call going missing is an error.
pub struct RelationshipResolver<I, O, C>
where
    I: ClothingItemRepository,
    O: OutfitRepository,
    C: CollectionRepository,
{
    pub item_repo: I,
    pub outfit_repo: O,
    pub collection_repo: C,
}

impl<I, O, C> RelationshipResolver<I, O, C>
where
    I: ClothingItemRepository,
    O: OutfitRepository,
    C: CollectionRepository,
{
    pub fn new(item_repo: I, outfit_repo: O, collection_repo: C) -> Self {
        RelationshipResolver { item_repo, outfit_repo, collection_repo }
    }

    /// Items in reference order, dangling ids omitted.
    pub async fn resolve_outfit_items(&self, outfit: Outfit) -> Result<OutfitWithItems, AppError> {
        let mut items = Vec::with_capacity(outfit.clothing_item_ids.len());

        for item_id in &outfit.clothing_item_ids {
            match self.item_repo.get_item(item_id).await {
                Ok(item) => items.push(item),
                Err(AppError::NotFound(_)) => {
                    debug!(outfit_id = %outfit.id, item_id = %item_id, "Skipping dangling item reference");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(OutfitWithItems { outfit, items })
    }

    pub async fn resolve_collection_outfits(&self, collection: Collection) -> Result<CollectionWithOutfits, AppError> {
        let mut outfits = Vec::with_capacity(collection.outfit_ids.len());

        for outfit_id in &collection.outfit_ids {
            match self.outfit_repo.get_outfit(outfit_id).await {
                Ok(outfit) => outfits.push(outfit),
                Err(AppError::NotFound(_)) => {
                    debug!(collection_id = %collection.id, outfit_id = %outfit_id, "Skipping dangling outfit reference");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(CollectionWithOutfits { collection, outfits })
    }

    pub async fn get_outfit_with_items(&self, outfit_id: &str) -> Result<OutfitWithItems, AppError> {
        let outfit = self.outfit_repo.get_outfit(outfit_id).await?;
        self.resolve_outfit_items(outfit).await
    }

    pub async fn get_collection_with_outfits(&self, collection_id: &str) -> Result<CollectionWithOutfits, AppError> {
        let collection = self.collection_repo.get_collection(collection_id).await?;
        self.resolve_collection_outfits(collection).await
    }

    /// One atomic increment in the store; concurrent calls never lose a count.
    pub async fn mark_outfit_worn(&self, outfit_id: &str, now: DateTime<Utc>) -> Result<Outfit, AppError> {
        self.outfit_repo.increment_times_worn(outfit_id, now).await
    }

    /// Appends even when the outfit is already present. The outfit itself is not looked up.
    pub async fn add_outfit_to_collection(&self, collection_id: &str, outfit_id: &str) -> Result<Collection, AppError> {
        self.collection_repo.append_outfit_id(collection_id, outfit_id).await
    }

    /// Removes every occurrence of the outfit id.
    pub async fn remove_outfit_from_collection(
        &self,
        collection_id: &str,
        outfit_id: &str,
    ) -> Result<Collection, AppError> {
        self.collection_repo.remove_outfit_id(collection_id, outfit_id).await
    }
}
