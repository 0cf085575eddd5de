use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::{
        document::Document,
        option_fields::{reject_null, OptionField, PatchString, PatchVec},
        outfit::Outfit,
    },
    errors::AppError,
};

const MAX_NAME_LENGTH: u64 = 120;
const MAX_DESCRIPTION_LENGTH: u64 = 1000;

/// A named group of outfits (favorites, a trip, a wishlist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Weak references, duplicates allowed.
    #[serde(default)]
    pub outfit_ids: Vec<String>,
    #[serde(default)]
    pub is_wishlist: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct CollectionInsert {
    #[validate(length(min = 1, max = 128, message = "Id must be 1-128 characters"))]
    pub id: Option<String>,

    #[validate(length(min = 1, message = "Owner is required"))]
    pub user_id: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"))]
    pub name: String,

    pub description: Option<String>,
    pub outfit_ids: Vec<String>,
    pub is_wishlist: bool,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CollectionInsert {
    pub fn into_collection(self, id: String, now: DateTime<Utc>) -> Collection {
        let created_at = self.created_at.unwrap_or(now);
        Collection {
            id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            outfit_ids: self.outfit_ids,
            is_wishlist: self.is_wishlist,
            tags: self.tags,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewCollectionRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[serde(default)]
    pub outfit_ids: Vec<String>,

    #[serde(default)]
    pub is_wishlist: bool,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewCollectionRequest {
    pub fn prepare_for_insert(self, user_id: &str) -> Result<CollectionInsert, AppError> {
        self.validate()?;

        let insert = CollectionInsert {
            id: self.id,
            user_id: user_id.to_string(),
            name: self.name,
            description: self.description,
            outfit_ids: self.outfit_ids,
            is_wishlist: self.is_wishlist,
            tags: self.tags,
            created_at: None,
            updated_at: None,
        };

        insert.validate()?;
        Ok(insert)
    }
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateCollectionRequest {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"),
        custom(function = "reject_null")
    )]
    pub name: PatchString,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: PatchString,

    #[validate(custom(function = "reject_null"))]
    pub outfit_ids: PatchVec<String>,

    #[validate(custom(function = "reject_null"))]
    pub is_wishlist: OptionField<bool>,

    #[validate(custom(function = "reject_null"))]
    pub tags: PatchVec<String>,
}

impl UpdateCollectionRequest {
    pub fn to_patch(&self) -> Result<Document, AppError> {
        self.validate()?;

        let mut patch = Document::new();
        self.name.write_to(&mut patch, "name")?;
        self.description.write_to(&mut patch, "description")?;
        self.outfit_ids.write_to(&mut patch, "outfit_ids")?;
        self.is_wishlist.write_to(&mut patch, "is_wishlist")?;
        self.tags.write_to(&mut patch, "tags")?;
        Ok(patch)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionWithOutfits {
    pub collection: Collection,
    pub outfits: Vec<Outfit>,
}
