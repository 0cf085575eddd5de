use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::{
        clothing_item::ClothingItem,
        document::Document,
        option_fields::{reject_null, OptionField, PatchString, PatchVec},
    },
    errors::AppError,
};

const MAX_NAME_LENGTH: u64 = 120;
const MAX_DESCRIPTION_LENGTH: u64 = 1000;
const MAX_CONTEXT_LENGTH: u64 = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Weak references: the items may have been deleted since.
    #[serde(default)]
    pub clothing_item_ids: Vec<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub times_worn: u64,
    #[serde(default)]
    pub last_worn: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct OutfitInsert {
    #[validate(length(min = 1, max = 128, message = "Id must be 1-128 characters"))]
    pub id: Option<String>,

    #[validate(length(min = 1, message = "Owner is required"))]
    pub user_id: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"))]
    pub name: String,

    pub description: Option<String>,
    pub clothing_item_ids: Vec<String>,
    pub occasion: Option<String>,
    pub season: Option<String>,
    pub weather: Option<String>,
    pub liked: bool,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OutfitInsert {
    pub fn into_outfit(self, id: String, now: DateTime<Utc>) -> Outfit {
        let created_at = self.created_at.unwrap_or(now);
        Outfit {
            id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            clothing_item_ids: self.clothing_item_ids,
            occasion: self.occasion,
            season: self.season,
            weather: self.weather,
            liked: self.liked,
            times_worn: 0,
            last_worn: None,
            tags: self.tags,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewOutfitRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[serde(default)]
    pub clothing_item_ids: Vec<String>,

    #[validate(length(max = MAX_CONTEXT_LENGTH))]
    pub occasion: Option<String>,

    #[validate(length(max = MAX_CONTEXT_LENGTH))]
    pub season: Option<String>,

    #[validate(length(max = MAX_CONTEXT_LENGTH))]
    pub weather: Option<String>,

    #[serde(default)]
    pub liked: bool,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewOutfitRequest {
    pub fn prepare_for_insert(self, user_id: &str) -> Result<OutfitInsert, AppError> {
        self.validate()?;

        let insert = OutfitInsert {
            id: self.id,
            user_id: user_id.to_string(),
            name: self.name,
            description: self.description,
            clothing_item_ids: self.clothing_item_ids,
            occasion: self.occasion,
            season: self.season,
            weather: self.weather,
            liked: self.liked,
            tags: self.tags,
            created_at: None,
            updated_at: None,
        };

        insert.validate()?;
        Ok(insert)
    }
}

/// Wear history is deliberately absent here: it only moves through mark-worn.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateOutfitRequest {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"),
        custom(function = "reject_null")
    )]
    pub name: PatchString,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: PatchString,

    #[validate(custom(function = "reject_null"))]
    pub clothing_item_ids: PatchVec<String>,

    #[validate(length(max = MAX_CONTEXT_LENGTH))]
    pub occasion: PatchString,

    #[validate(length(max = MAX_CONTEXT_LENGTH))]
    pub season: PatchString,

    #[validate(length(max = MAX_CONTEXT_LENGTH))]
    pub weather: PatchString,

    #[validate(custom(function = "reject_null"))]
    pub liked: OptionField<bool>,

    #[validate(custom(function = "reject_null"))]
    pub tags: PatchVec<String>,
}

impl UpdateOutfitRequest {
    pub fn to_patch(&self) -> Result<Document, AppError> {
        self.validate()?;

        let mut patch = Document::new();
        self.name.write_to(&mut patch, "name")?;
        self.description.write_to(&mut patch, "description")?;
        self.clothing_item_ids.write_to(&mut patch, "clothing_item_ids")?;
        self.occasion.write_to(&mut patch, "occasion")?;
        self.season.write_to(&mut patch, "season")?;
        self.weather.write_to(&mut patch, "weather")?;
        self.liked.write_to(&mut patch, "liked")?;
        self.tags.write_to(&mut patch, "tags")?;
        Ok(patch)
    }
}

/// An outfit with its weak item references materialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitWithItems {
    pub outfit: Outfit,
    pub items: Vec<ClothingItem>,
}
