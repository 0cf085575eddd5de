use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    entities::{
        document::Document,
        option_fields::{reject_null, OptionField, PatchString, PatchVec},
    },
    errors::{new_validation_error, AppError},
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_NAME_LENGTH: u64 = 120;
const MAX_ATTRIBUTE_LENGTH: u64 = 80;
const MAX_IMAGES: u64 = 20;

// ───── Category ───────────────────────────────────────────────────────

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
    #[display("tops")]
    Tops,
    #[display("bottoms")]
    Bottoms,
    #[display("shoes")]
    Shoes,
    #[display("accessories")]
    Accessories,
    #[display("outerwear")]
    Outerwear,
    #[display("dresses")]
    Dresses,
    #[display("activewear")]
    Activewear,
    #[display("formal")]
    Formal,
    #[display("other")]
    Other,
}

impl ClothingCategory {
    pub const ALL: [ClothingCategory; 9] = [
        ClothingCategory::Tops,
        ClothingCategory::Bottoms,
        ClothingCategory::Shoes,
        ClothingCategory::Accessories,
        ClothingCategory::Outerwear,
        ClothingCategory::Dresses,
        ClothingCategory::Activewear,
        ClothingCategory::Formal,
        ClothingCategory::Other,
    ];
}

impl FromStr for ClothingCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ClothingCategory::ALL
            .into_iter()
            .find(|c| c.to_string() == wanted)
            .ok_or_else(|| AppError::invalid("category", format!("Unknown clothing category: {}", s)))
    }
}

// ───── Stored record ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: ClothingCategory,
    pub images: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub purchase_link: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the repository persists. Missing id and timestamps are filled in at creation.
#[derive(Debug, Clone, Validate)]
pub struct ClothingItemInsert {
    #[validate(length(min = 1, max = 128, message = "Id must be 1-128 characters"))]
    pub id: Option<String>,

    #[validate(length(min = 1, message = "Owner is required"))]
    pub user_id: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"))]
    pub name: String,

    pub category: ClothingCategory,

    #[validate(
        length(min = 1, max = MAX_IMAGES, message = "At least one image is required"),
        custom(function = "validate_image_urls")
    )]
    pub images: Vec<String>,

    pub color: Option<String>,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub source: Option<String>,
    pub purchase_link: Option<String>,
    pub purchase_date: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ClothingItemInsert {
    pub fn into_item(self, id: String, now: DateTime<Utc>) -> ClothingItem {
        let created_at = self.created_at.unwrap_or(now);
        ClothingItem {
            id,
            user_id: self.user_id,
            name: self.name,
            category: self.category,
            images: self.images,
            color: self.color,
            size: self.size,
            brand: self.brand,
            price: self.price,
            source: self.source,
            purchase_link: self.purchase_link,
            purchase_date: self.purchase_date,
            tags: self.tags,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewClothingItemRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_category"))]
    pub category: String,

    #[serde(default)]
    #[validate(
        length(min = 1, max = MAX_IMAGES, message = "At least one image is required"),
        custom(function = "validate_image_urls")
    )]
    pub images: Vec<String>,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub color: Option<String>,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub size: Option<String>,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub brand: Option<String>,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub price: Option<String>,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub source: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub purchase_link: Option<String>,

    pub purchase_date: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewClothingItemRequest {
    pub fn prepare_for_insert(self, user_id: &str) -> Result<ClothingItemInsert, AppError> {
        self.validate()?;
        let category = ClothingCategory::from_str(&self.category)?;

        let insert = ClothingItemInsert {
            id: self.id,
            user_id: user_id.to_string(),
            name: self.name,
            category,
            images: self.images,
            color: self.color,
            size: self.size,
            brand: self.brand,
            price: self.price,
            source: self.source,
            purchase_link: self.purchase_link,
            purchase_date: self.purchase_date,
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
pub struct UpdateClothingItemRequest {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-120 characters"),
        custom(function = "reject_null")
    )]
    pub name: PatchString,

    #[validate(custom(function = "validate_optional_category"))]
    pub category: PatchString,

    #[validate(
        length(min = 1, max = MAX_IMAGES, message = "At least one image is required"),
        custom(function = "validate_optional_image_urls")
    )]
    pub images: PatchVec<String>,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub color: PatchString,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub size: PatchString,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub brand: PatchString,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub price: PatchString,

    #[validate(length(max = MAX_ATTRIBUTE_LENGTH))]
    pub source: PatchString,

    #[validate(custom(function = "validate_optional_url"))]
    pub purchase_link: PatchString,

    pub purchase_date: PatchString,

    #[validate(custom(function = "reject_null"))]
    pub tags: PatchVec<String>,
}

impl UpdateClothingItemRequest {
    /// Validates the request and renders the supplied fields as a patch document.
    pub fn to_patch(&self) -> Result<Document, AppError> {
        self.validate()?;

        let category = match &self.category {
            OptionField::SetToValue(raw) => OptionField::SetToValue(ClothingCategory::from_str(raw)?),
            OptionField::SetToNull => return Err(AppError::invalid("category", "Field cannot be null")),
            OptionField::Unchanged => OptionField::Unchanged,
        };

        let mut patch = Document::new();
        self.name.write_to(&mut patch, "name")?;
        category.write_to(&mut patch, "category")?;
        self.images.write_to(&mut patch, "images")?;
        self.color.write_to(&mut patch, "color")?;
        self.size.write_to(&mut patch, "size")?;
        self.brand.write_to(&mut patch, "brand")?;
        self.price.write_to(&mut patch, "price")?;
        self.source.write_to(&mut patch, "source")?;
        self.purchase_link.write_to(&mut patch, "purchase_link")?;
        self.purchase_date.write_to(&mut patch, "purchase_date")?;
        self.tags.write_to(&mut patch, "tags")?;
        Ok(patch)
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddImageRequest {
    #[validate(custom(function = "validate_url"))]
    pub url: String,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_image_urls(images: &[String]) -> Result<(), ValidationError> {
    images.iter().try_for_each(|url| validate_url(url))
}

pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    ClothingCategory::from_str(category)
        .map(|_| ())
        .map_err(|_| new_validation_error("unknown_category", "Unknown clothing category"))
}

pub fn validate_optional_category(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(category) => validate_category(category),
        OptionField::SetToNull => Err(new_validation_error("required", "Field cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_image_urls(value: &OptionField<Vec<String>>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(images) => validate_image_urls(images),
        OptionField::SetToNull => Err(new_validation_error("required", "Field cannot be null")),
        OptionField::Unchanged => Ok(()),
    }
}

pub fn validate_optional_url(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(url) = value {
        validate_url(url)?;
    }
    Ok(())
}
