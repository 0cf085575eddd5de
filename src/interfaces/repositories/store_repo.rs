use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    constants::IMMUTABLE_FIELDS,
    entities::document::Document,
    errors::AppError,
    repositories::document_store::SharedStore,
};

#[derive(Clone)]
pub struct StoreUserRepo {
    pub store: SharedStore,
}

#[derive(Clone)]
pub struct StoreClothingItemRepo {
    pub store: SharedStore,
}

#[derive(Clone)]
pub struct StoreOutfitRepo {
    pub store: SharedStore,
}

#[derive(Clone)]
pub struct StoreCollectionRepo {
    pub store: SharedStore,
}

/// Uses the caller's id when supplied, otherwise a fresh UUID v4.
pub(crate) fn assign_id(supplied: Option<String>) -> String {
    supplied
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub(crate) fn timestamp(now: DateTime<Utc>) -> Result<Value, AppError> {
    Ok(serde_json::to_value(now)?)
}

/// Drops identity and creation fields from a patch and stamps `updated_at`.
pub(crate) fn prepare_patch(mut fields: Document, now: DateTime<Utc>) -> Result<Document, AppError> {
    for key in IMMUTABLE_FIELDS {
        fields.remove(key);
    }
    fields.remove("created_at");
    fields.insert("updated_at".to_string(), timestamp(now)?);
    Ok(fields)
}

/// Extra fields merged alongside an atomic primitive.
pub(crate) fn touch(now: DateTime<Utc>) -> Result<Document, AppError> {
    let mut fields = Document::new();
    fields.insert("updated_at".to_string(), timestamp(now)?);
    Ok(fields)
}
