use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// A schemaless record as the document store sees it.
pub type Document = serde_json::Map<String, Value>;

pub fn to_document<T: Serialize>(entity: &T) -> Result<Document, AppError> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::InternalError(format!(
            "Expected a JSON object, got {}",
            other
        ))),
    }
}

pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, AppError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
