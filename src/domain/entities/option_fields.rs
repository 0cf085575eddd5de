use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{ValidateLength, ValidationError};

use crate::{entities::document::Document, errors::{new_validation_error, AppError}};

/// Represents optional field semantics in PATCH/UPDATE requests.
///
/// - `Unchanged` → field absent from the request
/// - `SetToNull` → explicit `null`
/// - `SetToValue` → set to provided value
///
/// Pair with `#[serde(default)]` on the containing struct so that absent
/// keys stay `Unchanged`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum OptionField<T> {
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<T> Default for OptionField<T> {
    fn default() -> Self {
        OptionField::Unchanged
    }
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

// ---------------------- Validation support ----------------------

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }
    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

/// Rejects an explicit `null` on a field the record cannot live without.
pub fn reject_null<T>(value: &OptionField<T>) -> Result<(), ValidationError> {
    if value.is_set_to_null() {
        return Err(new_validation_error("required", "Field cannot be null"));
    }
    Ok(())
}

// ---------------------- Core helpers ----------------------

impl<T> OptionField<T> {
    /// True when `SetToNull`.
    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }
}

impl<T: Serialize> OptionField<T> {
    /// Writes the field into a patch document unless it is `Unchanged`.
    /// `SetToNull` is stored as JSON `null`.
    pub fn write_to(&self, patch: &mut Document, key: &str) -> Result<(), AppError> {
        match self {
            OptionField::Unchanged => {}
            OptionField::SetToNull => {
                patch.insert(key.to_string(), Value::Null);
            }
            OptionField::SetToValue(v) => {
                patch.insert(key.to_string(), serde_json::to_value(v)?);
            }
        }
        Ok(())
    }
}

pub type PatchString = OptionField<String>;
pub type PatchVec<T> = OptionField<Vec<T>>;
