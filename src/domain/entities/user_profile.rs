use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    entities::{
        document::Document,
        option_fields::{reject_null, OptionField, PatchString},
    },
    errors::{new_validation_error, AppError},
};

const MAX_USERNAME_LENGTH: u64 = 50;
const MAX_FIELD_LENGTH: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Free-form measurements: height, top size, shoe size, body type...
    #[serde(default)]
    pub body_size_data: Document,
    #[serde(default)]
    pub preferences: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUserProfileRequest {
    #[validate(
        length(min = 1, max = 128, message = "User id must be 1-128 characters"),
        custom(function = "validate_user_id")
    )]
    pub user_id: String,

    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH, message = "Username must be 1-50 characters"))]
    pub username: String,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub first_name: Option<String>,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub location: Option<String>,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub gender: Option<String>,

    #[serde(default)]
    pub body_size_data: Document,

    #[serde(default)]
    pub preferences: Document,
}

impl NewUserProfileRequest {
    pub fn prepare_for_insert(self, now: DateTime<Utc>) -> Result<UserProfile, AppError> {
        self.validate()?;

        Ok(UserProfile {
            user_id: self.user_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            location: self.location,
            gender: self.gender,
            body_size_data: self.body_size_data,
            preferences: self.preferences,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Maps are replaced wholesale when supplied; their contents stay opaque.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateUserProfileRequest {
    #[validate(
        length(min = 1, max = MAX_USERNAME_LENGTH, message = "Username must be 1-50 characters"),
        custom(function = "reject_null")
    )]
    pub username: PatchString,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub first_name: PatchString,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub last_name: PatchString,

    #[validate(custom(function = "validate_optional_email"))]
    pub email: PatchString,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub location: PatchString,

    #[validate(length(max = MAX_FIELD_LENGTH))]
    pub gender: PatchString,

    #[validate(custom(function = "reject_null"))]
    pub body_size_data: OptionField<Document>,

    #[validate(custom(function = "reject_null"))]
    pub preferences: OptionField<Document>,
}

impl UpdateUserProfileRequest {
    pub fn to_patch(&self) -> Result<Document, AppError> {
        self.validate()?;

        let mut patch = Document::new();
        self.username.write_to(&mut patch, "username")?;
        self.first_name.write_to(&mut patch, "first_name")?;
        self.last_name.write_to(&mut patch, "last_name")?;
        self.email.write_to(&mut patch, "email")?;
        self.location.write_to(&mut patch, "location")?;
        self.gender.write_to(&mut patch, "gender")?;
        self.body_size_data.write_to(&mut patch, "body_size_data")?;
        self.preferences.write_to(&mut patch, "preferences")?;
        Ok(patch)
    }
}

fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.contains('/') || user_id.trim() != user_id {
        return Err(new_validation_error("invalid_user_id", "User id must not contain '/' or surrounding whitespace"));
    }
    Ok(())
}

fn validate_optional_email(value: &OptionField<String>) -> Result<(), ValidationError> {
    use validator::ValidateEmail;

    if let OptionField::SetToValue(email) = value {
        if !email.validate_email() {
            return Err(new_validation_error("invalid_email", "Invalid email format"));
        }
    }
    Ok(())
}
