use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::{
    constants::USERS,
    entities::{
        document::{from_document, to_document, Document},
        user_profile::UserProfile,
    },
    errors::AppError,
    repositories::{
        document_store::SharedStore,
        store_repo::{prepare_patch, StoreUserRepo},
    },
};

#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Persists the profile under its `user_id`.
    async fn create_profile(&self, profile: &UserProfile) -> Result<UserProfile, AppError>;

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AppError>;

    /// Merges the supplied fields; `user_id` can never change.
    async fn update_profile(&self, user_id: &str, fields: Document) -> Result<UserProfile, AppError>;

    /// Removes the profile only; the user's wardrobe is left in place.
    async fn delete_profile(&self, user_id: &str) -> Result<(), AppError>;

    async fn profile_exists(&self, user_id: &str) -> Result<bool, AppError>;
}

impl StoreUserRepo {
    pub fn new(store: SharedStore) -> Self {
        StoreUserRepo { store }
    }
}

#[async_trait]
impl UserProfileRepository for StoreUserRepo {
    async fn create_profile(&self, profile: &UserProfile) -> Result<UserProfile, AppError> {
        let document = to_document(profile)?;
        self.store.put(USERS, &profile.user_id, document).await?;

        info!(user_id = %profile.user_id, "Created user profile");
        Ok(profile.clone())
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AppError> {
        debug!(user_id, "Fetching user profile");
        let document = self.store.fetch(USERS, user_id).await?;
        from_document(document)
    }

    async fn update_profile(&self, user_id: &str, fields: Document) -> Result<UserProfile, AppError> {
        let patch = prepare_patch(fields, Utc::now())?;
        let document = self.store.patch(USERS, user_id, patch).await?;

        info!(user_id, "Updated user profile");
        from_document(document)
    }

    async fn delete_profile(&self, user_id: &str) -> Result<(), AppError> {
        self.store.remove(USERS, user_id).await?;

        info!(user_id, "Deleted user profile");
        Ok(())
    }

    async fn profile_exists(&self, user_id: &str) -> Result<bool, AppError> {
        match self.store.fetch(USERS, user_id).await {
            Ok(_) => Ok(true),
            Err(AppError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
