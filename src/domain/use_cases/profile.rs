use chrono::Utc;

use crate::{
    entities::user_profile::{NewUserProfileRequest, UpdateUserProfileRequest, UserProfile},
    errors::AppError,
    repositories::user::UserProfileRepository,
};

pub struct ProfileHandler<U>
where
    U: UserProfileRepository,
{
    pub user_repo: U,
}

impl<U> ProfileHandler<U>
where
    U: UserProfileRepository,
{
    pub fn new(user_repo: U) -> Self {
        ProfileHandler { user_repo }
    }

    /// Registers a new profile; the chosen `user_id` must be unused.
    pub async fn create_profile(&self, request: NewUserProfileRequest) -> Result<UserProfile, AppError> {
        let profile = request.prepare_for_insert(Utc::now())?;

        self.user_repo.create_profile(&profile).await
            .map_err(|e| match e {
                AppError::DuplicateId(_) => {
                    AppError::DuplicateId(format!("User {} already exists", profile.user_id))
                }
                _ => e,
            })
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AppError> {
        self.user_repo.get_profile(user_id).await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("User {} not found", user_id)),
                _ => e,
            })
    }

    /// Applies the supplied fields; `body_size_data` and `preferences` are replaced whole.
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateUserProfileRequest,
    ) -> Result<UserProfile, AppError> {
        let patch = request.to_patch()?;
        self.user_repo.update_profile(user_id, patch).await
    }

    pub async fn delete_profile(&self, user_id: &str) -> Result<(), AppError> {
        self.user_repo.delete_profile(user_id).await
    }
}
