use crate::{
    entities::{
        filters::OutfitFilter,
        outfit::{NewOutfitRequest, Outfit, UpdateOutfitRequest},
    },
    errors::AppError,
    repositories::{outfit::OutfitRepository, user::UserProfileRepository},
    use_cases::filters::filter_outfits,
};

pub struct OutfitHandler<U, O>
where
    U: UserProfileRepository,
    O: OutfitRepository,
{
    pub user_repo: U,
    pub outfit_repo: O,
}

impl<U, O> OutfitHandler<U, O>
where
    U: UserProfileRepository,
    O: OutfitRepository,
{
    pub fn new(user_repo: U, outfit_repo: O) -> Self {
        OutfitHandler { user_repo, outfit_repo }
    }

    /// Item ids are stored as given; they are not checked for existence.
    pub async fn create_outfit(&self, user_id: &str, request: NewOutfitRequest) -> Result<Outfit, AppError> {
        let insert = request.prepare_for_insert(user_id)?;

        if !self.user_repo.profile_exists(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        self.outfit_repo.create_outfit(&insert).await
    }

    pub async fn get_outfit(&self, id: &str) -> Result<Outfit, AppError> {
        self.outfit_repo.get_outfit(id).await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("Outfit {} not found", id)),
                _ => e,
            })
    }

    pub async fn update_outfit(&self, id: &str, request: UpdateOutfitRequest) -> Result<Outfit, AppError> {
        let patch = request.to_patch()?;
        self.outfit_repo.update_outfit(id, patch).await
    }

    pub async fn delete_outfit(&self, id: &str) -> Result<(), AppError> {
        self.outfit_repo.delete_outfit(id).await
    }

    pub async fn list_outfits(&self, user_id: &str, filter: &OutfitFilter) -> Result<Vec<Outfit>, AppError> {
        let outfits = self.outfit_repo.list_outfits_by_user(user_id).await?;
        Ok(filter_outfits(outfits, filter))
    }
}
