use validator::Validate;

use crate::{
    entities::{
        clothing_item::{AddImageRequest, ClothingItem, NewClothingItemRequest, UpdateClothingItemRequest},
        filters::ItemFilter,
    },
    errors::AppError,
    repositories::{clothing_item::ClothingItemRepository, user::UserProfileRepository},
    use_cases::filters::filter_items,
};

pub struct ClothingHandler<U, I>
where
    U: UserProfileRepository,
    I: ClothingItemRepository,
{
    pub user_repo: U,
    pub item_repo: I,
}

impl<U, I> ClothingHandler<U, I>
where
    U: UserProfileRepository,
    I: ClothingItemRepository,
{
    pub fn new(user_repo: U, item_repo: I) -> Self {
        ClothingHandler { user_repo, item_repo }
    }

    /// Adds an item to the wardrobe of an existing user.
    pub async fn add_item(&self, user_id: &str, request: NewClothingItemRequest) -> Result<ClothingItem, AppError> {
        let insert = request.prepare_for_insert(user_id)?;

        if !self.user_repo.profile_exists(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        self.item_repo.create_item(&insert).await
    }

    pub async fn get_item(&self, id: &str) -> Result<ClothingItem, AppError> {
        self.item_repo.get_item(id).await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("Clothing item {} not found", id)),
                _ => e,
            })
    }

    pub async fn update_item(&self, id: &str, request: UpdateClothingItemRequest) -> Result<ClothingItem, AppError> {
        let patch = request.to_patch()?;
        self.item_repo.update_item(id, patch).await
    }

    /// Outfits that still reference the item keep the dangling id.
    pub async fn delete_item(&self, id: &str) -> Result<(), AppError> {
        self.item_repo.delete_item(id).await
    }

    pub async fn add_image(&self, id: &str, request: AddImageRequest) -> Result<ClothingItem, AppError> {
        request.validate()?;
        self.item_repo.append_image(id, &request.url).await
    }

    pub async fn list_items(&self, user_id: &str, filter: &ItemFilter) -> Result<Vec<ClothingItem>, AppError> {
        let items = self.item_repo.list_items_by_user(user_id).await?;
        Ok(filter_items(items, filter))
    }
}
