use crate::{
    entities::{
        collection::{Collection, NewCollectionRequest, UpdateCollectionRequest},
        filters::CollectionFilter,
    },
    errors::AppError,
    repositories::{collection::CollectionRepository, user::UserProfileRepository},
    use_cases::filters::filter_collections,
};

pub struct CollectionHandler<U, C>
where
    U: UserProfileRepository,
    C: CollectionRepository,
{
    pub user_repo: U,
    pub collection_repo: C,
}

impl<U, C> CollectionHandler<U, C>
where
    U: UserProfileRepository,
    C: CollectionRepository,
{
    pub fn new(user_repo: U, collection_repo: C) -> Self {
        CollectionHandler { user_repo, collection_repo }
    }

    pub async fn create_collection(
        &self,
        user_id: &str,
        request: NewCollectionRequest,
    ) -> Result<Collection, AppError> {
        let insert = request.prepare_for_insert(user_id)?;

        if !self.user_repo.profile_exists(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        self.collection_repo.create_collection(&insert).await
    }

    pub async fn get_collection(&self, id: &str) -> Result<Collection, AppError> {
        self.collection_repo.get_collection(id).await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("Collection {} not found", id)),
                _ => e,
            })
    }

    pub async fn update_collection(
        &self,
        id: &str,
        request: UpdateCollectionRequest,
    ) -> Result<Collection, AppError> {
        let patch = request.to_patch()?;
        self.collection_repo.update_collection(id, patch).await
    }

    pub async fn delete_collection(&self, id: &str) -> Result<(), AppError> {
        self.collection_repo.delete_collection(id).await
    }

    pub async fn list_collections(
        &self,
        user_id: &str,
        filter: &CollectionFilter,
    ) -> Result<Vec<Collection>, AppError> {
        let collections = self.collection_repo.list_collections_by_user(user_id).await?;
        Ok(filter_collections(collections, filter))
    }
}
