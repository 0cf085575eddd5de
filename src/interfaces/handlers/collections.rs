use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        collection::{NewCollectionRequest, UpdateCollectionRequest},
        filters::{CollectionFilter, CollectionFilterQuery},
    },
    errors::AppError,
    use_cases::extractors::CurrentUser,
    AppState,
};

#[instrument(skip(user, state, data))]
pub async fn create_collection(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewCollectionRequest>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let collection = state
        .collection_handler
        .create_collection(&user_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(collection))
}

#[instrument(skip(user, state, query))]
pub async fn list_collections(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<CollectionFilterQuery>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let filter = CollectionFilter::from(query.into_inner());
    let collections = state
        .collection_handler
        .list_collections(&user_id, &filter)
        .await?;
    Ok(HttpResponse::Ok().json(collections))
}

/// Returns the collection with its outfits resolved.
#[instrument(skip(user, state))]
pub async fn get_collection(
    user: CurrentUser,
    collection_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let collection = state.collection_handler.get_collection(&collection_id).await?;
    user.ensure_owns(&collection.user_id)?;

    let resolved = state.resolver.resolve_collection_outfits(collection).await?;
    Ok(HttpResponse::Ok().json(resolved))
}

#[instrument(skip(user, state, data))]
pub async fn update_collection(
    user: CurrentUser,
    collection_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateCollectionRequest>,
) -> Result<impl Responder, AppError> {
    let collection_handler = &state.collection_handler;

    let existing = collection_handler.get_collection(&collection_id).await?;
    user.ensure_owns(&existing.user_id)?;

    let collection = collection_handler
        .update_collection(&collection_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(collection))
}

#[instrument(skip(user, state))]
pub async fn delete_collection(
    user: CurrentUser,
    collection_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let collection_handler = &state.collection_handler;

    let existing = collection_handler.get_collection(&collection_id).await?;
    user.ensure_owns(&existing.user_id)?;

    collection_handler.delete_collection(&collection_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(user, state))]
pub async fn add_outfit_to_collection(
    user: CurrentUser,
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (collection_id, outfit_id) = path.into_inner();

    let existing = state.collection_handler.get_collection(&collection_id).await?;
    user.ensure_owns(&existing.user_id)?;

    let collection = state
        .resolver
        .add_outfit_to_collection(&collection_id, &outfit_id)
        .await?;
    Ok(HttpResponse::Ok().json(collection))
}

#[instrument(skip(user, state))]
pub async fn remove_outfit_from_collection(
    user: CurrentUser,
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (collection_id, outfit_id) = path.into_inner();

    let existing = state.collection_handler.get_collection(&collection_id).await?;
    user.ensure_owns(&existing.user_id)?;

    let collection = state
        .resolver
        .remove_outfit_from_collection(&collection_id, &outfit_id)
        .await?;
    Ok(HttpResponse::Ok().json(collection))
}
