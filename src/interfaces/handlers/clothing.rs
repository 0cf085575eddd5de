use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        clothing_item::{AddImageRequest, NewClothingItemRequest, UpdateClothingItemRequest},
        filters::{ItemFilter, ItemFilterQuery},
    },
    errors::AppError,
    use_cases::extractors::CurrentUser,
    AppState,
};

#[instrument(skip(user, state, data))]
pub async fn add_clothing_item(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewClothingItemRequest>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let item = state
        .clothing_handler
        .add_item(&user_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(item))
}

#[instrument(skip(user, state, query))]
pub async fn list_clothing_items(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<ItemFilterQuery>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let filter = ItemFilter::try_from(query.into_inner())?;
    let items = state.clothing_handler.list_items(&user_id, &filter).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[instrument(skip(user, state))]
pub async fn get_clothing_item(
    user: CurrentUser,
    item_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let item = state.clothing_handler.get_item(&item_id).await?;
    user.ensure_owns(&item.user_id)?;

    Ok(HttpResponse::Ok().json(item))
}

#[instrument(skip(user, state, data))]
pub async fn update_clothing_item(
    user: CurrentUser,
    item_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateClothingItemRequest>,
) -> Result<impl Responder, AppError> {
    let clothing_handler = &state.clothing_handler;

    let existing = clothing_handler.get_item(&item_id).await?;
    user.ensure_owns(&existing.user_id)?;

    let item = clothing_handler.update_item(&item_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[instrument(skip(user, state))]
pub async fn delete_clothing_item(
    user: CurrentUser,
    item_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let clothing_handler = &state.clothing_handler;

    let existing = clothing_handler.get_item(&item_id).await?;
    user.ensure_owns(&existing.user_id)?;

    clothing_handler.delete_item(&item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(user, state, data))]
pub async fn add_clothing_image(
    user: CurrentUser,
    item_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<AddImageRequest>,
) -> Result<impl Responder, AppError> {
    let clothing_handler = &state.clothing_handler;

    let existing = clothing_handler.get_item(&item_id).await?;
    user.ensure_owns(&existing.user_id)?;

    let item = clothing_handler.add_image(&item_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}
