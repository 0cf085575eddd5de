use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use tracing::instrument;

use crate::{
    entities::{
        filters::{OutfitFilter, OutfitFilterQuery},
        outfit::{NewOutfitRequest, UpdateOutfitRequest},
    },
    errors::AppError,
    use_cases::extractors::CurrentUser,
    AppState,
};

#[instrument(skip(user, state, data))]
pub async fn create_outfit(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewOutfitRequest>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let outfit = state
        .outfit_handler
        .create_outfit(&user_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(outfit))
}

#[instrument(skip(user, state, query))]
pub async fn list_outfits(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<OutfitFilterQuery>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let filter = OutfitFilter::from(query.into_inner());
    let outfits = state.outfit_handler.list_outfits(&user_id, &filter).await?;
    Ok(HttpResponse::Ok().json(outfits))
}

/// Returns the outfit with its clothing items resolved.
#[instrument(skip(user, state))]
pub async fn get_outfit(
    user: CurrentUser,
    outfit_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let outfit = state.outfit_handler.get_outfit(&outfit_id).await?;
    user.ensure_owns(&outfit.user_id)?;

    let resolved = state.resolver.resolve_outfit_items(outfit).await?;
    Ok(HttpResponse::Ok().json(resolved))
}

#[instrument(skip(user, state, data))]
pub async fn update_outfit(
    user: CurrentUser,
    outfit_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateOutfitRequest>,
) -> Result<impl Responder, AppError> {
    let outfit_handler = &state.outfit_handler;

    let existing = outfit_handler.get_outfit(&outfit_id).await?;
    user.ensure_owns(&existing.user_id)?;

    let outfit = outfit_handler.update_outfit(&outfit_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outfit))
}

#[instrument(skip(user, state))]
pub async fn delete_outfit(
    user: CurrentUser,
    outfit_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let outfit_handler = &state.outfit_handler;

    let existing = outfit_handler.get_outfit(&outfit_id).await?;
    user.ensure_owns(&existing.user_id)?;

    outfit_handler.delete_outfit(&outfit_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(user, state))]
pub async fn mark_outfit_worn(
    user: CurrentUser,
    outfit_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let existing = state.outfit_handler.get_outfit(&outfit_id).await?;
    user.ensure_owns(&existing.user_id)?;

    let outfit = state.resolver.mark_outfit_worn(&outfit_id, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(outfit))
}
