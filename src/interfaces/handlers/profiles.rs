use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::user_profile::{NewUserProfileRequest, UpdateUserProfileRequest},
    errors::AppError,
    use_cases::extractors::CurrentUser,
    AppState,
};

/// Signup: the caller may only register the identity it authenticated as.
#[instrument(skip(user, state, data), fields(caller = %user.id()))]
pub async fn create_profile(
    user: CurrentUser,
    state: web::Data<AppState>,
    data: web::Json<NewUserProfileRequest>,
) -> Result<impl Responder, AppError> {
    let request = data.into_inner();
    user.ensure_owns(&request.user_id)?;

    let profile = state.profile_handler.create_profile(request).await?;
    Ok(HttpResponse::Created().json(profile))
}

#[instrument(skip(user, state))]
pub async fn get_profile(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let profile = state.profile_handler.get_profile(&user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(user, state, data))]
pub async fn update_profile(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateUserProfileRequest>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let profile = state
        .profile_handler
        .update_profile(&user_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Account deletion. Items, outfits and collections are not cascaded.
#[instrument(skip(user, state))]
pub async fn delete_profile(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    state.profile_handler.delete_profile(&user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(user, state))]
pub async fn get_wardrobe_stats(
    user: CurrentUser,
    user_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    user.ensure_owns(&user_id)?;

    let stats = state.stats_aggregator.get_wardrobe_stats(&user_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}
