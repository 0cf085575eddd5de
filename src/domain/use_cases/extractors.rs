use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{constants::USER_ID_HEADER, errors::AppError};

/// Extractor for the caller identity, taken from the `X-User-Id` header that
/// the upstream identity layer sets after verifying the caller.
/// Returns 401 if the header is missing or blank.
/// Usage: Add `user: CurrentUser` as a parameter to your handler function.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Returns 403 unless the caller owns the record.
    pub fn ensure_owns(&self, owner_id: &str) -> Result<(), AppError> {
        if self.0 == owner_id {
            Ok(())
        } else {
            Err(AppError::ForbiddenAccess)
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match user_id {
            Some(id) => ready(Ok(CurrentUser(id.to_string()))),
            None => ready(Err(AppError::UnauthorizedAccess)),
        }
    }
}
