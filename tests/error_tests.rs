use std::{borrow::Cow, error::Error as StdError, fmt};

use actix_web::{http::StatusCode, ResponseError};
use sqlx::error::{DatabaseError, ErrorKind};
use wardrobe_backend::errors::AppError;

/// Stand-in for a Postgres server error carrying a SQLSTATE code.
#[derive(Debug)]
struct PgServerError {
    code: &'static str,
    message: &'static str,
}

impl fmt::Display for PgServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for PgServerError {}

impl DatabaseError for PgServerError {
    fn message(&self) -> &str {
        self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        if self.code == "23505" {
            ErrorKind::UniqueViolation
        } else {
            ErrorKind::Other
        }
    }
}

fn server_error(code: &'static str, message: &'static str) -> sqlx::Error {
    sqlx::Error::Database(Box::new(PgServerError { code, message }))
}

#[test]
fn rejected_credentials_mean_the_store_is_unavailable() {
    let err = AppError::from(server_error(
        "28P01",
        "password authentication failed for user \"wardrobe\"",
    ));

    assert!(matches!(err, AppError::StoreUnavailable(_)), "got {:?}", err);
    assert!(err.is_retryable());
    assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn connection_exceptions_mean_the_store_is_unavailable() {
    for code in ["08000", "08006", "28000"] {
        let err = AppError::from(server_error(code, "connection failure"));
        assert!(matches!(err, AppError::StoreUnavailable(_)), "{code}: got {:?}", err);
    }
}

#[test]
fn bad_connection_settings_mean_the_store_is_unavailable() {
    let err = AppError::from(sqlx::Error::Configuration("invalid port number".into()));

    assert!(matches!(err, AppError::StoreUnavailable(_)));
}

#[test]
fn unique_violation_is_a_duplicate_id() {
    let err = AppError::from(server_error("23505", "duplicate key value"));

    assert!(matches!(err, AppError::DuplicateId(_)));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[test]
fn other_server_errors_stay_internal() {
    let err = AppError::from(server_error("42P01", "relation \"documents\" does not exist"));

    assert!(matches!(err, AppError::InternalError(_)));
    assert!(!err.is_retryable());
}

#[test]
fn missing_row_and_pool_timeout_map_to_their_kinds() {
    assert!(AppError::from(sqlx::Error::RowNotFound).is_not_found());
    assert!(matches!(AppError::from(sqlx::Error::PoolTimedOut), AppError::Timeout(_)));
    assert!(matches!(AppError::from(sqlx::Error::PoolClosed), AppError::StoreUnavailable(_)));
}
