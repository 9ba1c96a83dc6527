use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: i64, requested: i64 },
    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type HubResult<T> = Result<T, HubError>;

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let (status, err_msg) = match self {
            HubError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            HubError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HubError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HubError::InsufficientFunds { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            HubError::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": err_msg
        }));

        (status, body).into_response()
    }
}

// DbError to HubError conversion implementation
impl From<DbError> for HubError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionError(msg) => HubError::DatabaseError(msg),
            DbError::QueryError(msg) => HubError::DatabaseError(msg),
            DbError::NotFound(msg) => HubError::NotFound(msg),
            DbError::Conflict(msg) => HubError::InvalidRequest(msg),
            DbError::InsufficientFunds { balance, requested } => {
                HubError::InsufficientFunds { balance, requested }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HubError::AuthenticationRequired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            HubError::NotFound("idea".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HubError::InvalidRequest("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HubError::InsufficientFunds {
                balance: 50,
                requested: 100
            }
            .into_response()
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            HubError::DatabaseError("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_insufficient_funds_conversion_keeps_amounts() {
        let err = HubError::from(DbError::InsufficientFunds {
            balance: 50,
            requested: 100,
        });
        match err {
            HubError::InsufficientFunds { balance, requested } => {
                assert_eq!(balance, 50);
                assert_eq!(requested, 100);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
