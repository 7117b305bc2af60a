// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::response::{IntoResponse, Response};
use log::error;

use crate::domain::errors::UsecaseError;
use crate::http::response::{Empty, Envelope};

/// Errors returned by the HTTP handlers.
///
/// Every variant maps to exactly one status code, internal details never reach the client.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The identifier in the request path is not a valid number.
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// The request body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Usecase(#[from] UsecaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = match self {
            ApiError::InvalidIdentifier(_) => Envelope::<Empty>::bad_request("Invalid identifier"),
            ApiError::InvalidBody(_) => Envelope::bad_request("Invalid request body"),
            ApiError::Usecase(UsecaseError::Validation(message)) => Envelope::bad_request(message),
            ApiError::Usecase(UsecaseError::NotFound(_)) => Envelope::not_found(),
            ApiError::Usecase(UsecaseError::Database(err)) => {
                error!("Database error while handling request: {}", err);
                Envelope::internal_server_error()
            }
        };

        envelope.into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use http::StatusCode;
    use rstest::rstest;

    use crate::db::errors::RepositoryError;
    use crate::domain::errors::UsecaseError;

    use super::ApiError;

    #[rstest]
    #[case(ApiError::InvalidIdentifier("abc".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::InvalidBody("EOF".into()), StatusCode::BAD_REQUEST)]
    #[case(
        UsecaseError::Validation("Invalid request: city".into()).into(),
        StatusCode::BAD_REQUEST
    )]
    #[case(UsecaseError::NotFound("author 9: not found".into()).into(), StatusCode::NOT_FOUND)]
    #[case(
        UsecaseError::Database(RepositoryError::from(sqlx::Error::PoolTimedOut)).into(),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn maps_errors_to_status(#[case] err: ApiError, #[case] status: StatusCode) {
        assert_eq!(err.into_response().status(), status);
    }
}
