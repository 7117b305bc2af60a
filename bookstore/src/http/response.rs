// SPDX-License-Identifier: AGPL-3.0-or-later

//! JSON envelope wrapping every response of the HTTP API.
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Message sent with every response to an unexpected failure.
pub const UNHANDLED_ERROR_MESSAGE: &str = "Unhandled error occurred. Please try again later";

/// Response body of the HTTP API.
///
/// `status` repeats the HTTP status code of the response, `data` is only present on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// HTTP status code.
    pub status: u16,

    /// Human readable outcome, for example "OK" or the reason a request was rejected.
    pub message: String,

    /// Payload of successful responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Payload of responses which succeed without returning an entity.
///
/// Serializes as an empty JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

impl<T> Envelope<T> {
    /// Envelope with an arbitrary status code.
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, "OK", Some(data))
    }

    /// The request was malformed or failed validation.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    /// The client is not allowed to access the resource.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", None)
    }

    /// The requested resource or route does not exist.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", None)
    }

    /// The route exists but does not accept the request method.
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", None)
    }

    /// Handling the request took longer than allowed.
    pub fn request_timeout() -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "Request Timeout", None)
    }

    /// A known failure happened while handling the request.
    pub fn internal_server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            None,
        )
    }

    /// An unexpected failure happened, for example a panic.
    pub fn unhandled_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            UNHANDLED_ERROR_MESSAGE,
            None,
        )
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use http::StatusCode;
    use serde_json::json;

    use super::{Empty, Envelope};

    #[test]
    fn omits_missing_data() {
        let envelope = Envelope::<Empty>::not_found();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "status": 404, "message": "Not Found" })
        );
    }

    #[test]
    fn empty_payload_is_an_object() {
        let envelope = Envelope::ok(Empty {});
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "status": 200, "message": "OK", "data": {} })
        );
    }

    #[test]
    fn empty_list_stays_an_array() {
        let envelope = Envelope::ok(Vec::<Empty>::new());
        assert_eq!(serde_json::to_value(&envelope).unwrap()["data"], json!([]));
    }

    #[test]
    fn responds_with_envelope_status() {
        let response = Envelope::<Empty>::unauthorized().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = Envelope::<Empty>::bad_request("Invalid identifier").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
