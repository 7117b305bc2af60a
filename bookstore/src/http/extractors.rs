// SPDX-License-Identifier: AGPL-3.0-or-later

//! Request extractors rejecting with [`ApiError`] so failures get answered with an envelope.
use std::str::FromStr;

use async_trait::async_trait;
use axum::body::HttpBody;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::{BoxError, Json};
use http::request::Parts;
use http::Request;
use serde::de::DeserializeOwned;

use crate::http::errors::ApiError;

/// Numeric identifier taken from the `:id` segment of the request path.
#[derive(Debug, Clone, Copy)]
pub struct PathId<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathId<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidIdentifier(rejection.body_text()))?;

        segment
            .parse::<T>()
            .map(PathId)
            .map_err(|_| ApiError::InvalidIdentifier(segment))
    }
}

/// JSON request body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for JsonBody<T>
where
    T: DeserializeOwned,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::InvalidBody(rejection.body_text()))?;

        Ok(Self(value))
    }
}
