// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::extract::Extension;
use log::info;

use crate::http::context::HttpServiceContext;
use crate::http::errors::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::response::{Empty, Envelope};
use crate::types::{Author, CreateAuthorRequest, UpdateAuthorRequest};

/// Handle requests listing all authors.
pub async fn get_authors(
    Extension(context): Extension<HttpServiceContext>,
) -> Result<Envelope<Vec<Author>>, ApiError> {
    info!("Received request to list authors");

    let authors = context.authors.list().await?;

    info!("Responding with {} authors", authors.len());
    Ok(Envelope::ok(authors))
}

/// Handle requests for a single author.
pub async fn get_author(
    Extension(context): Extension<HttpServiceContext>,
    PathId(id): PathId<u16>,
) -> Result<Envelope<Author>, ApiError> {
    info!("Received request for author {}", id);

    let author = context.authors.get_by_id(id).await?;

    info!("Responding with author {}", id);
    Ok(Envelope::ok(author))
}

/// Handle requests creating an author.
pub async fn create_author(
    Extension(context): Extension<HttpServiceContext>,
    JsonBody(request): JsonBody<CreateAuthorRequest>,
) -> Result<Envelope<Author>, ApiError> {
    info!("Received request to create author");

    let author = context.authors.create(request).await?;

    info!("Created author {}", author.id);
    Ok(Envelope::ok(author))
}

/// Handle requests updating an author.
///
/// The identifier in the path always wins over an `id` in the body.
pub async fn update_author(
    Extension(context): Extension<HttpServiceContext>,
    PathId(id): PathId<u16>,
    JsonBody(request): JsonBody<UpdateAuthorRequest>,
) -> Result<Envelope<Author>, ApiError> {
    info!("Received request to update author {}", id);

    let author = context
        .authors
        .update(UpdateAuthorRequest { id, ..request })
        .await?;

    info!("Updated author {}", id);
    Ok(Envelope::ok(author))
}

/// Handle requests deleting an author.
pub async fn delete_author(
    Extension(context): Extension<HttpServiceContext>,
    PathId(id): PathId<u16>,
) -> Result<Envelope<Empty>, ApiError> {
    info!("Received request to delete author {}", id);

    context.authors.delete(id).await?;

    info!("Deleted author {}", id);
    Ok(Envelope::ok(Empty {}))
}
