// SPDX-License-Identifier: AGPL-3.0-or-later

use validator::ValidationErrors;

use crate::db::errors::RepositoryError;

/// Errors returned by the usecases.
#[derive(thiserror::Error, Debug)]
pub enum UsecaseError {
    /// The request was rejected, the message names the offending fields.
    #[error("{0}")]
    Validation(String),

    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The database failed, details should never reach the client.
    #[error(transparent)]
    Database(RepositoryError),
}

impl UsecaseError {
    /// Returns a validation error for the given field names.
    pub fn invalid_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        let mut fields: Vec<&str> = fields.into_iter().collect();
        fields.sort_unstable();
        Self::Validation(format!("Invalid request: {}", fields.join(", ")))
    }
}

impl From<ValidationErrors> for UsecaseError {
    fn from(errors: ValidationErrors) -> Self {
        Self::invalid_fields(errors.field_errors().into_keys())
    }
}

impl From<RepositoryError> for UsecaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepositoryError::ConstraintViolation { entity, .. } => Self::Validation(format!(
                "Invalid request: {} conflicts with existing records",
                entity
            )),
            err => Self::Database(err),
        }
    }
}
