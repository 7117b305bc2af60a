// SPDX-License-Identifier: AGPL-3.0-or-later

/// Error codes reported by SQLite (plain and extended) and PostgreSQL when a write violates a
/// foreign key, unique or not-null constraint.
const CONSTRAINT_VIOLATION_CODES: [&str; 7] = ["19", "787", "1299", "1555", "2067", "23503", "23505"];

/// SQLite reports constraint failures raised while stepping through `RETURNING` rows with the
/// generic error code 1, only the message tells them apart.
const SQLITE_CONSTRAINT_MESSAGE: &str = "constraint failed";

/// Errors returned by the repositories.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// No row matched the requested identifier.
    #[error("{entity} {id}: not found")]
    NotFound {
        /// Name of the entity which was looked up.
        entity: &'static str,

        /// Identifier which was looked up.
        id: i64,
    },

    /// The write was rejected by a database constraint.
    #[error("{entity} violates a database constraint: {reason}")]
    ConstraintViolation {
        /// Name of the entity which was written.
        entity: &'static str,

        /// Message of the database.
        reason: String,
    },

    /// A row could not be converted into its entity.
    #[error("Corrupt {entity} row in database: {reason}")]
    Decode {
        /// Name of the entity which was read.
        entity: &'static str,

        /// What was wrong with the row.
        reason: String,
    },

    /// Error returned from the database.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Classifies an error returned while writing `entity` rows.
    pub fn from_write(entity: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if is_constraint_violation(&**db_err) => {
                Self::ConstraintViolation {
                    entity,
                    reason: db_err.message().to_owned(),
                }
            }
            _ => Self::Database(err),
        }
    }

    /// Returns an error for a row with missing or malformed columns.
    pub fn decode(entity: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            entity,
            reason: reason.to_string(),
        }
    }
}

fn is_constraint_violation(err: &dyn sqlx::error::DatabaseError) -> bool {
    let code_matches = err
        .code()
        .map_or(false, |code| CONSTRAINT_VIOLATION_CODES.contains(&code.as_ref()));

    code_matches || err.message().contains(SQLITE_CONSTRAINT_MESSAGE)
}
