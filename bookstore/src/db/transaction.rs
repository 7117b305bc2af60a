// SPDX-License-Identifier: AGPL-3.0-or-later

//! Transaction boundaries of the usecases.
//!
//! A usecase opens one transaction with [`SqlStore::begin`], hands it to every repository call it
//! makes and finally passes its result to [`commit_or_rollback`]. A transaction which gets dropped
//! before that, for example because the request future was cancelled or panicked, is rolled back
//! by `sqlx`.
use std::fmt::Display;

use log::warn;

use crate::db::errors::RepositoryError;
use crate::db::{SqlStore, Tx};

impl SqlStore {
    /// Opens a new transaction on a connection from the pool.
    pub async fn begin(&self) -> Result<Tx, RepositoryError> {
        let tx = self.pool.begin().await?;
        Ok(tx)
    }
}

/// Commits the transaction when `result` is `Ok`, rolls it back otherwise.
///
/// A failing commit turns the result into an error. A failing rollback only gets logged, the
/// original error is returned to the caller.
pub async fn commit_or_rollback<T, E>(tx: Tx, result: Result<T, E>) -> Result<T, E>
where
    E: From<RepositoryError> + Display,
{
    match result {
        Ok(value) => {
            tx.commit().await.map_err(RepositoryError::from)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback after '{}' failed: {}", err, rollback_err);
            }

            Err(err)
        }
    }
}
