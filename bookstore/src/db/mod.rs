// SPDX-License-Identifier: AGPL-3.0-or-later

//! Persistent storage for the bookstore supporting both PostgreSQL and SQLite databases.
//!
//! The main interface is [`SqlStore`] which implements the repository traits for authors and
//! countries. Repositories never open transactions on their own, every method receives the
//! transaction it should run in from the caller, see [`transaction`].
use anyhow::{bail, Error, Result};
use log::debug;
use sqlx::any::{Any, AnyKind, AnyPool, AnyPoolOptions};
use sqlx::migrate::MigrateDatabase;
use sqlx::Transaction;

use crate::config::Configuration;

pub mod conversions;
pub mod errors;
pub mod models;
mod schema;
pub mod stores;
pub mod traits;
pub mod transaction;

/// Re-export of generic connection pool type.
pub type Pool = AnyPool;

/// Database transaction handed from the usecases to the repositories.
///
/// Dropping it without calling `commit` rolls all changes back.
pub type Tx = Transaction<'static, Any>;

/// SQL based persistent storage that implements `AuthorStore` and `CountryStore`.
#[derive(Clone, Debug)]
pub struct SqlStore {
    pub(crate) pool: Pool,
}

impl SqlStore {
    /// Create a new `SqlStore` using the provided db `Pool`.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

/// Create database when not existing.
pub async fn create_database(url: &str) -> Result<()> {
    if !Any::database_exists(url).await? {
        Any::create_database(url).await?;
    }

    Ok(())
}

/// Create a database agnostic connection pool.
///
/// SQLite allows only one writer at a time and upgrading two concurrent read transactions to
/// writes deadlocks, so SQLite pools hand out a single connection and requests queue for it. The
/// connection never expires, an in-memory database only lives as long as its last connection.
pub async fn connection_pool(config: &Configuration) -> Result<Pool, Error> {
    let options = AnyPoolOptions::new().acquire_timeout(config.database_acquire_timeout());

    let options = if is_sqlite(&config.database_url) {
        debug!("Use a single connection for SQLite database");

        options
            .max_connections(1)
            .min_connections(1)
            .max_lifetime(None)
            .idle_timeout(None)
    } else {
        options
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .max_lifetime(config.database_max_lifetime())
            .idle_timeout(config.database_idle_timeout())
    };

    let pool: Pool = options.connect(&config.database_url).await?;

    Ok(pool)
}

fn is_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:")
}

/// Create all tables when they do not exist yet.
pub async fn bootstrap_schema(pool: &Pool) -> Result<()> {
    let statements = match pool.any_kind() {
        AnyKind::Sqlite => schema::SQLITE,
        AnyKind::Postgres => schema::POSTGRES,
        #[allow(unreachable_patterns)]
        kind => bail!("Database {:?} is not supported", kind),
    };

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    debug!("Database schema is ready");

    Ok(())
}
