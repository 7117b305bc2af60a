// SPDX-License-Identifier: AGPL-3.0-or-later

use sqlx::query;

use crate::config::Configuration;
use crate::db::{bootstrap_schema, connection_pool, create_database, Pool};

/// Create test database with empty tables.
pub async fn initialize_db(config: &Configuration) -> Pool {
    create_database(&config.database_url).await.unwrap();

    let pool = connection_pool(config).await.unwrap();
    bootstrap_schema(&pool).await.unwrap();

    // Persistent databases keep rows from earlier test runs
    query("DELETE FROM authors").execute(&pool).await.unwrap();
    query("DELETE FROM countries").execute(&pool).await.unwrap();

    pool
}
