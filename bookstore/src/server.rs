// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::Result;
use log::{info, warn};

use crate::config::Configuration;
use crate::context::Context;
use crate::db::{bootstrap_schema, connection_pool, create_database, Pool, SqlStore};
use crate::http::http_service;
use crate::manager::ServiceManager;

/// Makes sure database and tables are created before returning connection pool.
async fn initialize_db(config: &Configuration) -> Result<Pool> {
    // Create database when not existing
    create_database(&config.database_url).await?;

    // Create connection pool
    let pool = connection_pool(config).await?;

    // Create tables when not existing
    bootstrap_schema(&pool).await?;

    Ok(pool)
}

/// Main runtime managing the bookstore service.
#[allow(missing_debug_implementations)]
pub struct Server {
    pool: Pool,
    config: Configuration,
    manager: ServiceManager<Context>,
}

impl Server {
    /// Start the bookstore with your configuration. This method can be used to run the service
    /// within other applications.
    pub async fn start(config: Configuration) -> Result<Self> {
        // Initialize database and get connection pool
        let pool = initialize_db(&config).await?;
        let store = SqlStore::new(pool.clone());

        // Create service manager with shared data between services
        let context = Context::new(store, config.clone());
        let mut manager = ServiceManager::<Context>::new(context);

        // Start HTTP server with REST API
        manager.add("http", http_service);

        Ok(Self {
            pool,
            config,
            manager,
        })
    }

    /// This future resolves when the HTTP service stopped.
    ///
    /// It can be used to exit the application as a stopped service usually means that something
    /// went wrong, for example the port was already taken.
    pub async fn on_exit(&self) {
        self.manager.on_exit().await;
    }

    /// Stop accepting requests, wait for in-flight requests and close the database.
    ///
    /// Requests still running after the configured shutdown timeout get dropped, which rolls back
    /// their transactions.
    pub async fn shutdown(self) {
        let timeout = self.config.shutdown_timeout();

        if tokio::time::timeout(timeout, self.manager.shutdown())
            .await
            .is_err()
        {
            warn!(
                "Requests did not finish within {} seconds, dropping them",
                timeout.as_secs()
            );
        }

        // Close connection pool
        self.pool.close().await;
        info!("Database connections closed");
    }
}
