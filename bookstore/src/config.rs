// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use serde::Deserialize;

/// Configuration object holding all important variables throughout the application.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// URL / connection string to PostgreSQL or SQLite database.
    pub database_url: String,

    /// Maximum number of connections that the database pool should maintain.
    ///
    /// Be mindful of the connection limits for the database as well as other applications which
    /// may want to connect to the same database. SQLite databases ignore the pool size and
    /// connection lifetimes and use a single connection.
    pub database_max_connections: u32,

    /// Minimum number of idle connections the pool tries to keep open.
    pub database_min_connections: u32,

    /// Seconds to wait for a free connection before a request fails.
    pub database_acquire_timeout: u64,

    /// Seconds after which a connection gets closed and replaced, regardless of its usage.
    pub database_max_lifetime: u64,

    /// Seconds a connection may stay idle in the pool before it gets closed.
    pub database_idle_timeout: u64,

    /// Address the HTTP server binds to.
    pub http_host: IpAddr,

    /// HTTP port, serving the REST API. Defaults to 2020.
    pub http_port: u16,

    /// Seconds a single request may take before it gets aborted and its transaction rolled back.
    pub request_timeout: u64,

    /// Seconds in-flight requests get to finish after a shutdown was requested.
    pub shutdown_timeout: u64,
}

impl Configuration {
    /// Returns the acquire timeout of the connection pool.
    pub fn database_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.database_acquire_timeout)
    }

    /// Returns the maximum lifetime of a pooled connection.
    pub fn database_max_lifetime(&self) -> Duration {
        Duration::from_secs(self.database_max_lifetime)
    }

    /// Returns the idle timeout of a pooled connection.
    pub fn database_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.database_idle_timeout)
    }

    /// Returns the maximum duration of a single request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Returns the grace period for in-flight requests during shutdown.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            database_max_connections: 32,
            database_min_connections: 0,
            database_acquire_timeout: 30,
            database_max_lifetime: 30 * 60,
            database_idle_timeout: 10 * 60,
            http_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 2020,
            request_timeout: 30,
            shutdown_timeout: 20,
        }
    }
}

/// Returns an unique in-memory SQLite database url.
///
/// The database is shared between all connections of one pool (`cache=shared`), giving it an
/// unique name keeps separate pools within the same process from seeing each others data.
pub fn default_database_url() -> String {
    let db_name = format!("dbmem{}", rand::random::<u32>());
    format!("sqlite://file:{db_name}?mode=memory&cache=shared")
}
