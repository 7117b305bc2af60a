// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::Debug;

use serde::Deserialize;

use crate::config::default_database_url;

/// Configuration used in test helper methods.
///
/// Values are read from environment variables, for example `DATABASE_URL` to run the tests
/// against PostgreSQL.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct TestConfiguration {
    /// Database url (SQLite or PostgreSQL).
    pub database_url: String,
}

impl TestConfiguration {
    pub fn new() -> Self {
        envy::from_env::<TestConfiguration>()
            .expect("Could not read environment variables for test configuration")
    }
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            // SQLite database stored in memory, unique per test
            database_url: default_database_url(),
        }
    }
}
