// SPDX-License-Identifier: AGPL-3.0-or-later

mod client;
mod config;
mod db;
mod helpers;
mod runner;

pub use client::{http_test_client, TestClient};
pub use config::TestConfiguration;
pub use db::initialize_db;
pub use helpers::{add_author, add_country, author, country};
pub use runner::{test_runner, TestNode};
