// SPDX-License-Identifier: AGPL-3.0-or-later

//! # bookstore
//!
//! Catalog service for a small bookstore, exposing CRUD endpoints over authors and the countries
//! they live in.
//!
//! Every request runs through the same pipeline: the HTTP handler decodes path and body, the
//! usecase validates the input and opens a database transaction, the repository executes the SQL
//! inside of it and the result travels back up, wrapped into a uniform JSON envelope.
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

mod config;
mod context;
mod db;
mod domain;
mod http;
mod manager;
mod server;
#[cfg(test)]
mod test_utils;
mod types;

pub use crate::config::{default_database_url, Configuration};
pub use crate::http::{Empty, Envelope};
pub use crate::server::Server;
pub use crate::types::{
    Author, Country, CreateAuthorRequest, CreateCountryRequest, UpdateAuthorRequest,
    UpdateCountryRequest,
};
