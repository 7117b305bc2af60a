// SPDX-License-Identifier: AGPL-3.0-or-later

//! Repository interfaces used by the usecases.
//!
//! Every method runs inside the transaction handed in by the caller and never commits or rolls
//! it back on its own.
use async_trait::async_trait;

use crate::db::errors::RepositoryError;
use crate::db::Tx;
use crate::types::{Author, Country};

/// Storage interface for authors.
#[async_trait]
pub trait AuthorStore {
    /// Returns all authors ordered by their identifier, each joined with its country.
    async fn get_authors(&self, tx: &mut Tx) -> Result<Vec<Author>, RepositoryError>;

    /// Returns the author with the given identifier, joined with its country.
    ///
    /// Fails with `RepositoryError::NotFound` when no author exists.
    async fn get_author_by_id(&self, tx: &mut Tx, id: u16) -> Result<Author, RepositoryError>;

    /// Inserts a new author and returns it with the identifier and timestamp assigned by the
    /// database.
    ///
    /// The returned author never carries a joined country.
    async fn insert_author(&self, tx: &mut Tx, author: &Author) -> Result<Author, RepositoryError>;

    /// Overwrites all mutable columns of the author with `author.id` and refreshes its timestamp.
    ///
    /// Returns the number of affected rows.
    async fn update_author(&self, tx: &mut Tx, author: &Author) -> Result<u64, RepositoryError>;

    /// Removes the author with the given identifier and returns the number of affected rows.
    async fn delete_author(&self, tx: &mut Tx, id: u16) -> Result<u64, RepositoryError>;
}

/// Storage interface for countries.
#[async_trait]
pub trait CountryStore {
    /// Returns all countries ordered by their identifier.
    async fn get_countries(&self, tx: &mut Tx) -> Result<Vec<Country>, RepositoryError>;

    /// Returns the country with the given identifier.
    ///
    /// Fails with `RepositoryError::NotFound` when no country exists.
    async fn get_country_by_id(&self, tx: &mut Tx, id: u8) -> Result<Country, RepositoryError>;

    /// Inserts a new country and returns it with the identifier and timestamp assigned by the
    /// database.
    async fn insert_country(
        &self,
        tx: &mut Tx,
        country: &Country,
    ) -> Result<Country, RepositoryError>;

    /// Overwrites all mutable columns of the country with `country.id` and refreshes its
    /// timestamp.
    ///
    /// Returns the number of affected rows.
    async fn update_country(&self, tx: &mut Tx, country: &Country) -> Result<u64, RepositoryError>;

    /// Removes the country with the given identifier and returns the number of affected rows.
    async fn delete_country(&self, tx: &mut Tx, id: u8) -> Result<u64, RepositoryError>;
}
