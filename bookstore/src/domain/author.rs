// SPDX-License-Identifier: AGPL-3.0-or-later

use log::warn;
use validator::Validate;

use crate::db::errors::RepositoryError;
use crate::db::traits::{AuthorStore, CountryStore};
use crate::db::transaction::commit_or_rollback;
use crate::db::{SqlStore, Tx};
use crate::domain::errors::UsecaseError;
use crate::types::{Author, CreateAuthorRequest, UpdateAuthorRequest};

/// Operations on authors, each running in its own transaction.
#[derive(Clone, Debug)]
pub struct AuthorUsecase {
    store: SqlStore,
}

impl AuthorUsecase {
    pub fn new(store: SqlStore) -> Self {
        Self { store }
    }

    /// Returns all authors with their countries.
    pub async fn list(&self) -> Result<Vec<Author>, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            let mut tx = self.store.begin().await?;
            let result = self.store.get_authors(&mut tx).await.map_err(Into::into);
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("list authors", err))
    }

    /// Returns a single author with its country.
    pub async fn get_by_id(&self, id: u16) -> Result<Author, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            let mut tx = self.store.begin().await?;
            let result = self
                .store
                .get_author_by_id(&mut tx, id)
                .await
                .map_err(Into::into);
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("get author", err))
    }

    /// Validates the request and stores a new author living in an existing country.
    pub async fn create(&self, request: CreateAuthorRequest) -> Result<Author, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            request.validate()?;

            let mut tx = self.store.begin().await?;
            let result = self.insert(&mut tx, Author::from(request)).await;
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("create author", err))
    }

    /// Applies all fields present in the request to an existing author.
    ///
    /// Returns the author as it is stored after the update.
    pub async fn update(&self, request: UpdateAuthorRequest) -> Result<Author, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            request.validate()?;

            let mut tx = self.store.begin().await?;
            let result = self.merge(&mut tx, request).await;
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("update author", err))
    }

    /// Removes an existing author.
    pub async fn delete(&self, id: u16) -> Result<(), UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            let mut tx = self.store.begin().await?;
            let result = self.remove(&mut tx, id).await;
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("delete author", err))
    }

    async fn insert(&self, tx: &mut Tx, author: Author) -> Result<Author, UsecaseError> {
        self.ensure_country_exists(tx, author.country_id).await?;
        let author = self.store.insert_author(tx, &author).await?;
        Ok(author)
    }

    async fn merge(
        &self,
        tx: &mut Tx,
        request: UpdateAuthorRequest,
    ) -> Result<Author, UsecaseError> {
        let id = request.id;
        let mut author = self.store.get_author_by_id(tx, id).await?;

        if let Some(country_id) = request.country_id {
            self.ensure_country_exists(tx, country_id).await?;
        }

        request.merge_into(&mut author);

        if self.store.update_author(tx, &author).await? == 0 {
            return Err(not_found(id));
        }

        // Read again to pick up the new timestamp and country
        let author = self.store.get_author_by_id(tx, id).await?;
        Ok(author)
    }

    async fn remove(&self, tx: &mut Tx, id: u16) -> Result<(), UsecaseError> {
        self.store.get_author_by_id(tx, id).await?;

        if self.store.delete_author(tx, id).await? == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn ensure_country_exists(
        &self,
        tx: &mut Tx,
        country_id: u8,
    ) -> Result<(), UsecaseError> {
        match self.store.get_country_by_id(tx, country_id).await {
            Ok(_) => Ok(()),
            Err(RepositoryError::NotFound { .. }) => Err(UsecaseError::invalid_fields(["country_id"])),
            Err(err) => Err(err.into()),
        }
    }
}

fn not_found(id: u16) -> UsecaseError {
    RepositoryError::NotFound {
        entity: "author",
        id: i64::from(id),
    }
    .into()
}

fn failed(operation: &str, err: UsecaseError) -> UsecaseError {
    warn!("Failed to {}: {}", operation, err);
    err
}
