// SPDX-License-Identifier: AGPL-3.0-or-later

use log::warn;
use validator::Validate;

use crate::db::errors::RepositoryError;
use crate::db::traits::CountryStore;
use crate::db::transaction::commit_or_rollback;
use crate::db::{SqlStore, Tx};
use crate::domain::errors::UsecaseError;
use crate::types::{Country, CreateCountryRequest, UpdateCountryRequest};

/// Operations on countries, each running in its own transaction.
#[derive(Clone, Debug)]
pub struct CountryUsecase {
    store: SqlStore,
}

impl CountryUsecase {
    pub fn new(store: SqlStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Country>, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            let mut tx = self.store.begin().await?;
            let result = self.store.get_countries(&mut tx).await.map_err(Into::into);
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("list countries", err))
    }

    pub async fn get_by_id(&self, id: u8) -> Result<Country, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            let mut tx = self.store.begin().await?;
            let result = self
                .store
                .get_country_by_id(&mut tx, id)
                .await
                .map_err(Into::into);
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("get country", err))
    }

    pub async fn create(&self, request: CreateCountryRequest) -> Result<Country, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            request.validate()?;

            let mut tx = self.store.begin().await?;
            let result = self
                .store
                .insert_country(&mut tx, &Country::from(request))
                .await
                .map_err(Into::into);
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("create country", err))
    }

    /// Applies all fields present in the request to an existing country.
    pub async fn update(&self, request: UpdateCountryRequest) -> Result<Country, UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            request.validate()?;

            let mut tx = self.store.begin().await?;
            let result = self.merge(&mut tx, request).await;
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("update country", err))
    }

    /// Removes a country.
    ///
    /// Fails with a validation error while authors still live in it.
    pub async fn delete(&self, id: u8) -> Result<(), UsecaseError> {
        let result: Result<_, UsecaseError> = async {
            let mut tx = self.store.begin().await?;
            let result = self.remove(&mut tx, id).await;
            commit_or_rollback(tx, result).await
        }
        .await;

        result.map_err(|err| failed("delete country", err))
    }

    async fn merge(
        &self,
        tx: &mut Tx,
        request: UpdateCountryRequest,
    ) -> Result<Country, UsecaseError> {
        let id = request.id;
        let mut country = self.store.get_country_by_id(tx, id).await?;
        request.merge_into(&mut country);

        if self.store.update_country(tx, &country).await? == 0 {
            return Err(not_found(id));
        }

        let country = self.store.get_country_by_id(tx, id).await?;
        Ok(country)
    }

    async fn remove(&self, tx: &mut Tx, id: u8) -> Result<(), UsecaseError> {
        self.store.get_country_by_id(tx, id).await?;

        if self.store.delete_country(tx, id).await? == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn not_found(id: u8) -> UsecaseError {
    RepositoryError::NotFound {
        entity: "country",
        id: i64::from(id),
    }
    .into()
}

fn failed(operation: &str, err: UsecaseError) -> UsecaseError {
    warn!("Failed to {}: {}", operation, err);
    err
}
