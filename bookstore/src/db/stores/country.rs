// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::TryFrom;

use async_trait::async_trait;
use log::debug;
use sqlx::{query, query_as};

use crate::db::conversions::parse_timestamp;
use crate::db::errors::RepositoryError;
use crate::db::models::CountryRow;
use crate::db::traits::CountryStore;
use crate::db::{SqlStore, Tx};
use crate::types::Country;

const ENTITY: &str = "country";

#[async_trait]
impl CountryStore for SqlStore {
    async fn get_countries(&self, tx: &mut Tx) -> Result<Vec<Country>, RepositoryError> {
        let rows = query_as::<_, CountryRow>(
            "
            SELECT
                id,
                updated_at,
                iso3,
                country,
                nice_country,
                currency
            FROM
                countries
            ORDER BY
                id
            ",
        )
        .fetch_all(&mut **tx)
        .await?;

        debug!("Fetched {} countries", rows.len());

        rows.into_iter().map(Country::try_from).collect()
    }

    async fn get_country_by_id(&self, tx: &mut Tx, id: u8) -> Result<Country, RepositoryError> {
        let row = query_as::<_, CountryRow>(
            "
            SELECT
                id,
                updated_at,
                iso3,
                country,
                nice_country,
                currency
            FROM
                countries
            WHERE
                id = $1
            ",
        )
        .bind(i64::from(id))
        .fetch_optional(&mut **tx)
        .await?;

        match row {
            Some(row) => Country::try_from(row),
            None => Err(RepositoryError::NotFound {
                entity: ENTITY,
                id: i64::from(id),
            }),
        }
    }

    async fn insert_country(
        &self,
        tx: &mut Tx,
        country: &Country,
    ) -> Result<Country, RepositoryError> {
        let (id, updated_at) = query_as::<_, (i64, String)>(
            "
            INSERT INTO
                countries (
                    iso3,
                    country,
                    nice_country,
                    currency
                )
            VALUES
                ($1, $2, $3, $4)
            RETURNING
                id,
                updated_at
            ",
        )
        .bind(&country.iso3)
        .bind(&country.country)
        .bind(&country.nice_country)
        .bind(&country.currency)
        .fetch_one(&mut **tx)
        .await
        .map_err(|err| RepositoryError::from_write(ENTITY, err))?;

        debug!("Inserted country {}", id);

        Ok(Country {
            id: u8::try_from(id).map_err(|_| {
                RepositoryError::decode(ENTITY, format!("identifier {} out of range", id))
            })?,
            updated_at: parse_timestamp(&updated_at)
                .map_err(|err| RepositoryError::decode(ENTITY, err))?,
            ..country.clone()
        })
    }

    async fn update_country(&self, tx: &mut Tx, country: &Country) -> Result<u64, RepositoryError> {
        let result = query(
            "
            UPDATE
                countries
            SET
                iso3 = $1,
                country = $2,
                nice_country = $3,
                currency = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE
                id = $5
            ",
        )
        .bind(&country.iso3)
        .bind(&country.country)
        .bind(&country.nice_country)
        .bind(&country.currency)
        .bind(i64::from(country.id))
        .execute(&mut **tx)
        .await
        .map_err(|err| RepositoryError::from_write(ENTITY, err))?;

        debug!(
            "Updated country {}, {} rows affected",
            country.id,
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }

    async fn delete_country(&self, tx: &mut Tx, id: u8) -> Result<u64, RepositoryError> {
        let result = query(
            "
            DELETE
            FROM
                countries
            WHERE
                id = $1
            ",
        )
        .bind(i64::from(id))
        .execute(&mut **tx)
        .await
        .map_err(|err| RepositoryError::from_write(ENTITY, err))?;

        debug!(
            "Deleted country {}, {} rows affected",
            id,
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::db::errors::RepositoryError;
    use crate::db::traits::{AuthorStore, CountryStore};
    use crate::test_utils::{add_author, add_country, author, country, test_runner, TestNode};
    use crate::types::{Author, Country};

    #[rstest]
    fn inserts_and_gets_country(country: Country) {
        test_runner(|node: TestNode| async move {
            let store = &node.context.store;
            let mut tx = store.begin().await.unwrap();

            let inserted = store.insert_country(&mut tx, &country).await.unwrap();
            assert!(inserted.id > 0);
            assert_eq!(inserted.iso3, country.iso3);

            let fetched = store.get_country_by_id(&mut tx, inserted.id).await.unwrap();
            assert_eq!(fetched, inserted);
        });
    }

    #[rstest]
    fn lists_countries_in_id_order(country: Country) {
        test_runner(|node: TestNode| async move {
            let store = &node.context.store;
            let first = add_country(store, &country).await;
            let second = add_country(
                store,
                &Country {
                    iso3: "NLD".into(),
                    ..country.clone()
                },
            )
            .await;

            let mut tx = store.begin().await.unwrap();
            let countries = store.get_countries(&mut tx).await.unwrap();
            assert_eq!(
                countries.iter().map(|c| c.id).collect::<Vec<u8>>(),
                vec![first.id, second.id]
            );
        });
    }

    #[rstest]
    fn missing_country_is_not_found() {
        test_runner(|node: TestNode| async move {
            let store = &node.context.store;
            let mut tx = store.begin().await.unwrap();

            assert!(matches!(
                store.get_country_by_id(&mut tx, 99).await,
                Err(RepositoryError::NotFound { id: 99, .. })
            ));
        });
    }

    #[rstest]
    fn reports_affected_rows(country: Country) {
        test_runner(|node: TestNode| async move {
            let store = &node.context.store;
            let stored = add_country(store, &country).await;
            let mut tx = store.begin().await.unwrap();

            let changed = Country {
                currency: "EUR".into(),
                ..stored.clone()
            };
            assert_eq!(store.update_country(&mut tx, &changed).await.unwrap(), 1);
            let fetched = store.get_country_by_id(&mut tx, stored.id).await.unwrap();
            assert_eq!(fetched.currency, "EUR");
            assert!(fetched.updated_at >= stored.updated_at);

            let missing = Country {
                id: 200,
                ..changed
            };
            assert_eq!(store.update_country(&mut tx, &missing).await.unwrap(), 0);

            assert_eq!(store.delete_country(&mut tx, stored.id).await.unwrap(), 1);
            assert_eq!(store.delete_country(&mut tx, stored.id).await.unwrap(), 0);
        });
    }

    #[rstest]
    fn referenced_country_can_not_be_deleted(country: Country, author: Author) {
        test_runner(|node: TestNode| async move {
            let store = &node.context.store;
            let stored = add_country(store, &country).await;
            add_author(
                store,
                &Author {
                    country_id: stored.id,
                    ..author
                },
            )
            .await;

            let mut tx = store.begin().await.unwrap();
            assert!(matches!(
                store.delete_country(&mut tx, stored.id).await,
                Err(RepositoryError::ConstraintViolation { .. })
            ));
            tx.rollback().await.unwrap();

            let mut tx = store.begin().await.unwrap();
            assert_eq!(store.get_authors(&mut tx).await.unwrap().len(), 1);
        });
    }
}
