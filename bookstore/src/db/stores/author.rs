// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::TryFrom;

use async_trait::async_trait;
use log::debug;
use sqlx::{query, query_as};

use crate::db::conversions::parse_timestamp;
use crate::db::errors::RepositoryError;
use crate::db::models::AuthorJoinedRow;
use crate::db::traits::AuthorStore;
use crate::db::{SqlStore, Tx};
use crate::types::Author;

const ENTITY: &str = "author";

#[async_trait]
impl AuthorStore for SqlStore {
    async fn get_authors(&self, tx: &mut Tx) -> Result<Vec<Author>, RepositoryError> {
        let rows = query_as::<_, AuthorJoinedRow>(
            "
            SELECT
                authors.id,
                authors.updated_at,
                authors.country_id,
                authors.author,
                authors.city,
                countries.id AS joined_id,
                countries.updated_at AS joined_updated_at,
                countries.iso3 AS joined_iso3,
                countries.country AS joined_country,
                countries.nice_country AS joined_nice_country,
                countries.currency AS joined_currency
            FROM
                authors
                LEFT JOIN countries
                    ON countries.id = authors.country_id
            ORDER BY
                authors.id
            ",
        )
        .fetch_all(&mut **tx)
        .await?;

        debug!("Fetched {} authors", rows.len());

        rows.into_iter().map(Author::try_from).collect()
    }

    async fn get_author_by_id(&self, tx: &mut Tx, id: u16) -> Result<Author, RepositoryError> {
        let row = query_as::<_, AuthorJoinedRow>(
            "
            SELECT
                authors.id,
                authors.updated_at,
                authors.country_id,
                authors.author,
                authors.city,
                countries.id AS joined_id,
                countries.updated_at AS joined_updated_at,
                countries.iso3 AS joined_iso3,
                countries.country AS joined_country,
                countries.nice_country AS joined_nice_country,
                countries.currency AS joined_currency
            FROM
                authors
                LEFT JOIN countries
                    ON countries.id = authors.country_id
            WHERE
                authors.id = $1
            ",
        )
        .bind(i64::from(id))
        .fetch_optional(&mut **tx)
        .await?;

        match row {
            Some(row) => Author::try_from(row),
            None => Err(RepositoryError::NotFound {
                entity: ENTITY,
                id: i64::from(id),
            }),
        }
    }

    async fn insert_author(&self, tx: &mut Tx, author: &Author) -> Result<Author, RepositoryError> {
        let (id, updated_at) = query_as::<_, (i64, String)>(
            "
            INSERT INTO
                authors (
                    country_id,
                    author,
                    city
                )
            VALUES
                ($1, $2, $3)
            RETURNING
                id,
                updated_at
            ",
        )
        .bind(i64::from(author.country_id))
        .bind(&author.author)
        .bind(&author.city)
        .fetch_one(&mut **tx)
        .await
        .map_err(|err| RepositoryError::from_write(ENTITY, err))?;

        debug!("Inserted author {}", id);

        Ok(Author {
            id: u16::try_from(id).map_err(|_| {
                RepositoryError::decode(ENTITY, format!("identifier {} out of range", id))
            })?,
            updated_at: parse_timestamp(&updated_at)
                .map_err(|err| RepositoryError::decode(ENTITY, err))?,
            country: None,
            ..author.clone()
        })
    }

    async fn update_author(&self, tx: &mut Tx, author: &Author) -> Result<u64, RepositoryError> {
        let result = query(
            "
            UPDATE
                authors
            SET
                country_id = $1,
                author = $2,
                city = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE
                id = $4
            ",
        )
        .bind(i64::from(author.country_id))
        .bind(&author.author)
        .bind(&author.city)
        .bind(i64::from(author.id))
        .execute(&mut **tx)
        .await
        .map_err(|err| RepositoryError::from_write(ENTITY, err))?;

        debug!(
            "Updated author {}, {} rows affected",
            author.id,
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }

    async fn delete_author(&self, tx: &mut Tx, id: u16) -> Result<u64, RepositoryError> {
        let result = query(
            "
            DELETE
            FROM
                authors
            WHERE
                id = $1
            ",
        )
        .bind(i64::from(id))
        .execute(&mut **tx)
        .await
        .map_err(|err| RepositoryError::from_write(ENTITY, err))?;

        debug!(
            "Deleted author {}, {} rows affected",
            id,
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }
}
