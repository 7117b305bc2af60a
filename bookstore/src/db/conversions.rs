// SPDX-License-Identifier: AGPL-3.0-or-later

//! Conversions from database rows into domain entities.
use std::convert::TryFrom;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::db::errors::RepositoryError;
use crate::db::models::{AuthorJoinedRow, CountryRow};
use crate::types::{Author, Country};

/// Parses a timestamp as written by the database.
///
/// SQLite stores `CURRENT_TIMESTAMP` as "YYYY-MM-DD HH:MM:SS" in UTC, PostgreSQL renders it with
/// fractional seconds and an offset, for example "2024-03-01 10:00:00.123456+00".
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z"))
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
                .map(|timestamp| Utc.from_utc_datetime(&timestamp))
        })
}

/// Converts a database identifier into the narrower id type of an entity.
fn decode_id<T: TryFrom<i64>>(entity: &'static str, id: i64) -> Result<T, RepositoryError> {
    T::try_from(id)
        .map_err(|_| RepositoryError::decode(entity, format!("identifier {} out of range", id)))
}

fn decode_timestamp(entity: &'static str, value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    parse_timestamp(value).map_err(|err| {
        RepositoryError::decode(entity, format!("invalid timestamp '{}': {}", value, err))
    })
}

fn required<T>(entity: &'static str, column: &str, value: Option<T>) -> Result<T, RepositoryError> {
    value.ok_or_else(|| RepositoryError::decode(entity, format!("missing column {}", column)))
}

impl TryFrom<CountryRow> for Country {
    type Error = RepositoryError;

    fn try_from(row: CountryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: decode_id("country", row.id)?,
            updated_at: decode_timestamp("country", &row.updated_at)?,
            iso3: row.iso3,
            country: row.country,
            nice_country: row.nice_country,
            currency: row.currency,
        })
    }
}

impl TryFrom<AuthorJoinedRow> for Author {
    type Error = RepositoryError;

    fn try_from(row: AuthorJoinedRow) -> Result<Self, Self::Error> {
        // A missing country id means the left join found no matching row
        let country = match row.joined_id {
            Some(id) => {
                let country_row = CountryRow {
                    id,
                    updated_at: required("author", "joined_updated_at", row.joined_updated_at)?,
                    iso3: required("author", "joined_iso3", row.joined_iso3)?,
                    country: required("author", "joined_country", row.joined_country)?,
                    nice_country: required(
                        "author",
                        "joined_nice_country",
                        row.joined_nice_country,
                    )?,
                    currency: required("author", "joined_currency", row.joined_currency)?,
                };

                Some(Country::try_from(country_row)?)
            }
            None => None,
        };

        Ok(Self {
            id: decode_id("author", row.id)?,
            updated_at: decode_timestamp("author", &row.updated_at)?,
            country_id: decode_id("author", row.country_id)?,
            author: row.author,
            city: row.city,
            country,
        })
    }
}
