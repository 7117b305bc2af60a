// SPDX-License-Identifier: AGPL-3.0-or-later

use sqlx::FromRow;

/// A row from the `authors` table joined with its (optional) row from the `countries` table.
///
/// All `joined_*` columns are `NULL` when the author references a country which does not exist.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct AuthorJoinedRow {
    /// Auto-incremented primary key.
    pub id: i64,

    /// Timestamp of the last write in the database's text format.
    pub updated_at: String,

    /// Foreign key into the `countries` table.
    pub country_id: i64,

    /// Display name.
    pub author: String,

    /// City the author lives in.
    pub city: String,

    /// Primary key of the joined country.
    pub joined_id: Option<i64>,

    /// Timestamp of the joined country.
    pub joined_updated_at: Option<String>,

    /// ISO code of the joined country.
    pub joined_iso3: Option<String>,

    /// Official name of the joined country.
    pub joined_country: Option<String>,

    /// Common name of the joined country.
    pub joined_nice_country: Option<String>,

    /// Currency of the joined country.
    pub joined_currency: Option<String>,
}
