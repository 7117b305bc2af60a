// SPDX-License-Identifier: AGPL-3.0-or-later

use sqlx::FromRow;

/// Representation of a row from the `countries` table as stored in the database.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct CountryRow {
    /// Auto-incremented primary key.
    pub id: i64,

    /// Timestamp of the last write in the database's text format.
    pub updated_at: String,

    /// Three-letter ISO code.
    pub iso3: String,

    /// Official name.
    pub country: String,

    /// Common name.
    pub nice_country: String,

    /// Currency code or name.
    pub currency: String,
}
