// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Country;

/// Author of books sold in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Identifier assigned by the database on insert.
    pub id: u16,

    /// Time of the last write, set by the database.
    pub updated_at: DateTime<Utc>,

    /// Country the author lives in.
    pub country_id: u8,

    /// Display name.
    pub author: String,

    /// City the author lives in.
    pub city: String,

    /// Snapshot of the related country.
    ///
    /// Only read operations populate this field, it stays empty on write paths and when the
    /// referenced country row does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

/// Request to create a new author.
///
/// Missing fields fall back to their zero value and are caught during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateAuthorRequest {
    /// Existing country the author lives in.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub country_id: u8,

    /// Display name, 3 to 50 characters.
    #[serde(default)]
    #[validate(length(min = 3, max = 50))]
    pub author: String,

    /// City, 3 to 50 characters.
    #[serde(default)]
    #[validate(length(min = 3, max = 50))]
    pub city: String,
}

/// Request to change an existing author.
///
/// Only present fields get applied, absent ones keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateAuthorRequest {
    /// Identifier of the author to update, always taken from the request path.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub id: u16,

    /// New country of the author.
    #[validate(range(min = 1))]
    pub country_id: Option<u8>,

    /// New display name.
    #[validate(length(min = 3, max = 50))]
    pub author: Option<String>,

    /// New city.
    #[validate(length(min = 3, max = 50))]
    pub city: Option<String>,
}

impl From<CreateAuthorRequest> for Author {
    fn from(request: CreateAuthorRequest) -> Self {
        Self {
            country_id: request.country_id,
            author: request.author,
            city: request.city,
            ..Default::default()
        }
    }
}

impl UpdateAuthorRequest {
    /// Overwrites the fields of `author` which are present in this request.
    pub fn merge_into(self, author: &mut Author) {
        if let Some(country_id) = self.country_id {
            author.country_id = country_id;
        }

        if let Some(name) = self.author {
            author.author = name;
        }

        if let Some(city) = self.city {
            author.city = city;
        }
    }
}
