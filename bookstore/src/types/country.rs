// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Country authors can live in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Identifier assigned by the database on insert.
    pub id: u8,

    /// Time of the last write, set by the database.
    pub updated_at: DateTime<Utc>,

    /// Three-letter ISO 3166-1 code, for example "IDN".
    pub iso3: String,

    /// Official name.
    pub country: String,

    /// Common name used for display.
    pub nice_country: String,

    /// Currency code or name.
    pub currency: String,
}

/// Request to create a new country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateCountryRequest {
    /// Three-letter ISO code.
    #[serde(default)]
    #[validate(length(equal = 3))]
    pub iso3: String,

    /// Official name, 3 to 50 characters.
    #[serde(default)]
    #[validate(length(min = 3, max = 50))]
    pub country: String,

    /// Common name, 3 to 50 characters.
    #[serde(default)]
    #[validate(length(min = 3, max = 50))]
    pub nice_country: String,

    /// Currency, 3 to 50 characters.
    #[serde(default)]
    #[validate(length(min = 3, max = 50))]
    pub currency: String,
}

/// Request to change an existing country, absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateCountryRequest {
    /// Identifier of the country to update, always taken from the request path.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub id: u8,

    /// New three letter country code.
    #[validate(length(equal = 3))]
    pub iso3: Option<String>,

    /// New official name.
    #[validate(length(min = 3, max = 50))]
    pub country: Option<String>,

    /// New short display name.
    #[validate(length(min = 3, max = 50))]
    pub nice_country: Option<String>,

    /// New currency code.
    #[validate(length(min = 3, max = 50))]
    pub currency: Option<String>,
}

impl From<CreateCountryRequest> for Country {
    fn from(request: CreateCountryRequest) -> Self {
        Self {
            iso3: request.iso3,
            country: request.country,
            nice_country: request.nice_country,
            currency: request.currency,
            ..Default::default()
        }
    }
}

impl UpdateCountryRequest {
    /// Overwrites the fields of `country` which are present in this request.
    pub fn merge_into(self, country: &mut Country) {
        if let Some(iso3) = self.iso3 {
            country.iso3 = iso3;
        }

        if let Some(name) = self.country {
            country.country = name;
        }

        if let Some(nice_country) = self.nice_country {
            country.nice_country = nice_country;
        }

        if let Some(currency) = self.currency {
            country.currency = currency;
        }
    }
}
