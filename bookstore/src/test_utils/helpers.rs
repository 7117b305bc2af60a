// SPDX-License-Identifier: AGPL-3.0-or-later

use rstest::fixture;

use crate::db::traits::{AuthorStore, CountryStore};
use crate::db::SqlStore;
use crate::types::{Author, Country};

/// Country which passes all request validations.
#[fixture]
pub fn country() -> Country {
    Country {
        iso3: "IDN".into(),
        country: "Republic of Indonesia".into(),
        nice_country: "Indonesia".into(),
        currency: "IDR".into(),
        ..Default::default()
    }
}

/// Author which passes all request validations, referencing the first country in the database.
#[fixture]
pub fn author() -> Author {
    Author {
        country_id: 1,
        author: "Jane Doe".into(),
        city: "Jakarta".into(),
        ..Default::default()
    }
}

/// Inserts a country in its own committed transaction.
pub async fn add_country(store: &SqlStore, country: &Country) -> Country {
    let mut tx = store.begin().await.unwrap();
    let country = store.insert_country(&mut tx, country).await.unwrap();
    tx.commit().await.unwrap();
    country
}

/// Inserts an author in its own committed transaction.
pub async fn add_author(store: &SqlStore, author: &Author) -> Author {
    let mut tx = store.begin().await.unwrap();
    let author = store.insert_author(&mut tx, author).await.unwrap();
    tx.commit().await.unwrap();
    author
}
