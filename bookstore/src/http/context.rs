// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::SqlStore;
use crate::domain::{AuthorUsecase, CountryUsecase};

#[derive(Clone, Debug)]
pub struct HttpServiceContext {
    /// Operations on authors.
    pub authors: AuthorUsecase,

    /// Operations on countries.
    pub countries: CountryUsecase,
}

impl HttpServiceContext {
    pub fn new(store: SqlStore) -> Self {
        Self {
            authors: AuthorUsecase::new(store.clone()),
            countries: CountryUsecase::new(store),
        }
    }
}
