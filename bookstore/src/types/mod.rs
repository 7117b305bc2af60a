// SPDX-License-Identifier: AGPL-3.0-or-later

//! Domain entities and the request shapes used to create or change them.
mod author;
mod country;

pub use author::{Author, CreateAuthorRequest, UpdateAuthorRequest};
pub use country::{Country, CreateCountryRequest, UpdateCountryRequest};
