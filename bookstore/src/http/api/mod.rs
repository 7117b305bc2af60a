// SPDX-License-Identifier: AGPL-3.0-or-later

//! Handlers of the REST API.
mod author;
mod country;

pub use author::{create_author, delete_author, get_author, get_authors, update_author};
pub use country::{create_country, delete_country, get_countries, get_country, update_country};
