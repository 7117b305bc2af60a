// SPDX-License-Identifier: AGPL-3.0-or-later

//! Usecases of the catalog.
//!
//! Usecases are the only place where requests get validated and where transactions begin and
//! end. Every operation runs in exactly one transaction which is committed when the operation
//! succeeded and rolled back otherwise.
mod author;
mod country;
pub mod errors;

pub use author::AuthorUsecase;
pub use country::CountryUsecase;
