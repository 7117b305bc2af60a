// SPDX-License-Identifier: AGPL-3.0-or-later

//! Implementations of the repository traits on top of [`SqlStore`](crate::db::SqlStore).
mod author;
mod country;
