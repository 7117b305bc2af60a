// SPDX-License-Identifier: AGPL-3.0-or-later

mod api;
pub mod context;
mod errors;
mod extractors;
mod response;
pub mod service;

pub use response::{Empty, Envelope};
pub use service::http_service;
