// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the case intake engine.
//!
//! ## Storage Model
//!
//! - **Create** posts the case to the remote case service when one is
//!   configured and keeps the id it assigns. A missing id falls back to a
//!   millisecond timestamp, bumped past every id already in use.
//! - **List, get, update and delete** operate on the local cache only.
//! - The cache is a JSON array of case objects, each carrying an integer
//!   `id`. It lives in memory and is optionally mirrored to a file.
//!
//! The province catalogue is loaded from a local cache file, a remote
//! endpoint, or the built-in list, in that order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod provinces;
mod remote;
mod repository;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use provinces::{ProvinceSource, load_provinces, parse_province_payload};
pub use remote::{RemoteCaseService, created_id};
pub use repository::{CaseListEntry, CaseRepository};
pub use store::CaseStore;
