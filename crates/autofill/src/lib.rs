// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod config;
mod controller;
mod http;
mod lookup;
mod mapping;
mod target;

#[cfg(test)]
mod tests;

pub use config::{AutofillConfig, DEFAULT_DEBOUNCE};
pub use controller::{
    AutofillAction, AutofillController, AutofillPhase, AutofillStatus, KeyChange,
    LOOKUP_FAILED_MESSAGE, LookupEvent, LookupEventKind, NOT_FOUND_MESSAGE,
};
pub use http::HttpClientLookup;
pub use lookup::{ClientLookup, LookupError, LookupFields, LookupOutcome, LookupPayload};
pub use mapping::{map_lookup_fields, normalize_record_id};
pub use target::AutofillTarget;
