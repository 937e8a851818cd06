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

pub mod dates;
mod error;
mod error_tree;
pub mod options;
pub mod path;
mod province;
mod record;
pub mod schema;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use error_tree::ErrorTree;
pub use path::FieldPath;
pub use province::{Province, ProvinceCatalog, slug};
pub use record::{CaseId, CaseRecord, FieldSet, PartialFields, Record, Value};
pub use schema::{LeafKind, OptionalSection};
pub use validation::{
    CLIENT_ZONES_MESSAGE, CLIENT_ZONES_PATH, CO_ACTOR_NAME_PATH, CO_ACTOR_ZONES_MESSAGE,
    CO_ACTOR_ZONES_PATH, DNI_MESSAGE, EMAIL_MESSAGE, FieldError, INCIDENT_DATE_PATH,
    PAST_DATE_MESSAGE, PHONE_MESSAGE, REQUIRED_FIELDS, REQUIRED_MESSAGE, SUBMISSION_CHECKS,
    is_required, is_valid_dni, validate_case_for_submission, validate_field, validate_form,
};
