// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the case intake system.
//!
//! An [`IntakeSession`] wraps one operator's form and its autofill
//! controllers; an [`IntakeDesk`] opens sessions and moves cases in and out
//! of a [`intake_persistence::CaseRepository`]. Everything here returns
//! [`ApiError`], which is the only error type callers see.

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

mod dashboard;
mod desk;
mod documents;
mod error;
mod export;
mod request_response;
mod session;
mod transcription;

#[cfg(test)]
mod tests;

pub use dashboard::{CaseFilters, CaseSummaryRow, filter_cases};
pub use desk::IntakeDesk;
pub use documents::{DocumentKind, case_summary, compose, fee_agreement, lesion_checklist};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use export::{case_to_csv, flatten_record};
pub use request_response::{
    AutofillStatusEntry, BlurRequest, BlurResponse, CaseListResponse, ChangedFieldsResponse,
    NarrationResponse, OptionsResponse, SessionCreatedResponse, SessionSnapshot, SetFieldRequest,
    SubmitResponse, ToggleRequest,
};
pub use session::{IntakeSession, parse_path};
pub use transcription::{HttpTranscriber, Transcriber, TranscriptionError, append_transcription};
