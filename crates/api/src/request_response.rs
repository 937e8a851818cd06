// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use crate::dashboard::CaseSummaryRow;
use intake_autofill::{AutofillStatus, AutofillTarget};
use intake_domain::options::OptionCatalogue;
use intake_domain::{CaseId, CaseRecord, ErrorTree, FieldPath, Province};

/// API request to write one text field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SetFieldRequest {
    /// Dotted path of the field.
    pub path: String,
    /// Raw input; sanitized before it is stored.
    pub value: String,
}

/// API request to add or remove one member of a multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ToggleRequest {
    /// Dotted path of the set field.
    pub path: String,
    /// The option being toggled.
    pub item: String,
    /// Whether the option should be selected afterwards.
    pub included: bool,
}

/// API request to revalidate one field after it loses focus.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct BlurRequest {
    /// Dotted path of the field.
    pub path: String,
    /// The value the field holds.
    pub value: String,
}

/// API response listing the leaf paths an edit touched.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChangedFieldsResponse {
    /// Touched leaf paths, sorted.
    pub changed: Vec<FieldPath>,
}

/// API response for a blur revalidation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BlurResponse {
    /// The revalidated path.
    pub path: FieldPath,
    /// The message now shown for the field, if any.
    pub error: Option<String>,
}

/// Autofill status of one tracked document number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillStatusEntry {
    /// The sub-record being filled.
    pub target: AutofillTarget,
    /// Its root key, e.g. `cliente`.
    pub base_path: &'static str,
    /// Current status.
    pub status: AutofillStatus,
}

/// Everything a form needs to render one session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The record being edited.
    pub record: CaseRecord,
    /// Validation messages, shaped like the record.
    pub errors: ErrorTree,
    /// One entry per tracked document number.
    pub autofill: Vec<AutofillStatusEntry>,
    /// The stored case being edited, if any.
    pub editing: Option<CaseId>,
    /// Whether the third-vehicle defendants section is present.
    pub third_vehicle: bool,
}

/// API response for a newly opened session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreatedResponse {
    /// Identifier to address the session with.
    pub session_id: u64,
}

/// API response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmitResponse {
    /// The stored case id.
    pub id: CaseId,
    /// Whether an existing case was updated rather than created.
    pub updated: bool,
    /// Essential data the case is still missing. Does not block submission.
    pub warnings: Vec<String>,
}

/// API response for the dashboard listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CaseListResponse {
    /// Matching cases, newest first.
    pub cases: Vec<CaseSummaryRow>,
    /// Number of matching cases.
    pub total: usize,
}

/// API response after a transcription was appended to the narration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationResponse {
    /// The narration after the append.
    pub narracion_hechos: String,
}

/// API response with every option catalogue and the province list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OptionsResponse {
    /// Fixed option lists.
    pub catalogues: Vec<OptionCatalogue>,
    /// Known provinces.
    pub provinces: Vec<Province>,
}
