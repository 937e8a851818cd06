// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Search and filtering over stored cases.

use intake_domain::{CaseId, CaseRecord, INCIDENT_DATE_PATH};
use intake_persistence::CaseListEntry;
use serde::{Deserialize, Serialize};

/// Client full name, searched and listed.
pub const CLIENT_NAME_PATH: &str = "cliente.nombreCompleto";
/// Client DNI, searched and listed.
pub const CLIENT_DNI_PATH: &str = "cliente.dni";
/// Police area classification.
pub const AREA_POLICIAL_PATH: &str = "clasificacionFinal.areaPolicial";
/// Injury classification.
pub const LESIONES_PATH: &str = "clasificacionFinal.lesiones";
/// Claim type.
pub const RECLAMO_PATH: &str = "clasificacionFinal.reclamo";

/// Dashboard search and filter criteria. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaseFilters {
    /// Case-insensitive substring of the client's full name or DNI.
    #[serde(default, rename = "q")]
    pub query: String,
    /// Exact `clasificacionFinal.areaPolicial`.
    #[serde(default)]
    pub area_policial: String,
    /// Exact `clasificacionFinal.lesiones`.
    #[serde(default)]
    pub lesiones: String,
    /// Exact `clasificacionFinal.reclamo`.
    #[serde(default)]
    pub reclamo: String,
}

impl CaseFilters {
    /// Whether `record` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, record: &CaseRecord) -> bool {
        let exact: [(&str, &str); 3] = [
            (self.area_policial.as_str(), AREA_POLICIAL_PATH),
            (self.lesiones.as_str(), LESIONES_PATH),
            (self.reclamo.as_str(), RECLAMO_PATH),
        ];
        if exact
            .iter()
            .any(|(wanted, path)| !wanted.is_empty() && record.text(path) != *wanted)
        {
            return false;
        }

        if self.query.is_empty() {
            return true;
        }
        let needle: String = self.query.to_lowercase();
        [CLIENT_NAME_PATH, CLIENT_DNI_PATH]
            .iter()
            .any(|path| record.text(path).to_lowercase().contains(&needle))
    }
}

/// One row of the dashboard listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummaryRow {
    /// Case id.
    pub id: CaseId,
    /// Client full name.
    pub nombre_completo: String,
    /// Client DNI.
    pub dni: String,
    /// Incident date as stored.
    pub fecha_hecho: String,
    /// Police area classification.
    pub area_policial: String,
    /// Injury classification.
    pub lesiones: String,
    /// Claim type.
    pub reclamo: String,
    /// Whether a third vehicle is involved.
    pub tercer_vehiculo: bool,
}

impl CaseSummaryRow {
    /// Summarizes a stored case.
    #[must_use]
    pub fn from_entry(entry: &CaseListEntry) -> Self {
        let record: &CaseRecord = &entry.record;
        Self {
            id: entry.id,
            nombre_completo: record.text(CLIENT_NAME_PATH).to_string(),
            dni: record.text(CLIENT_DNI_PATH).to_string(),
            fecha_hecho: record.text(INCIDENT_DATE_PATH).to_string(),
            area_policial: record.text(AREA_POLICIAL_PATH).to_string(),
            lesiones: record.text(LESIONES_PATH).to_string(),
            reclamo: record.text(RECLAMO_PATH).to_string(),
            tercer_vehiculo: record.third_vehicle_defendants().is_some(),
        }
    }
}

/// Applies `filters` and orders the result newest first (highest id first).
#[must_use]
pub fn filter_cases(entries: Vec<CaseListEntry>, filters: &CaseFilters) -> Vec<CaseListEntry> {
    let mut matching: Vec<CaseListEntry> = entries
        .into_iter()
        .filter(|entry| filters.matches(&entry.record))
        .collect();
    matching.sort_by(|a, b| b.id.cmp(&a.id));
    matching
}
