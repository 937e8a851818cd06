// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field and form validation rules.
//!
//! Every function here is pure: the current date is passed in rather than
//! read from the clock.

use crate::dates::parse_iso_date;
use crate::error_tree::ErrorTree;
use crate::path::FieldPath;
use crate::record::CaseRecord;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use time::Date;

/// Paths that must hold a non-blank value before a case can be submitted.
pub const REQUIRED_FIELDS: [&str; 13] = [
    "cliente.nombreCompleto",
    "cliente.dni",
    "cliente.fechaNacimiento",
    "cliente.domicilio",
    "cliente.localidad",
    "cliente.telefono",
    "cliente.mail",
    "cliente.rolAccidente",
    "vehiculoCliente.vehiculo",
    "vehiculoCliente.dominio",
    "siniestro.lugarHecho",
    "siniestro.fechaHecho",
    "siniestro.horaHecho",
];

/// Message for a blank required field.
pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio.";
/// Message for a malformed document number.
pub const DNI_MESSAGE: &str = "Formato de DNI inválido (7 u 8 dígitos).";
/// Message for a malformed email address.
pub const EMAIL_MESSAGE: &str = "Formato de email inválido.";
/// Message for a malformed phone number.
pub const PHONE_MESSAGE: &str = "Formato de teléfono inválido.";
/// Message for a date that is not strictly in the past.
pub const PAST_DATE_MESSAGE: &str = "La fecha debe ser en el pasado.";
/// Message when the claimant has no injured body zone selected.
pub const CLIENT_ZONES_MESSAGE: &str = "Debe seleccionar al menos una zona afectada.";
/// Message when a named co-claimant has no injured body zone selected.
pub const CO_ACTOR_ZONES_MESSAGE: &str =
    "Debe seleccionar al menos una zona afectada para el co-actor.";

/// Path of the claimant's injured body zones.
pub const CLIENT_ZONES_PATH: &str = "cliente.lesiones.zonasAfectadas";
/// Path of the co-claimant's injured body zones.
pub const CO_ACTOR_ZONES_PATH: &str = "coActor1.lesiones.zonasAfectadas";
/// Path of the co-claimant's full name.
pub const CO_ACTOR_NAME_PATH: &str = "coActor1.nombreCompleto";
/// The one date field outside a person record that must lie in the past.
pub const INCIDENT_DATE_PATH: &str = "siniestro.fechaHecho";

/// Essential data checked before a case is stored, with the warning shown
/// when it is missing.
pub const SUBMISSION_CHECKS: [(&str, &str); 4] = [
    ("cliente.nombreCompleto", "Nombre del cliente requerido"),
    ("cliente.dni", "DNI del cliente requerido"),
    (INCIDENT_DATE_PATH, "Fecha del hecho requerida"),
    (
        "demandados.conductor.nombreApellido",
        "Nombre del conductor demandado requerido",
    ),
];

static DNI_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]{7,8}$").ok());
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s()\-]{7,}$").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|regex| regex.is_match(value))
}

/// A validation failure at a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending path.
    pub path: FieldPath,
    /// Human-readable message shown next to the field.
    pub message: String,
}

impl FieldError {
    fn new(path: &FieldPath, message: &str) -> Self {
        Self {
            path: path.clone(),
            message: message.to_string(),
        }
    }
}

/// Whether `value` is a well-formed document number (7 or 8 ASCII digits).
#[must_use]
pub fn is_valid_dni(value: &str) -> bool {
    matches(&DNI_PATTERN, value)
}

/// Whether `path` is in the required set.
#[must_use]
pub fn is_required(path: &FieldPath) -> bool {
    REQUIRED_FIELDS.contains(&path.as_str())
}

fn is_past_date(value: &str, today: Date) -> bool {
    parse_iso_date(value).is_ok_and(|date| date < today)
}

/// Validates a single text field.
///
/// The required rule short-circuits the format rules. Format rules are
/// selected by path suffix and only run on non-blank values.
#[must_use]
pub fn validate_field(path: &FieldPath, value: &str, today: Date) -> Option<FieldError> {
    let blank: bool = value.trim().is_empty();
    if is_required(path) && blank {
        return Some(FieldError::new(path, REQUIRED_MESSAGE));
    }
    if blank {
        return None;
    }

    let raw: &str = path.as_str();
    if raw.ends_with(".dni") && !is_valid_dni(value) {
        return Some(FieldError::new(path, DNI_MESSAGE));
    }
    if raw.ends_with(".mail") && !matches(&EMAIL_PATTERN, value) {
        return Some(FieldError::new(path, EMAIL_MESSAGE));
    }
    if raw.ends_with(".telefono") && !matches(&PHONE_PATTERN, value) {
        return Some(FieldError::new(path, PHONE_MESSAGE));
    }
    if (raw.ends_with(".fechaNacimiento") || raw == INCIDENT_DATE_PATH)
        && !is_past_date(value, today)
    {
        return Some(FieldError::new(path, PAST_DATE_MESSAGE));
    }
    None
}

/// Validates a whole case for submission.
///
/// Runs the field rules over every required path, then the cross-field
/// injury-zone rules. Only failing paths appear in the result.
#[must_use]
pub fn validate_form(record: &CaseRecord, today: Date) -> ErrorTree {
    let mut errors: ErrorTree = ErrorTree::new();

    for raw in REQUIRED_FIELDS {
        let Ok(path) = FieldPath::parse(raw) else {
            continue;
        };
        if let Some(error) = validate_field(&path, record.text(raw), today) {
            errors.set(&error.path, error.message);
        }
    }

    for error in cross_field_errors(record) {
        errors.set(&error.path, error.message);
    }

    errors
}

fn cross_field_errors(record: &CaseRecord) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = Vec::new();
    let error_at = |raw: &str, message: &str| {
        FieldPath::parse(raw)
            .ok()
            .map(|path| FieldError::new(&path, message))
    };

    if record.set_at(CLIENT_ZONES_PATH).is_empty() {
        out.extend(error_at(CLIENT_ZONES_PATH, CLIENT_ZONES_MESSAGE));
    }

    let co_actor_named: bool = !record.text(CO_ACTOR_NAME_PATH).trim().is_empty();
    if co_actor_named && record.set_at(CO_ACTOR_ZONES_PATH).is_empty() {
        out.extend(error_at(CO_ACTOR_ZONES_PATH, CO_ACTOR_ZONES_MESSAGE));
    }

    out
}

/// Lists the essential data a case is missing before it is sent to the
/// repository. These gaps are reported as warnings and do not block
/// submission.
#[must_use]
pub fn validate_case_for_submission(record: &CaseRecord) -> Vec<String> {
    SUBMISSION_CHECKS
        .into_iter()
        .filter(|(path, _)| record.text(path).trim().is_empty())
        .map(|(_, message)| message.to_string())
        .collect()
}
