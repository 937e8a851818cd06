// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure snapshot operations over a case record.
//!
//! Each function takes a record by reference and returns a new one; the input
//! is never modified and untouched sub-records are shared with the result.

use crate::error::CoreError;
use intake_domain::{
    CaseRecord, DomainError, FieldPath, FieldSet, OptionalSection, PartialFields, Value,
};

/// Document-number fields whose input is reduced to at most eight digits.
pub const SANITIZED_DNI_PATHS: [&str; 3] = ["cliente.dni", "coActor1.dni", "titularCliente.dni"];

/// Strips every non-digit character and keeps at most eight digits.
#[must_use]
pub fn sanitize_dni(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(8).collect()
}

/// Applies the sanitization rule for `path`, if it has one.
#[must_use]
pub fn sanitize(path: &FieldPath, raw: &str) -> String {
    if SANITIZED_DNI_PATHS.contains(&path.as_str()) {
        sanitize_dni(raw)
    } else {
        raw.to_string()
    }
}

/// Writes a text field after sanitizing the input.
#[must_use]
pub fn set_field(record: &CaseRecord, path: &FieldPath, raw: &str) -> CaseRecord {
    let value: String = sanitize(path, raw);
    record.with_value(path, Value::text(&value))
}

/// Adds or removes one member of a set field.
///
/// Adding a present member or removing an absent one leaves the members
/// unchanged. A non-set value at `path` is treated as an empty set.
#[must_use]
pub fn toggle_set_member(
    record: &CaseRecord,
    path: &FieldPath,
    item: &str,
    included: bool,
) -> CaseRecord {
    let mut set: FieldSet = record
        .get(path)
        .and_then(Value::as_set)
        .cloned()
        .unwrap_or_default();
    if included {
        set.insert(item);
    } else {
        set.remove(item);
    }
    record.with_value(path, Value::Set(set))
}

/// Writes every incoming value that is not blank under `base`.
///
/// Blank incoming values never overwrite what the record already holds.
///
/// # Errors
///
/// Returns `DomainError::InvalidPath` if a field name cannot be joined to
/// `base`.
pub fn merge_fields(
    record: &CaseRecord,
    base: &FieldPath,
    fields: &PartialFields,
) -> Result<CaseRecord, DomainError> {
    let mut next: CaseRecord = record.clone();
    for (name, value) in fields {
        if value.trim().is_empty() {
            continue;
        }
        let path: FieldPath = base.join(name)?;
        next = next.with_value(&path, Value::text(value));
    }
    Ok(next)
}

/// Sets each named field under `base` to the empty string.
///
/// # Errors
///
/// Returns `DomainError::InvalidPath` if a field name cannot be joined to
/// `base`.
pub fn clear_fields<S: AsRef<str>>(
    record: &CaseRecord,
    base: &FieldPath,
    names: &[S],
) -> Result<CaseRecord, DomainError> {
    let mut next: CaseRecord = record.clone();
    for name in names {
        let path: FieldPath = base.join(name.as_ref())?;
        next = next.with_value(&path, Value::empty_text());
    }
    Ok(next)
}

/// Attaches a freshly initialized optional section.
///
/// # Errors
///
/// Returns `CoreError::SectionAlreadyPresent` if the case already has it.
pub fn add_section(record: &CaseRecord, section: OptionalSection) -> Result<CaseRecord, CoreError> {
    if record.section(section).is_some() {
        return Err(CoreError::SectionAlreadyPresent(section));
    }
    let path: FieldPath = FieldPath::parse(section.key())?;
    Ok(record.with_value(&path, Value::Record(section.default_record())))
}

/// Detaches an optional section. Removing an absent section is a no-op.
///
/// # Errors
///
/// Returns `DomainError::InvalidPath` only if the section key is malformed.
pub fn remove_section(
    record: &CaseRecord,
    section: OptionalSection,
) -> Result<CaseRecord, DomainError> {
    let path: FieldPath = FieldPath::parse(section.key())?;
    Ok(record.without(&path))
}
