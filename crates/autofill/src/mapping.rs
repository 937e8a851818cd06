// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Translation of directory fields into form fields.

use crate::lookup::LookupFields;
use crate::target::AutofillTarget;
use intake_domain::PartialFields;
use intake_domain::dates::normalize_date_input;
use serde_json::Value;

/// Renders a JSON scalar the way it would be typed into the form.
///
/// Lists render as their comma-joined members; objects and `null` render
/// empty.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        Value::Null | Value::Object(_) => String::new(),
    }
}

/// The first of `keys` that is present and not `null`.
fn first_present<'a>(fields: &'a LookupFields, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

fn text_of(fields: &LookupFields, keys: &[&str]) -> String {
    first_present(fields, keys).map(scalar_text).unwrap_or_default()
}

/// Unwraps a linked-record reference: lists yield their first member.
#[must_use]
pub fn normalize_record_id(value: &Value) -> String {
    match value {
        Value::Array(items) => items.first().map(scalar_text).unwrap_or_default(),
        other => scalar_text(other),
    }
}

fn full_name(fields: &LookupFields) -> String {
    [text_of(fields, &["nombre"]), text_of(fields, &["apellido"])]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn marital_status(fields: &LookupFields) -> String {
    match fields.get("Name (from Estados Civiles)") {
        Some(Value::Array(labels)) => labels.first().map(scalar_text).unwrap_or_default(),
        _ => text_of(fields, &["estadoCivil", "estado_civil"]),
    }
}

/// Maps directory fields onto the form fields of `target`.
///
/// Every dependent field of the target appears in the result; fields the
/// directory does not provide map to the empty string, which a merge skips.
#[must_use]
pub fn map_lookup_fields(target: AutofillTarget, fields: &LookupFields) -> PartialFields {
    let mut out: PartialFields = PartialFields::new();
    out.insert(target.name_field().to_string(), full_name(fields));
    out.insert(
        String::from("domicilio"),
        text_of(fields, &["calle", "domicilio", "direccion"]),
    );
    out.insert(
        String::from("localidad"),
        text_of(fields, &["localidad", "ciudad"]),
    );
    if target.fills_contact() {
        out.insert(String::from("telefono"), text_of(fields, &["telefono"]));
        out.insert(
            String::from("mail"),
            text_of(fields, &["Correo electrónico", "mail", "email"]),
        );
    }
    out.insert(String::from("estadoCivil"), marital_status(fields));
    out.insert(
        String::from("fechaNacimiento"),
        normalize_date_input(&text_of(fields, &["fechaNacimiento", "fecha_nacimiento"])),
    );
    for relative in ["nombrePadre", "nombreMadre", "nombreConyuge"] {
        out.insert(relative.to_string(), text_of(fields, &[relative]));
    }
    out.insert(
        String::from("provincia"),
        fields
            .get("provincia")
            .map(normalize_record_id)
            .unwrap_or_default(),
    );
    out
}
