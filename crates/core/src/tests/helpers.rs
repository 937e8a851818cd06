// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intake_domain::{CaseRecord, FieldPath, FieldSet, PartialFields, Value};
use time::Date;
use time::macros::date;

pub const TODAY: Date = date!(2026 - 10 - 16);

pub fn path(raw: &str) -> FieldPath {
    FieldPath::parse(raw).unwrap()
}

pub fn partial(entries: &[(&str, &str)]) -> PartialFields {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

/// A case where every required field and the claimant's injury zones are valid.
pub fn create_complete_case() -> CaseRecord {
    let values: [(&str, &str); 13] = [
        ("cliente.nombreCompleto", "Juan Pérez"),
        ("cliente.dni", "30222333"),
        ("cliente.fechaNacimiento", "1985-04-12"),
        ("cliente.domicilio", "Av. Rivadavia 1234"),
        ("cliente.localidad", "Flores"),
        ("cliente.telefono", "11 4444 5555"),
        ("cliente.mail", "juan@example.com"),
        ("cliente.rolAccidente", "Conductor"),
        ("vehiculoCliente.vehiculo", "Fiat Palio"),
        ("vehiculoCliente.dominio", "AB123CD"),
        ("siniestro.lugarHecho", "CABA"),
        ("siniestro.fechaHecho", "2026-03-01"),
        ("siniestro.horaHecho", "14:30"),
    ];
    values
        .into_iter()
        .fold(CaseRecord::default(), |acc, (raw, value)| {
            acc.with_value(&path(raw), Value::text(value))
        })
        .with_value(
            &path("cliente.lesiones.zonasAfectadas"),
            Value::Set(FieldSet::from_iter(["Cervical"])),
        )
}
