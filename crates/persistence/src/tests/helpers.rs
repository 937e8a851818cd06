// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intake_domain::{CaseRecord, FieldPath, Value};

/// A case with the client's name and DNI filled in.
pub fn client_case(name: &str, dni: &str) -> CaseRecord {
    CaseRecord::new()
        .with_value(
            &FieldPath::parse("cliente.nombreCompleto").unwrap(),
            Value::text(name),
        )
        .with_value(&FieldPath::parse("cliente.dni").unwrap(), Value::text(dni))
}
