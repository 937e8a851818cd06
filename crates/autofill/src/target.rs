// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intake_domain::{DomainError, FieldPath};
use serde::Serialize;

const PERSON_DEPENDENTS: [&str; 11] = [
    "nombreCompleto",
    "fechaNacimiento",
    "estadoCivil",
    "nombrePadre",
    "nombreMadre",
    "nombreConyuge",
    "domicilio",
    "localidad",
    "provincia",
    "telefono",
    "mail",
];

const TITULAR_DEPENDENTS: [&str; 9] = [
    "nombre",
    "fechaNacimiento",
    "estadoCivil",
    "nombrePadre",
    "nombreMadre",
    "nombreConyuge",
    "domicilio",
    "localidad",
    "provincia",
];

/// A sub-record whose document number drives an identity lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AutofillTarget {
    /// The principal claimant.
    Cliente,
    /// The co-claimant.
    CoActor,
    /// The registered owner of the claimant's vehicle.
    Titular,
}

impl AutofillTarget {
    /// Every tracked target.
    pub const ALL: [Self; 3] = [Self::Cliente, Self::CoActor, Self::Titular];

    /// The root key of the tracked sub-record.
    #[must_use]
    pub const fn base_key(self) -> &'static str {
        match self {
            Self::Cliente => "cliente",
            Self::CoActor => "coActor1",
            Self::Titular => "titularCliente",
        }
    }

    /// The tracked sub-record as a path.
    ///
    /// # Errors
    ///
    /// Only fails if the base key is malformed.
    pub fn base_path(self) -> Result<FieldPath, DomainError> {
        FieldPath::parse(self.base_key())
    }

    /// The document-number field watched for this target.
    ///
    /// # Errors
    ///
    /// Only fails if the base key is malformed.
    pub fn key_path(self) -> Result<FieldPath, DomainError> {
        self.base_path()?.join("dni")
    }

    /// The field receiving the looked-up full name.
    #[must_use]
    pub const fn name_field(self) -> &'static str {
        match self {
            Self::Titular => "nombre",
            Self::Cliente | Self::CoActor => "nombreCompleto",
        }
    }

    /// Whether lookups also fill phone and email.
    #[must_use]
    pub const fn fills_contact(self) -> bool {
        !matches!(self, Self::Titular)
    }

    /// Fields an autofill may write, and which are cleared when the document
    /// number is emptied. The document number itself is never included.
    #[must_use]
    pub const fn dependent_fields(self) -> &'static [&'static str] {
        match self {
            Self::Titular => &TITULAR_DEPENDENTS,
            Self::Cliente | Self::CoActor => &PERSON_DEPENDENTS,
        }
    }

    /// The target watching `path`, if it is a tracked document number.
    #[must_use]
    pub fn for_key_path(path: &FieldPath) -> Option<Self> {
        if path.segments().count() != 2 || path.leaf() != "dni" {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|target| path.head() == target.base_key())
    }
}

impl std::fmt::Display for AutofillTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.base_key())
    }
}
