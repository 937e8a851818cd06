// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Default shapes of every sub-record and the catalogue of known paths.

use crate::path::{self, FieldPath};
use crate::record::{FieldSet, Record, Value};
use std::sync::LazyLock;

const LESIONES_TEXT: [&str; 7] = [
    "centroMedico1",
    "centroMedico2",
    "modoTraslado",
    "fueOperado",
    "estuvoInternado",
    "otrasZonasAfectadas",
    "otrasZonasRadiografias",
];

const LESIONES_SETS: [&str; 3] = ["zonasAfectadas", "zonasRadiografias", "tipoLesion"];

const PERSON_TEXT: [&str; 24] = [
    "nombreCompleto",
    "dni",
    "fechaNacimiento",
    "estadoCivil",
    "nombrePadre",
    "nombreMadre",
    "nombreConyuge",
    "domicilio",
    "localidad",
    "provincia",
    "telefono",
    "ocupacion",
    "sueldo",
    "lugarTrabajo",
    "art",
    "vivienda",
    "composicionFamiliar",
    "hijosACargo",
    "mail",
    "ig",
    "poseeRegistro",
    "vigenciaRegistro",
    "categoriasRegistro",
    "rolAccidente",
];

const VEHICULO_TEXT: [&str; 7] = [
    "vehiculo",
    "dominio",
    "companiaSeguros",
    "sumaAsegurada",
    "franquicia",
    "numeroPoliza",
    "color",
];

const TITULAR_TEXT: [&str; 10] = [
    "nombre",
    "dni",
    "domicilio",
    "localidad",
    "provincia",
    "fechaNacimiento",
    "estadoCivil",
    "nombrePadre",
    "nombreMadre",
    "nombreConyuge",
];

const DEMANDADO_TEXT: [&str; 9] = [
    "nombreApellido",
    "dni",
    "telefono",
    "domicilio",
    "localidad",
    "provincia",
    "partido",
    "fuenteDato",
    "fuenteDatoOtro",
];

const SINIESTRO_TEXT: [&str; 15] = [
    "lugarHecho",
    "fechaHecho",
    "horaHecho",
    "calles",
    "localidad",
    "provincia",
    "partido",
    "condicionesClimaticas",
    "rolProtagonistas",
    "mecanicaAccidente",
    "otraMecanica",
    "narracionHechos",
    "actuacionesPenales",
    "comisaria",
    "causaPenal",
];

const TESTIGO_TEXT: [&str; 6] = [
    "nombreApellido",
    "dni",
    "domicilio",
    "localidad",
    "provincia",
    "rol",
];

const CLASIFICACION_TEXT: [&str; 3] = ["areaPolicial", "lesiones", "reclamo"];

/// A sub-tree that is absent until explicitly added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalSection {
    /// Defendants of a third vehicle involved in the incident.
    ThirdVehicleDefendants,
}

impl OptionalSection {
    /// Every optional section.
    pub const ALL: [Self; 1] = [Self::ThirdVehicleDefendants];

    /// The root key the section is stored under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ThirdVehicleDefendants => "tercerVehiculoDemandado",
        }
    }

    /// A freshly initialized section.
    #[must_use]
    pub fn default_record(self) -> Record {
        match self {
            Self::ThirdVehicleDefendants => defendants_block(),
        }
    }
}

fn text_fields(record: Record, names: &[&str]) -> Record {
    names
        .iter()
        .fold(record, |acc, name| acc.with(name, Value::empty_text()))
}

fn set_fields(record: Record, names: &[&str]) -> Record {
    names
        .iter()
        .fold(record, |acc, name| acc.with(name, FieldSet::new()))
}

/// Empty injury details.
#[must_use]
pub fn lesiones() -> Record {
    set_fields(text_fields(Record::new(), &LESIONES_TEXT), &LESIONES_SETS)
}

/// Empty person (claimant or co-claimant).
#[must_use]
pub fn person() -> Record {
    text_fields(Record::new(), &PERSON_TEXT).with("lesiones", lesiones())
}

/// Empty vehicle.
#[must_use]
pub fn vehiculo() -> Record {
    text_fields(Record::new(), &VEHICULO_TEXT)
}

/// Empty registered vehicle owner.
#[must_use]
pub fn titular() -> Record {
    text_fields(Record::new(), &TITULAR_TEXT)
}

/// Empty defendant person.
#[must_use]
pub fn demandado_persona() -> Record {
    text_fields(Record::new(), &DEMANDADO_TEXT)
}

fn material_damage() -> Record {
    Record::new()
        .with("zonas", FieldSet::new())
        .with("otro", Value::empty_text())
}

/// Empty defendants block: driver, owner, insured party, insurer, vehicle
/// and material damage.
#[must_use]
pub fn defendants_block() -> Record {
    Record::new()
        .with("conductor", demandado_persona())
        .with("titular", demandado_persona())
        .with("asegurado", demandado_persona())
        .with(
            "companiaSeguros",
            text_fields(
                Record::new(),
                &["nombre", "numeroPoliza", "numeroSiniestro"],
            ),
        )
        .with(
            "vehiculo",
            text_fields(Record::new(), &["marcaModelo", "dominio", "color"]),
        )
        .with("danosMateriales", material_damage())
}

/// Empty incident description.
#[must_use]
pub fn siniestro() -> Record {
    text_fields(Record::new(), &SINIESTRO_TEXT)
}

/// Empty witness.
#[must_use]
pub fn testigo() -> Record {
    text_fields(Record::new(), &TESTIGO_TEXT)
}

/// The full default case. Optional sections are absent.
#[must_use]
pub fn default_case() -> Record {
    Record::new()
        .with("cliente", person().with("recomienda", Value::empty_text()))
        .with("vehiculoCliente", vehiculo())
        .with("titularCliente", titular())
        .with("coActor1", person())
        .with("siniestro", siniestro())
        .with("demandados", defendants_block())
        .with("danosMateriales", material_damage())
        .with(
            "testigos",
            Record::new()
                .with("testigo1", testigo())
                .with("testigo2", testigo()),
        )
        .with(
            "clasificacionFinal",
            text_fields(Record::new(), &CLASIFICACION_TEXT),
        )
}

/// The default case with every optional section present.
static FULL_SHAPE: LazyLock<Record> = LazyLock::new(|| {
    OptionalSection::ALL
        .iter()
        .fold(default_case(), |acc, section| {
            acc.with(section.key(), section.default_record())
        })
});

static KNOWN_PATHS: LazyLock<Vec<FieldPath>> = LazyLock::new(|| path::leaf_paths(&FULL_SHAPE));

/// The kind of value a schema leaf holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// A scalar string.
    Text,
    /// A multi-select set of strings.
    Set,
}

/// Every leaf path a case can carry, optional sections included.
#[must_use]
pub fn known_paths() -> &'static [FieldPath] {
    &KNOWN_PATHS
}

/// Whether `path` names a leaf of the case schema.
#[must_use]
pub fn resolves(path: &FieldPath) -> bool {
    leaf_kind(path).is_some()
}

/// The kind of leaf `path` names, or `None` if it is not a schema leaf.
#[must_use]
pub fn leaf_kind(path: &FieldPath) -> Option<LeafKind> {
    match path::get(&FULL_SHAPE, path)? {
        Value::Text(_) => Some(LeafKind::Text),
        Value::Set(_) => Some(LeafKind::Set),
        Value::Record(_) => None,
    }
}

/// Whether `path` names any node (leaf or sub-record) of the case schema.
#[must_use]
pub fn resolves_node(path: &FieldPath) -> bool {
    KNOWN_PATHS.iter().any(|known| known.starts_with(path))
}

/// The optional section `path` lives in, if any.
#[must_use]
pub fn optional_section_of(path: &FieldPath) -> Option<OptionalSection> {
    OptionalSection::ALL
        .into_iter()
        .find(|section| path.head() == section.key())
}
