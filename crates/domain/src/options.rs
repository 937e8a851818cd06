// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed option lists offered by the intake form.

use serde::Serialize;

pub const ESTADO_CIVIL: [&str; 5] = [
    "Soltero/a",
    "Casado/a",
    "Viudo/a",
    "Divorciado/a",
    "Conviviente",
];

pub const SI_NO: [&str; 3] = ["Sí", "No", "No sabe"];

pub const MODO_TRASLADO: [&str; 4] = [
    "Ambulancia",
    "Vehículo Particular",
    "Policía",
    "Por sus propios medios",
];

pub const ROL_ACCIDENTE: [&str; 5] = [
    "Conductor",
    "Acompañante",
    "Pasajero Transportado",
    "Peatón",
    "Ciclista",
];

pub const CATEGORIAS_REGISTRO: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

pub const VIVIENDA: [&str; 3] = ["Propietario", "Inquilino", "Otro"];

pub const ZONAS_CORPORALES: [&str; 19] = [
    "Cervical",
    "Hombro Derecho",
    "Hombro Izquierdo",
    "Codo Derecho",
    "Codo Izquierdo",
    "Muñeca Derecha",
    "Muñeca Izquierda",
    "Mano Derecha",
    "Mano Izquierda",
    "Dorsal/Lumbar",
    "Cadera",
    "Rodilla Derecha",
    "Rodilla Izquierda",
    "Tobillo Derecho",
    "Tobillo Izquierdo",
    "Pie Derecho",
    "Pie Izquierdo",
    "Cabeza",
    "Cara",
];

/// Same as the body zones, minus the face.
pub const ZONAS_RADIOGRAFIAS: [&str; 18] = [
    "Cervical",
    "Hombro Derecho",
    "Hombro Izquierdo",
    "Codo Derecho",
    "Codo Izquierdo",
    "Muñeca Derecha",
    "Muñeca Izquierda",
    "Mano Derecha",
    "Mano Izquierda",
    "Dorsal/Lumbar",
    "Cadera",
    "Rodilla Derecha",
    "Rodilla Izquierda",
    "Tobillo Derecho",
    "Tobillo Izquierdo",
    "Pie Derecho",
    "Pie Izquierdo",
    "Cabeza",
];

pub const DANOS_VEHICULO: [&str; 4] = [
    "Frente",
    "Costado Izquierdo",
    "Costado Derecho",
    "Atrás",
];

pub const CONDICIONES_CLIMATICAS: [&str; 2] = ["Llovía", "No llovía"];

pub const ROL_PROTAGONISTAS: [&str; 5] = [
    "Choque entre automóviles",
    "Pasajera de colectivo",
    "Motociclista",
    "Peatón",
    "Pasajero de Uber/Cabify/Otros",
];

pub const MECANICA_ACCIDENTE: [&str; 12] = [
    "Prioridad de paso en encrucijada (desde la derecha)",
    "Invasión de carril contrario",
    "Impacto trasero por alcance",
    "Giro a la izquierda/en U sin habilitación",
    "Violación de semáforo en rojo",
    "Cruce de peatón por senda peatonal",
    "Exceso de velocidad",
    "Maniobra imprudente (cambio de carril, etc.)",
    "Paso de animal en la vía",
    "Falla mecánica del vehículo",
    "Condiciones de la vía (baches, señalización defectuosa)",
    "Otros",
];

pub const ACTUACIONES_PENALES: [&str; 2] = ["De Oficio", "Por Denuncia"];

pub const FUENTE_DATO: [&str; 4] = [
    "Causa penal",
    "Cédula verde",
    "Registro de conducir",
    "Otro",
];

pub const ROL_TESTIGO: [&str; 2] = ["Del acta procesal", "Aportado por el actor"];

pub const CLASIFICACION_LESIONES: [&str; 3] = ["a", "b", "c"];

pub const TIPO_RECLAMO: [&str; 5] = [
    "Reclamo Extrajudicial",
    "Mediación Ley 13.951",
    "Mediación CABA",
    "Beneficio de Litigar sin Gastos",
    "Sucesión",
];

pub const TIPO_LESION: [&str; 7] = [
    "Física",
    "Psicológica",
    "Moral",
    "Estética",
    "Lucro Cesante",
    "Pérdida de Chance",
    "Daño al Proyecto de Vida",
];

/// A named option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionCatalogue {
    pub name: &'static str,
    pub options: &'static [&'static str],
}

/// Every option list, keyed by the name the form uses for it.
#[must_use]
pub fn catalogues() -> Vec<OptionCatalogue> {
    let entries: [(&'static str, &'static [&'static str]); 19] = [
        ("estadoCivil", &ESTADO_CIVIL),
        ("siNo", &SI_NO),
        ("modoTraslado", &MODO_TRASLADO),
        ("rolAccidente", &ROL_ACCIDENTE),
        ("categoriasRegistro", &CATEGORIAS_REGISTRO),
        ("vivienda", &VIVIENDA),
        ("zonasCorporales", &ZONAS_CORPORALES),
        ("zonasRadiografias", &ZONAS_RADIOGRAFIAS),
        ("danosVehiculo", &DANOS_VEHICULO),
        ("condicionesClimaticas", &CONDICIONES_CLIMATICAS),
        ("rolProtagonistas", &ROL_PROTAGONISTAS),
        ("mecanicaAccidente", &MECANICA_ACCIDENTE),
        ("actuacionesPenales", &ACTUACIONES_PENALES),
        ("fuenteDato", &FUENTE_DATO),
        ("rolTestigo", &ROL_TESTIGO),
        ("clasificacionLesiones", &CLASIFICACION_LESIONES),
        ("tipoReclamo", &TIPO_RECLAMO),
        ("tipoLesion", &TIPO_LESION),
        ("checklistHistoriaClinica", &HC_LESION_CHECKLIST),
    ];
    entries
        .into_iter()
        .map(|(name, options)| OptionCatalogue { name, options })
        .collect()
}

/// The fixed lesion checklist printed on clinical-history sheets.
pub const HC_LESION_CHECKLIST: [&str; 10] = [
    "CERVICAL",
    "HOMBRO IZQUIERDO",
    "HOMBRO DERECHO",
    "MUÑECA IZQUIERDA",
    "MUÑECA DERECHA",
    "RODILLA IZQUIERDA",
    "RODILLA DERECHA",
    "TOBILLO IZQUIERDO",
    "TOBILLO DERECHO",
    "LUMBAR",
];
