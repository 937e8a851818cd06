// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text documents generated from a case.
//!
//! Every function here is pure: the same case (and date) always yields the
//! same text.

use intake_domain::dates::{format_display_date, format_long_date};
use intake_domain::options::HC_LESION_CHECKLIST;
use intake_domain::{CO_ACTOR_NAME_PATH, CaseRecord, INCIDENT_DATE_PATH, ProvinceCatalog, Record, Value};
use std::str::FromStr;
use time::Date;

const CITY: &str = "CIUDAD AUTÓNOMA DE BUENOS AIRES";
const TO_BE_DETERMINED: &str = "A DETERMINAR";
const CHECK_BOX: char = '☐';

/// Sub-records of the parties signing the fee agreement.
pub const PARTY_BASES: [&str; 2] = ["cliente", "coActor1"];
/// Fields of a party quoted in the fee agreement.
pub const PARTY_FIELDS: [&str; 4] = ["nombreCompleto", "dni", "domicilio", "localidad"];
/// Defendant driver named in the fee agreement.
pub const DRIVER_PATH: &str = "demandados.conductor.nombreApellido";
/// Defendant insurer named in the fee agreement.
pub const INSURER_PATH: &str = "demandados.companiaSeguros.nombre";
/// Summary blocks, in order: title and sub-record key.
pub const SUMMARY_SECTIONS: [(&str, &str); 9] = [
    ("Cliente Principal", "cliente"),
    ("Co-actor", "coActor1"),
    ("Vehículo del Cliente", "vehiculoCliente"),
    ("Titular Registral", "titularCliente"),
    ("Detalles del Siniestro", "siniestro"),
    ("Demandados", "demandados"),
    ("Daños Materiales", "danosMateriales"),
    ("Testigos", "testigos"),
    ("Clasificación Final", "clasificacionFinal"),
];

/// The documents a case can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// The fee agreement between the lawyer and the claimants.
    FeeAgreement,
    /// A structured summary of the case.
    Summary,
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fee-agreement" => Ok(Self::FeeAgreement),
            "summary" => Ok(Self::Summary),
            other => Err(format!("Unknown document '{other}'")),
        }
    }
}

/// Renders `kind` for `record`.
#[must_use]
pub fn compose(
    kind: DocumentKind,
    record: &CaseRecord,
    today: Date,
    provinces: &ProvinceCatalog,
) -> String {
    match kind {
        DocumentKind::FeeAgreement => fee_agreement(record, today),
        DocumentKind::Summary => case_summary(record, provinces),
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn party_field<'a>(record: &'a CaseRecord, base: &str, name: &str) -> &'a str {
    record.text(&format!("{base}.{name}"))
}

fn party_clause(record: &CaseRecord, base: &str) -> String {
    let [name, dni, street, town] = PARTY_FIELDS.map(|field| party_field(record, base, field));
    format!(
        "el Sr./Sra. {name}, D.N.I. Nº {dni}, con domicilio en la calle {street}, de la localidad de {town}"
    )
}

fn signature_block(record: &CaseRecord, base: &str) -> String {
    format!(
        "_________________________\nFirma de LA PARTE ACTORA\nAclaración: {}\nDNI: {}\n",
        party_field(record, base, "nombreCompleto"),
        party_field(record, base, "dni"),
    )
}

/// The fee agreement, dated `today`.
///
/// The co-claimant is included only when their full name is filled in.
/// Missing defendant data reads `A DETERMINAR`.
#[must_use]
pub fn fee_agreement(record: &CaseRecord, today: Date) -> String {
    let [client, co_actor] = PARTY_BASES;
    let has_co_actor: bool = !record.text(CO_ACTOR_NAME_PATH).is_empty();
    let driver: &str = or_default(record.text(DRIVER_PATH), TO_BE_DETERMINED);
    let insurer: &str = or_default(record.text(INSURER_PATH), TO_BE_DETERMINED);

    let mut parties: String = party_clause(record, client);
    if has_co_actor {
        parties.push_str(", y ");
        parties.push_str(&party_clause(record, co_actor));
    }
    parties.push_str(", en adelante \"LA PARTE ACTORA\"");

    let co_actor_signature: String = if has_co_actor {
        format!("\n{}", signature_block(record, co_actor))
    } else {
        String::new()
    };

    format!(
        "CONVENIO DE HONORARIOS

En la ciudad de {CITY}, a los {date}, entre el Dr. [SU NOMBRE COMPLETO], Tº [TOMO] Fº [FOLIO] del C.P.A.C.F., C.U.I.T Nº [SU CUIT], Monotributista, con domicilio constituido en la calle [SU DIRECCIÓN], Ciudad Autónoma de Buenos Aires, en adelante “EL LETRADO”, y {parties}, convienen celebrar el presente convenio de honorarios, sujeto a las siguientes cláusulas:

PRIMERA: LA PARTE ACTORA encomienda a EL LETRADO, y éste acepta, el inicio y la prosecución hasta su total terminación del reclamo extrajudicial y/o judicial por daños y perjuicios derivados del accidente de tránsito ocurrido con fecha {incident}, en el cual resultó/ron lesionado/s como consecuencia del accionar del conductor del vehículo [VEHICULO DEMANDADO], Sr./Sra. {driver}, y/o contra la compañía de seguros \"{insurer}\" y/o contra quien en definitiva resulte civilmente responsable del siniestro de mención.

SEGUNDA: En concepto de honorarios por la gestión profesional descripta en la cláusula anterior, tanto en sede extrajudicial, mediación y/o judicial, LA PARTE ACTORA cede y transfiere a favor de EL LETRADO el VEINTE POR CIENTO (20%) del total de la suma que perciba en dicho proceso, ya sea a través de sentencia judicial, transacción, o cualquier otra forma de acuerdo que ponga fin al litigio. La base para el cálculo del porcentaje antes mencionado estará constituida por el capital de condena o transacción, con más sus intereses y costas.

TERCERA: Los honorarios aquí pactados serán percibidos por EL LETRADO en forma directa de las sumas que abone la parte demandada y/o citada en garantía, en el mismo momento en que LA PARTE ACTORA perciba su crédito. LA PARTE ACTORA presta expresa conformidad para que EL LETRADO practique la deducción de sus honorarios del monto a percibir, otorgando por el presente suficiente recibo y carta de pago por el porcentaje acordado.

CUARTA: En caso que la gestión profesional no obtuviera resultados favorables para LA PARTE ACTORA, es decir, si el reclamo fuera desestimado en su totalidad, EL LETRADO no tendrá derecho a percibir honorarios de ningún tipo, corriendo con los gastos y costas del proceso a su exclusivo cargo.

QUINTA: Si LA PARTE ACTORA decidiera revocar el patrocinio letrado conferido a EL LETRADO sin causa justificada, o bien arribara a un acuerdo transaccional sin la intervención de éste, deberá abonar a EL LETRADO el VEINTE POR CIENTO (20%) del monto reclamado en la demanda o del monto de la transacción, el que sea mayor, en concepto de honorarios por las tareas realizadas hasta ese momento.

SEXTA: Para todos los efectos legales derivados del presente convenio, las partes constituyen domicilios en los indicados en el encabezamiento, donde se tendrán por válidas todas las notificaciones, y se someten a la jurisdicción de los Tribunales Ordinarios de la Capital Federal, con renuncia a cualquier otro fuero o jurisdicción.

En prueba de conformidad, se firman dos ejemplares de un mismo tenor y a un solo efecto, en el lugar y fecha arriba indicados.


{client_signature}
{co_actor_signature}

_________________________
Firma de EL LETRADO
Aclaración: Dr. [SU NOMBRE COMPLETO]
Tº [TOMO] Fº [FOLIO] C.P.A.C.F.",
        date = format_long_date(today),
        incident = format_display_date(record.text(INCIDENT_DATE_PATH)),
        client_signature = signature_block(record, client),
    )
}

/// Turns a camelCase key into a title, e.g. `nombreCompleto` into
/// `Nombre Completo`.
fn label(key: &str) -> String {
    let mut out: String = String::with_capacity(key.len() + 4);
    for (index, ch) in key.chars().enumerate() {
        if index == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Renders the non-empty leaves of `record`, one per line, with nested
/// records as indented blocks. Empty blocks are omitted.
fn outline(record: &Record, indent: &str, provinces: &ProvinceCatalog) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for (key, value) in record.iter() {
        match value {
            Value::Text(text) if !text.is_empty() => {
                let shown: &str = if key == "provincia" {
                    provinces.display_name(text)
                } else {
                    text
                };
                lines.push(format!("{indent}{}: {shown}", label(key)));
            }
            Value::Set(set) if !set.is_empty() => {
                let joined: String = set.iter().collect::<Vec<_>>().join(", ");
                lines.push(format!("{indent}{}: {joined}", label(key)));
            }
            Value::Record(inner) => {
                let nested: Vec<String> = outline(inner, &format!("{indent}  "), provinces);
                if !nested.is_empty() {
                    lines.push(format!("{indent}{}:", label(key)));
                    lines.extend(nested);
                }
            }
            Value::Text(_) | Value::Set(_) => {}
        }
    }
    lines
}

fn section(out: &mut String, title: &str, record: Option<&Record>, provinces: &ProvinceCatalog) {
    let lines: Vec<String> = record
        .map(|record| outline(record, "", provinces))
        .unwrap_or_default();
    if lines.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}:\n"));
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
}

/// A structured summary of every filled-in part of the case, followed by
/// the clinical-history lesion checklist.
#[must_use]
pub fn case_summary(record: &CaseRecord, provinces: &ProvinceCatalog) -> String {
    let has_co_actor: bool = !record.text(CO_ACTOR_NAME_PATH).is_empty();

    let mut out: String = String::from("RESUMEN DEL CASO\n");
    for (title, key) in SUMMARY_SECTIONS {
        if key == PARTY_BASES[1] && !has_co_actor {
            continue;
        }
        let block: Option<&Record> = record.root().get(key).and_then(Value::as_record);
        section(&mut out, title, block, provinces);
        if key == "demandados" {
            section(
                &mut out,
                "Tercer Vehículo Involucrado",
                record.third_vehicle_defendants(),
                provinces,
            );
        }
    }

    out.push_str("\nHistoria Clínica:\n");
    out.push_str(&lesion_checklist());
    out.push('\n');
    out
}

/// The fixed, numbered lesion checklist used in clinical histories.
///
/// Each line is the numbered zone padded to 20 characters, two tabs and an
/// empty check box.
#[must_use]
pub fn lesion_checklist() -> String {
    HC_LESION_CHECKLIST
        .iter()
        .enumerate()
        .map(|(index, zone)| {
            let numbered: String = format!("{}. {zone}", index + 1);
            format!("{numbered:<20}\t\t{CHECK_BOX}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
