// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// An administrative region a person, witness or incident can be located in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    /// Stable identifier stored in case records.
    pub id: String,
    /// Display name.
    pub nombre: String,
    /// Short code, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
}

impl Province {
    /// Creates a province without a short code.
    #[must_use]
    pub fn new(id: &str, nombre: &str) -> Self {
        Self {
            id: id.to_string(),
            nombre: nombre.to_string(),
            codigo: None,
        }
    }

    fn with_code(id: &str, nombre: &str, codigo: &str) -> Self {
        Self {
            codigo: Some(codigo.to_string()),
            ..Self::new(id, nombre)
        }
    }
}

/// Lowercases `value` and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, trimming hyphens at both ends.
#[must_use]
pub fn slug(value: &str) -> String {
    let mut out: String = String::with_capacity(value.len());
    let mut pending_hyphen: bool = false;
    for ch in value.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// The set of known provinces and the rules for resolving free input to a
/// stable identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvinceCatalog {
    provinces: Vec<Province>,
}

impl ProvinceCatalog {
    /// Wraps a list of provinces.
    #[must_use]
    pub const fn new(provinces: Vec<Province>) -> Self {
        Self { provinces }
    }

    /// The built-in catalogue used when no remote source is configured.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            Province::with_code("ba", "Buenos Aires", "BA"),
            Province::with_code("caba", "Ciudad Autónoma de Buenos Aires", "CABA"),
            Province::with_code("catamarca", "Catamarca", "CA"),
            Province::with_code("chaco", "Chaco", "CH"),
            Province::with_code("chubut", "Chubut", "CT"),
            Province::with_code("cordoba", "Córdoba", "CO"),
            Province::with_code("corrientes", "Corrientes", "CR"),
            Province::with_code("entrerios", "Entre Ríos", "ER"),
            Province::with_code("formosa", "Formosa", "FO"),
            Province::with_code("jujuy", "Jujuy", "JU"),
            Province::with_code("lapampa", "La Pampa", "LP"),
            Province::with_code("larioja", "La Rioja", "LR"),
            Province::with_code("mendoza", "Mendoza", "MD"),
            Province::with_code("misiones", "Misiones", "MI"),
            Province::with_code("neuquen", "Neuquén", "NQ"),
            Province::with_code("rionegro", "Río Negro", "RN"),
            Province::with_code("salta", "Salta", "SA"),
            Province::with_code("sanjuan", "San Juan", "SJ"),
            Province::with_code("sanluis", "San Luis", "SL"),
            Province::with_code("santacruz", "Santa Cruz", "SC"),
            Province::with_code("santafe", "Santa Fe", "SF"),
            Province::with_code("santiago", "Santiago del Estero", "SE"),
            Province::with_code("tierrafuego", "Tierra del Fuego", "TF"),
            Province::with_code("tucuman", "Tucumán", "TM"),
        ])
    }

    /// All provinces in catalogue order.
    #[must_use]
    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }

    /// Looks a province up by identifier.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Province> {
        self.provinces.iter().find(|province| province.id == id)
    }

    /// The display name for a stored identifier, or the input itself when the
    /// identifier is unknown.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.by_id(id).map_or(id, |province| province.nombre.as_str())
    }

    /// Resolves free input to a stable identifier.
    ///
    /// Tries, in order: an exact identifier match, a case-insensitive name
    /// match, then a slug match against names and identifiers. Input that
    /// matches nothing is returned unchanged.
    #[must_use]
    pub fn resolve(&self, input: &str) -> String {
        let trimmed: &str = input.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        if let Some(province) = self.by_id(trimmed) {
            return province.id.clone();
        }
        let lowered: String = trimmed.to_lowercase();
        if let Some(province) = self
            .provinces
            .iter()
            .find(|province| province.nombre.to_lowercase() == lowered)
        {
            return province.id.clone();
        }
        let wanted: String = slug(trimmed);
        self.provinces
            .iter()
            .find(|province| slug(&province.nombre) == wanted || slug(&province.id) == wanted)
            .map_or_else(|| trimmed.to_string(), |province| province.id.clone())
    }
}
