// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use intake_domain::{Province, ProvinceCatalog, slug};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const UNNAMED: &str = "Sin Nombre";

/// Where the province catalogue comes from.
#[derive(Debug, Clone, Default)]
pub struct ProvinceSource<'a> {
    /// Remote catalogue, `GET {url}`.
    pub url: Option<&'a str>,
    /// Local JSON cache, read before the remote and written after it.
    pub cache_file: Option<&'a Path>,
    /// Timeout for the remote request.
    pub timeout: Duration,
}

/// Loads the province catalogue.
///
/// The local cache wins when present. Otherwise the remote catalogue is
/// fetched and cached. With neither configured, or when the remote yields no
/// provinces, the built-in catalogue is used.
///
/// # Errors
///
/// Returns an error if the cache file cannot be read or parsed, or if the
/// remote request fails.
pub async fn load_provinces(source: &ProvinceSource<'_>) -> Result<ProvinceCatalog, PersistenceError> {
    if let Some(path) = source.cache_file {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let provinces: Vec<Province> = serde_json::from_str(&content)?;
                info!(path = %path.display(), provinces = provinces.len(), "Loaded provinces from cache");
                return Ok(ProvinceCatalog::new(provinces));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }

    let Some(url) = source.url else {
        return Ok(ProvinceCatalog::builtin());
    };

    let client: reqwest::Client = reqwest::Client::builder()
        .timeout(source.timeout)
        .build()?;
    let response: reqwest::Response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(PersistenceError::RemoteRejected {
            status: response.status().as_u16(),
            message: String::from("province catalogue unavailable"),
        });
    }
    let body: Value = response
        .json()
        .await
        .map_err(|err| PersistenceError::SerializationError(err.to_string()))?;
    let provinces: Vec<Province> = parse_province_payload(&body);
    if provinces.is_empty() {
        warn!(url, "Province catalogue was empty; using built-in list");
        return Ok(ProvinceCatalog::builtin());
    }

    if let Some(path) = source.cache_file {
        let json: String = serde_json::to_string_pretty(&provinces)?;
        tokio::fs::write(path, json).await?;
    }
    info!(url, provinces = provinces.len(), "Fetched provinces");
    Ok(ProvinceCatalog::new(provinces))
}

/// Reads provinces from `{ records: [{ id, fields: { nombre | Name } }] }`
/// or from a bare array of `{ id, nombre }`.
///
/// Records without an id get the slug of their name.
#[must_use]
pub fn parse_province_payload(body: &Value) -> Vec<Province> {
    if let Some(records) = body.get("records").and_then(Value::as_array) {
        return records.iter().map(province_from_record).collect();
    }
    body.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<Province>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn province_from_record(record: &Value) -> Province {
    let fields: Option<&Value> = record.get("fields");
    let nombre: String = ["nombre", "Name", "name"]
        .iter()
        .find_map(|key| fields.and_then(|fields| fields.get(key)).and_then(Value::as_str))
        .or_else(|| record.get("name").and_then(Value::as_str))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(UNNAMED)
        .to_string();
    let id: String = match record.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => slug(&nombre),
    };
    Province::new(&id, &nombre)
}
