// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use intake_domain::{CaseId, CaseRecord};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// The remote case service new cases are posted to.
#[derive(Debug, Clone)]
pub struct RemoteCaseService {
    client: reqwest::Client,
    url: String,
}

impl RemoteCaseService {
    /// Creates a client for `POST {url}`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RemoteUnavailable` if the HTTP client
    /// cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, PersistenceError> {
        let client: reqwest::Client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Posts `record` as JSON.
    ///
    /// # Returns
    ///
    /// The id the service assigned, or `None` if its response did not carry
    /// a usable one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the response body is not JSON.
    pub async fn submit(&self, record: &CaseRecord) -> Result<Option<CaseId>, PersistenceError> {
        debug!(url = %self.url, "Posting case to case service");
        let response: reqwest::Response = self.client.post(&self.url).json(record).send().await?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(PersistenceError::RemoteRejected {
                status: status.as_u16(),
                message: rejection_message(&body, status),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| PersistenceError::SerializationError(err.to_string()))?;
        let id: Option<CaseId> = created_id(&body);
        info!(assigned = ?id, "Case service accepted case");
        Ok(id)
    }
}

/// Extracts the id from a create response such as `{ "id": 42 }`.
///
/// Numeric strings are accepted, as is a `caseId` key. Zero, negative and
/// non-numeric ids are treated as absent.
#[must_use]
pub fn created_id(body: &Value) -> Option<CaseId> {
    ["id", "caseId"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|value| match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        })
        .filter(|id| *id > 0)
        .map(CaseId::new)
}

fn rejection_message(body: &Value, status: StatusCode) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map_or_else(
            || status.canonical_reason().unwrap_or_default().to_string(),
            str::to_string,
        )
}
