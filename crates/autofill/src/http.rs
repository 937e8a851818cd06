// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::lookup::{ClientLookup, LookupError, LookupOutcome, LookupPayload};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Looks people up through `GET {url}?dni={value}`.
#[derive(Debug, Clone)]
pub struct HttpClientLookup {
    client: reqwest::Client,
    url: String,
}

impl HttpClientLookup {
    /// Creates a lookup against `url`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Transport` if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl ClientLookup for HttpClientLookup {
    async fn lookup(&self, dni: &str) -> Result<LookupOutcome, LookupError> {
        debug!(url = %self.url, "Requesting client lookup");
        let response: reqwest::Response = self
            .client
            .get(&self.url)
            .query(&[("dni", dni)])
            .send()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;

        let status: StatusCode = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(LookupOutcome::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let payload: LookupPayload = response
            .json()
            .await
            .map_err(|err| LookupError::Decode(err.to_string()))?;
        Ok(payload.into_outcome())
    }
}
