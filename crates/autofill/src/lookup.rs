// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::future::Future;

/// Raw fields of a looked-up person, as the directory returns them.
pub type LookupFields = Map<String, Value>;

/// What a lookup found.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The directory has a record for the key.
    Found(LookupFields),
    /// The directory has no record for the key.
    NotFound,
}

/// A lookup that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The request did not reach the directory or the connection failed.
    #[error("lookup request failed: {0}")]
    Transport(String),
    /// The directory answered with an unexpected status.
    #[error("lookup returned HTTP {0}")]
    Status(u16),
    /// The response body could not be decoded.
    #[error("lookup response could not be decoded: {0}")]
    Decode(String),
}

/// A person directory searchable by document number.
pub trait ClientLookup: Send + Sync + 'static {
    /// Looks up the person with document number `dni`.
    ///
    /// Dropping the returned future abandons the request.
    fn lookup(&self, dni: &str)
    -> impl Future<Output = Result<LookupOutcome, LookupError>> + Send;
}

/// Directory response: `{ records: [ { fields: { ... } } ] }`.
#[derive(Debug, Default, Deserialize)]
pub struct LookupPayload {
    #[serde(default)]
    records: Vec<LookupRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct LookupRecord {
    #[serde(default)]
    fields: Option<LookupFields>,
}

impl LookupPayload {
    /// The first record's fields, or `NotFound` when there is none.
    #[must_use]
    pub fn into_outcome(self) -> LookupOutcome {
        self.records
            .into_iter()
            .next()
            .and_then(|record| record.fields)
            .map_or(LookupOutcome::NotFound, LookupOutcome::Found)
    }
}
