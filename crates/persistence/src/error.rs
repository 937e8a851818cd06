// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intake_domain::CaseId;

/// Errors that can occur during persistence operations.
///
/// Every error is terminal for the operation that produced it; nothing is
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// The remote case service could not be reached.
    #[error("Case service request failed: {0}")]
    RemoteUnavailable(String),
    /// The remote case service rejected the request.
    #[error("Case service returned HTTP {status}: {message}")]
    RemoteRejected {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response body, when one was given.
        message: String,
    },
    /// The requested case does not exist.
    #[error("Case not found: {0}")]
    CaseNotFound(CaseId),
    /// Reading or writing a local cache file failed.
    #[error("Cache file error: {0}")]
    Io(String),
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        Self::RemoteUnavailable(err.to_string())
    }
}
