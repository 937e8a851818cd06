// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while building or addressing case records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field path string is syntactically invalid.
    InvalidPath {
        /// The offending path string.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },
    /// A field path is well-formed but does not exist in the case schema.
    UnknownField(String),
    /// A field exists but holds a different kind of value than the one given.
    FieldKindMismatch {
        /// The addressed path.
        path: String,
        /// The kind the schema expects at that path.
        expected: &'static str,
    },
    /// A date string could not be interpreted.
    InvalidDate {
        /// The rejected input.
        value: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath { path, reason } => {
                write!(f, "Invalid field path '{path}': {reason}")
            }
            Self::UnknownField(path) => write!(f, "Unknown field '{path}'"),
            Self::FieldKindMismatch { path, expected } => {
                write!(f, "Field '{path}' holds a {expected} value")
            }
            Self::InvalidDate { value } => write!(f, "Invalid date '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}
