// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::transcription::TranscriptionError;
use intake::CoreError;
use intake_domain::{DomainError, FieldError};
use intake_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The form did not pass validation; nothing was submitted.
    ValidationFailed {
        /// Every failing field.
        errors: Vec<FieldError>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An external service failed or refused the request.
    Upstream {
        /// The service that failed.
        service: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed for {} field(s)", errors.len())
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Upstream { service, message } => {
                write!(f, "{service} failed: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidPath { path, reason } => ApiError::InvalidInput {
            field: String::from("path"),
            message: format!("Invalid field path '{path}': {reason}"),
        },
        DomainError::UnknownField(path) => ApiError::InvalidInput {
            field: path.clone(),
            message: format!("'{path}' is not a field of the case"),
        },
        DomainError::FieldKindMismatch { path, expected } => ApiError::InvalidInput {
            field: path,
            message: format!("Field holds a {expected} value"),
        },
        DomainError::InvalidDate { value } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Invalid date '{value}'"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SectionAlreadyPresent(section) => ApiError::DomainRuleViolation {
            rule: String::from("single_optional_section"),
            message: format!("Section '{}' is already part of the case", section.key()),
        },
        CoreError::SectionAbsent(section) => ApiError::DomainRuleViolation {
            rule: String::from("section_present"),
            message: format!(
                "Section '{}' must be added before its fields are edited",
                section.key()
            ),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::CaseNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Case"),
            message: format!("Case {id} does not exist"),
        },
        PersistenceError::RemoteUnavailable(_) | PersistenceError::RemoteRejected { .. } => {
            ApiError::Upstream {
                service: String::from("Case service"),
                message: err.to_string(),
            }
        }
        PersistenceError::Io(_) | PersistenceError::SerializationError(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

impl From<TranscriptionError> for ApiError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::EmptyAudio => Self::InvalidInput {
                field: String::from("audio"),
                message: err.to_string(),
            },
            TranscriptionError::NotConfigured
            | TranscriptionError::Transport(_)
            | TranscriptionError::Status(_)
            | TranscriptionError::Decode(_) => Self::Upstream {
                service: String::from("Transcription"),
                message: err.to_string(),
            },
        }
    }
}
