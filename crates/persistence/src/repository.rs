// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use intake_domain::{CaseId, CaseRecord};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A stored case: the record plus its repository-assigned id.
///
/// Serializes as the case object with an extra integer `id` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseListEntry {
    /// Identifier assigned on create.
    pub id: CaseId,
    /// The stored case.
    #[serde(flatten)]
    pub record: CaseRecord,
}

impl CaseListEntry {
    /// Pairs a record with its id.
    #[must_use]
    pub const fn new(id: CaseId, record: CaseRecord) -> Self {
        Self { id, record }
    }
}

/// Where submitted cases are kept.
///
/// Implementations decide how ids are assigned. Any failure is terminal for
/// that call.
pub trait CaseRepository: Send + Sync + 'static {
    /// Stores a new case and returns its id.
    fn create(
        &self,
        record: &CaseRecord,
    ) -> impl Future<Output = Result<CaseId, PersistenceError>> + Send;

    /// Every stored case, in insertion order.
    fn list(&self) -> impl Future<Output = Result<Vec<CaseListEntry>, PersistenceError>> + Send;

    /// One stored case.
    ///
    /// Fails with `PersistenceError::CaseNotFound` if `id` is unknown.
    fn get(&self, id: CaseId)
    -> impl Future<Output = Result<CaseListEntry, PersistenceError>> + Send;

    /// Replaces the record stored under `id`.
    ///
    /// Fails with `PersistenceError::CaseNotFound` if `id` is unknown.
    fn update(
        &self,
        id: CaseId,
        record: &CaseRecord,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    /// Removes the case stored under `id`.
    ///
    /// Fails with `PersistenceError::CaseNotFound` if `id` is unknown.
    fn delete(&self, id: CaseId) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}
