// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case-level operations: submitting sessions, the dashboard, documents and
//! export.

use crate::dashboard::{CaseFilters, CaseSummaryRow, filter_cases};
use crate::documents::{DocumentKind, compose};
use crate::error::ApiError;
use crate::export::case_to_csv;
use crate::request_response::{CaseListResponse, OptionsResponse, SubmitResponse};
use crate::session::IntakeSession;
use intake::Submission;
use intake_autofill::{AutofillConfig, ClientLookup, LookupEvent};
use intake_domain::dates::today_local;
use intake_domain::options::catalogues;
use intake_domain::{CaseId, CaseRecord, ProvinceCatalog, validate_case_for_submission};
use intake_persistence::{CaseListEntry, CaseRepository};
use std::sync::Arc;
use time::Date;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// The front desk of the intake system: opens sessions and moves cases in
/// and out of the repository.
#[derive(Debug)]
pub struct IntakeDesk<R: CaseRepository, L: ClientLookup> {
    repository: Arc<R>,
    lookup: Arc<L>,
    provinces: Arc<ProvinceCatalog>,
    autofill: AutofillConfig,
}

impl<R: CaseRepository, L: ClientLookup> IntakeDesk<R, L> {
    /// Creates a desk.
    ///
    /// # Arguments
    ///
    /// * `repository` - Where cases are stored
    /// * `lookup` - Person directory for autofill
    /// * `provinces` - Province catalogue
    /// * `autofill` - Debounce tuning for every session
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        lookup: Arc<L>,
        provinces: Arc<ProvinceCatalog>,
        autofill: AutofillConfig,
    ) -> Self {
        Self {
            repository,
            lookup,
            provinces,
            autofill,
        }
    }

    /// The province catalogue sessions store ids from.
    #[must_use]
    pub fn provinces(&self) -> &ProvinceCatalog {
        &self.provinces
    }

    /// Opens a session on a default case. Lookup results are reported on
    /// `events`.
    #[must_use]
    pub fn open_session(&self, events: &UnboundedSender<LookupEvent>) -> IntakeSession<L> {
        IntakeSession::new(
            &self.lookup,
            self.autofill,
            Arc::clone(&self.provinces),
            events,
        )
    }

    /// Submits the session's case. See [`Self::submit_on`].
    ///
    /// # Errors
    ///
    /// See [`Self::submit_on`].
    pub async fn submit(&self, session: &mut IntakeSession<L>) -> Result<SubmitResponse, ApiError> {
        self.submit_on(session, today_local()).await
    }

    /// Validates the session's case and stores it, creating a new case or
    /// updating the one being edited.
    ///
    /// The session is reset only once the repository has accepted the case;
    /// on any failure it keeps the form exactly as it was.
    ///
    /// # Returns
    ///
    /// The stored id, whether it was an update, and any essential data the
    /// case still lacks.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` if the form is invalid, or the
    /// translated repository error if storing fails.
    pub async fn submit_on(
        &self,
        session: &mut IntakeSession<L>,
        today: Date,
    ) -> Result<SubmitResponse, ApiError> {
        let submission: Submission = session.prepare_submission_on(today)?;
        let warnings: Vec<String> = validate_case_for_submission(&submission.record);
        if !warnings.is_empty() {
            warn!(missing = ?warnings, "Submitting case with missing essential data");
        }

        let (id, updated): (CaseId, bool) = match submission.editing {
            Some(id) => {
                self.repository.update(id, &submission.record).await?;
                (id, true)
            }
            None => (self.repository.create(&submission.record).await?, false),
        };

        session.reset();
        info!(case_id = %id, updated, "Case submitted");
        Ok(SubmitResponse {
            id,
            updated,
            warnings,
        })
    }

    /// Loads a stored case into `session` for editing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the case does not exist.
    pub async fn edit(&self, session: &mut IntakeSession<L>, id: CaseId) -> Result<(), ApiError> {
        let entry: CaseListEntry = self.repository.get(id).await?;
        session.load(entry);
        info!(case_id = %id, "Editing stored case");
        Ok(())
    }

    /// The dashboard listing: matching cases, newest first.
    ///
    /// # Errors
    ///
    /// Returns the translated repository error if listing fails.
    pub async fn list_cases(&self, filters: &CaseFilters) -> Result<CaseListResponse, ApiError> {
        let entries: Vec<CaseListEntry> = self.repository.list().await?;
        let cases: Vec<CaseSummaryRow> = filter_cases(entries, filters)
            .iter()
            .map(CaseSummaryRow::from_entry)
            .collect();
        Ok(CaseListResponse {
            total: cases.len(),
            cases,
        })
    }

    /// One stored case.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the case does not exist.
    pub async fn get_case(&self, id: CaseId) -> Result<CaseListEntry, ApiError> {
        Ok(self.repository.get(id).await?)
    }

    /// Removes a stored case.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the case does not exist.
    pub async fn delete_case(&self, id: CaseId) -> Result<(), ApiError> {
        self.repository.delete(id).await?;
        info!(case_id = %id, "Case deleted");
        Ok(())
    }

    /// Renders a document for a stored case, dated `today`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the case does not exist.
    pub async fn document(
        &self,
        id: CaseId,
        kind: DocumentKind,
        today: Date,
    ) -> Result<String, ApiError> {
        let entry: CaseListEntry = self.repository.get(id).await?;
        Ok(compose(kind, &entry.record, today, &self.provinces))
    }

    /// Renders a document for a case that has not been stored.
    #[must_use]
    pub fn document_for(&self, record: &CaseRecord, kind: DocumentKind, today: Date) -> String {
        compose(kind, record, today, &self.provinces)
    }

    /// A stored case as `Campo,Valor` CSV.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the case does not exist.
    pub async fn export_case(&self, id: CaseId) -> Result<String, ApiError> {
        let entry: CaseListEntry = self.repository.get(id).await?;
        case_to_csv(&entry)
    }

    /// Every option catalogue and the province list.
    #[must_use]
    pub fn options(&self) -> OptionsResponse {
        OptionsResponse {
            catalogues: catalogues(),
            provinces: self.provinces.provinces().to_vec(),
        }
    }
}
