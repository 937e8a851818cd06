// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One operator's form together with its autofill controllers.

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{AutofillStatusEntry, SessionSnapshot};
use crate::transcription::append_transcription;
use intake::{FormSession, Submission};
use intake_autofill::{
    AutofillAction, AutofillConfig, AutofillController, AutofillTarget, ClientLookup, KeyChange,
    LookupEvent,
};
use intake_domain::dates::today_local;
use intake_domain::{
    DomainError, FieldError, FieldPath, OptionalSection, PartialFields, ProvinceCatalog, schema,
};
use intake_persistence::CaseListEntry;
use std::sync::Arc;
use time::Date;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// The narration transcriptions are appended to.
pub const NARRATION_PATH: &str = "siniestro.narracionHechos";
const PROVINCE_FIELD: &str = "provincia";

/// Parses a raw path from a request.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the path is malformed.
pub fn parse_path(raw: &str) -> Result<FieldPath, ApiError> {
    FieldPath::parse(raw).map_err(translate_domain_error)
}

/// A form session wired to one autofill controller per tracked document
/// number.
///
/// Edits and lookup completions must be applied through the same `&mut`
/// borrow, so a completion can never interleave with an edit.
#[derive(Debug)]
pub struct IntakeSession<L: ClientLookup> {
    form: FormSession,
    autofill: Vec<AutofillController<L>>,
    provinces: Arc<ProvinceCatalog>,
}

impl<L: ClientLookup> IntakeSession<L> {
    /// Creates a session around a default case.
    ///
    /// # Arguments
    ///
    /// * `lookup` - The person directory shared by all controllers
    /// * `config` - Debounce tuning
    /// * `provinces` - Catalogue used to store provinces as ids
    /// * `events` - Where lookup tasks report; the owner feeds these back
    ///   through [`Self::handle_lookup_event`]
    #[must_use]
    pub fn new(
        lookup: &Arc<L>,
        config: AutofillConfig,
        provinces: Arc<ProvinceCatalog>,
        events: &UnboundedSender<LookupEvent>,
    ) -> Self {
        let autofill: Vec<AutofillController<L>> = AutofillTarget::ALL
            .into_iter()
            .map(|target| {
                AutofillController::new(target, Arc::clone(lookup), config, events.clone())
            })
            .collect();
        Self {
            form: FormSession::new(),
            autofill,
            provinces,
        }
    }

    /// The underlying form session.
    #[must_use]
    pub const fn form(&self) -> &FormSession {
        &self.form
    }

    fn controller_mut(&mut self, target: AutofillTarget) -> Option<&mut AutofillController<L>> {
        self.autofill
            .iter_mut()
            .find(|controller| controller.target() == target)
    }

    fn stored_value(&self, path: &FieldPath, raw: &str) -> String {
        if path.leaf() == PROVINCE_FIELD {
            self.provinces.resolve(raw)
        } else {
            raw.to_string()
        }
    }

    /// Writes a text field, then lets the matching controller react if the
    /// field is a tracked document number.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or not a writable text
    /// field.
    pub fn set_field(&mut self, raw_path: &str, value: &str) -> Result<Vec<FieldPath>, ApiError> {
        let path: FieldPath = parse_path(raw_path)?;
        let stored: String = self.stored_value(&path, value);
        let mut changed: Vec<FieldPath> = self
            .form
            .set_field(&path, &stored)
            .map_err(translate_core_error)?;
        changed.extend(self.sync_autofill(&path)?);
        changed.sort();
        changed.dedup();
        Ok(changed)
    }

    fn sync_autofill(&mut self, path: &FieldPath) -> Result<Vec<FieldPath>, ApiError> {
        let Some(target) = AutofillTarget::for_key_path(path) else {
            return Ok(Vec::new());
        };
        let key: String = self.form.record().text(path.as_str()).to_string();
        let change: KeyChange = match self.controller_mut(target) {
            Some(controller) => controller.observe_key(&key),
            None => KeyChange::Unchanged,
        };
        if change != KeyChange::ClearDependents {
            return Ok(Vec::new());
        }
        let base: FieldPath = target.base_path().map_err(translate_domain_error)?;
        self.form
            .clear_fields(&base, target.dependent_fields())
            .map_err(translate_core_error)
    }

    /// Applies a lookup event from one of this session's controllers.
    ///
    /// Found records are merged under the controller's base path; stale
    /// events change nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a merged field is not writable.
    pub fn handle_lookup_event(&mut self, event: LookupEvent) -> Result<Vec<FieldPath>, ApiError> {
        let target: AutofillTarget = event.target;
        let action: AutofillAction = match self.controller_mut(target) {
            Some(controller) => controller.handle(event),
            None => AutofillAction::Discarded,
        };
        let AutofillAction::Merge(mut fields) = action else {
            return Ok(Vec::new());
        };
        self.resolve_province(&mut fields);
        let base: FieldPath = target.base_path().map_err(translate_domain_error)?;
        let changed: Vec<FieldPath> = self
            .form
            .merge_fields(&base, fields)
            .map_err(translate_core_error)?;
        debug!(base_path = %target, merged = changed.len(), "Applied autofill result");
        Ok(changed)
    }

    fn resolve_province(&self, fields: &mut PartialFields) {
        if let Some(province) = fields.get_mut(PROVINCE_FIELD) {
            *province = self.provinces.resolve(province);
        }
    }

    /// Adds or removes one member of a multi-select field.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or not a writable set
    /// field.
    pub fn toggle(
        &mut self,
        raw_path: &str,
        item: &str,
        included: bool,
    ) -> Result<Vec<FieldPath>, ApiError> {
        let path: FieldPath = parse_path(raw_path)?;
        self.form
            .toggle(&path, item, included)
            .map_err(translate_core_error)
    }

    /// Revalidates one field against today's date.
    ///
    /// # Errors
    ///
    /// See [`Self::blur_on`].
    pub fn blur(&mut self, raw_path: &str, value: &str) -> Result<Option<FieldError>, ApiError> {
        self.blur_on(raw_path, value, today_local())
    }

    /// Revalidates one field, overwriting or removing its message.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or not a field of the case.
    pub fn blur_on(
        &mut self,
        raw_path: &str,
        value: &str,
        today: Date,
    ) -> Result<Option<FieldError>, ApiError> {
        let path: FieldPath = parse_path(raw_path)?;
        if !schema::resolves(&path) {
            return Err(translate_domain_error(
                DomainError::UnknownField(path.to_string()),
            ));
        }
        Ok(self.form.blur_on(&path, value, today))
    }

    /// Attaches the third-vehicle defendants section.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is already present.
    pub fn add_third_vehicle(&mut self) -> Result<Vec<FieldPath>, ApiError> {
        self.form
            .add_section(OptionalSection::ThirdVehicleDefendants)
            .map_err(translate_core_error)
    }

    /// Detaches the third-vehicle defendants section. Absent sections are
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns an error only if the section key is malformed.
    pub fn remove_third_vehicle(&mut self) -> Result<Vec<FieldPath>, ApiError> {
        self.form
            .remove_section(OptionalSection::ThirdVehicleDefendants)
            .map_err(translate_core_error)
    }

    /// Appends a transcription to the incident narration.
    ///
    /// # Errors
    ///
    /// Returns an error if the narration field cannot be written.
    pub fn append_narration(&mut self, transcription: &str) -> Result<String, ApiError> {
        let narration: String =
            append_transcription(self.form.record().text(NARRATION_PATH), transcription);
        self.set_field(NARRATION_PATH, &narration)?;
        Ok(narration)
    }

    /// Starts editing a stored case.
    ///
    /// Every controller is primed with the stored document number so the
    /// stored data is not looked up again.
    pub fn load(&mut self, entry: CaseListEntry) {
        for controller in &mut self.autofill {
            let key: &str = entry.record.text(&format!("{}.dni", controller.target().base_key()));
            controller.prime(key);
        }
        self.form.load(entry.id, entry.record);
    }

    /// Starts over with a default case and idle controllers.
    pub fn reset(&mut self) {
        for controller in &mut self.autofill {
            controller.reset();
        }
        self.form.reset();
    }

    /// Cancels pending lookups and stops reacting to further ones.
    pub fn shutdown(&mut self) {
        for controller in &mut self.autofill {
            controller.shutdown();
        }
    }

    /// Validates the whole form and captures it for the repository.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` listing every failing field;
    /// the session's error tree is updated either way.
    pub fn prepare_submission_on(&mut self, today: Date) -> Result<Submission, ApiError> {
        if !self.form.validate_on(today) {
            let errors: Vec<FieldError> = self
                .form
                .errors()
                .entries()
                .into_iter()
                .map(|(path, message)| FieldError { path, message })
                .collect();
            return Err(ApiError::ValidationFailed { errors });
        }
        Ok(self.form.submission())
    }

    /// Autofill status of every tracked document number.
    #[must_use]
    pub fn autofill_statuses(&self) -> Vec<AutofillStatusEntry> {
        self.autofill
            .iter()
            .map(|controller| AutofillStatusEntry {
                target: controller.target(),
                base_path: controller.target().base_key(),
                status: controller.status().clone(),
            })
            .collect()
    }

    /// Everything needed to render the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            record: self.form.record().clone(),
            errors: self.form.errors().clone(),
            autofill: self.autofill_statuses(),
            editing: self.form.editing(),
            third_vehicle: self.form.record().third_vehicle_defendants().is_some(),
        }
    }
}
