// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::FormCommand;
use crate::error::CoreError;
use crate::state::{FormState, TransitionResult};
use intake_domain::dates::today_local;
use intake_domain::{
    CaseId, CaseRecord, ErrorTree, FieldError, FieldPath, OptionalSection, PartialFields,
    validate_field, validate_form,
};
use time::Date;
use tracing::debug;

/// A record captured for submission, together with the stored case it
/// replaces (if the session was editing one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The case to persist.
    pub record: CaseRecord,
    /// The stored case being edited, or `None` for a new case.
    pub editing: Option<CaseId>,
}

/// The single owner of one form's state.
///
/// All edits go through [`apply`], so every change yields a new snapshot
/// and the list of leaf paths it touched.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    state: FormState,
    editing: Option<CaseId>,
}

impl FormSession {
    /// Creates a session around a default case.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// The record being edited.
    #[must_use]
    pub const fn record(&self) -> &CaseRecord {
        &self.state.record
    }

    /// Current validation messages.
    #[must_use]
    pub const fn errors(&self) -> &ErrorTree {
        &self.state.errors
    }

    /// The stored case being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<CaseId> {
        self.editing
    }

    /// Applies a command and keeps the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns the `CoreError` from [`apply`]; the snapshot is unchanged.
    pub fn apply(&mut self, command: FormCommand) -> Result<Vec<FieldPath>, CoreError> {
        let result: TransitionResult = apply(&self.state, command)?;
        self.state = result.new_state;
        Ok(result.changed)
    }

    /// Writes a text field and clears its validation message.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a writable text field.
    pub fn set_field(&mut self, path: &FieldPath, value: &str) -> Result<Vec<FieldPath>, CoreError> {
        self.apply(FormCommand::SetField {
            path: path.clone(),
            value: value.to_string(),
        })
    }

    /// Adds or removes one member of a set field.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a writable set field.
    pub fn toggle(
        &mut self,
        path: &FieldPath,
        item: &str,
        included: bool,
    ) -> Result<Vec<FieldPath>, CoreError> {
        self.apply(FormCommand::ToggleSetMember {
            path: path.clone(),
            item: item.to_string(),
            included,
        })
    }

    /// Merges non-blank values under `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if any joined path is not a writable text field.
    pub fn merge_fields(
        &mut self,
        base: &FieldPath,
        fields: PartialFields,
    ) -> Result<Vec<FieldPath>, CoreError> {
        self.apply(FormCommand::MergeFields {
            base: base.clone(),
            fields,
        })
    }

    /// Resets the named fields under `base` to the empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if any joined path is not a writable text field.
    pub fn clear_fields(
        &mut self,
        base: &FieldPath,
        names: &[&str],
    ) -> Result<Vec<FieldPath>, CoreError> {
        self.apply(FormCommand::ClearFields {
            base: base.clone(),
            names: names.iter().map(ToString::to_string).collect(),
        })
    }

    /// Attaches an optional section.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SectionAlreadyPresent` if it is already attached.
    pub fn add_section(&mut self, section: OptionalSection) -> Result<Vec<FieldPath>, CoreError> {
        self.apply(FormCommand::AddSection(section))
    }

    /// Detaches an optional section and drops its messages.
    ///
    /// # Errors
    ///
    /// Only fails if the section key is malformed.
    pub fn remove_section(
        &mut self,
        section: OptionalSection,
    ) -> Result<Vec<FieldPath>, CoreError> {
        self.apply(FormCommand::RemoveSection(section))
    }

    /// Revalidates one field against today's date. See [`Self::blur_on`].
    pub fn blur(&mut self, path: &FieldPath, value: &str) -> Option<FieldError> {
        self.blur_on(path, value, today_local())
    }

    /// Revalidates one field, overwriting or removing its message.
    pub fn blur_on(&mut self, path: &FieldPath, value: &str, today: Date) -> Option<FieldError> {
        let error: Option<FieldError> = validate_field(path, value, today);
        match &error {
            Some(found) => self.state.errors.set(path, found.message.clone()),
            None => {
                self.state.errors.clear(path);
            }
        }
        error
    }

    /// Validates the whole form against today's date. See [`Self::validate_on`].
    pub fn validate(&mut self) -> bool {
        self.validate_on(today_local())
    }

    /// Replaces the error tree with a fresh validation of the record.
    ///
    /// Returns whether the record is valid.
    pub fn validate_on(&mut self, today: Date) -> bool {
        self.state.errors = validate_form(&self.state.record, today);
        debug!(
            errors = self.state.errors.len(),
            editing = ?self.editing,
            "Form validated"
        );
        self.state.errors.is_empty()
    }

    /// Starts editing a stored case. Previous messages are discarded.
    pub fn load(&mut self, id: CaseId, record: CaseRecord) {
        debug!(case_id = id.value(), "Loading case into form session");
        self.state = FormState::new(record);
        self.editing = Some(id);
    }

    /// Discards the current record and starts a new default case.
    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.editing = None;
    }

    /// The record and edit target to hand to the repository.
    ///
    /// The session keeps its record; call [`Self::reset`] once the
    /// repository has accepted it.
    #[must_use]
    pub fn submission(&self) -> Submission {
        Submission {
            record: self.state.record.clone(),
            editing: self.editing,
        }
    }
}
