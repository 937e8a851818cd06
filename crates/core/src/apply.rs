// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::FormCommand;
use crate::error::CoreError;
use crate::state::{FormState, TransitionResult};
use crate::store;
use intake_domain::schema::{self, LeafKind};
use intake_domain::{CaseRecord, DomainError, ErrorTree, FieldPath, OptionalSection, path};

/// Checks that `path` is a schema leaf of the expected kind, and that the
/// optional section it lives in (if any) is present.
fn ensure_writable(
    record: &CaseRecord,
    path: &FieldPath,
    expected: LeafKind,
) -> Result<(), CoreError> {
    let Some(kind) = schema::leaf_kind(path) else {
        return Err(CoreError::DomainViolation(DomainError::UnknownField(
            path.to_string(),
        )));
    };
    if kind != expected {
        let schema_kind: &'static str = match kind {
            LeafKind::Text => "text",
            LeafKind::Set => "set",
        };
        return Err(CoreError::DomainViolation(
            DomainError::FieldKindMismatch {
                path: path.to_string(),
                expected: schema_kind,
            },
        ));
    }
    let absent_section: Option<OptionalSection> = schema::optional_section_of(path)
        .filter(|section| record.section(*section).is_none());
    match absent_section {
        Some(section) => Err(CoreError::SectionAbsent(section)),
        None => Ok(()),
    }
}

/// Applies a command to the form state, producing a new state.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and the changed leaf paths
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A path does not name a schema field of the right kind
/// - A path lies in an optional section the case does not have
/// - An optional section is added twice
pub fn apply(state: &FormState, command: FormCommand) -> Result<TransitionResult, CoreError> {
    let record: &CaseRecord = &state.record;
    let mut errors: ErrorTree = state.errors.clone();

    let new_record: CaseRecord = match command {
        FormCommand::SetField { path, value } => {
            ensure_writable(record, &path, LeafKind::Text)?;
            // A fresh edit invalidates the previous verdict for this field.
            errors.clear(&path);
            store::set_field(record, &path, &value)
        }
        FormCommand::ToggleSetMember {
            path,
            item,
            included,
        } => {
            ensure_writable(record, &path, LeafKind::Set)?;
            errors.clear(&path);
            store::toggle_set_member(record, &path, &item, included)
        }
        FormCommand::MergeFields { base, fields } => {
            for name in fields.keys() {
                ensure_writable(record, &base.join(name)?, LeafKind::Text)?;
            }
            store::merge_fields(record, &base, &fields)?
        }
        FormCommand::ClearFields { base, names } => {
            for name in &names {
                ensure_writable(record, &base.join(name)?, LeafKind::Text)?;
            }
            store::clear_fields(record, &base, &names)?
        }
        FormCommand::AddSection(section) => store::add_section(record, section)?,
        FormCommand::RemoveSection(section) => {
            errors.clear(&FieldPath::parse(section.key())?);
            store::remove_section(record, section)?
        }
    };

    let changed: Vec<FieldPath> = path::diff(record.root(), new_record.root());
    Ok(TransitionResult {
        new_state: FormState {
            record: new_record,
            errors,
        },
        changed,
    })
}
