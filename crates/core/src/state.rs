// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intake_domain::{CaseRecord, ErrorTree, FieldPath};

/// One snapshot of the form: the record being edited and its validation
/// messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// The case being captured.
    pub record: CaseRecord,
    /// Messages from the most recent validation, by path.
    pub errors: ErrorTree,
}

impl FormState {
    /// Creates a state around an existing record, with no errors.
    #[must_use]
    pub fn new(record: CaseRecord) -> Self {
        Self {
            record,
            errors: ErrorTree::new(),
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: FormState,
    /// Leaf paths whose values differ from the previous state.
    pub changed: Vec<FieldPath>,
}
