// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use intake_domain::{FieldPath, OptionalSection, PartialFields};

/// A command represents an edit to the form as data only.
///
/// Commands are the only way to request changes to a form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// Write a text field.
    SetField {
        /// The field to write.
        path: FieldPath,
        /// The raw input, before sanitization.
        value: String,
    },
    /// Add or remove one member of a multi-select field.
    ToggleSetMember {
        /// The set field.
        path: FieldPath,
        /// The member to add or remove.
        item: String,
        /// Whether the member should be present afterwards.
        included: bool,
    },
    /// Write the non-blank values of a partial record under a base path.
    MergeFields {
        /// The sub-record the fields belong to.
        base: FieldPath,
        /// Field name to value, relative to `base`.
        fields: PartialFields,
    },
    /// Reset the named fields under a base path to the empty string.
    ClearFields {
        /// The sub-record the fields belong to.
        base: FieldPath,
        /// Field names relative to `base`.
        names: Vec<String>,
    },
    /// Attach a freshly initialized optional section.
    AddSection(OptionalSection),
    /// Detach an optional section and drop its contents.
    RemoveSection(OptionalSection),
}
