// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

/// Default quiet period between the last key change and the lookup.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(450);

/// Tuning for autofill controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutofillConfig {
    /// How long a key must stay unchanged before it is looked up.
    pub debounce: Duration,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}
