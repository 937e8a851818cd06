// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::AutofillConfig;
use crate::lookup::{ClientLookup, LookupError, LookupOutcome};
use crate::mapping::map_lookup_fields;
use crate::target::AutofillTarget;
use intake_domain::{PartialFields, is_valid_dni};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Status message when the directory has no record for the key.
pub const NOT_FOUND_MESSAGE: &str = "No se encontró un cliente para ese DNI.";
/// Status message when the lookup could not be completed.
pub const LOOKUP_FAILED_MESSAGE: &str = "Error consultando cliente por DNI.";

/// Where a controller is in its lookup cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AutofillPhase {
    /// Nothing scheduled or running.
    #[default]
    Idle,
    /// Waiting for the key to settle.
    Debouncing,
    /// The lookup request is running.
    Fetching,
}

/// What the form shows next to a tracked document number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillStatus {
    /// Current phase.
    pub phase: AutofillPhase,
    /// Whether a request is running.
    pub loading: bool,
    /// Message from the last completed lookup, if it did not fill the form.
    pub error: Option<String>,
    /// The most recent key whose lookup completed (found or not found).
    pub last_looked_up: Option<String>,
}

/// Progress reported by a spawned lookup task.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupEventKind {
    /// The debounce elapsed and the request is being sent.
    Fetching,
    /// The request completed.
    Finished(Result<LookupOutcome, LookupError>),
}

/// A message from a lookup task back to its controller.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupEvent {
    /// The controller the task belongs to.
    pub target: AutofillTarget,
    /// The generation the task was started for.
    pub generation: u64,
    /// What happened.
    pub kind: LookupEventKind,
}

/// The result of observing the current value of the tracked key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChange {
    /// Same key as last time; nothing to do.
    Unchanged,
    /// The key was emptied; the caller must clear the dependent fields.
    ClearDependents,
    /// The key is not a well-formed document number; no lookup is made.
    Ignored,
    /// A lookup was scheduled under the given generation.
    Scheduled(u64),
}

/// What the caller must do after a lookup event has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutofillAction {
    /// The event was stale or the controller is closed; drop it.
    Discarded,
    /// Only the status changed.
    StatusChanged,
    /// Merge these fields (relative to the target's base path) into the
    /// record. Blank values must not overwrite anything.
    Merge(PartialFields),
}

#[derive(Debug)]
struct InFlight {
    key: String,
    generation: u64,
    token: CancellationToken,
}

/// Drives lookups for one tracked document number.
///
/// The controller never touches the record itself. Key changes are fed in
/// through [`Self::observe_key`]; spawned lookups report back as
/// [`LookupEvent`]s which the owner passes to [`Self::handle`] while
/// holding the same lock it uses for user edits.
#[derive(Debug)]
pub struct AutofillController<L: ClientLookup> {
    target: AutofillTarget,
    lookup: Arc<L>,
    config: AutofillConfig,
    events: UnboundedSender<LookupEvent>,
    observed_key: String,
    generation: u64,
    in_flight: Option<InFlight>,
    status: AutofillStatus,
    closed: bool,
}

impl<L: ClientLookup> AutofillController<L> {
    /// Creates an idle controller.
    ///
    /// # Arguments
    ///
    /// * `target` - The sub-record this controller fills
    /// * `lookup` - The directory to query
    /// * `config` - Debounce tuning
    /// * `events` - Where spawned lookup tasks report progress
    #[must_use]
    pub fn new(
        target: AutofillTarget,
        lookup: Arc<L>,
        config: AutofillConfig,
        events: UnboundedSender<LookupEvent>,
    ) -> Self {
        Self {
            target,
            lookup,
            config,
            events,
            observed_key: String::new(),
            generation: 0,
            in_flight: None,
            status: AutofillStatus::default(),
            closed: false,
        }
    }

    /// The sub-record this controller fills.
    #[must_use]
    pub const fn target(&self) -> AutofillTarget {
        self.target
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> &AutofillStatus {
        &self.status
    }

    /// Whether [`Self::shutdown`] has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(
                base_path = %self.target,
                generation = in_flight.generation,
                "Cancelling autofill lookup"
            );
            in_flight.token.cancel();
        }
        self.status.phase = AutofillPhase::Idle;
        self.status.loading = false;
    }

    /// Reacts to the current value of the tracked document number.
    ///
    /// Any change cancels the running lookup before anything else happens.
    /// Must be called from within a Tokio runtime.
    pub fn observe_key(&mut self, raw_key: &str) -> KeyChange {
        let key: &str = raw_key.trim();
        if self.closed || key == self.observed_key {
            return KeyChange::Unchanged;
        }

        self.cancel_in_flight();
        self.observed_key = key.to_string();
        self.status.error = None;
        self.status.last_looked_up = None;

        if key.is_empty() {
            debug!(base_path = %self.target, "Document number cleared");
            return KeyChange::ClearDependents;
        }
        if !is_valid_dni(key) {
            return KeyChange::Ignored;
        }

        self.generation += 1;
        let token: CancellationToken = CancellationToken::new();
        self.in_flight = Some(InFlight {
            key: key.to_string(),
            generation: self.generation,
            token: token.clone(),
        });
        self.status.phase = AutofillPhase::Debouncing;

        debug!(
            base_path = %self.target,
            generation = self.generation,
            "Scheduling autofill lookup"
        );
        tokio::spawn(run_lookup(
            Arc::clone(&self.lookup),
            key.to_string(),
            self.target,
            self.generation,
            self.config.debounce,
            token,
            self.events.clone(),
        ));
        KeyChange::Scheduled(self.generation)
    }

    /// Applies a lookup event if it belongs to the current, uncancelled
    /// lookup; anything else is discarded.
    pub fn handle(&mut self, event: LookupEvent) -> AutofillAction {
        if self.closed || event.target != self.target {
            return AutofillAction::Discarded;
        }
        let current: bool = self.in_flight.as_ref().is_some_and(|in_flight| {
            in_flight.generation == event.generation && !in_flight.token.is_cancelled()
        });
        if !current {
            debug!(
                base_path = %self.target,
                generation = event.generation,
                "Discarding stale autofill event"
            );
            return AutofillAction::Discarded;
        }

        match event.kind {
            LookupEventKind::Fetching => {
                self.status.phase = AutofillPhase::Fetching;
                self.status.loading = true;
                AutofillAction::StatusChanged
            }
            LookupEventKind::Finished(result) => {
                let key: String = self
                    .in_flight
                    .take()
                    .map(|in_flight| in_flight.key)
                    .unwrap_or_default();
                self.status.phase = AutofillPhase::Idle;
                self.status.loading = false;
                match result {
                    Ok(LookupOutcome::Found(fields)) => {
                        debug!(base_path = %self.target, "Autofill lookup found a record");
                        self.status.error = None;
                        self.status.last_looked_up = Some(key);
                        AutofillAction::Merge(map_lookup_fields(self.target, &fields))
                    }
                    Ok(LookupOutcome::NotFound) => {
                        debug!(base_path = %self.target, "Autofill lookup found nothing");
                        self.status.error = Some(NOT_FOUND_MESSAGE.to_string());
                        self.status.last_looked_up = Some(key);
                        AutofillAction::StatusChanged
                    }
                    Err(err) => {
                        warn!(base_path = %self.target, error = %err, "Autofill lookup failed");
                        self.status.error = Some(LOOKUP_FAILED_MESSAGE.to_string());
                        AutofillAction::StatusChanged
                    }
                }
            }
        }
    }

    /// Marks `key` as already looked up, without fetching it.
    ///
    /// Used when a stored case is loaded so its data is not overwritten.
    pub fn prime(&mut self, raw_key: &str) {
        self.cancel_in_flight();
        let key: &str = raw_key.trim();
        self.observed_key = key.to_string();
        self.status = AutofillStatus {
            last_looked_up: (!key.is_empty()).then(|| key.to_string()),
            ..AutofillStatus::default()
        };
    }

    /// Returns to the initial state, cancelling pending work.
    pub fn reset(&mut self) {
        self.cancel_in_flight();
        self.observed_key.clear();
        self.status = AutofillStatus::default();
    }

    /// Cancels pending work and stops reacting to keys and events.
    ///
    /// Calling it more than once is harmless.
    pub fn shutdown(&mut self) {
        self.cancel_in_flight();
        self.closed = true;
    }
}

impl<L: ClientLookup> Drop for AutofillController<L> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Waits out the debounce, then performs the lookup, bailing out as soon as
/// `token` is cancelled.
async fn run_lookup<L: ClientLookup>(
    lookup: Arc<L>,
    key: String,
    target: AutofillTarget,
    generation: u64,
    debounce: Duration,
    token: CancellationToken,
    events: UnboundedSender<LookupEvent>,
) {
    tokio::select! {
        () = token.cancelled() => return,
        () = tokio::time::sleep(debounce) => {}
    }

    let fetching: LookupEvent = LookupEvent {
        target,
        generation,
        kind: LookupEventKind::Fetching,
    };
    if events.send(fetching).is_err() {
        return;
    }

    let result: Result<LookupOutcome, LookupError> = tokio::select! {
        () = token.cancelled() => return,
        result = lookup.lookup(&key) => result,
    };

    let _ = events.send(LookupEvent {
        target,
        generation,
        kind: LookupEventKind::Finished(result),
    });
}
