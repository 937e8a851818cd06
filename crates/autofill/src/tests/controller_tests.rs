// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{ScriptedLookup, fields, found};
use crate::{
    AutofillAction, AutofillConfig, AutofillController, AutofillPhase, AutofillTarget, KeyChange,
    LOOKUP_FAILED_MESSAGE, LookupError, LookupEvent, LookupEventKind, LookupOutcome,
    NOT_FOUND_MESSAGE,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

type Controller = AutofillController<ScriptedLookup>;

fn controller(lookup: &Arc<ScriptedLookup>) -> (Controller, UnboundedReceiver<LookupEvent>) {
    let (tx, rx) = unbounded_channel();
    let controller: Controller = AutofillController::new(
        AutofillTarget::Cliente,
        Arc::clone(lookup),
        AutofillConfig::default(),
        tx,
    );
    (controller, rx)
}

/// Feeds events to the controller until one yields an action other than a
/// status change.
async fn drive(controller: &mut Controller, rx: &mut UnboundedReceiver<LookupEvent>) -> AutofillAction {
    loop {
        let event: LookupEvent = rx.recv().await.unwrap();
        match controller.handle(event) {
            AutofillAction::StatusChanged if controller.status().loading => {}
            action => return action,
        }
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

#[tokio::test(start_paused = true)]
async fn test_found_record_is_merged() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new().respond(
        "30222333",
        Duration::from_millis(20),
        found(json!({"nombre": "Juan", "apellido": "Pérez", "telefono": "1144445555"})),
    ));
    let (mut controller, mut rx) = controller(&lookup);

    assert_eq!(controller.observe_key("30222333"), KeyChange::Scheduled(1));
    assert_eq!(controller.status().phase, AutofillPhase::Debouncing);

    let AutofillAction::Merge(merged) = drive(&mut controller, &mut rx).await else {
        panic!("expected a merge");
    };
    assert_eq!(merged["nombreCompleto"], "Juan Pérez");
    assert_eq!(merged["telefono"], "1144445555");
    assert_eq!(controller.status().phase, AutofillPhase::Idle);
    assert!(!controller.status().loading);
    assert_eq!(controller.status().error, None);
    assert_eq!(
        controller.status().last_looked_up.as_deref(),
        Some("30222333")
    );
}

#[tokio::test(start_paused = true)]
async fn test_only_the_latest_lookup_is_applied() {
    let lookup: Arc<ScriptedLookup> = Arc::new(
        ScriptedLookup::new()
            .respond(
                "20111222",
                Duration::from_secs(1),
                found(json!({"nombre": "Primero"})),
            )
            .respond(
                "30222333",
                Duration::from_millis(10),
                found(json!({"nombre": "Segundo"})),
            ),
    );
    let (mut controller, mut rx) = controller(&lookup);

    assert_eq!(controller.observe_key("20111222"), KeyChange::Scheduled(1));
    let fetching: LookupEvent = rx.recv().await.unwrap();
    assert_eq!(fetching.kind, LookupEventKind::Fetching);
    assert_eq!(controller.handle(fetching), AutofillAction::StatusChanged);
    assert!(controller.status().loading);

    assert_eq!(controller.observe_key("30222333"), KeyChange::Scheduled(2));
    assert!(!controller.status().loading);

    let AutofillAction::Merge(merged) = drive(&mut controller, &mut rx).await else {
        panic!("expected a merge");
    };
    assert_eq!(merged["nombreCompleto"], "Segundo");

    let late: LookupEvent = LookupEvent {
        target: AutofillTarget::Cliente,
        generation: 1,
        kind: LookupEventKind::Finished(found(json!({"nombre": "Primero"}))),
    };
    assert_eq!(controller.handle(late), AutofillAction::Discarded);

    settle().await;
    assert!(rx.try_recv().is_err());
    assert_eq!(lookup.calls(), vec!["20111222", "30222333"]);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_are_debounced_into_one_lookup() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, mut rx) = controller(&lookup);

    controller.observe_key("1234567");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.observe_key("12345678");

    assert_eq!(
        drive(&mut controller, &mut rx).await,
        AutofillAction::StatusChanged
    );
    assert_eq!(lookup.calls(), vec!["12345678"]);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_sets_message_and_remembers_key() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new().respond(
        "99999999",
        Duration::ZERO,
        Ok(LookupOutcome::NotFound),
    ));
    let (mut controller, mut rx) = controller(&lookup);

    controller.observe_key("99999999");
    assert_eq!(
        drive(&mut controller, &mut rx).await,
        AutofillAction::StatusChanged
    );
    assert_eq!(controller.status().error.as_deref(), Some(NOT_FOUND_MESSAGE));
    assert_eq!(
        controller.status().last_looked_up.as_deref(),
        Some("99999999")
    );
    assert_eq!(controller.observe_key("99999999"), KeyChange::Unchanged);
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_sets_message() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new().respond(
        "30222333",
        Duration::ZERO,
        Err(LookupError::Status(500)),
    ));
    let (mut controller, mut rx) = controller(&lookup);

    controller.observe_key("30222333");
    drive(&mut controller, &mut rx).await;
    assert_eq!(
        controller.status().error.as_deref(),
        Some(LOOKUP_FAILED_MESSAGE)
    );
    assert_eq!(controller.status().last_looked_up, None);
    assert!(!controller.status().loading);
}

#[tokio::test(start_paused = true)]
async fn test_empty_key_cancels_and_requests_clearing() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, mut rx) = controller(&lookup);

    controller.observe_key("30222333");
    assert_eq!(controller.observe_key(""), KeyChange::ClearDependents);
    assert_eq!(controller.status().phase, AutofillPhase::Idle);
    assert_eq!(controller.status().error, None);

    settle().await;
    assert!(rx.try_recv().is_err());
    assert!(lookup.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_key_is_ignored_without_error() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, mut rx) = controller(&lookup);

    assert_eq!(controller.observe_key("123"), KeyChange::Ignored);
    assert_eq!(controller.observe_key("123456789"), KeyChange::Ignored);
    assert_eq!(controller.status().error, None);
    assert_eq!(controller.status().phase, AutofillPhase::Idle);

    settle().await;
    assert!(rx.try_recv().is_err());
    assert!(lookup.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_returning_to_a_previous_key_looks_it_up_again() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, mut rx) = controller(&lookup);

    controller.observe_key("30222333");
    drive(&mut controller, &mut rx).await;
    controller.observe_key("302223");
    assert_eq!(controller.observe_key("30222333"), KeyChange::Scheduled(2));
    drive(&mut controller, &mut rx).await;
    assert_eq!(lookup.calls(), vec!["30222333", "30222333"]);
}

#[tokio::test(start_paused = true)]
async fn test_primed_key_is_not_fetched() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, mut rx) = controller(&lookup);

    controller.prime("30222333");
    assert_eq!(controller.observe_key("30222333"), KeyChange::Unchanged);
    assert_eq!(
        controller.status().last_looked_up.as_deref(),
        Some("30222333")
    );
    settle().await;
    assert!(rx.try_recv().is_err());
    assert!(lookup.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_is_idempotent_and_final() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, mut rx) = controller(&lookup);

    controller.observe_key("30222333");
    controller.shutdown();
    controller.shutdown();
    assert!(controller.is_closed());
    assert_eq!(controller.observe_key("20111222"), KeyChange::Unchanged);

    let event: LookupEvent = LookupEvent {
        target: AutofillTarget::Cliente,
        generation: 1,
        kind: LookupEventKind::Finished(Ok(LookupOutcome::Found(fields(json!({}))))),
    };
    assert_eq!(controller.handle(event), AutofillAction::Discarded);

    settle().await;
    assert!(rx.try_recv().is_err());
    assert!(lookup.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_cancels_pending_lookup() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, mut rx) = controller(&lookup);

    controller.observe_key("30222333");
    drop(controller);

    settle().await;
    assert!(rx.recv().await.is_none());
    assert!(lookup.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_events_for_other_targets_are_discarded() {
    let lookup: Arc<ScriptedLookup> = Arc::new(ScriptedLookup::new());
    let (mut controller, _rx) = controller(&lookup);

    controller.observe_key("30222333");
    let foreign: LookupEvent = LookupEvent {
        target: AutofillTarget::CoActor,
        generation: 1,
        kind: LookupEventKind::Fetching,
    };
    assert_eq!(controller.handle(foreign), AutofillAction::Discarded);
}
