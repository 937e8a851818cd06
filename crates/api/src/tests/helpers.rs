// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use intake_autofill::{
    AutofillConfig, ClientLookup, LookupError, LookupEvent, LookupFields, LookupOutcome,
};
use intake_domain::{CaseId, CaseRecord, FieldPath, ProvinceCatalog, Value};
use intake_persistence::{CaseListEntry, CaseRepository, CaseStore, PersistenceError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::Date;
use time::macros::date;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::{IntakeDesk, IntakeSession};

pub const TODAY: Date = date!(2026 - 10 - 16);

/// A directory that answers from a fixed table and records every request.
#[derive(Debug, Default)]
pub struct TableLookup {
    rows: HashMap<String, LookupFields>,
    calls: Mutex<Vec<String>>,
}

impl TableLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, dni: &str, json: serde_json::Value) -> Self {
        let serde_json::Value::Object(fields) = json else {
            panic!("expected a JSON object");
        };
        self.rows.insert(dni.to_string(), fields);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ClientLookup for TableLookup {
    async fn lookup(&self, dni: &str) -> Result<LookupOutcome, LookupError> {
        self.calls.lock().unwrap().push(dni.to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(self
            .rows
            .get(dni)
            .cloned()
            .map_or(LookupOutcome::NotFound, LookupOutcome::Found))
    }
}

/// A repository that refuses every write.
#[derive(Debug, Default)]
pub struct OfflineRepository;

impl OfflineRepository {
    fn offline() -> PersistenceError {
        PersistenceError::RemoteUnavailable(String::from("connection refused"))
    }
}

impl CaseRepository for OfflineRepository {
    async fn create(&self, _record: &CaseRecord) -> Result<CaseId, PersistenceError> {
        Err(Self::offline())
    }

    async fn list(&self) -> Result<Vec<CaseListEntry>, PersistenceError> {
        Ok(Vec::new())
    }

    async fn get(&self, id: CaseId) -> Result<CaseListEntry, PersistenceError> {
        Err(PersistenceError::CaseNotFound(id))
    }

    async fn update(&self, _id: CaseId, _record: &CaseRecord) -> Result<(), PersistenceError> {
        Err(Self::offline())
    }

    async fn delete(&self, id: CaseId) -> Result<(), PersistenceError> {
        Err(PersistenceError::CaseNotFound(id))
    }
}

pub type TestSession = IntakeSession<TableLookup>;

pub fn create_test_session(
    lookup: TableLookup,
) -> (TestSession, UnboundedReceiver<LookupEvent>, Arc<TableLookup>) {
    let lookup: Arc<TableLookup> = Arc::new(lookup);
    let (tx, rx) = unbounded_channel();
    let session: TestSession = IntakeSession::new(
        &lookup,
        AutofillConfig::default(),
        Arc::new(ProvinceCatalog::builtin()),
        &tx,
    );
    (session, rx, lookup)
}

pub fn create_test_desk<R: CaseRepository>(
    repository: R,
) -> (IntakeDesk<R, TableLookup>, Arc<R>) {
    let repository: Arc<R> = Arc::new(repository);
    let desk: IntakeDesk<R, TableLookup> = IntakeDesk::new(
        Arc::clone(&repository),
        Arc::new(TableLookup::new()),
        Arc::new(ProvinceCatalog::builtin()),
        AutofillConfig::default(),
    );
    (desk, repository)
}

pub fn create_store_desk() -> (IntakeDesk<CaseStore, TableLookup>, Arc<CaseStore>) {
    create_test_desk(CaseStore::new_in_memory())
}

/// Lets the debounce and any lookups run, then applies every reported
/// event to the session.
pub async fn settle(session: &mut TestSession, rx: &mut UnboundedReceiver<LookupEvent>) {
    tokio::time::sleep(Duration::from_secs(5)).await;
    while let Ok(event) = rx.try_recv() {
        session.handle_lookup_event(event).unwrap();
    }
}

/// Fills every required field and the claimant's injury zones.
pub fn fill_complete(session: &mut TestSession) {
    let values: [(&str, &str); 13] = [
        ("cliente.nombreCompleto", "Juan Pérez"),
        ("cliente.dni", "30222333"),
        ("cliente.fechaNacimiento", "1985-04-12"),
        ("cliente.domicilio", "Av. Rivadavia 1234"),
        ("cliente.localidad", "Flores"),
        ("cliente.telefono", "11 4444 5555"),
        ("cliente.mail", "juan@example.com"),
        ("cliente.rolAccidente", "Conductor"),
        ("vehiculoCliente.vehiculo", "Fiat Palio"),
        ("vehiculoCliente.dominio", "AB123CD"),
        ("siniestro.lugarHecho", "CABA"),
        ("siniestro.fechaHecho", "2026-03-01"),
        ("siniestro.horaHecho", "14:30"),
    ];
    for (path, value) in values {
        session.set_field(path, value).unwrap();
    }
    session
        .toggle("cliente.lesiones.zonasAfectadas", "Cervical", true)
        .unwrap();
}

/// A default case with the given text fields filled in.
pub fn case_with(values: &[(&str, &str)]) -> CaseRecord {
    values
        .iter()
        .fold(CaseRecord::new(), |acc, (raw, value)| {
            acc.with_value(&FieldPath::parse(raw).unwrap(), Value::text(value))
        })
}
