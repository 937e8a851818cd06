// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::client_case;
use crate::store::assign_id;
use crate::{CaseListEntry, CaseRepository, CaseStore, PersistenceError};
use intake_domain::{CaseId, CaseRecord, OptionalSection};
use tempfile::TempDir;

#[tokio::test]
async fn test_create_assigns_unique_increasing_ids() {
    let store: CaseStore = CaseStore::new_in_memory();

    let first: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();
    let second: CaseId = store.create(&client_case("Luis", "30111223")).await.unwrap();

    assert!(second > first);
    let listed: Vec<CaseListEntry> = store.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first);
    assert_eq!(listed[1].id, second);
    assert_eq!(listed[1].record.text("cliente.nombreCompleto"), "Luis");
}

#[tokio::test]
async fn test_get_returns_the_stored_case() {
    let store: CaseStore = CaseStore::new_in_memory();
    let id: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();

    let entry: CaseListEntry = store.get(id).await.unwrap();
    assert_eq!(entry.id, id);
    assert_eq!(entry.record.text("cliente.dni"), "30111222");
}

#[tokio::test]
async fn test_update_replaces_the_record() {
    let store: CaseStore = CaseStore::new_in_memory();
    let id: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();

    store
        .update(id, &client_case("Ana María", "30111222"))
        .await
        .unwrap();

    let entry: CaseListEntry = store.get(id).await.unwrap();
    assert_eq!(entry.record.text("cliente.nombreCompleto"), "Ana María");
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_removes_only_that_case() {
    let store: CaseStore = CaseStore::new_in_memory();
    let keep: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();
    let gone: CaseId = store.create(&client_case("Luis", "30111223")).await.unwrap();

    store.delete(gone).await.unwrap();

    let ids: Vec<CaseId> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn test_unknown_ids_are_reported() {
    let store: CaseStore = CaseStore::new_in_memory();
    let missing: CaseId = CaseId::new(5);

    assert_eq!(
        store.get(missing).await,
        Err(PersistenceError::CaseNotFound(missing))
    );
    assert_eq!(
        store.update(missing, &CaseRecord::new()).await,
        Err(PersistenceError::CaseNotFound(missing))
    );
    assert_eq!(
        store.delete(missing).await,
        Err(PersistenceError::CaseNotFound(missing))
    );
}

#[tokio::test]
async fn test_cache_file_survives_reopen() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("casos.json");

    let store: CaseStore = CaseStore::open(&path).await.unwrap();
    let id: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();
    drop(store);

    let reopened: CaseStore = CaseStore::open(&path).await.unwrap();
    let entries: Vec<CaseListEntry> = reopened.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].record, client_case("Ana", "30111222"));
}

#[tokio::test]
async fn test_cache_file_is_an_array_of_cases_with_ids() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("casos.json");

    let store: CaseStore = CaseStore::open(&path).await.unwrap();
    let id: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first: &serde_json::Value = &raw.as_array().unwrap()[0];
    assert_eq!(first["id"], serde_json::json!(id.value()));
    assert_eq!(first["cliente"]["nombreCompleto"], "Ana");
    assert!(first["cliente"]["lesiones"]["zonasAfectadas"].is_array());
    assert!(first.get(OptionalSection::ThirdVehicleDefendants.key()).is_none());
}

#[tokio::test]
async fn test_missing_cache_file_opens_empty() {
    let dir: TempDir = TempDir::new().unwrap();
    let store: CaseStore = CaseStore::open(dir.path().join("none.json")).await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_cache_file_is_rejected() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("casos.json");
    std::fs::write(&path, "{not json").unwrap();

    let result: Result<CaseStore, PersistenceError> = CaseStore::open(&path).await;
    assert!(matches!(
        result,
        Err(PersistenceError::SerializationError(_))
    ));
}

#[tokio::test]
async fn test_cached_entry_with_section_round_trips() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("casos.json");
    std::fs::write(
        &path,
        r#"[{"id": 1700000000000, "cliente": {"nombreCompleto": "Ana"},
            "tercerVehiculoDemandado": {"conductor": {"nombreApellido": "Pedro"}}}]"#,
    )
    .unwrap();

    let store: CaseStore = CaseStore::open(&path).await.unwrap();
    let entry: CaseListEntry = store.get(CaseId::new(1_700_000_000_000)).await.unwrap();
    assert_eq!(entry.record.text("cliente.nombreCompleto"), "Ana");
    assert!(entry.record.third_vehicle_defendants().is_some());
    assert_eq!(
        entry
            .record
            .text("tercerVehiculoDemandado.conductor.nombreApellido"),
        "Pedro"
    );
}

// ============================================================================
// Failed writes
// ============================================================================

/// Replaces the cache file with a directory so every later write fails.
fn block_cache_file(path: &std::path::Path) {
    if path.exists() {
        std::fs::remove_file(path).unwrap();
    }
    std::fs::create_dir(path).unwrap();
}

#[tokio::test]
async fn test_failed_create_leaves_no_case_behind() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("casos.json");
    let store: CaseStore = CaseStore::open(&path).await.unwrap();
    block_cache_file(&path);

    let first: Result<CaseId, PersistenceError> = store.create(&client_case("Ana", "30111222")).await;
    let retry: Result<CaseId, PersistenceError> = store.create(&client_case("Ana", "30111222")).await;

    assert!(matches!(first, Err(PersistenceError::Io(_))));
    assert!(matches!(retry, Err(PersistenceError::Io(_))));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_update_keeps_the_stored_record() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("casos.json");
    let store: CaseStore = CaseStore::open(&path).await.unwrap();
    let id: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();
    block_cache_file(&path);

    let result: Result<(), PersistenceError> =
        store.update(id, &client_case("Ana María", "30111222")).await;

    assert!(matches!(result, Err(PersistenceError::Io(_))));
    let entry: CaseListEntry = store.get(id).await.unwrap();
    assert_eq!(entry.record.text("cliente.nombreCompleto"), "Ana");
}

#[tokio::test]
async fn test_failed_delete_keeps_the_case() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("casos.json");
    let store: CaseStore = CaseStore::open(&path).await.unwrap();
    let id: CaseId = store.create(&client_case("Ana", "30111222")).await.unwrap();
    block_cache_file(&path);

    let result: Result<(), PersistenceError> = store.delete(id).await;

    assert!(matches!(result, Err(PersistenceError::Io(_))));
    assert_eq!(store.list().await.unwrap().len(), 1);
    assert!(store.get(id).await.is_ok());
}

// ============================================================================
// Id assignment
// ============================================================================

#[test]
fn test_remote_id_is_used_when_free() {
    let entries: Vec<CaseListEntry> = vec![CaseListEntry::new(CaseId::new(4), CaseRecord::new())];
    assert_eq!(assign_id(Some(CaseId::new(5)), &entries), CaseId::new(5));
}

#[test]
fn test_reused_remote_id_falls_back_without_replacing() {
    let taken: CaseId = CaseId::new(4);
    let entries: Vec<CaseListEntry> = vec![CaseListEntry::new(taken, CaseRecord::new())];

    let id: CaseId = assign_id(Some(taken), &entries);

    assert_ne!(id, taken);
    assert!(id > taken);
}

#[test]
fn test_missing_remote_id_falls_back_past_cached_ids() {
    let highest: CaseId = CaseId::new(i64::MAX - 1);
    let entries: Vec<CaseListEntry> = vec![CaseListEntry::new(highest, CaseRecord::new())];
    assert_eq!(assign_id(None, &entries), CaseId::new(i64::MAX));
}
