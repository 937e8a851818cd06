// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ErrorTree, FieldPath};

fn p(raw: &str) -> FieldPath {
    FieldPath::parse(raw).unwrap()
}

#[test]
fn test_set_overwrites_previous_message() {
    let mut errors: ErrorTree = ErrorTree::new();
    errors.set(&p("cliente.dni"), "first");
    errors.set(&p("cliente.dni"), "second");
    assert_eq!(errors.get(&p("cliente.dni")), Some("second"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_clear_prunes_empty_branches() {
    let mut errors: ErrorTree = ErrorTree::new();
    errors.set(&p("cliente.lesiones.zonasAfectadas"), "msg");
    assert!(errors.clear(&p("cliente.lesiones.zonasAfectadas")));
    assert!(errors.is_empty());
}

#[test]
fn test_clear_keeps_siblings() {
    let mut errors: ErrorTree = ErrorTree::new();
    errors.set(&p("cliente.dni"), "a");
    errors.set(&p("cliente.mail"), "b");
    errors.clear(&p("cliente.dni"));
    assert_eq!(errors.paths(), vec![p("cliente.mail")]);
}

#[test]
fn test_clear_missing_path_reports_nothing_removed() {
    let mut errors: ErrorTree = ErrorTree::new();
    errors.set(&p("cliente.dni"), "a");
    assert!(!errors.clear(&p("cliente.mail")));
    assert!(!errors.clear(&p("cliente.dni.extra")));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_clear_branch_removes_everything_beneath() {
    let mut errors: ErrorTree = ErrorTree::new();
    errors.set(&p("tercerVehiculoDemandado.conductor.dni"), "a");
    errors.set(&p("tercerVehiculoDemandado.titular.dni"), "b");
    errors.set(&p("cliente.dni"), "c");
    assert!(errors.clear(&p("tercerVehiculoDemandado")));
    assert_eq!(errors.paths(), vec![p("cliente.dni")]);
}

#[test]
fn test_get_branch_is_none() {
    let mut errors: ErrorTree = ErrorTree::new();
    errors.set(&p("cliente.dni"), "a");
    assert_eq!(errors.get(&p("cliente")), None);
}

#[test]
fn test_serializes_as_nested_object() {
    let mut errors: ErrorTree = ErrorTree::new();
    errors.set(&p("cliente.dni"), "a");
    errors.set(&p("siniestro.fechaHecho"), "b");
    let json: serde_json::Value = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"cliente": {"dni": "a"}, "siniestro": {"fechaHecho": "b"}})
    );
}
