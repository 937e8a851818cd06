// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dotted field paths and copy-on-write access over records.

use crate::error::DomainError;
use crate::record::{Record, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A dot-separated sequence of record keys, e.g. `cliente.lesiones.zonasAfectadas`.
///
/// Construction guarantees at least one segment and no empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    raw: String,
}

impl FieldPath {
    /// Parses a dotted path.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` if the string is empty or contains
    /// an empty segment (leading, trailing or doubled dots).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty",
            });
        }
        if raw.split('.').any(str::is_empty) {
            return Err(DomainError::InvalidPath {
                path: raw.to_string(),
                reason: "path contains an empty segment",
            });
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Joins a base path and a relative field name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` if the joined path is malformed.
    pub fn join(&self, field: &str) -> Result<Self, DomainError> {
        Self::parse(&format!("{}.{field}", self.raw))
    }

    /// The path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The individual keys, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    /// The first key.
    #[must_use]
    pub fn head(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// The final key.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.raw.rsplit('.').next().unwrap_or_default()
    }

    /// Whether this path equals `prefix` or lies underneath it.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.raw == prefix.raw
            || (self.raw.starts_with(&prefix.raw)
                && self.raw.as_bytes().get(prefix.raw.len()) == Some(&b'.'))
    }

    /// Builds a path from segments read out of an existing record.
    ///
    /// Record keys coming from deserialized payloads are not re-validated here.
    fn from_segments(segments: &[&str]) -> Self {
        Self {
            raw: segments.join("."),
        }
    }
}

impl FromStr for FieldPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Reads the value at `path`.
///
/// Returns `None` if any intermediate key is missing or is not a record.
#[must_use]
pub fn get<'a>(record: &'a Record, path: &FieldPath) -> Option<&'a Value> {
    let mut segments = path.segments();
    let mut current: &Value = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_record()?.get(segment)?;
    }
    Some(current)
}

/// Writes `value` at `path`, returning a new root.
///
/// Missing intermediates are created as empty records and non-record
/// intermediates are replaced by empty records. Only the nodes along `path`
/// are copied; every other sub-record is shared with the input.
#[must_use]
pub fn set(record: &Record, path: &FieldPath, value: Value) -> Record {
    let segments: Vec<&str> = path.segments().collect();
    set_segments(record, &segments, value)
}

fn set_segments(record: &Record, segments: &[&str], value: Value) -> Record {
    let mut next: Record = record.clone();
    match segments {
        [] => {}
        [last] => next.insert(last, value),
        [head, rest @ ..] => {
            let child: Record = match record.get(head) {
                Some(Value::Record(inner)) => inner.clone(),
                _ => Record::new(),
            };
            next.insert(head, Value::Record(set_segments(&child, rest, value)));
        }
    }
    next
}

/// Removes the key at `path`, returning a new root.
///
/// Removing something that does not exist returns the input unchanged.
#[must_use]
pub fn remove(record: &Record, path: &FieldPath) -> Record {
    let segments: Vec<&str> = path.segments().collect();
    remove_segments(record, &segments).unwrap_or_else(|| record.clone())
}

fn remove_segments(record: &Record, segments: &[&str]) -> Option<Record> {
    match segments {
        [] => None,
        [last] => {
            let mut next: Record = record.clone();
            next.remove(last).map(|_| next)
        }
        [head, rest @ ..] => {
            let child: &Record = record.get(head)?.as_record()?;
            let updated: Record = remove_segments(child, rest)?;
            let mut next: Record = record.clone();
            next.insert(head, Value::Record(updated));
            Some(next)
        }
    }
}

/// Lists the leaf paths whose values differ between two roots.
///
/// Shared sub-records are skipped without being walked. A key that exists on
/// one side only reports every leaf beneath it.
#[must_use]
pub fn diff(old: &Record, new: &Record) -> Vec<FieldPath> {
    let mut changed: BTreeSet<FieldPath> = BTreeSet::new();
    let mut prefix: Vec<&str> = Vec::new();
    diff_records(old, new, &mut prefix, &mut changed);
    changed.into_iter().collect()
}

fn diff_records<'a>(
    old: &'a Record,
    new: &'a Record,
    prefix: &mut Vec<&'a str>,
    changed: &mut BTreeSet<FieldPath>,
) {
    if Record::ptr_eq(old, new) {
        return;
    }
    let keys: BTreeSet<&str> = old.iter().chain(new.iter()).map(|(key, _)| key).collect();
    for key in keys {
        prefix.push(key);
        match (old.get(key), new.get(key)) {
            (Some(Value::Record(a)), Some(Value::Record(b))) => {
                diff_records(a, b, prefix, changed);
            }
            (Some(a), Some(b)) if a == b => {}
            (a, b) => {
                for side in [a, b].into_iter().flatten() {
                    collect_leaves(side, prefix, changed);
                }
            }
        }
        prefix.pop();
    }
}

fn collect_leaves<'a>(
    value: &'a Value,
    prefix: &mut Vec<&'a str>,
    out: &mut BTreeSet<FieldPath>,
) {
    match value {
        Value::Record(record) if !record.is_empty() => {
            for (key, child) in record.iter() {
                prefix.push(key);
                collect_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        _ => {
            out.insert(FieldPath::from_segments(prefix));
        }
    }
}

/// Lists every leaf path beneath `record`.
#[must_use]
pub fn leaf_paths(record: &Record) -> Vec<FieldPath> {
    let mut out: BTreeSet<FieldPath> = BTreeSet::new();
    let mut prefix: Vec<&str> = Vec::new();
    for (key, child) in record.iter() {
        prefix.push(key);
        collect_leaves(child, &mut prefix, &mut out);
        prefix.pop();
    }
    out.into_iter().collect()
}
