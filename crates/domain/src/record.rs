// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The nested case record.
//!
//! A record is a tree of named nodes. Every leaf is either a text scalar or a
//! set of strings; every inner node is another record. Nodes are reference
//! counted so that an update only allocates the touched path and its
//! ancestors, while untouched siblings keep their identity.

use crate::path::{self, FieldPath};
use crate::schema::{self, OptionalSection};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field name to incoming value, relative to some base path.
///
/// Used for partial merges such as autofill results.
pub type PartialFields = BTreeMap<String, String>;

/// A node in the case record tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A scalar string (dates and times are ISO strings).
    Text(Arc<str>),
    /// A multi-select value with set semantics.
    Set(FieldSet),
    /// A nested sub-record.
    Record(Record),
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(Arc::from(value))
    }

    /// Creates an empty text value.
    #[must_use]
    pub fn empty_text() -> Self {
        Self::Text(Arc::from(""))
    }

    /// Returns the text if this is a scalar.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the set if this is a multi-select value.
    #[must_use]
    pub const fn as_set(&self) -> Option<&FieldSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the sub-record if this is an inner node.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<FieldSet> for Value {
    fn from(value: FieldSet) -> Self {
        Self::Set(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

/// An insertion-ordered list of strings with set semantics.
///
/// Membership is what matters; two sets with the same members in a different
/// order compare equal.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    items: Arc<Vec<String>>,
}

impl FieldSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `item` is a member.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|existing| existing == item)
    }

    /// Adds `item` if absent. Returns whether the set changed.
    pub fn insert(&mut self, item: &str) -> bool {
        if self.contains(item) {
            return false;
        }
        Arc::make_mut(&mut self.items).push(item.to_string());
        true
    }

    /// Removes `item` if present. Returns whether the set changed.
    pub fn remove(&mut self, item: &str) -> bool {
        if !self.contains(item) {
            return false;
        }
        Arc::make_mut(&mut self.items).retain(|existing| existing != item);
        true
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

impl PartialEq for FieldSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl Eq for FieldSet {}

impl<S: AsRef<str>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set: Self = Self::new();
        for item in iter {
            set.insert(item.as_ref());
        }
        set
    }
}

/// A record node: named children behind a shared pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Arc<BTreeMap<String, Value>>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the child stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether a child is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates children in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builder-style insert, used when assembling default shapes.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Whether two records share the same underlying node.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.fields, &b.fields)
    }

    pub(crate) fn insert(&mut self, key: &str, value: Value) {
        Arc::make_mut(&mut self.fields).insert(key.to_string(), value);
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        if !self.fields.contains_key(key) {
            return None;
        }
        Arc::make_mut(&mut self.fields).remove(key)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: Arc::new(iter.into_iter().collect()),
        }
    }
}

/// Identifier of a persisted case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(i64);

impl CaseId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The root entity being captured by the intake form.
///
/// Always starts from the full default shape; optional sections are absent
/// until explicitly added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord {
    root: Record,
}

impl Default for CaseRecord {
    fn default() -> Self {
        Self {
            root: schema::default_case(),
        }
    }
}

impl CaseRecord {
    /// Creates a default-initialized case.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing root record.
    #[must_use]
    pub const fn from_root(root: Record) -> Self {
        Self { root }
    }

    /// The root record.
    #[must_use]
    pub const fn root(&self) -> &Record {
        &self.root
    }

    /// Reads the value at `path`.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        path::get(&self.root, path)
    }

    /// Reads a text leaf by raw dotted path; missing or non-text values read
    /// as the empty string.
    #[must_use]
    pub fn text(&self, raw_path: &str) -> &str {
        let mut segments = raw_path.split('.');
        let Some(first) = segments.next() else {
            return "";
        };
        let mut current: Option<&Value> = self.root.get(first);
        for segment in segments {
            current = current
                .and_then(Value::as_record)
                .and_then(|record| record.get(segment));
        }
        current.and_then(Value::as_text).unwrap_or("")
    }

    /// Reads a set leaf by raw dotted path; missing values read as empty.
    #[must_use]
    pub fn set_at(&self, raw_path: &str) -> FieldSet {
        FieldPath::parse(raw_path)
            .ok()
            .and_then(|path| self.get(&path).and_then(Value::as_set).cloned())
            .unwrap_or_default()
    }

    /// Returns a new case with `value` written at `path`.
    #[must_use]
    pub fn with_value(&self, path: &FieldPath, value: Value) -> Self {
        Self {
            root: path::set(&self.root, path, value),
        }
    }

    /// Returns a new case with the key at `path` removed.
    #[must_use]
    pub fn without(&self, path: &FieldPath) -> Self {
        Self {
            root: path::remove(&self.root, path),
        }
    }

    /// The optional section, if present.
    #[must_use]
    pub fn section(&self, section: OptionalSection) -> Option<&Record> {
        self.root.get(section.key()).and_then(Value::as_record)
    }

    /// The third-vehicle defendants block, if the case has one.
    #[must_use]
    pub fn third_vehicle_defendants(&self) -> Option<&Record> {
        self.section(OptionalSection::ThirdVehicleDefendants)
    }

    /// Whether two cases share the same root node.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Record::ptr_eq(&a.root, &b.root)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Set(set) => {
                let mut seq = serializer.serialize_seq(Some(set.len()))?;
                for item in set.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Record(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Accepts anything a cached or remote payload might carry at a leaf.
///
/// Numbers and booleans are stringified, `null` reads as empty text.
struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a string, a list of strings or an object")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::text(&v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::text(&v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::text(&v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::text(&v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::empty_text())
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::empty_text())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut set: FieldSet = FieldSet::new();
        while let Some(item) = seq.next_element::<Value>()? {
            match item {
                Value::Text(text) => {
                    set.insert(&text);
                }
                _ => return Err(de::Error::custom("set members must be scalars")),
            }
        }
        Ok(Value::Set(set))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        RecordVisitor.visit_map(map).map(Value::Record)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("an object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Record, A::Error> {
        let mut fields: BTreeMap<String, Value> = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            fields.insert(key, value);
        }
        Ok(Record {
            fields: Arc::new(fields),
        })
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
