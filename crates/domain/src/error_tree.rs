// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::path::FieldPath;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
enum ErrorNode {
    Message(String),
    Branch(ErrorTree),
}

/// Validation messages laid out in the same shape as the case record.
///
/// Only paths with a message are present. Setting a message overwrites any
/// earlier one for the same path; clearing removes it and prunes branches
/// left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorTree {
    nodes: BTreeMap<String, ErrorNode>,
}

impl ErrorTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tree carries no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of messages in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                ErrorNode::Message(_) => 1,
                ErrorNode::Branch(tree) => tree.len(),
            })
            .sum()
    }

    /// The message stored at `path`.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        let mut tree: &Self = self;
        let mut segments = path.segments().peekable();
        while let Some(segment) = segments.next() {
            match (tree.nodes.get(segment)?, segments.peek()) {
                (ErrorNode::Message(message), None) => return Some(message),
                (ErrorNode::Branch(inner), Some(_)) => tree = inner,
                _ => return None,
            }
        }
        None
    }

    /// Stores `message` at `path`, replacing whatever was there.
    pub fn set(&mut self, path: &FieldPath, message: impl Into<String>) {
        let segments: Vec<&str> = path.segments().collect();
        self.set_segments(&segments, message.into());
    }

    fn set_segments(&mut self, segments: &[&str], message: String) {
        match segments {
            [] => {}
            [last] => {
                self.nodes
                    .insert((*last).to_string(), ErrorNode::Message(message));
            }
            [head, rest @ ..] => {
                let node: &mut ErrorNode = self
                    .nodes
                    .entry((*head).to_string())
                    .or_insert_with(|| ErrorNode::Branch(Self::new()));
                if let ErrorNode::Message(_) = node {
                    *node = ErrorNode::Branch(Self::new());
                }
                if let ErrorNode::Branch(inner) = node {
                    inner.set_segments(rest, message);
                }
            }
        }
    }

    /// Removes the message at `path`, or every message beneath it.
    ///
    /// Returns whether anything was removed.
    pub fn clear(&mut self, path: &FieldPath) -> bool {
        let segments: Vec<&str> = path.segments().collect();
        self.clear_segments(&segments)
    }

    fn clear_segments(&mut self, segments: &[&str]) -> bool {
        match segments {
            [] => false,
            [last] => self.nodes.remove(*last).is_some(),
            [head, rest @ ..] => {
                let Some(ErrorNode::Branch(inner)) = self.nodes.get_mut(*head) else {
                    return false;
                };
                let removed: bool = inner.clear_segments(rest);
                if inner.is_empty() {
                    self.nodes.remove(*head);
                }
                removed
            }
        }
    }

    /// Every `(path, message)` pair in path order.
    #[must_use]
    pub fn entries(&self) -> Vec<(FieldPath, String)> {
        let mut out: Vec<(FieldPath, String)> = Vec::new();
        self.collect("", &mut out);
        out
    }

    /// Every path carrying a message.
    #[must_use]
    pub fn paths(&self) -> Vec<FieldPath> {
        self.entries().into_iter().map(|(path, _)| path).collect()
    }

    fn collect(&self, prefix: &str, out: &mut Vec<(FieldPath, String)>) {
        for (key, node) in &self.nodes {
            let full: String = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match node {
                ErrorNode::Message(message) => {
                    if let Ok(path) = FieldPath::parse(&full) {
                        out.push((path, message.clone()));
                    }
                }
                ErrorNode::Branch(inner) => inner.collect(&full, out),
            }
        }
    }
}
