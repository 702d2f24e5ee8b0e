/*
path.rs

Copyright 2025 The Wordpath Authors

This file is part of Wordpath.

Wordpath is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Wordpath is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Wordpath. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Path of words in the word graph.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::word_graph::NodeId;

/// Simple path (no node appears twice).
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct WalkPath {
    /// Path as an ordered list of nodes.
    path: Vec<NodeId>,

    /// Stores the membership of the nodes.
    /// Instead of looking for the node in the [`WalkPath::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    #[serde(skip)]
    members: HashSet<NodeId>,
}

impl PartialEq for WalkPath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl WalkPath {
    /// Create a [`WalkPath`] object that starts with the given node.
    pub fn new(start: NodeId) -> Self {
        let mut path: WalkPath = Self::default();
        path.push(start);
        path
    }

    /// Create a [`WalkPath`] object from a vector.
    ///
    /// Return None if a node appears twice.
    pub fn from_vec(nodes: Vec<NodeId>) -> Option<Self> {
        let members: HashSet<NodeId> = nodes.iter().copied().collect();
        if members.len() != nodes.len() {
            return None;
        }
        Some(Self {
            path: nodes,
            members,
        })
    }

    /// Add a node to the path.
    pub fn push(&mut self, node: NodeId) {
        self.path.push(node);
        self.members.insert(node);
    }

    /// Remove the last node from the path.
    pub fn pop(&mut self) -> Option<NodeId> {
        let node: NodeId = self.path.pop()?;
        self.members.remove(&node);
        Some(node)
    }

    /// Get the number of nodes in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the node is in the path or not.
    pub fn contains(&self, node: NodeId) -> bool {
        // The membership set is not serialized
        if self.members.len() != self.path.len() {
            return self.path.contains(&node);
        }
        self.members.contains(&node)
    }

    /// Return a reference to the node list.
    pub fn get(&self) -> &[NodeId] {
        &self.path
    }

    /// Return the first node in the path.
    pub fn first(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    /// Return the last node in the path.
    pub fn last(&self) -> Option<NodeId> {
        self.path.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut path: WalkPath = WalkPath::new(NodeId(3));
        path.push(NodeId(1));
        assert_eq!(path.len(), 2);
        assert!(path.contains(NodeId(1)));
        assert_eq!(path.pop(), Some(NodeId(1)));
        assert!(!path.contains(NodeId(1)));
        assert_eq!(path.first(), Some(NodeId(3)));
        assert_eq!(path.last(), Some(NodeId(3)));
    }

    #[test]
    fn test_from_vec_rejects_repeats() {
        assert!(WalkPath::from_vec(vec![NodeId(0), NodeId(1), NodeId(0)]).is_none());
        let path: WalkPath = WalkPath::from_vec(vec![NodeId(0), NodeId(1)]).unwrap();
        assert_eq!(path.get(), &[NodeId(0), NodeId(1)]);
    }

    #[test]
    fn test_contains_after_deserialize() {
        let path: WalkPath = WalkPath::from_vec(vec![NodeId(4), NodeId(2)]).unwrap();
        let json: String = serde_json::to_string(&path).unwrap();
        let restored: WalkPath = serde_json::from_str(&json).unwrap();
        assert!(restored.contains(NodeId(2)));
        assert_eq!(restored, path);
    }
}
