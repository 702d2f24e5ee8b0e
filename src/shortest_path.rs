/*
shortest_path.rs

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

//! Incremental breadth-first search seeded at the puzzle target.
//!
//! The [`ShortestPathEngine`] answers "how far is this word from the target" for any number of
//! words during a game. The search starts at the target and follows the outgoing edges of each
//! word it reaches. It stops as soon as the requested word is dequeued, and keeps its frontier
//! queue, visited set, and distance cache so that the next query resumes where the previous one
//! stopped. Over the life of a game, the successors of each word are expanded once at most.
//!
//! Because the search follows outgoing edges from the target, the reported distance is the
//! number of steps from the target to the word, which differs from the distance to the target
//! when the relations are not symmetric (see [`crate::generator::word_graph::RelationPolicy`]).
//!
//! The engine state is serializable. A restored engine continues the same search.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::generator::word_graph::NodeId;

/// Source of the outgoing edges followed by the search.
pub trait Adjacency {
    /// Return the nodes that `node` has an edge to, all relation kinds included, without
    /// duplicates.
    fn successors(&self, node: NodeId) -> Vec<NodeId>;
}

/// Result of a distance query.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// Number of edges between the target and the node.
    Steps(usize),

    /// The search exhausted the graph without reaching the node.
    Unreachable,
}

impl Distance {
    /// Return the number of steps, or None if the node is unreachable.
    pub fn steps(&self) -> Option<usize> {
        match self {
            Distance::Steps(n) => Some(*n),
            Distance::Unreachable => None,
        }
    }

    /// Whether the node is reachable.
    pub fn is_reachable(&self) -> bool {
        matches!(self, Distance::Steps(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Steps(n) => write!(f, "{n}"),
            Distance::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Resumable breadth-first search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShortestPathEngine {
    /// Node the search started from.
    target: NodeId,

    /// Node whose path is recorded the first time the search reaches it (the puzzle start).
    landmark: Option<NodeId>,

    /// Nodes waiting to be expanded, with their distance to the target.
    frontier: VecDeque<(NodeId, usize)>,

    /// Nodes already queued (expanded or in the frontier).
    visited: HashSet<NodeId>,

    /// Distances of the expanded nodes. Once set, a distance never changes.
    distances: HashMap<NodeId, usize>,

    /// Predecessor of each visited node in the search tree. The target has no entry.
    parents: HashMap<NodeId, NodeId>,

    /// Path from the target to the landmark, once the landmark has been expanded.
    landmark_path: Option<Vec<NodeId>>,
}

impl ShortestPathEngine {
    /// Create an engine that measures distances from `target`.
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            landmark: None,
            frontier: VecDeque::from([(target, 0)]),
            visited: HashSet::from([target]),
            distances: HashMap::new(),
            parents: HashMap::new(),
            landmark_path: None,
        }
    }

    /// Create an engine that also records the path to `landmark` when it reaches it.
    pub fn with_landmark(target: NodeId, landmark: NodeId) -> Self {
        Self {
            landmark: Some(landmark),
            ..Self::new(target)
        }
    }

    /// Return the node the search started from.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Return the distance from the target to `node`.
    ///
    /// A distance already in the cache is returned immediately. Otherwise the search resumes
    /// until `node` is dequeued, or until the frontier is empty.
    pub fn query_distance<A: Adjacency + ?Sized>(&mut self, graph: &A, node: NodeId) -> Distance {
        if let Some(d) = self.distances.get(&node) {
            return Distance::Steps(*d);
        }

        let settled_before: usize = self.distances.len();
        while let Some((current, distance)) = self.frontier.pop_front() {
            self.expand(graph, current, distance);
            if current == node {
                debug!(
                    "Resumed search: {} nodes expanded, {} in frontier",
                    self.distances.len() - settled_before,
                    self.frontier.len()
                );
                return Distance::Steps(distance);
            }
        }

        debug!(
            "Search exhausted after {} nodes: node {node} is unreachable",
            self.distances.len()
        );
        Distance::Unreachable
    }

    /// Record the distance of `current` and queue its unvisited successors.
    fn expand<A: Adjacency + ?Sized>(&mut self, graph: &A, current: NodeId, distance: usize) {
        self.distances.insert(current, distance);
        if self.landmark == Some(current) && self.landmark_path.is_none() {
            self.landmark_path = self.path_to(current);
        }

        for next in graph.successors(current) {
            if self.visited.insert(next) {
                self.parents.insert(next, current);
                self.frontier.push_back((next, distance + 1));
            }
        }
    }

    /// Return the cached distance of `node` without resuming the search.
    ///
    /// Return None when the search has not reached the node yet.
    pub fn cached_distance(&self, node: NodeId) -> Option<Distance> {
        match self.distances.get(&node) {
            Some(d) => Some(Distance::Steps(*d)),
            None if self.frontier.is_empty() => Some(Distance::Unreachable),
            None => None,
        }
    }

    /// Return the path from the target to an expanded node, both ends included.
    ///
    /// Return None if the node has not been expanded.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        if !self.distances.contains_key(&node) {
            return None;
        }
        let mut path: Vec<NodeId> = vec![node];
        let mut current: NodeId = node;
        while let Some(parent) = self.parents.get(&current) {
            path.push(*parent);
            current = *parent;
        }
        path.reverse();
        Some(path)
    }

    /// Return the path from the target to the landmark, if the search reached it.
    pub fn landmark_path(&self) -> Option<&[NodeId]> {
        self.landmark_path.as_deref()
    }

    /// Number of expanded nodes.
    pub fn settled_count(&self) -> usize {
        self.distances.len()
    }

    /// Number of nodes waiting in the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether the search has explored everything reachable from the target.
    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Whether every node of the search state is in a graph of `len` nodes.
    ///
    /// A restored engine that fails this check would index past the end of the graph.
    pub fn fits_graph(&self, len: usize) -> bool {
        let fits = |n: &NodeId| n.0 < len;
        fits(&self.target)
            && self.landmark.iter().all(fits)
            && self.frontier.iter().all(|(n, _)| fits(n))
            && self.visited.iter().all(fits)
            && self.distances.keys().all(fits)
            && self.parents.iter().all(|(n, p)| fits(n) && fits(p))
            && self.landmark_path.iter().flatten().all(fits)
    }
}
