/*
word_graph.rs

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

//! Word graph built from the relation data.
//!
//! The graph is an arena: [`WordNode`] objects are stored in a vector and identified by their
//! [`NodeId`] (the index in that vector). Edges are sets of [`NodeId`] values, so nodes never own
//! each other and cycles are harmless.
//!
//! The relation data is a JSON object such as:
//!
//! ```json
//! {
//!     "bright": {"synonyms": ["shiny"], "antonyms": ["dull"], "related": ["light"]},
//!     "dull": {"synonyms": ["boring"]}
//! }
//! ```
//!
//! The graph is read-only once built.

use log::{Level, debug, info, log_enabled};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::str::FromStr;

use crate::errors::{GameError, Result};
use crate::shortest_path::Adjacency;

/// Relation data as it is read from the JSON file: word -> relation kind -> target words.
///
/// Ordered maps make the node numbering independent of the JSON key order, so that seeded
/// random walks are reproducible.
type RelationData = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Identifier of a node in the [`WordGraph`] arena.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type of relation between two words.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Synonyms,
    Antonyms,
    Related,
}

impl RelationKind {
    /// All the relation kinds, in the order they are reported to players.
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Synonyms,
        RelationKind::Antonyms,
        RelationKind::Related,
    ];

    /// Name of the relation kind in the relation data.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Synonyms => "synonyms",
            RelationKind::Antonyms => "antonyms",
            RelationKind::Related => "related",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "synonyms" => Ok(RelationKind::Synonyms),
            "antonyms" => Ok(RelationKind::Antonyms),
            "related" => Ok(RelationKind::Related),
            _ => Err(GameError::DataFormat(format!("unknown relation kind '{s}'"))),
        }
    }
}

/// How edges are inserted in the graph.
///
/// - `Directed` records `word -> target` only, as the relation data states it.
/// - `Mirrored` also records `target -> word` with the same relation kind.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RelationPolicy {
    #[default]
    Directed,
    Mirrored,
}

/// Word in the graph with its outgoing relations.
#[derive(Debug, Clone)]
pub struct WordNode {
    /// Lowercase word.
    word: String,

    synonyms: BTreeSet<NodeId>,
    antonyms: BTreeSet<NodeId>,
    related: BTreeSet<NodeId>,
}

impl WordNode {
    fn new(word: String) -> Self {
        Self {
            word,
            synonyms: BTreeSet::new(),
            antonyms: BTreeSet::new(),
            related: BTreeSet::new(),
        }
    }

    /// Return the word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Return the outgoing neighbors for the given relation kind.
    pub fn relation(&self, kind: RelationKind) -> &BTreeSet<NodeId> {
        match kind {
            RelationKind::Synonyms => &self.synonyms,
            RelationKind::Antonyms => &self.antonyms,
            RelationKind::Related => &self.related,
        }
    }

    fn relation_mut(&mut self, kind: RelationKind) -> &mut BTreeSet<NodeId> {
        match kind {
            RelationKind::Synonyms => &mut self.synonyms,
            RelationKind::Antonyms => &mut self.antonyms,
            RelationKind::Related => &mut self.related,
        }
    }

    /// Union of the three outgoing neighbor sets.
    pub fn all_neighbors(&self) -> BTreeSet<NodeId> {
        self.synonyms
            .iter()
            .chain(self.antonyms.iter())
            .chain(self.related.iter())
            .copied()
            .collect()
    }
}

/// Identity of a [`WordGraph`] content.
///
/// Saved sessions store this value instead of the graph. When a session is restored, the
/// fingerprint confirms that the node numbering did not change.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct GraphFingerprint {
    pub nodes: usize,
    pub edges: usize,
    pub digest: u64,
}

/// Directed graph of words.
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    /// Node arena. A [`NodeId`] is an index in this vector.
    nodes: Vec<WordNode>,

    /// Lowercase word -> node.
    index: HashMap<String, NodeId>,

    /// Edge insertion policy.
    policy: RelationPolicy,

    /// Number of directed edges, all relation kinds included.
    num_edges: usize,
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hash of `bytes`, continuing from `hash`.
///
/// The algorithm is fixed, so fingerprints saved by one build stay valid for the next one.
fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Normalize a word before using it as a key.
fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

impl WordGraph {
    /// Create an empty graph.
    pub fn new(policy: RelationPolicy) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            policy,
            num_edges: 0,
        }
    }

    /// Build the graph from the relation data in JSON format.
    ///
    /// # Errors
    ///
    /// Return [`GameError::DataFormat`] if the data is not a `word -> {kind -> [words]}` mapping,
    /// if a relation kind is not `synonyms`, `antonyms`, or `related`, or if a word is empty.
    pub fn from_json_str(data: &str, policy: RelationPolicy) -> Result<Self> {
        let relations: RelationData =
            serde_json::from_str(data).map_err(|e| GameError::DataFormat(e.to_string()))?;
        Self::build(relations, policy)
    }

    /// Build the graph from a reader that provides the relation data in JSON format.
    pub fn from_reader<R: Read>(reader: R, policy: RelationPolicy) -> Result<Self> {
        let relations: RelationData = serde_json::from_reader(reader)
            .map_err(|e| GameError::DataFormat(e.to_string()))?;
        Self::build(relations, policy)
    }

    /// Build the graph from a JSON file.
    pub fn from_file(path: &std::path::Path, policy: RelationPolicy) -> Result<Self> {
        debug!("Loading relation data from {path:?}");
        let file: File = File::open(path)
            .map_err(|e| GameError::DataFormat(format!("{}: {e}", path.display())))?;
        Self::from_reader(BufReader::new(file), policy)
    }

    fn build(relations: RelationData, policy: RelationPolicy) -> Result<Self> {
        let mut graph: WordGraph = WordGraph::new(policy);

        for (word, kinds) in &relations {
            for (kind, targets) in kinds {
                let kind: RelationKind = kind.parse()?;
                for target in targets {
                    graph.add_edge(word, kind, target)?;
                }
            }
        }

        info!(
            "Word graph loaded: {} nodes, {} edges ({:?})",
            graph.len(),
            graph.num_edges,
            graph.policy
        );
        if log_enabled!(Level::Debug) {
            graph.debug();
        }
        Ok(graph)
    }

    /// Return the node for the word, creating it if needed.
    fn ensure_node(&mut self, word: String) -> NodeId {
        if let Some(id) = self.index.get(&word) {
            return *id;
        }
        let id: NodeId = NodeId(self.nodes.len());
        self.index.insert(word.clone(), id);
        self.nodes.push(WordNode::new(word));
        id
    }

    /// Add the `word -> target` edge for the given relation kind.
    ///
    /// Both words are created if they do not exist yet. With [`RelationPolicy::Mirrored`], the
    /// `target -> word` edge is added too.
    /// Adding an existing edge does nothing.
    ///
    /// Return whether at least one edge was added.
    ///
    /// # Errors
    ///
    /// Return [`GameError::DataFormat`] if a word is empty.
    pub fn add_edge(&mut self, word: &str, kind: RelationKind, target: &str) -> Result<bool> {
        let word: String = normalize(word);
        let target: String = normalize(target);
        if word.is_empty() || target.is_empty() {
            return Err(GameError::DataFormat(format!(
                "empty word in {kind} relation"
            )));
        }

        let from: NodeId = self.ensure_node(word);
        let to: NodeId = self.ensure_node(target);

        let mut added: bool = self.insert(from, kind, to);
        if self.policy == RelationPolicy::Mirrored {
            added |= self.insert(to, kind, from);
        }
        Ok(added)
    }

    fn insert(&mut self, from: NodeId, kind: RelationKind, to: NodeId) -> bool {
        let added: bool = self.nodes[from.0].relation_mut(kind).insert(to);
        if added {
            self.num_edges += 1;
        }
        added
    }

    /// Return the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    /// Return the edge insertion policy.
    pub fn policy(&self) -> RelationPolicy {
        self.policy
    }

    /// Return the node ID of the word, or None if the word is not in the graph.
    pub fn lookup(&self, word: &str) -> Option<NodeId> {
        self.index.get(&normalize(word)).copied()
    }

    /// Return the node ID of the word.
    ///
    /// # Errors
    ///
    /// Return [`GameError::UnknownWord`] if the word is not in the graph.
    pub fn require(&self, word: &str) -> Result<NodeId> {
        self.lookup(word)
            .ok_or_else(|| GameError::UnknownWord(word.to_string()))
    }

    /// Return the node.
    ///
    /// [`NodeId`] values are only produced by the graph, so the ID is always valid for the graph
    /// that issued it.
    pub fn node(&self, id: NodeId) -> &WordNode {
        &self.nodes[id.0]
    }

    /// Return the word of the node.
    pub fn word(&self, id: NodeId) -> &str {
        self.nodes[id.0].word()
    }

    /// Return the words of a list of nodes.
    pub fn words(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| self.word(*id).to_string()).collect()
    }

    /// Return the sorted neighbor words of the word for the given relation kind.
    pub fn neighbors(&self, word: &str, kind: RelationKind) -> Result<Vec<String>> {
        let id: NodeId = self.require(word)?;
        let mut words: Vec<String> = self
            .node(id)
            .relation(kind)
            .iter()
            .map(|n| self.word(*n).to_string())
            .collect();
        words.sort_unstable();
        Ok(words)
    }

    /// Union of the outgoing neighbor sets of the node.
    pub fn all_neighbors(&self, id: NodeId) -> BTreeSet<NodeId> {
        self.nodes[id.0].all_neighbors()
    }

    /// Compute the fingerprint of the graph content.
    pub fn fingerprint(&self) -> GraphFingerprint {
        let mut digest: u64 = FNV_OFFSET_BASIS;
        for node in &self.nodes {
            digest = fnv1a(digest, node.word.as_bytes());
            digest = fnv1a(digest, &[0xff]);
            for kind in RelationKind::ALL {
                for n in node.relation(kind) {
                    digest = fnv1a(digest, &(n.0 as u64).to_le_bytes());
                }
                digest = fnv1a(digest, &[0xfe]);
            }
        }
        GraphFingerprint {
            nodes: self.nodes.len(),
            edges: self.num_edges,
            digest,
        }
    }

    /// Print the edges.
    pub fn debug(&self) {
        for (i, node) in self.nodes.iter().enumerate() {
            let mut s: String = format!("{i:>5} {} -->", node.word);
            for kind in RelationKind::ALL {
                for n in node.relation(kind) {
                    s.push_str(&format!(" {}({kind})", self.word(*n)));
                }
            }
            debug!("{s}");
        }
    }
}

impl Adjacency for WordGraph {
    fn successors(&self, node: NodeId) -> Vec<NodeId> {
        self.all_neighbors(node).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN: &str = r#"{
        "a": {"synonyms": ["b"]},
        "b": {"synonyms": ["c"]},
        "c": {"related": ["a"]}
    }"#;

    #[test]
    fn test_build_chain() {
        let graph: WordGraph = WordGraph::from_json_str(CHAIN, RelationPolicy::Directed).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.neighbors("a", RelationKind::Synonyms).unwrap(),
            vec!["b".to_string()]
        );
        assert_eq!(
            graph.neighbors("c", RelationKind::Related).unwrap(),
            vec!["a".to_string()]
        );
        // Directed: no reverse edge
        assert!(graph.neighbors("b", RelationKind::Synonyms).unwrap() == vec!["c".to_string()]);
        assert!(graph.neighbors("c", RelationKind::Synonyms).unwrap().is_empty());
    }

    #[test]
    fn test_target_is_created() {
        let graph: WordGraph =
            WordGraph::from_json_str(r#"{"hot": {"antonyms": ["cold"]}}"#, RelationPolicy::Directed)
                .unwrap();
        let cold: NodeId = graph.lookup("cold").unwrap();
        assert!(graph.all_neighbors(cold).is_empty());
    }

    #[test]
    fn test_edge_insertion_is_idempotent() {
        let mut graph: WordGraph = WordGraph::new(RelationPolicy::Directed);
        assert!(graph.add_edge("w", RelationKind::Related, "t").unwrap());
        assert!(!graph.add_edge("w", RelationKind::Related, "t").unwrap());
        let w: NodeId = graph.lookup("w").unwrap();
        assert_eq!(graph.node(w).relation(RelationKind::Related).len(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_same_target_in_two_kinds() {
        let mut graph: WordGraph = WordGraph::new(RelationPolicy::Directed);
        graph.add_edge("w", RelationKind::Related, "t").unwrap();
        graph.add_edge("w", RelationKind::Synonyms, "t").unwrap();
        let w: NodeId = graph.lookup("w").unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.all_neighbors(w).len(), 1);
    }

    #[test]
    fn test_mirrored_policy() {
        let graph: WordGraph = WordGraph::from_json_str(CHAIN, RelationPolicy::Mirrored).unwrap();
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(
            graph.neighbors("b", RelationKind::Synonyms).unwrap(),
            vec!["a".to_string(), "c".to_string()]
        );
        assert_eq!(
            graph.neighbors("a", RelationKind::Related).unwrap(),
            vec!["c".to_string()]
        );
    }

    #[test]
    fn test_self_relation_is_kept() {
        let graph: WordGraph =
            WordGraph::from_json_str(r#"{"echo": {"related": ["echo"]}}"#, RelationPolicy::Directed)
                .unwrap();
        let echo: NodeId = graph.lookup("echo").unwrap();
        assert!(graph.all_neighbors(echo).contains(&echo));
    }

    #[test]
    fn test_words_are_lowercase() {
        let graph: WordGraph =
            WordGraph::from_json_str(r#"{"Big": {"synonyms": [" LARGE "]}}"#, RelationPolicy::Directed)
                .unwrap();
        assert!(graph.lookup("big").is_some());
        assert_eq!(graph.lookup("Large"), graph.lookup("large"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_unknown_relation_kind() {
        let res = WordGraph::from_json_str(r#"{"a": {"hypernyms": ["b"]}}"#, RelationPolicy::Directed);
        assert!(matches!(res, Err(GameError::DataFormat(_))));
    }

    #[test]
    fn test_malformed_data() {
        for data in [
            r#"["a", "b"]"#,
            r#"{"a": ["b"]}"#,
            r#"{"a": {"synonyms": "b"}}"#,
            r#"{"a": {"synonyms": [1]}}"#,
            "not json",
        ] {
            let res = WordGraph::from_json_str(data, RelationPolicy::Directed);
            assert!(matches!(res, Err(GameError::DataFormat(_))), "{data}");
        }
    }

    #[test]
    fn test_empty_word_is_rejected() {
        let res = WordGraph::from_json_str(r#"{"a": {"synonyms": ["  "]}}"#, RelationPolicy::Directed);
        assert!(matches!(res, Err(GameError::DataFormat(_))));
    }

    #[test]
    fn test_unknown_word() {
        let graph: WordGraph = WordGraph::from_json_str(CHAIN, RelationPolicy::Directed).unwrap();
        assert_eq!(
            graph.neighbors("zebra", RelationKind::Synonyms),
            Err(GameError::UnknownWord("zebra".to_string()))
        );
    }

    #[test]
    fn test_fingerprint() {
        let g1: WordGraph = WordGraph::from_json_str(CHAIN, RelationPolicy::Directed).unwrap();
        let g2: WordGraph = WordGraph::from_json_str(CHAIN, RelationPolicy::Directed).unwrap();
        let g3: WordGraph = WordGraph::from_json_str(CHAIN, RelationPolicy::Mirrored).unwrap();
        assert_eq!(g1.fingerprint(), g2.fingerprint());
        assert_ne!(g1.fingerprint(), g3.fingerprint());
    }

    #[test]
    fn test_fingerprint_digest_is_fixed() {
        assert_eq!(fnv1a(FNV_OFFSET_BASIS, b""), FNV_OFFSET_BASIS);
        assert_eq!(fnv1a(FNV_OFFSET_BASIS, b"a"), 0xaf63_dc4c_8601_ec8c);

        // Saved sessions rely on this value: it must not change between builds
        let graph: WordGraph =
            WordGraph::from_json_str(r#"{"a": {"synonyms": ["b"]}}"#, RelationPolicy::Directed)
                .unwrap();
        assert_eq!(
            graph.fingerprint(),
            GraphFingerprint {
                nodes: 2,
                edges: 1,
                digest: 0x734e_4b1d_67ae_3185,
            }
        );
    }
}
