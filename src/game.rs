/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! A [`GameSession`] groups the shared word graph, the generated puzzle, and the shortest-path
//! engine that measures how far the player is from the target. Distance queries grow the engine
//! cache, so the session must be saved after each query (see [`crate::service`]).
//!
//! Sessions are not protected against concurrent use. When two requests load, query, and save
//! the same session at the same time, the last save wins and the cache growth of the other
//! request is lost. The answers stay correct because the lost work is redone on demand.

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{GameError, Result};
use crate::generator::path::WalkPath;
use crate::generator::puzzles::{Difficulty, Puzzle, PuzzleConfig, PuzzleGenerator};
use crate::generator::random_walk::Walk;
use crate::generator::word_graph::{GraphFingerprint, NodeId, RelationKind, WordGraph};
use crate::shortest_path::{Distance, ShortestPathEngine};
use crate::similarity::SimilarityScorer;

/// Neighbor words of a word, by relation kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Neighbors {
    pub current_word: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub related: Vec<String>,
}

/// Answer to a distance query.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistanceReport {
    pub current_word: String,
    pub target_word: String,

    /// Number of steps, or None if the word cannot be reached.
    pub distance: Option<usize>,
    pub reachable: bool,
}

/// Answer to a similarity query.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    pub current_word: String,
    pub target_word: String,
    pub similarity: f32,
}

/// Serializable state of a [`GameSession`].
///
/// The graph is not saved. Its fingerprint identifies the graph that the node IDs refer to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub graph: GraphFingerprint,
    pub puzzle: Puzzle,
    pub engine: ShortestPathEngine,
}

/// Game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Shared, read-only word graph.
    graph: Arc<WordGraph>,

    /// Generated puzzle.
    puzzle: Puzzle,

    /// Search seeded at the puzzle target.
    engine: ShortestPathEngine,
}

impl GameSession {
    /// Generate a puzzle for the given difficulty and create the session.
    ///
    /// # Errors
    ///
    /// Return [`GameError::EmptyGraph`] if the graph has no nodes.
    pub fn new<R: Rng + ?Sized>(
        graph: Arc<WordGraph>,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Self> {
        Self::with_config(graph, &difficulty.config(), rng)
    }

    /// Generate a puzzle with explicit generation parameters and create the session.
    pub fn with_config<R: Rng + ?Sized>(
        graph: Arc<WordGraph>,
        config: &PuzzleConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let walk: Walk = PuzzleGenerator::new(&graph).generate(config, rng)?;
        Ok(Self::from_walk(graph, walk))
    }

    /// Create a session for a known puzzle path. The first word is the start word and the last
    /// word is the target word.
    ///
    /// # Errors
    ///
    /// Return [`GameError::UnknownWord`] if a word is not in the graph, and
    /// [`GameError::InvalidConfig`] if the path is empty or has the same word twice.
    pub fn from_path(graph: Arc<WordGraph>, words: &[&str]) -> Result<Self> {
        let ids: Vec<NodeId> = words
            .iter()
            .map(|w| graph.require(w))
            .collect::<Result<Vec<NodeId>>>()?;
        let path: WalkPath = WalkPath::from_vec(ids).ok_or_else(|| {
            GameError::InvalidConfig("the puzzle path has the same word twice".to_string())
        })?;
        let end: NodeId = path
            .last()
            .ok_or_else(|| GameError::InvalidConfig("the puzzle path is empty".to_string()))?;
        Ok(Self::from_walk(graph, Walk { end, path }))
    }

    fn from_walk(graph: Arc<WordGraph>, walk: Walk) -> Self {
        let mut puzzle: Puzzle = Puzzle::from_walk(walk);
        let mut engine: ShortestPathEngine =
            ShortestPathEngine::with_landmark(puzzle.target, puzzle.start);

        puzzle.optimal_distance = engine.query_distance(graph.as_ref(), puzzle.start);
        puzzle.solution_path = engine.landmark_path().map(|p| p.to_vec());
        info!(
            "New game: '{}' -> '{}', optimal distance {}",
            graph.word(puzzle.start),
            graph.word(puzzle.target),
            puzzle.optimal_distance
        );

        Self {
            graph,
            puzzle,
            engine,
        }
    }

    /// Return the word graph.
    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    /// Return the puzzle.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Return the start word.
    pub fn start_word(&self) -> &str {
        self.graph.word(self.puzzle.start)
    }

    /// Return the target word.
    pub fn target_word(&self) -> &str {
        self.graph.word(self.puzzle.target)
    }

    /// Return the distance between the target and the start word.
    pub fn optimal_distance(&self) -> Distance {
        self.puzzle.optimal_distance
    }

    /// Return the words of the random walk that created the puzzle.
    pub fn puzzle_path_words(&self) -> Vec<String> {
        self.graph.words(self.puzzle.puzzle_path.get())
    }

    /// Return the words of the path found from the target to the start word, if any.
    pub fn solution_path_words(&self) -> Option<Vec<String>> {
        self.puzzle
            .solution_path
            .as_ref()
            .map(|p| self.graph.words(p))
    }

    /// Whether the word is the target word.
    pub fn is_target(&self, word: &str) -> bool {
        self.graph.lookup(word) == Some(self.puzzle.target)
    }

    /// Return the neighbor words of the word.
    pub fn neighbors(&self, word: &str) -> Result<Neighbors> {
        let id: NodeId = self.graph.require(word)?;
        let mut neighbors: Neighbors = Neighbors {
            current_word: self.graph.word(id).to_string(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            related: Vec::new(),
        };
        for kind in RelationKind::ALL {
            let words: Vec<String> = self.graph.neighbors(word, kind)?;
            match kind {
                RelationKind::Synonyms => neighbors.synonyms = words,
                RelationKind::Antonyms => neighbors.antonyms = words,
                RelationKind::Related => neighbors.related = words,
            }
        }
        Ok(neighbors)
    }

    /// Return the distance between the target and the word.
    ///
    /// # Errors
    ///
    /// Return [`GameError::UnknownWord`] if the word is not in the graph.
    pub fn query_distance(&mut self, word: &str) -> Result<Distance> {
        let id: NodeId = self.graph.require(word)?;
        let distance: Distance = self.engine.query_distance(self.graph.as_ref(), id);
        debug!("Distance of '{word}': {distance}");
        Ok(distance)
    }

    /// Return the distance report for the word.
    pub fn distance(&mut self, word: &str) -> Result<DistanceReport> {
        let distance: Distance = self.query_distance(word)?;
        Ok(DistanceReport {
            current_word: self.graph.word(self.graph.require(word)?).to_string(),
            target_word: self.target_word().to_string(),
            distance: distance.steps(),
            reachable: distance.is_reachable(),
        })
    }

    /// Return the similarity between the word and the target word.
    ///
    /// The similarity never changes the distances.
    pub fn similarity(
        &self,
        word: &str,
        scorer: &dyn SimilarityScorer,
    ) -> Result<SimilarityReport> {
        let id: NodeId = self.graph.require(word)?;
        let current_word: &str = self.graph.word(id);
        let similarity: f32 = scorer.score(current_word, self.target_word())?;
        Ok(SimilarityReport {
            current_word: current_word.to_string(),
            target_word: self.target_word().to_string(),
            similarity,
        })
    }

    /// Return the shortest-path engine.
    pub fn engine(&self) -> &ShortestPathEngine {
        &self.engine
    }

    /// Return the serializable state of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            graph: self.graph.fingerprint(),
            puzzle: self.puzzle.clone(),
            engine: self.engine.clone(),
        }
    }

    /// Restore a session from its serializable state. The search resumes where it stopped.
    ///
    /// # Errors
    ///
    /// Return [`GameError::StaleSession`] if the snapshot was taken with another graph, or if
    /// it refers to nodes that the graph does not have.
    pub fn restore(graph: Arc<WordGraph>, snapshot: SessionSnapshot) -> Result<Self> {
        if snapshot.graph != graph.fingerprint() {
            return Err(GameError::StaleSession);
        }

        // The fingerprint does not protect against an edited or corrupted save
        let len: usize = graph.len();
        let puzzle: &Puzzle = &snapshot.puzzle;
        let puzzle_fits: bool = [puzzle.start, puzzle.target]
            .iter()
            .chain(puzzle.puzzle_path.get())
            .chain(puzzle.solution_path.iter().flatten())
            .all(|n| n.0 < len);
        if !puzzle_fits
            || snapshot.engine.target() != puzzle.target
            || !snapshot.engine.fits_graph(len)
        {
            warn!("The saved game refers to nodes outside of the word graph");
            return Err(GameError::StaleSession);
        }
        Ok(Self {
            graph,
            puzzle: snapshot.puzzle,
            engine: snapshot.engine,
        })
    }

    /// Serialize the session in JSON format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Restore a session from its JSON serialization.
    pub fn from_json(graph: Arc<WordGraph>, data: &str) -> Result<Self> {
        let snapshot: SessionSnapshot = serde_json::from_str(data)?;
        Self::restore(graph, snapshot)
    }
}
