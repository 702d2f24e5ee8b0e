/*
puzzles.rs

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

//! Puzzle internal representation and generation.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::path::WalkPath;
use super::random_walk::{RandomWalk, Walk};
use super::word_graph::{NodeId, WordGraph};
use crate::config::DEFAULT_DIFFICULTY;
use crate::errors::{GameError, Result};
use crate::shortest_path::Distance;

/// Puzzle difficulty level.
///
/// The difficulty is a positive integer that controls the length of the random walk, the
/// minimum length of the puzzle path, and the number of attempts to find such a path.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct Difficulty(u32);

impl Difficulty {
    /// Create a [`Difficulty`] object.
    ///
    /// # Errors
    ///
    /// Return [`GameError::InvalidConfig`] if the level is zero.
    pub fn new(level: u32) -> Result<Self> {
        if level == 0 {
            return Err(GameError::InvalidConfig(
                "difficulty must be a positive integer".to_string(),
            ));
        }
        Ok(Self(level))
    }

    /// Parse an optional difficulty provided by a caller. None gives the default difficulty.
    pub fn from_option(value: Option<&str>) -> Result<Self> {
        match value {
            Some(v) => v.parse(),
            None => Ok(Self::default()),
        }
    }

    /// Return the difficulty level.
    pub fn level(&self) -> u32 {
        self.0
    }

    /// Derive the generation parameters from the difficulty.
    pub fn config(&self) -> PuzzleConfig {
        let d: usize = self.0 as usize;
        PuzzleConfig {
            walk_steps: 5 * d,
            min_path_length: d,
            max_attempts: 5 * d,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY)
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let level: u32 = s.trim().parse().map_err(|_| {
            GameError::InvalidConfig(format!("difficulty '{s}' is not a positive integer"))
        })?;
        Self::new(level)
    }
}

impl TryFrom<u32> for Difficulty {
    type Error = GameError;

    fn try_from(level: u32) -> Result<Self> {
        Self::new(level)
    }
}

impl From<Difficulty> for u32 {
    fn from(difficulty: Difficulty) -> u32 {
        difficulty.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters of the puzzle generation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PuzzleConfig {
    /// Maximum number of forward moves of each random walk.
    pub walk_steps: usize,

    /// Number of words the puzzle path must have to stop retrying.
    pub min_path_length: usize,

    /// Maximum number of random walks.
    pub max_attempts: usize,
}

impl PuzzleConfig {
    /// Create a [`PuzzleConfig`] object.
    ///
    /// # Errors
    ///
    /// Return [`GameError::InvalidConfig`] if a parameter is zero.
    pub fn new(walk_steps: usize, min_path_length: usize, max_attempts: usize) -> Result<Self> {
        for (name, value) in [
            ("walk steps", walk_steps),
            ("minimum path length", min_path_length),
            ("maximum attempts", max_attempts),
        ] {
            if value == 0 {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be a positive integer"
                )));
            }
        }
        Ok(Self {
            walk_steps,
            min_path_length,
            max_attempts,
        })
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// Puzzle: a start word, a target word, and how they were connected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Word the player starts from.
    pub start: NodeId,

    /// Word the player must reach.
    pub target: NodeId,

    /// Path traced by the random walk, from [`Puzzle::start`] to [`Puzzle::target`].
    pub puzzle_path: WalkPath,

    /// Path found by the shortest-path engine, from [`Puzzle::target`] to [`Puzzle::start`].
    pub solution_path: Option<Vec<NodeId>>,

    /// Number of steps of [`Puzzle::solution_path`].
    pub optimal_distance: Distance,
}

impl Puzzle {
    /// Create a [`Puzzle`] object from a random walk. The solution is not known yet.
    pub fn from_walk(walk: Walk) -> Self {
        Self {
            start: walk.path.first().unwrap_or(walk.end),
            target: walk.end,
            puzzle_path: walk.path,
            solution_path: None,
            optimal_distance: Distance::Unreachable,
        }
    }
}

/// [`PuzzleGenerator`] object.
pub struct PuzzleGenerator<'g> {
    /// Graph to pick the words from.
    graph: &'g WordGraph,

    /// Number of random walks performed by the last generation.
    pub attempts: usize,

    /// Path length of each random walk of the last generation.
    pub lengths: Vec<usize>,
}

impl<'g> PuzzleGenerator<'g> {
    /// Create the object.
    pub fn new(graph: &'g WordGraph) -> Self {
        Self {
            graph,
            attempts: 0,
            lengths: Vec::new(),
        }
    }

    /// Perform random walks from random words and return the longest one.
    ///
    /// The generation stops at the first walk with at least
    /// [`PuzzleConfig::min_path_length`] words, or after [`PuzzleConfig::max_attempts`] walks.
    /// In that last case, the longest walk is returned even if it is too short.
    ///
    /// # Errors
    ///
    /// Return [`GameError::EmptyGraph`] if the graph has no nodes.
    pub fn generate<R: Rng + ?Sized>(&mut self, config: &PuzzleConfig, rng: &mut R) -> Result<Walk> {
        if self.graph.is_empty() {
            return Err(GameError::EmptyGraph);
        }

        self.attempts = 0;
        self.lengths.clear();
        let mut walker: RandomWalk = RandomWalk::new(self.graph);
        let mut best: Option<Walk> = None;

        while self.attempts < config.max_attempts.max(1) {
            self.attempts += 1;
            let start: NodeId = NodeId(rng.random_range(0..self.graph.len()));
            let walk: Walk = walker.walk(start, config.walk_steps, rng);
            let len: usize = walk.path.len();
            self.lengths.push(len);
            debug!(
                "Attempt {}: '{}' -> '{}' ({len} words, {} backtracks)",
                self.attempts,
                self.graph.word(start),
                self.graph.word(walk.end),
                walker.backtracks
            );

            let longer: bool = match &best {
                Some(b) => len > b.path.len(),
                None => true,
            };
            if longer {
                best = Some(walk);
            }
            if len >= config.min_path_length {
                break;
            }
        }

        let walk: Walk = best.ok_or(GameError::EmptyGraph)?;
        info!(
            "Puzzle '{}' -> '{}' with {} words after {} attempts",
            self.graph.word(walk.path.first().unwrap_or(walk.end)),
            self.graph.word(walk.end),
            walk.path.len(),
            self.attempts
        );
        Ok(walk)
    }
}
