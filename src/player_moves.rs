/*
player_moves.rs

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

//! Track the words that the player went through.
//!
//! Moving to a neighbor word and going back to the previous word both count as one action.
//! The number of actions is the `moves` value of a [`crate::leaderboard::LeaderboardEntry`].

use log::debug;

use crate::errors::Result;
use crate::generator::word_graph::{NodeId, WordGraph};

/// Words visited by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMoves {
    start: NodeId,

    /// Words from the start word to the current word. Going back removes the last word.
    taken: Vec<NodeId>,

    /// Number of actions (moves and backs).
    actions: u32,
}

impl PlayerMoves {
    /// Create a [`PlayerMoves`] object at the start word.
    pub fn new(start: NodeId) -> Self {
        Self {
            start,
            taken: vec![start],
            actions: 0,
        }
    }

    /// Return the current word.
    pub fn current(&self) -> NodeId {
        self.taken.last().copied().unwrap_or(self.start)
    }

    /// Return the number of actions.
    pub fn actions(&self) -> u32 {
        self.actions
    }

    /// Return the words from the start word to the current word.
    pub fn taken(&self) -> &[NodeId] {
        &self.taken
    }

    /// Move to a neighbor of the current word.
    ///
    /// Return false, and do not count an action, if the word is not a neighbor of the current
    /// word.
    ///
    /// # Errors
    ///
    /// Return [`crate::errors::GameError::UnknownWord`] if the word is not in the graph.
    pub fn move_to(&mut self, graph: &WordGraph, word: &str) -> Result<bool> {
        let id: NodeId = graph.require(word)?;
        if !graph.all_neighbors(self.current()).contains(&id) {
            debug!(
                "'{}' is not a neighbor of '{}'",
                graph.word(id),
                graph.word(self.current())
            );
            return Ok(false);
        }
        self.taken.push(id);
        self.actions += 1;
        Ok(true)
    }

    /// Go back to the previous word. Return false if the player is at the start word.
    pub fn back(&mut self) -> bool {
        if self.taken.len() < 2 {
            return false;
        }
        self.taken.pop();
        self.actions += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GameError;
    use crate::generator::word_graph::RelationPolicy;

    const WORDS: &str = r#"{
        "hot": {"synonyms": ["warm"], "antonyms": ["cold"]},
        "warm": {"related": ["sun"]},
        "cold": {"related": ["ice"]}
    }"#;

    #[test]
    fn test_moves_and_backs() {
        let graph: WordGraph = WordGraph::from_json_str(WORDS, RelationPolicy::Directed).unwrap();
        let mut moves: PlayerMoves = PlayerMoves::new(graph.require("hot").unwrap());
        assert!(!moves.back());
        assert_eq!(moves.actions(), 0);

        assert!(moves.move_to(&graph, "Warm").unwrap());
        assert!(moves.move_to(&graph, "sun").unwrap());
        assert!(moves.back());
        assert_eq!(graph.word(moves.current()), "warm");
        assert_eq!(moves.actions(), 3);
        assert_eq!(graph.words(moves.taken()), vec!["hot", "warm"]);
    }

    #[test]
    fn test_invalid_moves() {
        let graph: WordGraph = WordGraph::from_json_str(WORDS, RelationPolicy::Directed).unwrap();
        let mut moves: PlayerMoves = PlayerMoves::new(graph.require("hot").unwrap());
        // "ice" is in the graph but is not a neighbor of "hot"
        assert!(!moves.move_to(&graph, "ice").unwrap());
        assert!(matches!(
            moves.move_to(&graph, "lava"),
            Err(GameError::UnknownWord(_))
        ));
        assert_eq!(moves.actions(), 0);
        assert_eq!(graph.word(moves.current()), "hot");
    }

    #[test]
    fn test_back_stops_at_start() {
        let graph: WordGraph = WordGraph::from_json_str(WORDS, RelationPolicy::Directed).unwrap();
        let hot: NodeId = graph.require("hot").unwrap();
        let mut moves: PlayerMoves = PlayerMoves::new(hot);
        assert!(moves.move_to(&graph, "cold").unwrap());
        assert!(moves.back());
        for _ in 0..3 {
            assert!(!moves.back());
            assert_eq!(moves.current(), hot);
        }
        assert_eq!(moves.taken(), &[hot]);
        assert_eq!(moves.actions(), 2);
    }
}
