/*
random_walk.rs

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

//! Generate a random walk in the word graph.
//!
//! The walk moves from the current word to a random unvisited neighbor (synonyms, antonyms, and
//! related words together). When the current word has no unvisited neighbor, the walk backtracks
//! to the previous word of the path. Backtracked words stay visited, so the walk never comes back
//! to them and the resulting path never contains the same word twice.

use log::debug;
use rand::Rng;
use std::collections::HashSet;

use super::path::WalkPath;
use super::word_graph::{NodeId, WordGraph};

/// Result of a random walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    /// Node where the walk stopped. This is the last node of [`Walk::path`].
    pub end: NodeId,

    /// Path from the starting node to [`Walk::end`], without the backtracked nodes.
    pub path: WalkPath,
}

/// [`RandomWalk`] object.
pub struct RandomWalk<'g> {
    /// Graph to walk in.
    graph: &'g WordGraph,

    /// Number of forward moves of the last walk.
    pub moves: usize,

    /// Number of backtracks of the last walk.
    pub backtracks: usize,
}

impl<'g> RandomWalk<'g> {
    /// Create the object.
    pub fn new(graph: &'g WordGraph) -> Self {
        Self {
            graph,
            moves: 0,
            backtracks: 0,
        }
    }

    /// Walk from `start` until `step_budget` forward moves are done, or until backtracking
    /// brings the walk back to `start` with no unvisited neighbor left.
    ///
    /// With a `step_budget` of zero, the walk is `[start]`.
    pub fn walk<R: Rng + ?Sized>(&mut self, start: NodeId, step_budget: usize, rng: &mut R) -> Walk {
        self.moves = 0;
        self.backtracks = 0;

        let mut path: WalkPath = WalkPath::new(start);
        let mut visited: HashSet<NodeId> = HashSet::from([start]);
        let mut current: NodeId = start;

        while self.moves < step_budget {
            let candidates: Vec<NodeId> = self
                .graph
                .all_neighbors(current)
                .into_iter()
                .filter(|n| !visited.contains(n))
                .collect();

            if candidates.is_empty() {
                if path.len() <= 1 {
                    debug!("    Dead end at the starting word '{}'", self.graph.word(start));
                    break;
                }
                path.pop();
                self.backtracks += 1;
                match path.last() {
                    Some(n) => current = n,
                    None => break,
                }
                debug!("    Back to '{}'", self.graph.word(current));
                continue;
            }

            let next: NodeId = candidates[rng.random_range(0..candidates.len())];
            path.push(next);
            visited.insert(next);
            current = next;
            self.moves += 1;
        }

        Walk { end: current, path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::word_graph::{RelationKind, RelationPolicy};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn star_graph() -> WordGraph {
        // "hub" leads to three leaves; "a" continues to "a2"
        let mut graph: WordGraph = WordGraph::new(RelationPolicy::Directed);
        graph.add_edge("hub", RelationKind::Synonyms, "a").unwrap();
        graph.add_edge("hub", RelationKind::Antonyms, "b").unwrap();
        graph.add_edge("hub", RelationKind::Related, "c").unwrap();
        graph.add_edge("a", RelationKind::Related, "a2").unwrap();
        graph
    }

    fn assert_simple(path: &WalkPath) {
        let unique: HashSet<NodeId> = path.get().iter().copied().collect();
        assert_eq!(unique.len(), path.len(), "repeated node in {:?}", path.get());
    }

    #[test]
    fn test_zero_budget() {
        let graph: WordGraph = star_graph();
        let hub: NodeId = graph.lookup("hub").unwrap();
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let walk: Walk = RandomWalk::new(&graph).walk(hub, 0, &mut rng);
        assert_eq!(walk.end, hub);
        assert_eq!(walk.path.get(), &[hub]);
    }

    #[test]
    fn test_isolated_start() {
        let graph: WordGraph = star_graph();
        let b: NodeId = graph.lookup("b").unwrap();
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let walk: Walk = RandomWalk::new(&graph).walk(b, 10, &mut rng);
        assert_eq!(walk.path.get(), &[b]);
        assert_eq!(walk.end, b);
    }

    #[test]
    fn test_walk_is_simple_and_connected() {
        let graph: WordGraph = star_graph();
        let hub: NodeId = graph.lookup("hub").unwrap();
        for seed in 0..50 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let mut walker: RandomWalk = RandomWalk::new(&graph);
            let walk: Walk = walker.walk(hub, 10, &mut rng);
            assert_simple(&walk.path);
            assert_eq!(walk.path.first(), Some(hub));
            assert_eq!(walk.path.last(), Some(walk.end));
            for pair in walk.path.get().windows(2) {
                assert!(graph.all_neighbors(pair[0]).contains(&pair[1]));
            }
            // Every word is eventually visited: a, a2, b, c
            assert_eq!(walker.moves, 4);
        }
    }

    #[test]
    fn test_budget_limits_moves() {
        let graph: WordGraph = star_graph();
        let hub: NodeId = graph.lookup("hub").unwrap();
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        let mut walker: RandomWalk = RandomWalk::new(&graph);
        let walk: Walk = walker.walk(hub, 1, &mut rng);
        assert_eq!(walker.moves, 1);
        assert_eq!(walk.path.len(), 2);
        assert_eq!(walker.backtracks, 0);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let graph: WordGraph = star_graph();
        let hub: NodeId = graph.lookup("hub").unwrap();
        let w1: Walk = RandomWalk::new(&graph).walk(hub, 3, &mut StdRng::seed_from_u64(42));
        let w2: Walk = RandomWalk::new(&graph).walk(hub, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(w1, w2);
    }
}
