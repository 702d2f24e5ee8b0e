/*
service.rs

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

//! Entry points for the request layer.
//!
//! The [`WordPathService`] object owns the shared word graph, the session store, and the random
//! source. Each call that touches a game loads the session from the store, runs the query, and
//! saves the session back so that the growth of the shortest-path cache is not lost.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::{GameError, Result};
use crate::game::{DistanceReport, GameSession, Neighbors, SimilarityReport};
use crate::generator::puzzles::Difficulty;
use crate::generator::word_graph::WordGraph;
use crate::saver::session::SessionStore;
use crate::similarity::SimilarityScorer;

/// Answer to a new game request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartReport {
    pub game_id: String,
    pub start_word: String,
    pub target_word: String,

    /// Number of steps between the start word and the target word, or None if the target
    /// cannot be reached.
    pub optimal_distance: Option<usize>,

    /// Words of the random walk that created the puzzle.
    pub puzzle_path: Vec<String>,
}

/// Answer to a quit request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuitReport {
    pub game_id: String,
    pub target_word: String,

    /// Path from the target word to the start word, if one was found.
    pub solution_path: Option<Vec<String>>,
}

/// Game service.
pub struct WordPathService<S: SessionStore, R: Rng> {
    graph: Arc<WordGraph>,
    store: S,

    /// Lifetime of the saved sessions.
    ttl: Duration,
    rng: R,
}

impl<S: SessionStore, R: Rng> WordPathService<S, R> {
    /// Create a [`WordPathService`] object.
    pub fn new(graph: Arc<WordGraph>, store: S, ttl: Duration, rng: R) -> Self {
        Self {
            graph,
            store,
            ttl,
            rng,
        }
    }

    /// Return the word graph.
    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    /// Return the session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&mut self, game_id: &str) -> Result<GameSession> {
        let data: String = self
            .store
            .get(game_id)?
            .ok_or_else(|| GameError::UnknownSession(game_id.to_string()))?;
        debug!("Session {game_id} loaded ({} bytes)", data.len());
        GameSession::from_json(self.graph.clone(), &data)
    }

    fn save(&mut self, game_id: &str, session: &GameSession) -> Result<()> {
        let data: String = session.to_json()?;
        debug!("Session {game_id} saved ({} bytes)", data.len());
        self.store.put(game_id, &data, self.ttl)
    }

    /// Generate a puzzle and save the new game.
    ///
    /// The difficulty defaults to [`crate::config::DEFAULT_DIFFICULTY`].
    ///
    /// # Errors
    ///
    /// Return [`GameError::InvalidConfig`] if the difficulty is not a positive integer, and
    /// [`GameError::EmptyGraph`] if the graph has no nodes.
    pub fn start(&mut self, difficulty: Option<&str>) -> Result<StartReport> {
        let difficulty: Difficulty = Difficulty::from_option(difficulty)?;
        let session: GameSession = GameSession::new(self.graph.clone(), difficulty, &mut self.rng)?;
        let game_id: String = Uuid::new_v4().to_string();
        self.save(&game_id, &session)?;
        info!("Game {game_id} started with difficulty {difficulty}");

        Ok(StartReport {
            game_id,
            start_word: session.start_word().to_string(),
            target_word: session.target_word().to_string(),
            optimal_distance: session.optimal_distance().steps(),
            puzzle_path: session.puzzle_path_words(),
        })
    }

    /// Return the neighbor words of the word.
    pub fn next(&mut self, game_id: &str, word: &str) -> Result<Neighbors> {
        let session: GameSession = self.load(game_id)?;
        session.neighbors(word)
    }

    /// Return the distance between the word and the target word of the game.
    pub fn dist(&mut self, game_id: &str, word: &str) -> Result<DistanceReport> {
        let mut session: GameSession = self.load(game_id)?;
        let report: DistanceReport = session.distance(word)?;
        self.save(game_id, &session)?;
        Ok(report)
    }

    /// Return the similarity between the word and the target word of the game.
    pub fn similarity(
        &mut self,
        game_id: &str,
        word: &str,
        scorer: &dyn SimilarityScorer,
    ) -> Result<SimilarityReport> {
        let session: GameSession = self.load(game_id)?;
        session.similarity(word, scorer)
    }

    /// End the game and delete it from the store.
    pub fn quit(&mut self, game_id: &str) -> Result<QuitReport> {
        let session: GameSession = self.load(game_id)?;
        self.store.delete(game_id)?;
        info!("Game {game_id} ended");
        Ok(QuitReport {
            game_id: game_id.to_string(),
            target_word: session.target_word().to_string(),
            solution_path: session.solution_path_words(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::word_graph::{NodeId, RelationPolicy};
    use crate::saver::session::MemorySessionStore;
    use crate::similarity::EmbeddingTable;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WORDS: &str = r#"{
        "hot": {"synonyms": ["warm", "spicy"], "antonyms": ["cold"]},
        "warm": {"synonyms": ["mild"], "antonyms": ["cool"], "related": ["sun"]},
        "cold": {"synonyms": ["cool", "chilly"], "antonyms": ["hot"], "related": ["ice"]},
        "cool": {"synonyms": ["chilly"], "antonyms": ["warm"], "related": ["calm"]},
        "ice": {"related": ["water", "winter"]},
        "sun": {"related": ["day", "summer"]},
        "summer": {"antonyms": ["winter"], "related": ["hot"]},
        "winter": {"antonyms": ["summer"], "related": ["cold", "snow"]}
    }"#;

    fn service(seed: u64) -> WordPathService<MemorySessionStore, StdRng> {
        let graph: WordGraph = WordGraph::from_json_str(WORDS, RelationPolicy::Directed).unwrap();
        WordPathService::new(
            Arc::new(graph),
            MemorySessionStore::new(),
            Duration::from_secs(3600),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_start() {
        let mut service = service(3);
        let report: StartReport = service.start(Some("2")).unwrap();
        assert!(Uuid::parse_str(&report.game_id).is_ok());
        assert_eq!(report.puzzle_path.first(), Some(&report.start_word));
        assert_eq!(report.puzzle_path.last(), Some(&report.target_word));
        assert_eq!(service.store().len(), 1);

        let json: String = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"gameId\""));
        assert!(json.contains("\"optimalDistance\""));
    }

    #[test]
    fn test_start_invalid_difficulty() {
        let mut service = service(3);
        for difficulty in ["0", "-1", "hard", ""] {
            assert!(matches!(
                service.start(Some(difficulty)),
                Err(GameError::InvalidConfig(_))
            ));
        }
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_dist_target_is_zero() {
        let mut service = service(5);
        let report: StartReport = service.start(None).unwrap();
        let dist: DistanceReport = service.dist(&report.game_id, &report.target_word).unwrap();
        assert_eq!(dist.distance, Some(0));
        assert!(dist.reachable);

        let dist: DistanceReport = service.dist(&report.game_id, &report.start_word).unwrap();
        assert_eq!(dist.distance, report.optimal_distance);
    }

    #[test]
    fn test_dist_persists_search() {
        let mut service = service(8);
        let report: StartReport = service.start(Some("1")).unwrap();
        let snow: NodeId = service.graph().require("snow").unwrap();
        service.dist(&report.game_id, "snow").unwrap();
        let data: String = service.store.get(&report.game_id).unwrap().unwrap();
        let restored: GameSession = GameSession::from_json(service.graph.clone(), &data).unwrap();
        assert!(restored.engine().cached_distance(snow).is_some());
    }

    #[test]
    fn test_next() {
        let mut service = service(1);
        let report: StartReport = service.start(None).unwrap();
        let neighbors: Neighbors = service.next(&report.game_id, "HOT").unwrap();
        assert_eq!(neighbors.current_word, "hot");
        assert_eq!(neighbors.synonyms, vec!["spicy", "warm"]);
        assert_eq!(neighbors.antonyms, vec!["cold"]);
        assert!(neighbors.related.is_empty());
        assert!(matches!(
            service.next(&report.game_id, "lava"),
            Err(GameError::UnknownWord(_))
        ));
    }

    #[test]
    fn test_unknown_game() {
        let mut service = service(1);
        assert_eq!(
            service.next("missing", "hot"),
            Err(GameError::UnknownSession("missing".to_string()))
        );
        assert!(matches!(
            service.dist("missing", "hot"),
            Err(GameError::UnknownSession(_))
        ));
        assert!(matches!(service.quit("missing"), Err(GameError::UnknownSession(_))));
    }

    #[test]
    fn test_similarity() {
        let mut service = service(2);
        let report: StartReport = service.start(None).unwrap();
        let data: String = format!(
            r#"{{"{}": [1.0, 0.0], "{}": [1.0, 0.0]}}"#,
            report.start_word, report.target_word
        );
        let table: EmbeddingTable = EmbeddingTable::from_json_str(&data).unwrap();
        let similarity: SimilarityReport = service
            .similarity(&report.game_id, &report.start_word, &table)
            .unwrap();
        assert!((similarity.similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quit() {
        let mut service = service(4);
        let report: StartReport = service.start(None).unwrap();
        let quit: QuitReport = service.quit(&report.game_id).unwrap();
        assert_eq!(quit.target_word, report.target_word);
        if let Some(path) = quit.solution_path {
            assert_eq!(path.first(), Some(&report.target_word));
            assert_eq!(path.last(), Some(&report.start_word));
        }
        assert!(service.store().is_empty());
        assert!(matches!(
            service.dist(&report.game_id, "hot"),
            Err(GameError::UnknownSession(_))
        ));
    }

    #[test]
    fn test_empty_graph() {
        let mut service = WordPathService::new(
            Arc::new(WordGraph::new(RelationPolicy::Directed)),
            MemorySessionStore::new(),
            Duration::from_secs(60),
            StdRng::seed_from_u64(0),
        );
        assert_eq!(service.start(None), Err(GameError::EmptyGraph));
    }
}
