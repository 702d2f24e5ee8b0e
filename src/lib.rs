/*
lib.rs

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

//! Word navigation puzzle engine.
//!
//! Words are nodes of a graph, and their synonyms, antonyms, and related words are the edges.
//! A puzzle is a start word and a target word connected by a random walk. The player moves from
//! word to word, and the engine tells how far each word is from the target.
//!
//! The main pieces are:
//!
//! * [`generator::word_graph::WordGraph`], the shared, read-only word graph.
//! * [`generator::puzzles::PuzzleGenerator`], which picks puzzles with random walks.
//! * [`shortest_path::ShortestPathEngine`], a resumable breadth-first search seeded at the
//!   target word.
//! * [`game::GameSession`], a game in progress, saved between requests through a
//!   [`saver::session::SessionStore`].
//! * [`service::WordPathService`], the entry points for the request layer.

pub mod config;
pub mod errors;
pub mod game;
pub mod generator;
pub mod leaderboard;
pub mod player_moves;
pub mod saver;
pub mod service;
pub mod shortest_path;
pub mod similarity;
