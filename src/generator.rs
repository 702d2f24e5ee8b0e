/*
generator.rs

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

//! Build the word graph and generate random puzzles.
//!
//! The [`word_graph::WordGraph`] object stores the words and their relations (synonyms,
//! antonyms, and related words). It is built once from the relation data and never changes
//! afterward.
//!
//! To play, a puzzle must be generated. A [`puzzles::PuzzleGenerator`] object picks random
//! starting words and performs random walks by using a [`random_walk::RandomWalk`] object.
//! The longest walk becomes the puzzle: its first word is the start word and its last word is
//! the target word. The walk itself, a [`path::WalkPath`] object, is kept as the puzzle path.
//!
//! The optimal distance between the two words is computed later by the
//! [`crate::shortest_path::ShortestPathEngine`].

pub mod path;
pub mod puzzles;
pub mod random_walk;
pub mod word_graph;
