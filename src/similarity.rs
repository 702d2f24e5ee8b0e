/*
similarity.rs

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

//! Semantic similarity between two words.
//!
//! The similarity is a hint for the player and never changes the distances. Vectors come from
//! an external text embedding model and are provided as a JSON table:
//!
//! ```json
//! {"bright": [0.12, -0.4, 0.33], "dull": [0.08, -0.1, 0.5]}
//! ```

use log::info;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use crate::errors::{GameError, Result};

/// Compute the closeness of two words.
pub trait SimilarityScorer {
    /// Return a cosine-like similarity between `a` and `b`, from -1 to 1.
    fn score(&self, a: &str, b: &str) -> Result<f32>;
}

/// Word vectors loaded from a file.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingTable {
    /// Build the table from JSON data.
    ///
    /// # Errors
    ///
    /// Return [`GameError::DataFormat`] if the data is not a `word -> [numbers]` mapping, or if
    /// the vectors do not all have the same dimension.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<f32>> =
            serde_json::from_str(data).map_err(|e| GameError::DataFormat(e.to_string()))?;
        Self::build(raw)
    }

    /// Build the table from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let file: File = File::open(path)
            .map_err(|e| GameError::DataFormat(format!("{}: {e}", path.display())))?;
        let raw: HashMap<String, Vec<f32>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| GameError::DataFormat(e.to_string()))?;
        Self::build(raw)
    }

    fn build(raw: HashMap<String, Vec<f32>>) -> Result<Self> {
        let mut dimension: Option<usize> = None;
        let mut vectors: HashMap<String, Vec<f32>> = HashMap::with_capacity(raw.len());

        for (word, vector) in raw {
            match dimension {
                Some(d) if d != vector.len() => {
                    return Err(GameError::DataFormat(format!(
                        "vector for '{word}' has {} dimensions instead of {d}",
                        vector.len()
                    )));
                }
                None => dimension = Some(vector.len()),
                _ => (),
            }
            vectors.insert(word.trim().to_lowercase(), vector);
        }
        info!(
            "Embedding table loaded: {} words, {} dimensions",
            vectors.len(),
            dimension.unwrap_or(0)
        );
        Ok(Self { vectors })
    }

    /// Return the number of words in the table.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn vector(&self, word: &str) -> Result<&[f32]> {
        self.vectors
            .get(&word.trim().to_lowercase())
            .map(Vec::as_slice)
            .ok_or_else(|| GameError::UnknownWord(word.to_string()))
    }
}

/// Cosine similarity. A zero vector is not similar to anything.
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl SimilarityScorer for EmbeddingTable {
    fn score(&self, a: &str, b: &str) -> Result<f32> {
        Ok(cosine(self.vector(a)?, self.vector(b)?))
    }
}
