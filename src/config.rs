/*
config.rs

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

//! Default values and runtime settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::generator::word_graph::RelationPolicy;

/// Difficulty used when the caller does not provide one.
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Lifetime of a saved game, in seconds.
pub const SESSION_TTL_SECS: u64 = 3600;

/// Number of entries kept in the leaderboard.
pub const LEADERBOARD_SIZE: usize = 50;

/// Name of the leaderboard file in the data directory.
pub const LEADERBOARD_FILE: &str = "leaderboard.json";

/// Copyright notice displayed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 The Wordpath Authors\nLicense GPL-3.0-or-later"
);

/// Runtime settings, collected from the command line and the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Relation data file.
    pub words: PathBuf,

    /// Directory for saved games and the leaderboard.
    pub data_dir: PathBuf,

    /// Lifetime of the saved games.
    pub ttl: Duration,

    /// How the relations are inserted in the graph.
    pub policy: RelationPolicy,

    /// Seed for the random source. None seeds from the operating system.
    pub seed: Option<u64>,
}

impl Settings {
    /// Create a [`Settings`] object with the default TTL and policy.
    pub fn new(words: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            words,
            data_dir,
            ttl: Duration::from_secs(SESSION_TTL_SECS),
            policy: RelationPolicy::default(),
            seed: None,
        }
    }
}
