/*
leaderboard.rs

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

//! Manage the leaderboard.
//!
//! The [`Leaderboard`] object keeps the best scores, lowest first.
//! A score is `time_seconds * (moves / optimal_distance)`: a fast player who finds the optimal
//! path gets the lowest score.
//! See the [`crate::saver::leaderboard`] module that saves and restores the [`Leaderboard`]
//! object.

use chrono::{DateTime, Local, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::LEADERBOARD_SIZE;
use crate::errors::{GameError, Result};

/// Object that represents a finished game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,

    /// How long it took to reach the target word.
    pub time_seconds: f64,

    /// Number of words the player went through.
    pub moves: u32,

    /// Distance between the start word and the target word.
    pub optimal_distance: u32,

    /// Computed score. Lower is better.
    pub score: f64,

    /// Completion timestamp (seconds since the epoch).
    pub when: i64,
}

impl LeaderboardEntry {
    /// Create a [`LeaderboardEntry`] object and compute its score.
    ///
    /// # Errors
    ///
    /// Return [`GameError::InvalidConfig`] if the time is negative or not a number, or if the
    /// optimal distance is zero.
    pub fn new(
        player_name: &str,
        time_seconds: f64,
        moves: u32,
        optimal_distance: u32,
    ) -> Result<Self> {
        if !time_seconds.is_finite() || time_seconds < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "invalid time '{time_seconds}'"
            )));
        }
        if optimal_distance == 0 {
            return Err(GameError::InvalidConfig(
                "optimal distance must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            player_name: player_name.trim().to_string(),
            time_seconds,
            moves,
            optimal_distance,
            score: time_seconds * (moves as f64 / optimal_distance as f64),
            when: Utc::now().timestamp(),
        })
    }

    /// Create the entry of a finished game, or return None if the game cannot be scored.
    ///
    /// A game without an optimal distance, or whose start word is the target word, has no
    /// score.
    ///
    /// # Errors
    ///
    /// Return [`GameError::InvalidConfig`] if the time is negative or not a number.
    pub fn for_game(
        player_name: &str,
        time_seconds: f64,
        moves: u32,
        optimal_distance: Option<usize>,
    ) -> Result<Option<Self>> {
        let optimal: u32 = match optimal_distance {
            None => {
                warn!("No optimal distance for this puzzle, the score is not recorded");
                return Ok(None);
            }
            Some(0) => {
                warn!("The start word is the target word, the score is not recorded");
                return Ok(None);
            }
            Some(steps) => u32::try_from(steps).unwrap_or(u32::MAX),
        };
        Self::new(player_name, time_seconds, moves, optimal).map(Some)
    }

    /// Return the completion date in the local time zone.
    pub fn when_local(&self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp(self.when, 0).map(|d| d.with_timezone(&Local))
    }
}

/// Sorted list of the top scores.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Leaderboard {
    /// Sorted list of the top scores.
    /// The number of scores in this list is controlled by the [`LEADERBOARD_SIZE`] constant.
    top: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create an empty [`Leaderboard`] object.
    pub fn new() -> Self {
        Self {
            top: Vec::with_capacity(LEADERBOARD_SIZE),
        }
    }

    /// Add an entry to the leaderboard and return its position, or None if the entry does not
    /// make it to the board.
    ///
    /// The returned position starts at 1 (top score). An entry with the same score as an
    /// existing one is ranked after it.
    pub fn add(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let position: usize = self.top.partition_point(|e| e.score <= entry.score);
        if position >= LEADERBOARD_SIZE {
            debug!(
                "Score {} of '{}' does not make it to the board",
                entry.score, entry.player_name
            );
            return None;
        }
        debug!(
            "Score {} of '{}' at position {}",
            entry.score,
            entry.player_name,
            position + 1
        );
        self.top.insert(position, entry);
        self.top.truncate(LEADERBOARD_SIZE);
        Some(position + 1)
    }

    /// Return the entries, best score first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.top
    }

    /// Return whether the leaderboard is empty.
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        let entry: LeaderboardEntry = LeaderboardEntry::new("ana", 60.0, 6, 3).unwrap();
        assert_eq!(entry.score, 120.0);
        let entry: LeaderboardEntry = LeaderboardEntry::new("bo", 45.0, 3, 3).unwrap();
        assert_eq!(entry.score, 45.0);
        assert!(entry.when_local().is_some());
    }

    #[test]
    fn test_invalid_entries() {
        assert!(matches!(
            LeaderboardEntry::new("ana", 60.0, 6, 0),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(LeaderboardEntry::new("ana", -1.0, 6, 3).is_err());
        assert!(LeaderboardEntry::new("ana", f64::NAN, 6, 3).is_err());
    }

    #[test]
    fn test_entry_for_game() {
        assert_eq!(LeaderboardEntry::for_game("ana", 60.0, 0, Some(0)), Ok(None));
        assert_eq!(LeaderboardEntry::for_game("ana", 60.0, 4, None), Ok(None));
        let entry: Option<LeaderboardEntry> =
            LeaderboardEntry::for_game("ana", 60.0, 6, Some(3)).unwrap();
        assert!(matches!(entry, Some(e) if e.score == 120.0 && e.optimal_distance == 3));
        assert!(matches!(
            LeaderboardEntry::for_game("ana", -1.0, 6, Some(3)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sorted_lowest_first() {
        let mut board: Leaderboard = Leaderboard::new();
        assert_eq!(board.add(LeaderboardEntry::new("a", 100.0, 4, 2).unwrap()), Some(1));
        assert_eq!(board.add(LeaderboardEntry::new("b", 10.0, 2, 2).unwrap()), Some(1));
        assert_eq!(board.add(LeaderboardEntry::new("c", 50.0, 2, 2).unwrap()), Some(2));
        assert_eq!(board.add(LeaderboardEntry::new("d", 50.0, 2, 2).unwrap()), Some(3));
        let names: Vec<&str> = board
            .entries()
            .iter()
            .map(|e| e.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_board_is_bounded() {
        let mut board: Leaderboard = Leaderboard::new();
        for i in 0..LEADERBOARD_SIZE {
            board.add(LeaderboardEntry::new("p", i as f64, 1, 1).unwrap());
        }
        assert_eq!(board.add(LeaderboardEntry::new("slow", 1000.0, 1, 1).unwrap()), None);
        assert_eq!(board.add(LeaderboardEntry::new("fast", 0.5, 1, 1).unwrap()), Some(2));
        assert_eq!(board.entries().len(), LEADERBOARD_SIZE);
        assert_eq!(board.entries()[1].player_name, "fast");
    }

    #[test]
    fn test_serialized_field_names() {
        let entry: LeaderboardEntry = LeaderboardEntry::new("ana", 60.0, 6, 3).unwrap();
        let json: String = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"playerName\":\"ana\""));
        assert!(json.contains("\"optimalDistance\":3"));
    }
}
