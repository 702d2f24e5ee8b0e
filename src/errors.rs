/*
errors.rs

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

//! Errors raised by the puzzle engine and by the persistence boundary.
//!
//! Reaching a word that has no path to the target is not an error: see
//! [`crate::shortest_path::Distance::Unreachable`].

use std::error::Error;
use std::fmt;

/// Coarse classification of a [`GameError`], used by callers to pick a response status.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The process cannot serve (malformed startup data).
    Fatal,

    /// A word or session does not exist.
    NotFound,

    /// The caller provided an invalid parameter.
    Rejected,

    /// The session store failed.
    Unavailable,
}

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The relation data or the vector table cannot be parsed.
    DataFormat(String),

    /// The word is not in the graph.
    UnknownWord(String),

    /// Non-positive or non-numeric difficulty or step parameter.
    InvalidConfig(String),

    /// A puzzle cannot be generated from a graph without nodes.
    EmptyGraph,

    /// The session id is not in the store, or the session expired.
    UnknownSession(String),

    /// The saved session was built from another word graph.
    StaleSession,

    /// The session store cannot be reached, read, or written.
    StoreUnavailable(String),
}

impl GameError {
    /// Return the [`ErrorKind`] of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::DataFormat(_) => ErrorKind::Fatal,
            GameError::UnknownWord(_) | GameError::UnknownSession(_) => ErrorKind::NotFound,
            GameError::InvalidConfig(_) | GameError::EmptyGraph | GameError::StaleSession => {
                ErrorKind::Rejected
            }
            GameError::StoreUnavailable(_) => ErrorKind::Unavailable,
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::DataFormat(msg) => write!(f, "Malformed relation data: {msg}"),
            GameError::UnknownWord(w) => write!(f, "Unknown word '{w}'"),
            GameError::InvalidConfig(msg) => write!(f, "Invalid parameter: {msg}"),
            GameError::EmptyGraph => write!(f, "The word graph has no nodes"),
            GameError::UnknownSession(id) => write!(f, "Unknown or expired game id '{id}'"),
            GameError::StaleSession => {
                write!(f, "The saved game does not match the loaded word graph")
            }
            GameError::StoreUnavailable(msg) => write!(f, "Session store unavailable: {msg}"),
        }
    }
}

impl Error for GameError {}

impl From<std::io::Error> for GameError {
    fn from(error: std::io::Error) -> Self {
        GameError::StoreUnavailable(error.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(error: serde_json::Error) -> Self {
        GameError::StoreUnavailable(error.to_string())
    }
}

/// Result type of the crate.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            GameError::DataFormat("x".to_string()).kind(),
            ErrorKind::Fatal
        );
        assert_eq!(
            GameError::UnknownWord("x".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            GameError::InvalidConfig("x".to_string()).kind(),
            ErrorKind::Rejected
        );
        assert_eq!(
            GameError::StoreUnavailable("down".to_string()).kind(),
            ErrorKind::Unavailable
        );
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GameError = io.into();
        assert!(matches!(err, GameError::StoreUnavailable(_)));
        assert_eq!(err.to_string(), "Session store unavailable: denied");
    }
}
