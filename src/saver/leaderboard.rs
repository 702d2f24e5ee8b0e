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

//! Save and restore the leaderboard.
//!
//! The saved object is a serialization of the [`Leaderboard`] object in JSON format by
//! using [`serde`].

use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::config::LEADERBOARD_FILE;
use crate::errors::Result;
use crate::leaderboard::Leaderboard;

/// Object to save and restore the leaderboard.
pub struct SaverLeaderboard {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverLeaderboard {
    /// Create a [`SaverLeaderboard`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the leaderboard must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(LEADERBOARD_FILE);
        debug!("Leaderboard file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`Leaderboard`] object from the leaderboard file.
    ///
    /// Return an empty [`Leaderboard`] object if the file does not exist.
    pub fn get_leaderboard(&self) -> Result<Leaderboard> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(Leaderboard::new()),
                _ => return Err(error.into()),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let leaderboard: Leaderboard = serde_json::from_reader(reader)?;
        Ok(leaderboard)
    }

    /// Save the provided [`Leaderboard`] object.
    pub fn save_leaderboard(&self, leaderboard: &Leaderboard) -> Result<()> {
        if let Some(dir) = self.save_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, leaderboard)?;
        writer.flush()?;
        Ok(())
    }
}
