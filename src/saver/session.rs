/*
session.rs

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

//! Save and restore games in progress between requests.
//!
//! A [`SessionStore`] keeps serialized [`crate::game::GameSession`] objects under a game ID for
//! a limited time. The store is created when the program starts, passed to the service that
//! uses it, and dropped when the program stops.
//!
//! Two implementations are provided:
//!
//! * [`MemorySessionStore`] keeps the sessions in memory.
//! * [`FileSessionStore`] keeps one JSON file per session in a directory.

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{GameError, Result};

/// Storage for serialized sessions with expiry.
pub trait SessionStore {
    /// Store the serialized session. It expires after `ttl`.
    fn put(&mut self, id: &str, session: &str, ttl: Duration) -> Result<()>;

    /// Return the serialized session, or None if it does not exist or expired.
    fn get(&mut self, id: &str) -> Result<Option<String>>;

    /// Delete the session. Deleting a missing session is not an error.
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// Current time in milliseconds since the epoch.
fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Expiry time in milliseconds since the epoch.
fn expiry(ttl: Duration) -> i64 {
    now_millis().saturating_add(i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX))
}

/// Stored session and its expiry time.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Envelope {
    /// Milliseconds since the epoch.
    expires_at: i64,
    session: String,
}

impl Envelope {
    fn is_expired(&self) -> bool {
        now_millis() >= self.expires_at
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: HashMap<String, Envelope>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the expired sessions and return how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let before: usize = self.sessions.len();
        self.sessions.retain(|_, e| !e.is_expired());
        let purged: usize = before - self.sessions.len();
        if purged > 0 {
            debug!("Purged {purged} expired sessions");
        }
        purged
    }

    /// Number of stored sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn put(&mut self, id: &str, session: &str, ttl: Duration) -> Result<()> {
        self.sessions.insert(
            id.to_string(),
            Envelope {
                expires_at: expiry(ttl),
                session: session.to_string(),
            },
        );
        Ok(())
    }

    fn get(&mut self, id: &str) -> Result<Option<String>> {
        match self.sessions.get(id) {
            Some(e) if e.is_expired() => {
                debug!("Session {id} expired");
                self.sessions.remove(id);
                Ok(None)
            }
            Some(e) => Ok(Some(e.session.clone())),
            None => Ok(None),
        }
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }
}

/// Session store that keeps one `<id>.json` file per session.
pub struct FileSessionStore {
    /// Directory of the session files.
    dir: PathBuf,
}

impl FileSessionStore {
    /// Create a [`FileSessionStore`] object.
    ///
    /// The provided [`PathBuf`] is the directory where the sessions must be saved. It is created
    /// on the first save.
    pub fn new(dir: PathBuf) -> Self {
        debug!("Session directory: {dir:?}");
        Self { dir }
    }

    /// Return the path of the session file.
    ///
    /// Game IDs are generated by the service, but they come back from the callers. Only
    /// alphanumeric characters and dashes are accepted so that an ID cannot escape the
    /// directory.
    fn session_file(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(GameError::UnknownSession(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Remove the expired session files and return how many were removed.
    pub fn purge_expired(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(0),
            Err(error) => return Err(error.into()),
        };
        let mut purged: usize = 0;
        for entry in entries {
            let path: PathBuf = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            // Other JSON files, such as the leaderboard, can share the directory
            let expired: bool = match File::open(&path)
                .ok()
                .and_then(|f| serde_json::from_reader::<_, Envelope>(BufReader::new(f)).ok())
            {
                Some(envelope) => envelope.is_expired(),
                None => continue,
            };
            if expired && remove_file(&path).is_ok() {
                purged += 1;
            }
        }
        if purged > 0 {
            debug!("Purged {purged} expired session files");
        }
        Ok(purged)
    }
}

impl SessionStore for FileSessionStore {
    fn put(&mut self, id: &str, session: &str, ttl: Duration) -> Result<()> {
        let path: PathBuf = self.session_file(id)?;
        fs::create_dir_all(&self.dir)?;

        // Readers never see a partially written file: the new content replaces the old one in
        // a single rename
        let tmp_path: PathBuf = self.dir.join(format!("{id}.json.tmp"));
        let file: File = File::create(&tmp_path)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);
        let envelope: Envelope = Envelope {
            expires_at: expiry(ttl),
            session: session.to_string(),
        };
        serde_json::to_writer(&mut writer, &envelope)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn get(&mut self, id: &str) -> Result<Option<String>> {
        let path: PathBuf = self.session_file(id)?;
        let file: File = match File::open(&path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(error.into()),
            },
        };
        let envelope: Envelope = serde_json::from_reader(BufReader::new(file))?;
        if envelope.is_expired() {
            debug!("Session {id} expired");
            if let Err(error) = remove_file(&path) {
                warn!("Cannot remove the expired session file {path:?}: {error}");
            }
            return Ok(None);
        }
        Ok(Some(envelope.session))
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let path: PathBuf = self.session_file(id)?;
        match remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("wordpath-test-{}", uuid::Uuid::new_v4()))
    }

    fn exercise(store: &mut dyn SessionStore) {
        let hour: Duration = Duration::from_secs(3600);
        assert_eq!(store.get("g1").unwrap(), None);

        store.put("g1", "{\"a\":1}", hour).unwrap();
        assert_eq!(store.get("g1").unwrap().as_deref(), Some("{\"a\":1}"));

        // Last write wins
        store.put("g1", "{\"a\":2}", hour).unwrap();
        assert_eq!(store.get("g1").unwrap().as_deref(), Some("{\"a\":2}"));

        store.delete("g1").unwrap();
        assert_eq!(store.get("g1").unwrap(), None);
        store.delete("g1").unwrap();

        store.put("g2", "x", Duration::ZERO).unwrap();
        assert_eq!(store.get("g2").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let mut store: MemorySessionStore = MemorySessionStore::new();
        exercise(&mut store);

        store.put("old", "x", Duration::ZERO).unwrap();
        store.put("new", "y", Duration::from_secs(60)).unwrap();
        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store() {
        let dir: PathBuf = temp_dir();
        let mut store: FileSessionStore = FileSessionStore::new(dir.clone());
        exercise(&mut store);

        store.put("old", "x", Duration::ZERO).unwrap();
        store.put("new", "y", Duration::from_secs(60)).unwrap();
        fs::write(dir.join("leaderboard.json"), "{\"top\": []}").unwrap();
        assert_eq!(store.purge_expired().unwrap(), 1);
        assert_eq!(store.get("new").unwrap().as_deref(), Some("y"));
        assert!(dir.join("leaderboard.json").exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_store_replaces_file_in_one_step() {
        let dir: PathBuf = temp_dir();
        let mut store: FileSessionStore = FileSessionStore::new(dir.clone());
        let hour: Duration = Duration::from_secs(3600);
        store.put("g1", "first", hour).unwrap();

        // A leftover temporary file from an interrupted save does not hide the saved session
        fs::write(dir.join("g1.json.tmp"), "").unwrap();
        assert_eq!(store.get("g1").unwrap().as_deref(), Some("first"));

        store.put("g1", "second", hour).unwrap();
        assert_eq!(store.get("g1").unwrap().as_deref(), Some("second"));
        assert!(!dir.join("g1.json.tmp").exists());
        let names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["g1.json".to_string()]);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_expired_file_is_removed_on_read() {
        let dir: PathBuf = temp_dir();
        let mut store: FileSessionStore = FileSessionStore::new(dir.clone());
        store.put("old", "x", Duration::ZERO).unwrap();
        assert!(dir.join("old.json").exists());
        assert_eq!(store.get("old").unwrap(), None);
        assert!(!dir.join("old.json").exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_store_rejects_bad_ids() {
        let dir: PathBuf = temp_dir();
        let mut store: FileSessionStore = FileSessionStore::new(dir);
        for id in ["", "../etc/passwd", "a/b", "a.json"] {
            assert!(matches!(
                store.put(id, "x", Duration::from_secs(1)),
                Err(GameError::UnknownSession(_))
            ));
        }
    }

    #[test]
    fn test_file_store_corrupted_file() {
        let dir: PathBuf = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bad.json"), "not json").unwrap();
        let mut store: FileSessionStore = FileSessionStore::new(dir.clone());
        assert!(matches!(
            store.get("bad"),
            Err(GameError::StoreUnavailable(_))
        ));
        let _ = fs::remove_dir_all(dir);
    }
}
