//! Saved sessions
//!
//! One pretty-printed JSON file per save in the save directory. Every call
//! re-scans the directory; nothing cached in memory is trusted across calls
//! except the key order from the most recent listing, which `load` and
//! `delete` index into.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::sim::{MAX_LEVEL, RoadType};

/// File extension for save files
pub const SAVE_EXTENSION: &str = "json";

/// Why a session operation did nothing
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("save name is empty")]
    EmptyName,
    #[error("save index {index} out of range ({len} saves)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("save '{0}' not found")]
    NotFound(String),
    #[error("save '{key}' is corrupted: {reason}")]
    Corrupted { key: String, reason: String },
    #[error("save directory I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode save: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Wall-clock source for save timestamps
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A persisted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionRecord {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub road_type: RoadType,
    /// UTC, `YYYY-MM-DD HH:MM:SS`
    pub save_time: String,
}

impl SessionRecord {
    /// Reason the record can't be played, if any
    pub fn problem(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("empty name".to_string());
        }
        if !(1..=MAX_LEVEL).contains(&self.level) {
            return Some(format!("level {} outside 1..={}", self.level, MAX_LEVEL));
        }
        None
    }
}

/// A record together with its storage key
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub key: String,
    pub record: SessionRecord,
}

/// Directory-backed session store
pub struct SessionStore {
    dir: PathBuf,
    clock: Box<dyn Clock>,
    /// Keys from the most recent `list`
    listed: Vec<String>,
}

impl SessionStore {
    /// Open (creating if needed) the save directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        Self::with_clock(dir, Box::new(SystemClock))
    }

    pub fn with_clock(dir: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Result<Self, SessionError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let mut store = Self {
            dir,
            clock,
            listed: Vec::new(),
        };
        let count = store.list().len();
        log::info!("Session store at {} ({} saves)", store.dir.display(), count);
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a new save. Never overwrites: a clashing key gets a numeric suffix.
    pub fn save(
        &mut self,
        name: &str,
        score: u32,
        level: u32,
        road_type: RoadType,
    ) -> Result<String, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let millis = self.clock.now_millis();
        let record = SessionRecord {
            name: name.to_string(),
            score,
            level,
            road_type,
            save_time: format_timestamp(millis),
        };
        let json = serde_json::to_string_pretty(&record)?;

        let base = format!("{}_{}", slug(name), millis);
        let mut attempt = 0u32;
        loop {
            let key = if attempt == 0 {
                base.clone()
            } else {
                format!("{}_{}", base, attempt)
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.path_for(&key))
            {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())?;
                    log::info!("Session saved: {} ({} points, level {})", key, score, level);
                    return Ok(key);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// All well-formed saves, ordered by key. Malformed files are skipped with a warning.
    pub fn list(&mut self) -> Vec<SessionEntry> {
        let mut keys = match self.scan_keys() {
            Ok(keys) => keys,
            Err(e) => {
                log::warn!("Could not read save directory {}: {}", self.dir.display(), e);
                Vec::new()
            }
        };
        keys.sort();

        let entries: Vec<SessionEntry> = keys
            .into_iter()
            .filter_map(|key| match self.read(&key) {
                Ok(record) => Some(SessionEntry { key, record }),
                Err(e) => {
                    log::warn!("Skipping save: {}", e);
                    None
                }
            })
            .collect();

        self.listed = entries.iter().map(|e| e.key.clone()).collect();
        entries
    }

    /// Every save, highest score first. Ties keep listing order.
    pub fn rank(&mut self) -> Vec<SessionEntry> {
        let mut entries = self.list();
        entries.sort_by(|a, b| b.record.score.cmp(&a.record.score));
        entries
    }

    /// Position of `key` in the most recent listing
    pub fn position(&self, key: &str) -> Option<usize> {
        self.listed.iter().position(|k| k == key)
    }

    /// Decode the save at `index` of the most recent listing
    pub fn load(&self, index: usize) -> Result<SessionRecord, SessionError> {
        let key = self.listed_key(index)?;
        self.read(key)
    }

    /// Remove the save at `index` of the most recent listing
    pub fn delete(&mut self, index: usize) -> Result<String, SessionError> {
        let key = self.listed_key(index)?.to_string();
        match fs::remove_file(self.path_for(&key)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(SessionError::NotFound(key)),
            Err(e) => return Err(e.into()),
        }
        self.listed.remove(index);
        log::info!("Session deleted: {}", key);
        Ok(key)
    }

    fn listed_key(&self, index: usize) -> Result<&str, SessionError> {
        self.listed
            .get(index)
            .map(String::as_str)
            .ok_or(SessionError::IndexOutOfRange {
                index,
                len: self.listed.len(),
            })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, SAVE_EXTENSION))
    }

    fn scan_keys(&self) -> std::io::Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }

    fn read(&self, key: &str) -> Result<SessionRecord, SessionError> {
        let text = match fs::read_to_string(self.path_for(key)) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SessionError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let record: SessionRecord =
            serde_json::from_str(&text).map_err(|e| SessionError::Corrupted {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        if let Some(reason) = record.problem() {
            return Err(SessionError::Corrupted {
                key: key.to_string(),
                reason,
            });
        }
        Ok(record)
    }
}

/// File-name-safe form of a player name
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Format Unix milliseconds as `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn format_timestamp(millis: u64) -> String {
    let secs = millis / 1000;
    let (year, month, day) = civil_from_days((secs / 86_400) as i64);
    let rem = secs % 86_400;
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year,
        month,
        day,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day)
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
