//! # Store — Persisted Athlete Roster
//!
//! Keeps the registered athletes in a single JSON file. Each registration
//! appends its record as soon as it is complete, and the end of the session
//! rewrites the file with the full in-memory list, which is the authoritative
//! copy for later lookups.
//!
//! ## Atomic Writes
//!
//! The file is written to a `.tmp` sibling and then renamed over the target,
//! so a crash mid-write never leaves a half-written roster behind.
//!
//! ## Integrity
//!
//! The records are wrapped in an envelope carrying a SHA-256 checksum of the
//! serialized data and the time of the save. On load the checksum is verified;
//! a file that fails is skipped in favour of the newest valid backup
//! generation (up to 3 generations kept). A bare JSON array without an
//! envelope is also accepted.

use crate::athlete::AthleteRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Number of backup generations to keep.
const GENERATIONS: usize = 3;

/// Default roster file name, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "athletes.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("athlete store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("athlete store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("athlete store integrity check failed: {path} (expected {expected}, got {found})")]
    Integrity {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Wrapper that includes a SHA-256 checksum for integrity verification.
#[derive(Serialize, Deserialize)]
struct StoreEnvelope {
    checksum: String,
    saved_at: DateTime<Utc>,
    data: serde_json::Value,
}

/// Compute SHA-256 hex digest of a string.
fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Return the path for generation `gen` (0 = current, 1 = .1, 2 = .2, ...).
fn generation_path(base: &Path, gen: usize) -> PathBuf {
    if gen == 0 {
        base.to_path_buf()
    } else {
        let mut p = base.as_os_str().to_os_string();
        p.push(format!(".{}", gen));
        PathBuf::from(p)
    }
}

/// Handle to the roster file. Every operation opens the file afresh.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add one record to whatever the file currently holds.
    pub fn append(&self, record: &AthleteRecord) -> Result<(), StoreError> {
        let mut records = self.load_all();
        records.push(record.clone());
        self.save_all(&records)
    }

    /// Replace the file contents with `records`.
    ///
    /// Rotation: current → .1 → .2 (oldest .2 is discarded).
    pub fn save_all(&self, records: &[AthleteRecord]) -> Result<(), StoreError> {
        for gen in (1..GENERATIONS).rev() {
            let src = generation_path(&self.path, gen - 1);
            let dst = generation_path(&self.path, gen);
            if src.exists() {
                let _ = fs::rename(&src, &dst);
            }
        }

        let data = serde_json::to_value(records)?;
        let data_str = serde_json::to_string_pretty(&data)?;
        let envelope = StoreEnvelope {
            checksum: sha256_hex(&data_str),
            saved_at: Utc::now(),
            data,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), athletes = records.len(), "athlete store saved");
        Ok(())
    }

    /// Newest valid generation. A roster that was never written loads as empty.
    pub fn try_load(&self) -> Result<Vec<AthleteRecord>, StoreError> {
        let mut last_err = None;
        for gen in 0..GENERATIONS {
            let p = generation_path(&self.path, gen);
            if !p.exists() {
                continue;
            }
            match load_single(&p) {
                Ok(records) => {
                    if gen > 0 {
                        warn!(generation = gen, path = %p.display(), "recovered athlete store from backup");
                    }
                    return Ok(records);
                }
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "skipping unreadable athlete store");
                    last_err = Some(e);
                }
            }
        }
        match last_err {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    /// Like [`Store::try_load`], but a failed read is logged and yields an empty list.
    pub fn load_all(&self) -> Vec<AthleteRecord> {
        self.try_load().unwrap_or_else(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "error reading athlete information");
            Vec::new()
        })
    }
}

/// Load and verify a single roster file.
fn load_single(path: &Path) -> Result<Vec<AthleteRecord>, StoreError> {
    let raw = fs::read_to_string(path)?;
    let envelope: StoreEnvelope = match serde_json::from_str(&raw) {
        Ok(env) => env,
        // Bare array without an envelope
        Err(envelope_err) => {
            return serde_json::from_str(&raw).map_err(|_| StoreError::Json(envelope_err));
        }
    };

    let data_str = serde_json::to_string_pretty(&envelope.data)?;
    let expected = sha256_hex(&data_str);
    if expected != envelope.checksum {
        return Err(StoreError::Integrity {
            path: path.to_path_buf(),
            expected: expected[..12].to_string(),
            found: envelope.checksum.chars().take(12).collect(),
        });
    }

    Ok(serde_json::from_value(envelope.data)?)
}
