use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Duration, Utc};
use thiserror::Error;

use peopleops_auth::Role;

use crate::record::{EventKind, EventRecord};

/// Event log failure.
///
/// Append failures are fatal to the calling operation: the log is the
/// integrity backbone for analytics and retention, so an unwritable medium
/// must surface, never be swallowed. Unreadable *lines* are a different
/// matter (see [`EventLog::read_all`]).
#[derive(Debug, Error)]
pub enum LogError {
    #[error("event log io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event log encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("event log lock poisoned")]
    LockPoisoned,
}

/// Append-only JSONL event log.
///
/// The log owns its own lock, independent of the record store's: appends
/// never block on record mutations and vice versa. Compaction
/// ([`EventLog::purge_older_than`]) is an explicit operator-triggered rewrite,
/// not a background task, and serializes against appends via the same lock.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl EventLog {
    /// Open (or lazily create) the log at `path`.
    ///
    /// Parent directories are created eagerly so the first append cannot fail
    /// on a missing directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record with a generated UTC timestamp.
    ///
    /// The write is synchronous and serialized: concurrent appenders cannot
    /// interleave or truncate each other's line.
    pub fn append(
        &self,
        event_type: EventKind,
        actor_id: &str,
        actor_role: Role,
        details: serde_json::Value,
    ) -> Result<(), LogError> {
        let record = EventRecord {
            timestamp: Utc::now(),
            event_type,
            actor_id: actor_id.to_string(),
            actor_role,
            details,
        };
        let line = serde_json::to_string(&record)?;

        let _guard = self.lock.lock().map_err(|_| LogError::LockPoisoned)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Every well-formed record in file order.
    ///
    /// Malformed lines are skipped, not errors: a single corrupt line must not
    /// take down analytics over the rest of the log. A missing file reads as
    /// an empty log.
    pub fn read_all(&self) -> Result<Vec<EventRecord>, LogError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let _guard = self.lock.lock().map_err(|_| LogError::LockPoisoned)?;
        let reader = BufReader::new(File::open(&self.path)?);

        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<EventRecord>(&line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping malformed event log line");
                }
            }
        }
        Ok(records)
    }

    /// The last `limit` records in arrival order.
    pub fn recent(&self, limit: usize) -> Result<Vec<EventRecord>, LogError> {
        let mut records = self.read_all()?;
        if records.len() > limit {
            records.drain(..records.len() - limit);
        }
        Ok(records)
    }

    /// Rewrite the log keeping only records within the retention window.
    ///
    /// Lines that fail to parse are conservatively kept: a record must never
    /// be discarded because of a parse error rather than a retention decision.
    /// Returns the number of removed records. `retention_days < 1` is a no-op.
    pub fn purge_older_than(&self, retention_days: i64) -> Result<usize, LogError> {
        if retention_days < 1 {
            return Ok(0);
        }
        if !self.path.exists() {
            return Ok(0);
        }

        let cutoff = Utc::now() - Duration::days(retention_days);

        let _guard = self.lock.lock().map_err(|_| LogError::LockPoisoned)?;
        let raw = fs::read_to_string(&self.path)?;

        let mut kept: Vec<&str> = Vec::new();
        let mut removed = 0usize;
        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<EventRecord>(line) {
                Ok(record) if record.timestamp < cutoff => removed += 1,
                _ => kept.push(line),
            }
        }

        let mut contents = kept.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;

        Ok(removed)
    }
}
