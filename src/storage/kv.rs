use crate::config::Config;
use crate::error::BackendError;
use crate::logger::Logger;
use crate::sha256_digest;
use crate::storage::{KeyValue, LedgerBackend, MemoryBackend, StateIterator};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout of `ledger.bin` (bincode serialized).
#[derive(Debug, Serialize, Deserialize)]
struct LedgerSnapshot {
    version: u32,
    /// Lowercase hex SHA-256 of the bincode-encoded `entries`
    checksum: String,
    entries: BTreeMap<String, Vec<u8>>,
}

/// File-based ledger shared by any number of handles and processes.
///
/// Every read loads the current snapshot, so a handle sees writes made through
/// other handles. Every put takes an exclusive lock, reloads the snapshot,
/// changes the one key and rewrites the snapshot atomically. Readers take no
/// lock: the rename guarantees they see either the old or the new snapshot.
///
/// Files:
/// - `ledger.bin`: current snapshot
/// - `ledger.bin.tmp`: temporary file for atomic snapshot writes
/// - `ledger.bin.lock`: writer lock
pub struct FileBackend {
    path: PathBuf,
    tmp_path: PathBuf,
    lock_path: PathBuf,
}

impl FileBackend {
    /// Open the ledger at the path from config
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        FileBackend::open(config.get_ledger_path())
    }

    /// Open the ledger at `path`. A missing file is an empty ledger; an existing
    /// one is checked so corruption is reported up front.
    pub fn open(path: PathBuf) -> Result<Self, BackendError> {
        let backend = FileBackend {
            tmp_path: path.with_extension("bin.tmp"),
            lock_path: path.with_extension("bin.lock"),
            path,
        };
        let entries = load_snapshot(&backend.path)?.unwrap_or_default();
        Logger::debug(&format!(
            "Opened ledger {} with {} entries",
            backend.path.display(),
            entries.len()
        ));
        Ok(backend)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty snapshot if none exists on disk yet
    pub fn init(&self) -> Result<bool, BackendError> {
        let _lock = self.lock_exclusive()?;
        if self.path.exists() {
            return Ok(false);
        }
        self.persist(&BTreeMap::new())?;
        Ok(true)
    }

    fn ensure_dir(&self) -> Result<(), BackendError> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Directory holding the snapshot; `None` for a bare file name
    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Exclusive writer lock, released when the returned file is dropped
    fn lock_exclusive(&self) -> Result<File, BackendError> {
        self.ensure_dir()?;
        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;
        FileExt::lock_exclusive(&lock)?;
        Ok(lock)
    }

    fn current(&self) -> Result<MemoryBackend, BackendError> {
        let entries = load_snapshot(&self.path)?.unwrap_or_default();
        Ok(MemoryBackend::from_entries(entries))
    }

    /// Persist snapshot atomically (write temp file, fsync, rename, fsync dir)
    ///
    /// Callers must hold the writer lock: the temp file is shared.
    fn persist(&self, entries: &BTreeMap<String, Vec<u8>>) -> Result<(), BackendError> {
        self.ensure_dir()?;

        let payload = bincode::serialize(entries)
            .map_err(|e| BackendError::Corrupt(format!("Failed to serialize entries: {}", e)))?;
        let snapshot = LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            checksum: hex::encode(sha256_digest(&payload)),
            entries: entries.clone(),
        };
        let bytes = bincode::serialize(&snapshot)
            .map_err(|e| BackendError::Corrupt(format!("Failed to serialize snapshot: {}", e)))?;

        let mut file = File::create(&self.tmp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&self.tmp_path, &self.path)?;

        if let Some(parent) = self.parent_dir() {
            File::open(parent)?.sync_all()?;
        }

        Ok(())
    }
}

fn load_snapshot(path: &Path) -> Result<Option<BTreeMap<String, Vec<u8>>>, BackendError> {
    if !path.exists() {
        return Ok(None);
    }

    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;

    let snapshot: LedgerSnapshot = bincode::deserialize(&data)
        .map_err(|e| BackendError::Corrupt(format!("Failed to decode {}: {}", path.display(), e)))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(BackendError::Corrupt(format!(
            "Unsupported snapshot version {} (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }

    let payload = bincode::serialize(&snapshot.entries)
        .map_err(|e| BackendError::Corrupt(format!("Failed to re-encode entries: {}", e)))?;
    let checksum = hex::encode(sha256_digest(&payload));
    if checksum != snapshot.checksum {
        return Err(BackendError::Corrupt(format!(
            "Checksum mismatch in {}: stored {}, computed {}",
            path.display(),
            snapshot.checksum,
            checksum
        )));
    }

    Ok(Some(snapshot.entries))
}

impl LedgerBackend for FileBackend {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        self.current()?.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        let _lock = self.lock_exclusive()?;
        let mut current = self.current()?;
        current.put_state(key, value)?;
        self.persist(current.entries())
    }

    fn state_by_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator + 'a>, BackendError> {
        let entries = self.current()?.range_entries(start_key, end_key);
        Ok(Box::new(SnapshotStateIterator {
            entries: Some(entries.into_iter()),
        }))
    }
}

/// Scan over the entries loaded when the scan was opened.
struct SnapshotStateIterator {
    entries: Option<std::vec::IntoIter<KeyValue>>,
}

impl StateIterator for SnapshotStateIterator {
    fn next_entry(&mut self) -> Option<Result<KeyValue, BackendError>> {
        self.entries.as_mut()?.next().map(Ok)
    }

    fn close(&mut self) -> Result<(), BackendError> {
        self.entries = None;
        Ok(())
    }
}
