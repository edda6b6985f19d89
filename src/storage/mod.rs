pub mod kv;
pub mod memory;

pub use kv::FileBackend;
pub use memory::{MemoryBackend, MemoryStateIterator};

use crate::error::BackendError;
use std::ops::Bound;

/// A single entry produced by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Sorted key-value ledger consumed by the donation store.
///
/// Implementations must provide:
/// - Atomic single-key reads and writes
/// - Ascending key order for range scans
///
/// No multi-key transactions are exposed. Timeouts and retries, if any, are the
/// backend's own business.
pub trait LedgerBackend {
    /// Read the value stored at `key`.
    ///
    /// Returns `Ok(None)` when the key has no value; errors are reserved for the
    /// read itself failing.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Store `value` at `key`, replacing any previous value.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), BackendError>;

    /// Open a scan over `[start_key, end_key)`.
    ///
    /// An empty `start_key` means the first key of the keyspace, an empty
    /// `end_key` means the last. The returned handle must be closed by the caller.
    fn state_by_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator + 'a>, BackendError>;
}

/// Forward, single-pass cursor over a key range.
pub trait StateIterator {
    /// Next entry in key order, or `None` once the range is exhausted.
    fn next_entry(&mut self) -> Option<Result<KeyValue, BackendError>>;

    /// Release the scan resource. No entries are produced afterwards.
    fn close(&mut self) -> Result<(), BackendError>;
}

/// Translate scan bounds into `BTreeMap::range` bounds.
///
/// Returns `None` when the range is empty by construction (`start >= end`), which
/// `BTreeMap::range` would otherwise reject with a panic.
pub fn key_range<'k>(
    start_key: &'k str,
    end_key: &'k str,
) -> Option<(Bound<&'k str>, Bound<&'k str>)> {
    let start = if start_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start_key)
    };
    let end = if end_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end_key)
    };

    if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
        return None;
    }
    Some((start, end))
}
