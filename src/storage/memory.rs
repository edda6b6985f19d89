use crate::error::BackendError;
use crate::storage::{key_range, KeyValue, LedgerBackend, StateIterator};
use std::collections::btree_map::{self, BTreeMap};

/// Ordered in-memory ledger. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            entries: BTreeMap::new(),
        }
    }

    pub fn from_entries(entries: BTreeMap<String, Vec<u8>>) -> Self {
        MemoryBackend { entries }
    }

    pub fn entries(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scan<'a>(&'a self, start_key: &str, end_key: &str) -> MemoryStateIterator<'a> {
        let range =
            key_range(start_key, end_key).map(|bounds| self.entries.range::<str, _>(bounds));
        MemoryStateIterator { range }
    }

    /// Owned copy of `[start_key, end_key)` in key order
    pub fn range_entries(&self, start_key: &str, end_key: &str) -> Vec<KeyValue> {
        let mut scan = self.scan(start_key, end_key);
        let mut entries = Vec::new();
        while let Some(Ok(entry)) = scan.next_entry() {
            entries.push(entry);
        }
        entries
    }
}

impl LedgerBackend for MemoryBackend {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn state_by_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator + 'a>, BackendError> {
        Ok(Box::new(self.scan(start_key, end_key)))
    }
}

/// Scan handle over a `BTreeMap` range. `None` once closed or when the range is empty.
pub struct MemoryStateIterator<'a> {
    range: Option<btree_map::Range<'a, String, Vec<u8>>>,
}

impl<'a> StateIterator for MemoryStateIterator<'a> {
    fn next_entry(&mut self) -> Option<Result<KeyValue, BackendError>> {
        let (key, value) = self.range.as_mut()?.next()?;
        Some(Ok(KeyValue {
            key: key.clone(),
            value: value.clone(),
        }))
    }

    fn close(&mut self) -> Result<(), BackendError> {
        self.range = None;
        Ok(())
    }
}
