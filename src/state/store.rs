//! DonationStore: create, status update, point lookup and full enumeration of
//! donation records over an injected `LedgerBackend`.
//!
//! The store keeps no state of its own. Every call reads or writes through the
//! backend, and the ledger key of a record is its `id` verbatim.
//!
//! Known hazards, kept on purpose:
//! - `create_donation` does not check for an existing record; a repeated `id`
//!   overwrites it (last write wins).
//! - `update_status` accepts any status string, including the empty string.
//! - `update_status` is a read-modify-write over two backend calls. Holding the
//!   store by `&mut` serializes updates within a process, but two processes
//!   sharing one ledger can lose an update.

use crate::error::{BackendError, Error, Result};
use crate::logger::Logger;
use crate::state::codec::{decode_donation, encode_donation};
use crate::state::donation::validate_id;
use crate::state::{Donation, NewDonation};
use crate::storage::{LedgerBackend, StateIterator};

pub struct DonationStore<B: LedgerBackend> {
    backend: B,
}

impl<B: LedgerBackend> DonationStore<B> {
    pub fn new(backend: B) -> Self {
        DonationStore { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Store a new donation under its `id` with status `Created`.
    ///
    /// An existing record with the same `id` is replaced.
    pub fn create_donation(&mut self, input: NewDonation) -> Result<Donation> {
        input.validate()?;
        let donation = input.into_donation();
        let bytes = encode_donation(&donation)?;
        self.put(&donation.id, &bytes)?;
        Logger::debug(&format!("Created donation {}", donation.id));
        Ok(donation)
    }

    /// Set the status of an existing donation. All other fields are written back
    /// exactly as read.
    pub fn update_status(&mut self, id: &str, status: &str) -> Result<Donation> {
        let mut donation = self.get_donation(id)?;
        let previous = donation.status.clone();
        donation.set_status(status);
        let bytes = encode_donation(&donation)?;
        self.put(id, &bytes)?;
        Logger::debug(&format!(
            "Donation {} status {} -> {}",
            id, previous, donation.status
        ));
        Ok(donation)
    }

    /// Read one donation. `NotFound` when the key holds no value.
    pub fn get_donation(&self, id: &str) -> Result<Donation> {
        validate_id(id)?;
        let data = self
            .backend
            .get_state(id)
            .map_err(|source| Error::BackendRead {
                key: id.to_string(),
                source,
            })?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        decode_donation(id, &data)
    }

    /// All donations in key order.
    ///
    /// Aborts on the first record that cannot be read or decoded and returns that
    /// error; the scan is released either way.
    pub fn get_all_donations(&self) -> Result<Vec<Donation>> {
        let donations = self.donations()?.collect::<Result<Vec<_>>>()?;
        Logger::debug(&format!("Listed {} donations", donations.len()));
        Ok(donations)
    }

    /// Lazy cursor over the whole keyspace. See `DonationCursor`.
    pub fn donations(&self) -> Result<DonationCursor<'_>> {
        let scan = self
            .backend
            .state_by_range("", "")
            .map_err(Error::BackendScan)?;
        Ok(DonationCursor::new(scan))
    }

    fn put(&mut self, id: &str, bytes: &[u8]) -> Result<()> {
        self.backend
            .put_state(id, bytes)
            .map_err(|source| Error::BackendWrite {
                key: id.to_string(),
                source,
            })
    }
}

/// Forward, single-pass cursor over stored donations.
///
/// The underlying scan is closed exactly once: when the range is exhausted,
/// after the first error, on `close`, or on drop. After an error the cursor
/// yields nothing more.
pub struct DonationCursor<'a> {
    scan: Option<Box<dyn StateIterator + 'a>>,
}

impl<'a> DonationCursor<'a> {
    fn new(scan: Box<dyn StateIterator + 'a>) -> Self {
        DonationCursor { scan: Some(scan) }
    }

    /// Stop early and release the scan, reporting a failed release.
    pub fn close(mut self) -> Result<()> {
        self.release().map_err(Error::BackendScan)
    }

    fn release(&mut self) -> std::result::Result<(), BackendError> {
        match self.scan.take() {
            Some(mut scan) => scan.close(),
            None => Ok(()),
        }
    }

    /// Release after a failed item; the item's error takes precedence.
    fn fail(&mut self, error: Error) -> Error {
        if let Err(e) = self.release() {
            Logger::warn(&format!("Failed to close ledger scan after error: {}", e));
        }
        error
    }
}

impl<'a> Iterator for DonationCursor<'a> {
    type Item = Result<Donation>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.scan.as_mut()?.next_entry();
        match entry {
            None => self.release().err().map(|e| Err(Error::BackendScan(e))),
            Some(Err(e)) => Some(Err(self.fail(Error::BackendScan(e)))),
            Some(Ok(kv)) => match decode_donation(&kv.key, &kv.value) {
                Ok(donation) => Some(Ok(donation)),
                Err(e) => Some(Err(self.fail(e))),
            },
        }
    }
}

impl<'a> Drop for DonationCursor<'a> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            Logger::warn(&format!("Failed to close ledger scan: {}", e));
        }
    }
}
