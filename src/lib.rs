pub mod config;
pub mod error;
pub mod logger;
pub mod state;
pub mod storage;

pub use error::{BackendError, Error, Result};
pub use state::{Donation, DonationCursor, DonationStore, NewDonation};
pub use storage::{FileBackend, LedgerBackend, MemoryBackend, StateIterator};

use sha2::{Digest, Sha256};

/// Calculate SHA256 digest
pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}
