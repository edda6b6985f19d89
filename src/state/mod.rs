pub mod codec;
pub mod donation;
pub mod store;

pub use codec::{decode_donation, encode_donation};
pub use donation::{
    Donation, NewDonation, STATUS_APPROVED, STATUS_CREATED, STATUS_DISBURSED, STATUS_REJECTED,
};
pub use store::{DonationCursor, DonationStore};
