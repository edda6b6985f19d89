use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Status assigned to every donation at creation.
pub const STATUS_CREATED: &str = "Created";
pub const STATUS_APPROVED: &str = "Approved";
pub const STATUS_DISBURSED: &str = "Disbursed";
pub const STATUS_REJECTED: &str = "Rejected";

/// Donation record: a single charitable contribution and its lifecycle status.
///
/// Invariants:
/// - `id` equals the ledger key the record is stored under
/// - `id`, `donor_name`, `ngo_name`, `amount`, `purpose` and `date` never change after creation
/// - `status` starts as `Created` and only changes through a status update
///
/// Field order and serde names are the stored wire format; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    #[serde(rename = "donationID")]
    pub id: String,

    #[serde(rename = "donorName")]
    pub donor_name: String,

    #[serde(rename = "ngoName")]
    pub ngo_name: String,

    /// Donation value; no currency unit is attached
    pub amount: f64,

    pub purpose: String,

    /// Any string; well-known values are the `STATUS_*` constants
    pub status: String,

    /// Caller-supplied date, stored verbatim
    pub date: String,
}

impl Donation {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace the status, leaving every other field untouched
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Caller input for creating a donation. Carries no status: creation always
/// starts at `Created`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    pub id: String,
    pub donor_name: String,
    pub ngo_name: String,
    pub purpose: String,
    pub date: String,
    pub amount: f64,
}

impl NewDonation {
    pub fn new(
        id: impl Into<String>,
        donor_name: impl Into<String>,
        ngo_name: impl Into<String>,
        purpose: impl Into<String>,
        date: impl Into<String>,
        amount: f64,
    ) -> Self {
        NewDonation {
            id: id.into(),
            donor_name: donor_name.into(),
            ngo_name: ngo_name.into(),
            purpose: purpose.into(),
            date: date.into(),
            amount,
        }
    }

    /// Check the fields the ledger depends on.
    ///
    /// `id` must be usable as a ledger key and `amount` must be representable in
    /// the stored encoding. Free-text fields are not inspected.
    pub fn validate(&self) -> Result<()> {
        validate_id(&self.id)?;
        if !self.amount.is_finite() {
            return Err(Error::Validation(format!(
                "Donation {} amount must be a finite number, got {}",
                self.id, self.amount
            )));
        }
        Ok(())
    }

    /// Build the stored record with status forced to `Created`
    pub fn into_donation(self) -> Donation {
        Donation {
            id: self.id,
            donor_name: self.donor_name,
            ngo_name: self.ngo_name,
            amount: self.amount,
            purpose: self.purpose,
            status: STATUS_CREATED.to_string(),
            date: self.date,
        }
    }
}

pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::Validation("Donation id must not be empty".to_string()));
    }
    Ok(())
}
