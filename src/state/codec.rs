//! Stored encoding of donation records: one JSON object per ledger key.

use crate::error::{Error, Result};
use crate::state::Donation;

pub fn encode_donation(donation: &Donation) -> Result<Vec<u8>> {
    serde_json::to_vec(donation).map_err(|source| Error::Serialization {
        key: donation.id.clone(),
        source,
    })
}

/// Decode the value stored at `key`. Malformed data is an error, never a default record.
pub fn decode_donation(key: &str, data: &[u8]) -> Result<Donation> {
    serde_json::from_slice(data).map_err(|source| Error::Deserialization {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{NewDonation, STATUS_APPROVED};
    use proptest::prelude::*;

    fn sample() -> Donation {
        NewDonation::new("D1", "Alice", "RedCross", "flood relief", "2024-01-01", 50.0)
            .into_donation()
    }

    #[test]
    fn test_wire_names_and_order() {
        let json = String::from_utf8(encode_donation(&sample()).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"donationID":"D1","donorName":"Alice","ngoName":"RedCross","amount":50.0,"purpose":"flood relief","status":"Created","date":"2024-01-01"}"#
        );
    }

    #[test]
    fn test_decode_integer_amount() {
        let stored = br#"{"donationID":"D7","donorName":"Bob","ngoName":"UNICEF","amount":120,"purpose":"school","status":"Approved","date":"2023-06-30"}"#;
        let donation = decode_donation("D7", stored).unwrap();
        assert_eq!(donation.id, "D7");
        assert_eq!(donation.amount, 120.0);
        assert_eq!(donation.status, STATUS_APPROVED);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let stored = br#"{"donationID":"D8","donorName":"Bob","ngoName":"UNICEF","amount":1.5,"purpose":"x","status":"Created","date":"d","memo":"extra"}"#;
        assert_eq!(decode_donation("D8", stored).unwrap().amount, 1.5);
    }

    #[test]
    fn test_decode_malformed_is_error() {
        match decode_donation("bad", b"not json") {
            Err(Error::Deserialization { key, .. }) => assert_eq!(key, "bad"),
            other => panic!("expected deserialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_field_is_error() {
        let stored = br#"{"donationID":"D9","donorName":"Bob"}"#;
        assert!(matches!(
            decode_donation("D9", stored),
            Err(Error::Deserialization { .. })
        ));
    }

    prop_compose! {
        fn arb_donation()(
            id in "[A-Za-z0-9_-]{1,16}",
            donor_name in any::<String>(),
            ngo_name in any::<String>(),
            amount in -1.0e12f64..1.0e12f64,
            purpose in any::<String>(),
            status in any::<String>(),
            date in "[0-9]{4}-[0-9]{2}-[0-9]{2}",
        ) -> Donation {
            Donation { id, donor_name, ngo_name, amount, purpose, status, date }
        }
    }

    proptest! {
        #[test]
        fn prop_encode_decode_round_trip(donation in arb_donation()) {
            let bytes = encode_donation(&donation).unwrap();
            let decoded = decode_donation(&donation.id, &bytes).unwrap();
            prop_assert_eq!(decoded.amount.to_bits(), donation.amount.to_bits());
            prop_assert_eq!(decoded, donation);
        }
    }
}
