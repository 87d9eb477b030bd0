use proptest::prelude::*;

use attest_types::{ContentHash, RewardStatus, ReputationBand, Timestamp};

proptest! {
    /// ContentHash roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn content_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        prop_assert_eq!(hash.as_bytes(), &bytes);
    }

    /// Hex encoding roundtrips for any digest.
    #[test]
    fn content_hash_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        let parsed = ContentHash::from_hex(&hash.to_hex()).unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// ContentHash::is_zero is true only for all-zero bytes.
    #[test]
    fn content_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// JSON serialization roundtrips through the hex-string wire format.
    #[test]
    fn content_hash_json_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        let encoded = serde_json::to_string(&hash).unwrap();
        let decoded: ContentHash = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }

    /// Band classification covers every score and matches the boundaries.
    #[test]
    fn band_classification_total(score in 0.0f64..=100.0) {
        let band = ReputationBand::classify(score);
        if score >= 75.0 {
            prop_assert_eq!(band, ReputationBand::Trusted);
        } else if score >= 50.0 {
            prop_assert_eq!(band, ReputationBand::Neutral);
        } else {
            prop_assert_eq!(band, ReputationBand::LowTrust);
        }
    }

    /// Timestamp::max is commutative and picks the later instant.
    #[test]
    fn timestamp_max_is_later(a in 0u64..u64::MAX / 2, b in 0u64..u64::MAX / 2) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta.max(tb), tb.max(ta));
        prop_assert_eq!(ta.max(tb).as_secs(), a.max(b));
    }
}

#[test]
fn reward_status_transitions_monotone() {
    use RewardStatus::*;
    for terminal in [Confirmed, Failed] {
        assert!(Pending.can_transition_to(terminal));
        assert!(!terminal.can_transition_to(Pending));
    }
}
