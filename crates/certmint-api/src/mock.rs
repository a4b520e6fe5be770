//! Mock identifiers handed back to API callers.
//!
//! These only need to look plausible and differ between calls, so they come
//! from a general-purpose RNG. The certificate field serial number uses the OS
//! source instead; see [`certmint_pki::generate_serial_number`].

use rand::Rng;

/// Exclusive upper bound for token ids.
pub const TOKEN_ID_UPPER_BOUND: u32 = 10_000;

/// Hex digits in a transaction hash, excluding the `0x` prefix.
pub const TRANSACTION_HASH_HEX_LEN: usize = 64;

/// Length of the certificate summary serial number.
pub const CERTIFICATE_SERIAL_LEN: usize = 6;

const HEX_ALPHABET: &[u8] = b"0123456789abcdef";
const SERIAL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The three random values generated for each response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockIdentifiers {
    /// NFT token id.
    pub token_id: String,
    /// NFT transaction hash.
    pub transaction_hash: String,
    /// Certificate summary serial number.
    pub certificate_serial: String,
}

impl MockIdentifiers {
    /// Draws a fresh, independent set of identifiers.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            token_id: token_id(rng),
            transaction_hash: transaction_hash(rng),
            certificate_serial: certificate_serial(rng),
        }
    }
}

/// Random integer in `[0, 10000)` as a decimal string.
pub fn token_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(0..TOKEN_ID_UPPER_BOUND).to_string()
}

/// `0x` followed by 64 random lowercase hex digits.
pub fn transaction_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut hash = String::with_capacity(2 + TRANSACTION_HASH_HEX_LEN);
    hash.push_str("0x");
    hash.extend((0..TRANSACTION_HASH_HEX_LEN).map(|_| pick(rng, HEX_ALPHABET)));
    hash
}

/// Six random characters from `A-Z0-9`.
pub fn certificate_serial<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CERTIFICATE_SERIAL_LEN)
        .map(|_| pick(rng, SERIAL_ALPHABET))
        .collect()
}

fn pick<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8]) -> char {
    char::from(alphabet[rng.gen_range(0..alphabet.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn token_id_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let id: u32 = token_id(&mut rng).parse().unwrap();
            assert!(id < TOKEN_ID_UPPER_BOUND);
        }
    }

    #[test]
    fn transaction_hash_shape() {
        let hash = transaction_hash(&mut rand::thread_rng());

        assert_eq!(hash.len(), 66);
        assert!(hash.starts_with("0x"));
        assert!(hash[2..].bytes().all(|b| HEX_ALPHABET.contains(&b)));
    }

    #[test]
    fn certificate_serial_shape() {
        let serial = certificate_serial(&mut rand::thread_rng());

        assert_eq!(serial.len(), CERTIFICATE_SERIAL_LEN);
        assert!(serial.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }

    #[test]
    fn same_seed_same_identifiers() {
        let a = MockIdentifiers::generate(&mut StdRng::seed_from_u64(42));
        let b = MockIdentifiers::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_draws_differ() {
        let mut rng = rand::thread_rng();
        let first = MockIdentifiers::generate(&mut rng);
        let second = MockIdentifiers::generate(&mut rng);

        assert_ne!(first.transaction_hash, second.transaction_hash);
    }

    proptest! {
        #[test]
        fn prop_identifiers_well_formed(seed in any::<u64>()) {
            let ids = MockIdentifiers::generate(&mut StdRng::seed_from_u64(seed));

            prop_assert!(ids.token_id.parse::<u32>().unwrap() < TOKEN_ID_UPPER_BOUND);
            prop_assert_eq!(ids.transaction_hash.len(), 2 + TRANSACTION_HASH_HEX_LEN);
            prop_assert_eq!(ids.certificate_serial.len(), CERTIFICATE_SERIAL_LEN);
        }
    }
}
