//! Reversible list codes so a family can regenerate the same list.
//! Code format: <WORD><NN>, e.g., MONSOON42, PASSPORT07
use sha2::{Digest, Sha256};

// Word list for list codes
pub const WORD_LIST: [&str; 64] = [
    "BEACH", "MONSOON", "PASSPORT", "SUITCASE", "SANDALS", "SARONG", "LAGOON", "PALM", "HAMMOCK",
    "KAYAK", "SNORKEL", "TREK", "SUMMIT", "VALLEY", "GLACIER", "PINE", "CABIN", "LANTERN",
    "COMPASS", "MAPLE", "HARBOR", "FERRY", "TRAIN", "TICKET", "BAZAAR", "SPICE", "CHAI", "MANGO",
    "COCONUT", "LOTUS", "PEACOCK", "TIGER", "CAMEL", "DESERT", "DUNE", "OASIS", "FORT", "PALACE",
    "TEMPLE", "MARKET", "RICKSHAW", "SCARF", "KURTA", "JACKET", "BOOTS", "POUCH", "TOTE",
    "UMBRELLA", "SUNHAT", "BREEZE", "SUNSET", "MEADOW", "RIVER", "ISLAND", "CORAL", "SHELL",
    "POSTCARD", "ALBUM", "CAMERA", "BACKPACK", "ROUTE", "JOURNEY", "HOLIDAY", "WANDER",
];

/// Codes per word: the two-digit suffix.
const SUFFIXES: u16 = 100;
const DOMAIN: &[u8] = b"packlist/list-code";

/// Position of a code within the space of `WORD_LIST.len() * SUFFIXES` codes.
fn code_slot(word_index: u16, suffix: u8) -> u16 {
    word_index * SUFFIXES + u16::from(suffix)
}

/// Seed for a code slot: digest-derived high bits, slot in the low 16.
fn slot_seed(slot: u16) -> u64 {
    let digest = Sha256::new()
        .chain_update(DOMAIN)
        .chain_update(slot.to_be_bytes())
        .finalize();
    let mut high = [0u8; 8];
    high.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(high) & !0xFFFF) | u64::from(slot)
}

fn slot_count() -> u16 {
    u16::try_from(WORD_LIST.len()).map_or(SUFFIXES, |words| words * SUFFIXES)
}

/// Code for `seed`. Only seeds produced by [`decode_list_code`] round-trip;
/// other seeds map onto the nearest code by their low bits.
#[must_use]
pub fn encode_list_code(seed: u64) -> String {
    let slot = u16::try_from(seed & 0xFFFF).unwrap_or(0) % slot_count();
    let word = WORD_LIST
        .get(usize::from(slot / SUFFIXES))
        .copied()
        .unwrap_or(WORD_LIST[0]);
    format!("{word}{:02}", slot % SUFFIXES)
}

/// Seed for a code; case and punctuation in the word are ignored.
#[must_use]
pub fn decode_list_code(code: &str) -> Option<u64> {
    let code = code.trim();
    if code.len() < 3 || !code.is_ascii() {
        return None;
    }
    let (word, digits) = code.split_at(code.len() - 2);
    let suffix: u8 = digits.parse().ok()?;
    let word: String = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_ascii_uppercase();
    let word_index = WORD_LIST.iter().position(|candidate| *candidate == word)?;
    Some(slot_seed(code_slot(u16::try_from(word_index).ok()?, suffix)))
}

/// Fresh code from arbitrary entropy.
#[must_use]
pub fn code_from_entropy(entropy: u64) -> String {
    let slot = u16::try_from(entropy % u64::from(slot_count())).unwrap_or(0);
    encode_list_code(slot_seed(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_encode_roundtrips_code() {
        let seed = decode_list_code("MONSOON42").unwrap();
        assert_eq!(encode_list_code(seed), "MONSOON42");
    }

    #[test]
    fn decoding_ignores_case_and_punctuation() {
        assert_eq!(decode_list_code("monsoon42"), decode_list_code("MONSOON42"));
        assert_eq!(decode_list_code(" Post-Card07 "), decode_list_code("POSTCARD07"));
    }

    #[test]
    fn rejects_malformed_codes() {
        assert_eq!(decode_list_code("ZEPPELIN42"), None);
        assert_eq!(decode_list_code("BEACH4"), None);
        assert_eq!(decode_list_code("BEACHxx"), None);
        assert_eq!(decode_list_code("42"), None);
    }

    #[test]
    fn every_word_roundtrips() {
        for (index, word) in WORD_LIST.iter().enumerate() {
            assert!(word.chars().all(|c| c.is_ascii_uppercase()), "{word}");
            let nn = index % 100;
            let code = format!("{word}{nn:02}");
            let seed = decode_list_code(&code).unwrap();
            assert_eq!(encode_list_code(seed), code);
        }
    }

    #[test]
    fn entropy_codes_decode() {
        for entropy in [0, 1, 63, 64, 0xDEAD_BEEF, u64::MAX] {
            let code = code_from_entropy(entropy);
            let seed = decode_list_code(&code).unwrap();
            assert_eq!(encode_list_code(seed), code);
        }
    }

    #[test]
    fn foreign_seeds_still_name_a_known_code() {
        for seed in [6_400, 0xFFFF, 12_345_678, u64::MAX] {
            let code = encode_list_code(seed);
            let decoded = decode_list_code(&code).unwrap();
            assert_eq!(encode_list_code(decoded), code, "seed {seed}");
        }
        assert_eq!(encode_list_code(6_400), "BEACH00");
    }

    #[test]
    fn distinct_codes_give_distinct_seeds() {
        assert_ne!(decode_list_code("BEACH01"), decode_list_code("BEACH02"));
        assert_ne!(decode_list_code("BEACH01"), decode_list_code("TREK01"));
    }
}
