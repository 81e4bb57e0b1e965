//! SHA256 + base36 ID generation for user-defined KPIs.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

/// Base36 alphabet (0-9, a-z).
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Default prefix for user-defined KPI ids.
pub const DEFAULT_PREFIX: &str = "kpi";

/// Length of the base36 hash part of a KPI id.
pub const HASH_LENGTH: usize = 8;

/// Converts a byte slice to a base36 string of the specified length.
///
/// Shorter encodings are left-padded with zeros; longer ones keep the
/// least significant digits.
pub fn encode_base36(data: &[u8], length: usize) -> String {
    let mut num = BigUint::from_bytes_be(data);
    let base = BigUint::from(36u32);
    let zero = BigUint::zero();

    // Build the string in reverse.
    let mut chars: Vec<u8> = Vec::with_capacity(length);
    while num > zero {
        let rem = &num % &base;
        num /= &base;
        let idx = rem.to_u32_digits();
        let i = if idx.is_empty() { 0 } else { idx[0] as usize };
        chars.push(BASE36_ALPHABET[i]);
    }

    // Every pushed byte comes from the ASCII alphabet.
    let mut s: String = chars.iter().rev().map(|&b| b as char).collect();

    if s.len() < length {
        let padding = "0".repeat(length - s.len());
        s = padding + &s;
    }

    if s.len() > length {
        s = s[s.len() - length..].to_owned();
    }

    s
}

/// Creates a hash-based id for a user-defined KPI.
///
/// The id is `<prefix>-<base36>` where the hash covers the name, formula,
/// creation timestamp and a nonce. Callers that detect a collision retry
/// with the next nonce.
pub fn generate_kpi_id(
    prefix: &str,
    name: &str,
    formula: &str,
    timestamp: DateTime<Utc>,
    nonce: u32,
) -> String {
    let content = format!(
        "{}|{}|{}|{}",
        name,
        formula,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );

    let hash = Sha256::digest(content.as_bytes());

    // 6 bytes = 48 bits ~ 9.3 base36 chars, enough for 8.
    let short_hash = encode_base36(&hash[..6], HASH_LENGTH);
    format!("{}-{}", prefix, short_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_base36_empty_is_zeros() {
        assert_eq!(encode_base36(&[], 4), "0000");
    }

    #[test]
    fn encode_base36_known_value() {
        // 36 decimal == "10" in base36
        assert_eq!(encode_base36(&[36], 2), "10");
        assert_eq!(encode_base36(&[35], 3), "00z");
    }

    #[test]
    fn encode_base36_truncates() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(encode_base36(&data, 3).len(), 3);
    }

    #[test]
    fn generate_kpi_id_format() {
        let id = generate_kpi_id("kpi", "Debt Cover", "A / B", Utc::now(), 0);
        assert!(id.starts_with("kpi-"));
        assert_eq!(id.len(), "kpi-".len() + HASH_LENGTH);
    }

    #[test]
    fn generate_kpi_id_deterministic() {
        let ts = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let id1 = generate_kpi_id("kpi", "X", "A / B", ts, 0);
        let id2 = generate_kpi_id("kpi", "X", "A / B", ts, 0);
        assert_eq!(id1, id2);
    }

    #[test]
    fn generate_kpi_id_nonce_changes_output() {
        let ts = Utc::now();
        let id1 = generate_kpi_id("kpi", "X", "A / B", ts, 0);
        let id2 = generate_kpi_id("kpi", "X", "A / B", ts, 1);
        assert_ne!(id1, id2);
    }
}
