//! Collision-free, length-bounded database identifier generation.
//!
//! Names look like `{prefix}_{unix_ns}_{rand_hex}`: a 19-digit nanosecond
//! timestamp plus 8 hex characters (32 random bits) from a cryptographic
//! RNG, so a prefix of up to 34 bytes keeps the whole name under Postgres's
//! 63-byte identifier limit (34 + 1 + 19 + 1 + 8 = 63).

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};

/// Mint a new database name for `prefix`. An empty prefix is treated as `"test"`.
pub fn mint(prefix: &str) -> Result<String> {
    let prefix = if prefix.is_empty() { "test" } else { prefix };

    let unix_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_nanos();

    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(Error::RandomSourceUnavailable)?;
    let rand_hex = hex::encode(bytes);

    Ok(format!("{prefix}_{unix_ns}_{rand_hex}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mints_names_with_the_expected_shape() {
        let name = mint("test").unwrap();
        let parts: Vec<&str> = name.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "test");
        assert_eq!(parts[1].len(), 19);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn empty_prefix_becomes_test() {
        let name = mint("").unwrap();
        assert!(name.starts_with("test_"));
    }

    #[test]
    fn ten_thousand_mints_are_distinct() {
        let mut seen = HashSet::with_capacity(10_000);
        for _ in 0..10_000 {
            let name = mint("dup").unwrap();
            assert!(seen.insert(name), "minted a duplicate name");
        }
    }

    #[test]
    fn max_prefix_keeps_name_under_the_identifier_limit() {
        let prefix = "p".repeat(34);
        let name = mint(&prefix).unwrap();
        assert!(name.len() <= 63, "name {name:?} exceeds 63 bytes");
        assert_eq!(name.len(), 34 + 1 + 19 + 1 + 8);
    }
}
