use crate::error::GeneratorError;
use crate::Generator;
use pinhole_core::shortcode::{ALPHABET, MAX_LENGTH};
use pinhole_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimum number of base62 digits after the prefix.
const COUNTER_WIDTH: usize = 6;
/// Digits needed to write `u64::MAX` in base62.
const MAX_COUNTER_DIGITS: usize = 11;
/// Longest prefix that still fits every counter value in a short code.
pub const MAX_PREFIX_LENGTH: usize = MAX_LENGTH - MAX_COUNTER_DIGITS;

/// A short code generator using a sequential counter.
///
/// This generator produces codes like "wh000000", "wh000001", ... with the
/// counter written in base62 and zero-padded to six digits. Within a single
/// instance it never repeats itself, but codes can still collide with
/// custom codes already in the registry, so the allocator's collision
/// check still applies.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix must be alphanumeric and at most nine characters long.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, GeneratorError> {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Result<Self, GeneratorError> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self {
            counter: AtomicU64::new(offset),
            prefix,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

fn validate_prefix(prefix: &str) -> Result<(), GeneratorError> {
    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(GeneratorError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: format!("longer than {} characters", MAX_PREFIX_LENGTH),
        });
    }
    if !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(GeneratorError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: "must contain only alphanumeric characters".to_string(),
        });
    }
    Ok(())
}

/// Writes `value` in base62, left-padded with '0' to `width` digits.
fn encode_base62(mut value: u64, width: usize) -> String {
    let mut digits = Vec::with_capacity(MAX_COUNTER_DIGITS);
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    while digits.len() < width {
        digits.push(ALPHABET[0]);
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        let code_str = format!("{}{}", self.prefix, encode_base62(count, COUNTER_WIDTH));
        ShortCode::new_unchecked(code_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_generator_produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("wh").unwrap();

        let code1 = generator.generate();
        let code2 = generator.generate();
        let code3 = generator.generate();

        assert_eq!(code1.as_str(), "wh000000");
        assert_eq!(code2.as_str(), "wh000001");
        assert_eq!(code3.as_str(), "wh000002");
    }

    #[test]
    fn counter_is_written_in_base62() {
        let generator = SeqGenerator::with_offset("wh", 9).unwrap();

        assert_eq!(generator.generate().as_str(), "wh000009");
        assert_eq!(generator.generate().as_str(), "wh00000A");

        let generator = SeqGenerator::with_offset("", 62).unwrap();
        assert_eq!(generator.generate().as_str(), "000010");
    }

    #[test]
    fn seq_generator_with_offset() {
        let generator = SeqGenerator::with_offset("wh", 1000).unwrap();

        let code1 = generator.generate();
        let code2 = generator.generate();

        // 1000 = 16 * 62 + 8
        assert_eq!(code1.as_str(), "wh0000G8");
        assert_eq!(code2.as_str(), "wh0000G9");
    }

    #[test]
    fn largest_counter_still_makes_a_valid_code() {
        let generator = SeqGenerator::with_offset("a".repeat(MAX_PREFIX_LENGTH), u64::MAX).unwrap();
        let code = generator.generate();

        assert_eq!(code.as_str().len(), MAX_LENGTH);
        assert!(ShortCode::new(code.as_str()).is_ok());
    }

    #[test]
    fn rejects_bad_prefixes() {
        assert!(SeqGenerator::with_prefix("node-a").is_err());
        assert!(SeqGenerator::with_prefix("a".repeat(MAX_PREFIX_LENGTH + 1)).is_err());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeqGenerator>();
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("wh").unwrap();
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        // Original continues from 2
        assert_eq!(generator.generate().as_str(), "wh000002");

        // Clone also continues from 2 (same counter value)
        assert_eq!(cloned.generate().as_str(), "wh000002");
    }
}
