use crate::error::GeneratorError;
use crate::Generator;
use pinhole_core::shortcode::{ALPHABET, MAX_LENGTH, MIN_LENGTH};
use pinhole_core::ShortCode;
use rand::Rng;

pub const DEFAULT_LENGTH: usize = 6;

/// Draws every character independently and uniformly from the 62-character
/// alphanumeric alphabet.
///
/// With the default length of 6 there are 62^6 (about 5.68e10) possible
/// codes. Uniqueness is not guaranteed; callers check for collisions.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }

    /// Creates a generator producing codes of `length` characters.
    pub fn with_length(length: usize) -> Result<Self, GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(GeneratorError::InvalidLength {
                length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn produces_valid_six_character_codes() {
        let generator = RandomGenerator::new();

        for _ in 0..1_000 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), 6);
            // the generated code must pass the same validation as custom codes
            assert!(ShortCode::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn codes_vary() {
        let generator = RandomGenerator::new();
        let codes: HashSet<_> = (0..100).map(|_| generator.generate()).collect();
        // 100 draws from 62^6 codes colliding more than once is practically impossible
        assert!(codes.len() >= 99);
    }

    #[test]
    fn draws_from_the_whole_alphabet() {
        let generator = RandomGenerator::with_length(20).unwrap();
        let seen: HashSet<char> = (0..500)
            .flat_map(|_| generator.generate().as_str().chars().collect::<Vec<_>>())
            .collect();
        // 10_000 draws over 62 symbols hit every one with overwhelming probability
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn length_is_bounded_by_code_rules() {
        assert!(RandomGenerator::with_length(2).is_err());
        assert!(RandomGenerator::with_length(21).is_err());
        assert_eq!(RandomGenerator::with_length(3).unwrap().length(), 3);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
