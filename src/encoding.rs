//! # Encoding
//!
//! Candidate solutions are 8-bit genotypes. Their textual form is an
//! 8-character bit-string, most significant bit first, and their phenotype
//! is the unsigned integer in `[0, 255]` they spell.
//!
//! ```rust
//! use bytega::encoding::{decode, encode, Genotype};
//!
//! let genotype: Genotype = "00001010".parse().unwrap();
//! assert_eq!(decode(genotype), 10);
//! assert_eq!(encode(10.7).to_string(), "00001010");
//! assert_eq!(encode(-3.0).to_string(), "00000000");
//! assert_eq!(encode(1000.0).to_string(), "11111111");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Number of bits in a genotype.
pub const GENOTYPE_BITS: usize = 8;

/// Largest phenotype a genotype can encode.
pub const DOMAIN_MAX: u8 = u8::MAX;

/// An 8-bit genotype.
///
/// Bit position `0` is the leftmost character of the bit-string form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Genotype(u8);

impl Genotype {
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns the bit at `position`, counted from the left.
    pub fn bit(self, position: usize) -> bool {
        self.0 & Self::mask(position) != 0
    }

    /// Returns a copy with the bit at `position` inverted.
    pub fn flipped(self, position: usize) -> Self {
        Self(self.0 ^ Self::mask(position))
    }

    /// Hamming distance between two genotypes.
    pub fn distance(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    fn mask(position: usize) -> u8 {
        debug_assert!(position < GENOTYPE_BITS);
        0x80 >> position
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

impl FromStr for Genotype {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != GENOTYPE_BITS || !s.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(GeneticError::InvalidGenotype(format!(
                "expected {} binary digits, got '{}'",
                GENOTYPE_BITS, s
            )));
        }
        u8::from_str_radix(s, 2)
            .map(Self)
            .map_err(|e| GeneticError::InvalidGenotype(format!("'{}': {}", s, e)))
    }
}

/// Decodes a genotype into its phenotype in `[0, 255]`.
pub fn decode(genotype: Genotype) -> u8 {
    genotype.0
}

/// Encodes a value as a genotype.
///
/// The value is clamped to `[0, 255]` and floored first, so any input is
/// accepted. NaN encodes as `0`.
pub fn encode(value: f64) -> Genotype {
    if value.is_nan() {
        return Genotype(0);
    }
    Genotype(value.clamp(0.0, f64::from(DOMAIN_MAX)).floor() as u8)
}

/// Draws a genotype uniformly from the whole domain.
pub fn random_genotype(rng: &mut RandomNumberGenerator) -> Genotype {
    Genotype(rng.gen_range(0..=DOMAIN_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_big_endian() {
        assert_eq!(decode("10000000".parse().unwrap()), 128);
        assert_eq!(decode("00000001".parse().unwrap()), 1);
        assert_eq!(decode("11111111".parse().unwrap()), 255);
    }

    #[test]
    fn test_encode_pads_to_eight_characters() {
        assert_eq!(encode(0.0).to_string(), "00000000");
        assert_eq!(encode(5.0).to_string(), "00000101");
    }

    #[test]
    fn test_encode_clamps_and_floors() {
        assert_eq!(decode(encode(255.9)), 255);
        assert_eq!(decode(encode(256.0)), 255);
        assert_eq!(decode(encode(-0.5)), 0);
        assert_eq!(decode(encode(7.99)), 7);
        assert_eq!(decode(encode(f64::NAN)), 0);
        assert_eq!(decode(encode(f64::INFINITY)), 255);
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for bad in ["", "0101", "000000000", "0000000a", "+0000001", "0000 001"] {
            assert!(
                matches!(bad.parse::<Genotype>(), Err(GeneticError::InvalidGenotype(_))),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_bit_positions_count_from_the_left() {
        let genotype: Genotype = "10000001".parse().unwrap();
        assert!(genotype.bit(0));
        assert!(!genotype.bit(1));
        assert!(genotype.bit(7));
        assert_eq!(genotype.flipped(1).to_string(), "11000001");
    }

    #[test]
    fn test_distance() {
        let a: Genotype = "11110000".parse().unwrap();
        let b: Genotype = "00001111".parse().unwrap();
        assert_eq!(a.distance(b), 8);
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn test_random_genotype_covers_domain() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let mut seen = [false; 256];
        for _ in 0..10_000 {
            seen[decode(random_genotype(&mut rng)) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
