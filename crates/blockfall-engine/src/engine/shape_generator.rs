use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ShapeKind, ShapeSeedParseError};

/// Source of the shape type for each spawned piece.
///
/// The engine asks for one shape per spawn. Any `FnMut() -> ShapeKind`
/// closure is a generator, which keeps tests deterministic:
///
/// ```
/// use blockfall_engine::{GameEngine, ShapeKind};
///
/// let engine = GameEngine::with_generator(10, 20, || ShapeKind::O).unwrap();
/// assert_eq!(engine.piece().shape(), ShapeKind::O);
/// ```
pub trait ShapeGenerator {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<F> ShapeGenerator for F
where
    F: FnMut() -> ShapeKind,
{
    fn next_shape(&mut self) -> ShapeKind {
        self()
    }
}

/// Seed for deterministic shape generation.
///
/// A 128-bit value shown and parsed as 32 hex digits. The same seed always
/// yields the same sequence of shapes.
///
/// ```
/// use blockfall_engine::ShapeSeed;
///
/// let seed: ShapeSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSeed([u8; 16]);

impl ShapeSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ShapeSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for ShapeSeed {
    type Err = ShapeSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ShapeSeedParseError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for ShapeSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShapeSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `ShapeSeed` values with `rng.random()`.
impl Distribution<ShapeSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ShapeSeed(seed)
    }
}

/// Draws each shape uniformly at random from the seven kinds.
#[derive(Debug, Clone)]
pub struct RandomShapeGenerator {
    rng: Pcg32,
}

impl Default for RandomShapeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomShapeGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    ///
    /// For reproducible sequences, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: ShapeSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl ShapeGenerator for RandomShapeGenerator {
    fn next_shape(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: ShapeSeed = ShapeSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomShapeGenerator::with_seed(SEED);
        let mut b = RandomShapeGenerator::with_seed(SEED);
        for _ in 0..50 {
            assert_eq!(a.next_shape(), b.next_shape());
        }
    }

    #[test]
    fn test_generates_every_kind() {
        let mut generator = RandomShapeGenerator::with_seed(SEED);
        let mut seen = [false; ShapeKind::LEN];
        for _ in 0..500 {
            seen[generator.next_shape() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_closure_generator() {
        let mut kinds = [ShapeKind::I, ShapeKind::T].into_iter().cycle();
        let mut generator = move || kinds.next().unwrap_or(ShapeKind::O);
        assert_eq!(generator.next_shape(), ShapeKind::I);
        assert_eq!(generator.next_shape(), ShapeKind::T);
        assert_eq!(generator.next_shape(), ShapeKind::I);
    }

    #[test]
    fn test_seed_text_form() {
        assert_eq!(
            ShapeSeed::from_bytes([0; 16]).to_string(),
            "00000000000000000000000000000000"
        );
        assert_eq!(SEED.to_string().parse::<ShapeSeed>().unwrap(), SEED);
        let upper: ShapeSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(upper.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_seed_parse_errors() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "+123456789abcdef0123456789abcdef",
        ] {
            assert!(input.parse::<ShapeSeed>().is_err(), "{input:?}");
        }
        let err = "ghijklmnopqrstuvwxyzghijklmnopqr"
            .parse::<ShapeSeed>()
            .unwrap_err();
        assert!(err.to_string().contains("invalid hex seed"));
    }

    #[test]
    fn test_seed_serde() {
        let json = serde_json::to_string(&SEED).unwrap();
        assert_eq!(json, "\"123456789abcdef01122334455667788\"");
        let back: ShapeSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SEED);
        assert!(serde_json::from_str::<ShapeSeed>("\"xyz\"").is_err());
    }
}
