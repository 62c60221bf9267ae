use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies the kind of each newly spawned piece.
///
/// The default source picks uniformly among the 7 kinds using a seeded
/// PCG32 generator, so a [`PieceSeed`] fully determines the sequence.
/// [`PieceGenerator::cycle`] repeats a fixed sequence instead, which is
/// handy for scripted play and tests.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceGenerator, PieceKind};
///
/// let mut generator = PieceGenerator::cycle(&[PieceKind::I, PieceKind::O]);
/// assert_eq!(generator.next_kind(), PieceKind::I);
/// assert_eq!(generator.next_kind(), PieceKind::O);
/// assert_eq!(generator.next_kind(), PieceKind::I);
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    source: Source,
}

#[derive(Debug, Clone)]
enum Source {
    Random { seed: PieceSeed, rng: Pcg32 },
    Cycle { kinds: Vec<PieceKind>, next: usize },
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a uniform random generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            source: Source::Random {
                seed,
                rng: Pcg32::from_seed(seed.0),
            },
        }
    }

    /// Creates a generator that repeats `kinds` in order forever.
    ///
    /// An empty slice cycles through [`PieceKind::ALL`].
    #[must_use]
    pub fn cycle(kinds: &[PieceKind]) -> Self {
        let kinds = if kinds.is_empty() {
            PieceKind::ALL.to_vec()
        } else {
            kinds.to_vec()
        };
        Self {
            source: Source::Cycle { kinds, next: 0 },
        }
    }

    /// Returns the seed of a random generator, or `None` for a cycle.
    #[must_use]
    pub fn seed(&self) -> Option<PieceSeed> {
        match &self.source {
            Source::Random { seed, .. } => Some(*seed),
            Source::Cycle { .. } => None,
        }
    }

    /// Draws the kind of the next piece.
    pub fn next_kind(&mut self) -> PieceKind {
        match &mut self.source {
            Source::Random { rng, .. } => rng.random(),
            Source::Cycle { kinds, next } => {
                let kind = kinds[*next];
                *next = (*next + 1) % kinds.len();
                kind
            }
        }
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces, enabling:
///
/// - Reproducible gameplay for debugging
/// - Replaying a simulation from its report
/// - Deterministic testing
///
/// Seeds are written as 32 hexadecimal characters, both by [`fmt::Display`]
/// and by serde.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceGenerator, PieceSeed};
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: PieceSeed = rand::rng().random();
///
/// // Two generators with the same seed draw the same pieces
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// assert_eq!(a.next_kind(), b.next_kind());
///
/// // Seeds round-trip through their text form
/// let parsed: PieceSeed = seed.to_string().parse()?;
/// assert_eq!(parsed, seed);
/// # Ok::<(), stackfall_engine::ParsePieceSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

/// Error returned when a seed string is not 32 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    InvalidDigit(#[error(not(source))] String),
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        // `from_str_radix` alone would also accept a leading `+`.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::InvalidDigit(s.to_owned()));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidDigit(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
