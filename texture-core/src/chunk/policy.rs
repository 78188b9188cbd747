//! Chunk sizing policy

use crate::error::{CorpusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A size given either as a token count or as a fraction of a base length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Absolute number of tokens
    Count(usize),
    /// Fraction of the base length, in `[0, 1]`
    Fraction(f64),
}

impl Amount {
    /// Resolve against a base length, flooring fractions
    pub fn resolve(self, base: usize) -> usize {
        match self {
            Amount::Count(n) => n,
            Amount::Fraction(f) => (base as f64 * f).floor() as usize,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Amount::Count(n) => n == 0,
            Amount::Fraction(f) => f == 0.0,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Count(0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Count(n) => write!(f, "{n}"),
            Amount::Fraction(x) => write!(f, "{x:?}"),
        }
    }
}

/// Parses `"4"` as a count and `"0.25"` as a fraction
impl FromStr for Amount {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains('.') {
            s.parse::<f64>()
                .map(Amount::Fraction)
                .map_err(|e| CorpusError::config(format!("invalid fraction '{s}': {e}")))
        } else {
            s.parse::<usize>()
                .map(Amount::Count)
                .map_err(|e| CorpusError::config(format!("invalid count '{s}': {e}")))
        }
    }
}

/// The single active sizing rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Tokens per chunk, absolute or relative to the item length
    ChunkSize(Amount),
    /// Number of chunks per item
    NChunks(usize),
}

/// How items are cut into chunks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkPolicy {
    sizing: Sizing,
    overlap: Amount,
    rounded_size: bool,
    min_size: bool,
    upscale: bool,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            sizing: Sizing::ChunkSize(Amount::Fraction(1.0)),
            overlap: Amount::Count(0),
            rounded_size: false,
            min_size: false,
            upscale: false,
        }
    }
}

impl ChunkPolicy {
    /// Creates a new builder with no sizing rule
    pub fn builder() -> ChunkPolicyBuilder {
        ChunkPolicyBuilder::new()
    }

    /// Fixed-size chunks with no overlap
    pub fn chunk_size(size: usize) -> Result<Self> {
        Self::builder().chunk_size(Amount::Count(size)).build()
    }

    /// A builder pre-filled with this policy
    pub fn to_builder(&self) -> ChunkPolicyBuilder {
        let (chunk_size, n_chunks) = match self.sizing {
            Sizing::ChunkSize(amount) => (Some(amount), None),
            Sizing::NChunks(n) => (None, Some(n)),
        };
        ChunkPolicyBuilder {
            chunk_size,
            n_chunks,
            overlap: self.overlap,
            rounded_size: self.rounded_size,
            min_size: self.min_size,
            upscale: self.upscale,
        }
    }

    /// The active sizing rule
    pub fn sizing(&self) -> Sizing {
        self.sizing
    }

    /// Overlap between adjacent chunks
    pub fn overlap(&self) -> Amount {
        self.overlap
    }

    /// Whether leftover tokens are spread over the chunks
    pub fn rounded_size(&self) -> bool {
        self.rounded_size
    }

    /// Whether items smaller than one chunk are dropped
    pub fn min_size(&self) -> bool {
        self.min_size
    }

    /// Whether items smaller than one chunk are resampled up to size
    pub fn upscale(&self) -> bool {
        self.upscale
    }
}

/// Builder for [`ChunkPolicy`]; `build` validates everything that can be
/// checked without looking at any item
#[derive(Debug, Clone, Default)]
pub struct ChunkPolicyBuilder {
    chunk_size: Option<Amount>,
    n_chunks: Option<usize>,
    overlap: Amount,
    rounded_size: bool,
    min_size: bool,
    upscale: bool,
}

impl ChunkPolicyBuilder {
    /// Creates a new builder with no sizing rule
    pub fn new() -> Self {
        Self::default()
    }

    /// Size each chunk by token count or fraction of the item
    pub fn chunk_size(mut self, size: Amount) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Cut each item into this many chunks
    pub fn n_chunks(mut self, n: usize) -> Self {
        self.n_chunks = Some(n);
        self
    }

    /// Drop any previously set sizing rule
    pub fn clear_sizing(mut self) -> Self {
        self.chunk_size = None;
        self.n_chunks = None;
        self
    }

    /// Overlap by token count or fraction of the chunk size
    pub fn overlap(mut self, overlap: Amount) -> Self {
        self.overlap = overlap;
        self
    }

    /// Spread leftover tokens over the chunks instead of dropping them
    pub fn rounded_size(mut self, rounded: bool) -> Self {
        self.rounded_size = rounded;
        self
    }

    /// Drop items smaller than one chunk
    pub fn min_size(mut self, min_size: bool) -> Self {
        self.min_size = min_size;
        self
    }

    /// Resample items smaller than one chunk up to the chunk size
    pub fn upscale(mut self, upscale: bool) -> Self {
        self.upscale = upscale;
        self
    }

    /// Builds the policy, validating parameters
    pub fn build(self) -> Result<ChunkPolicy> {
        let sizing = match (self.chunk_size, self.n_chunks) {
            (Some(_), Some(_)) => {
                return Err(CorpusError::config(
                    "set either chunk_size or n_chunks, not both",
                ))
            }
            (None, None) => {
                return Err(CorpusError::config(
                    "one of chunk_size or n_chunks must be set",
                ))
            }
            (Some(size), None) => {
                check_fraction("chunk_size", size, true)?;
                if size.is_zero() {
                    return Err(CorpusError::config("chunk_size must be greater than 0"));
                }
                Sizing::ChunkSize(size)
            }
            (None, Some(0)) => {
                return Err(CorpusError::config("n_chunks must be greater than 0"));
            }
            (None, Some(n)) => Sizing::NChunks(n),
        };

        check_fraction("overlap", self.overlap, false)?;
        if let (Sizing::ChunkSize(Amount::Count(size)), Amount::Count(overlap)) =
            (sizing, self.overlap)
        {
            if overlap >= size {
                return Err(CorpusError::config(format!(
                    "overlap ({overlap}) must be less than chunk_size ({size})"
                )));
            }
        }

        Ok(ChunkPolicy {
            sizing,
            overlap: self.overlap,
            rounded_size: self.rounded_size,
            min_size: self.min_size,
            upscale: self.upscale,
        })
    }
}

fn check_fraction(name: &str, amount: Amount, inclusive_one: bool) -> Result<()> {
    if let Amount::Fraction(f) = amount {
        let in_range = f >= 0.0 && if inclusive_one { f <= 1.0 } else { f < 1.0 };
        if !in_range {
            return Err(CorpusError::config(format!(
                "{name} fraction {f} is out of range"
            )));
        }
    }
    Ok(())
}
