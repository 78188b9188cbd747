//! Chunk boundary computation
//!
//! Everything here is a pure function of an item's token count and the
//! policy, so a cached plan stays valid until either of them changes.

use super::policy::{ChunkPolicy, Sizing};
use crate::error::{CorpusError, Result};

/// Half-open token range `[start, stop)` of one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub stop: usize,
}

impl Span {
    /// Number of tokens covered
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    /// Returns true if the span covers no tokens
    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }
}

/// What to emit for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkPlan {
    /// Emit nothing
    Skip,
    /// Emit the item unchanged under its own label
    Whole,
    /// Emit one resampled chunk of `size` tokens under the item's label
    Upscale { size: usize },
    /// Emit one labeled chunk per span
    Spans(Vec<Span>),
}

/// Chunk and overlap sizes resolved for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub chunk_size: usize,
    pub overlap: usize,
}

/// Resolve the policy's sizes against an item of `token_count` tokens
pub fn resolve(policy: &ChunkPolicy, token_count: usize) -> Result<Resolved> {
    let chunk_size = match policy.sizing() {
        Sizing::NChunks(n) => token_count / n,
        Sizing::ChunkSize(amount) => amount.resolve(token_count),
    };
    if chunk_size == 0 {
        return Err(CorpusError::config(format!(
            "resolved chunk size is 0 for an item of {token_count} tokens"
        )));
    }

    let overlap = policy.overlap().resolve(chunk_size);
    if overlap >= chunk_size {
        return Err(CorpusError::config(format!(
            "overlap ({overlap}) must be less than chunk size ({chunk_size})"
        )));
    }

    Ok(Resolved {
        chunk_size,
        overlap,
    })
}

/// Decide how an item of `token_count` tokens is chunked
pub fn plan(policy: &ChunkPolicy, token_count: usize) -> Result<ChunkPlan> {
    if token_count == 0 {
        return Ok(ChunkPlan::Skip);
    }

    let Resolved {
        chunk_size,
        overlap,
    } = resolve(policy, token_count)?;

    if chunk_size > token_count {
        return Ok(if policy.min_size() {
            ChunkPlan::Skip
        } else if policy.upscale() {
            ChunkPlan::Upscale { size: chunk_size }
        } else {
            ChunkPlan::Whole
        });
    }

    Ok(ChunkPlan::Spans(spans(
        token_count,
        chunk_size,
        overlap,
        policy.rounded_size(),
    )))
}

/// Sliding-window spans over `token_count` tokens
///
/// Requires `0 < chunk_size <= token_count` and `overlap < chunk_size`.
/// With `rounded`, the tokens left after the last full window are handed
/// out so that every chunk grows by `leftover / n` and the first
/// `leftover % n` chunks grow by one more. The distance between adjacent
/// chunks is unchanged and the last chunk ends on the final token.
pub fn spans(token_count: usize, chunk_size: usize, overlap: usize, rounded: bool) -> Vec<Span> {
    let step = chunk_size - overlap;
    let mut spans: Vec<Span> = (0..=token_count - chunk_size)
        .step_by(step)
        .map(|start| Span {
            start,
            stop: start + chunk_size,
        })
        .collect();

    if rounded {
        let n = spans.len();
        let leftover = token_count - spans[n - 1].stop;
        let (each, extra) = (leftover / n, leftover % n);
        for (k, span) in spans.iter_mut().enumerate() {
            span.start += k * each + k.min(extra);
            span.stop += (k + 1) * each + (k + 1).min(extra);
        }
    }

    spans
}
