//! Chunking wrapper over any [`TextCorpus`]

use super::boundary::{plan, ChunkPlan, Span};
use super::policy::ChunkPolicy;
use crate::content::{Content, TokenizeMode};
use crate::corpus::{Corpus, CorpusParams};
use crate::error::{CorpusError, Result};
use crate::source::Source;
use crate::traits::TextCorpus;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;

/// One emitted chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// `label_0000` for cut items, the item's own label otherwise
    pub label: String,
    pub tokens: Vec<String>,
    /// Index of the item the chunk came from
    pub source: usize,
    /// Token range within the item; `None` for whole or resampled items
    pub span: Option<Span>,
}

/// Cached plan and the token count it was computed for
#[derive(Debug, Clone)]
struct IndexEntry {
    token_count: usize,
    plan: ChunkPlan,
}

/// Cuts the tokenized items of a corpus into labeled chunks
///
/// The wrapped corpus always runs with tokenization on. Boundaries are
/// computed on first access to an item and cached until the policy or the
/// corpus settings change.
pub struct ChunkEngine<C: TextCorpus = Corpus> {
    corpus: C,
    policy: ChunkPolicy,
    index: Vec<Option<IndexEntry>>,
    rng: StdRng,
}

impl ChunkEngine<Corpus> {
    /// Bind a source and wrap the resulting corpus
    pub fn bind(
        source: impl Into<Source>,
        file_backed: Option<bool>,
        policy: ChunkPolicy,
    ) -> Result<Self> {
        Ok(Self::new(Corpus::bind(source, file_backed)?, policy))
    }
}

impl<C: TextCorpus> ChunkEngine<C> {
    /// Wrap a corpus, switching its tokenization on
    pub fn new(mut corpus: C, policy: ChunkPolicy) -> Self {
        corpus.configure(CorpusParams::new().tokenize(TokenizeMode::On));
        let len = corpus.len();
        Self {
            corpus,
            policy,
            index: vec![None; len],
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for upscale sampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The active policy
    pub fn policy(&self) -> &ChunkPolicy {
        &self.policy
    }

    /// Replace the policy; a different policy drops every cached boundary
    pub fn set_policy(&mut self, policy: ChunkPolicy) {
        if policy != self.policy {
            log::debug!("Chunk policy changed, clearing {} cached plans", self.cached());
            self.policy = policy;
            self.clear_index();
        }
    }

    /// Merge corpus settings and drop every cached boundary
    ///
    /// A tokenize mode other than `On` is ignored.
    pub fn configure(&mut self, mut params: CorpusParams) {
        if matches!(params.tokenize, Some(mode) if mode != TokenizeMode::On) {
            log::warn!(
                "Chunking requires tokenization; ignoring tokenize mode {:?}",
                params.tokenize
            );
            params.tokenize = None;
        }
        self.corpus.configure(params);
        self.clear_index();
    }

    /// The wrapped corpus
    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    /// Unwrap the corpus
    pub fn into_inner(self) -> C {
        self.corpus
    }

    /// Number of items (not chunks)
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    /// Returns true if the corpus has no items
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Cached plan for an item, if it has been computed
    pub fn chunk_index(&self, index: usize) -> Option<&ChunkPlan> {
        self.index.get(index)?.as_ref().map(|entry| &entry.plan)
    }

    /// All chunks of one item
    pub fn get(&mut self, index: usize) -> Result<Vec<Chunk>> {
        let (label, content) = self.corpus.process(index)?;
        let tokens = match content {
            Content::Tokens(tokens) => tokens,
            Content::Text(_) => {
                return Err(CorpusError::ContentShape {
                    label,
                    expected: "tokens",
                })
            }
        };

        let plan = self.plan_for(index, tokens.len())?;
        Ok(self.emit(index, label, tokens, plan))
    }

    /// Lazily iterate over the chunks of every item
    pub fn iter(&mut self) -> Chunks<'_, C> {
        let stop = self.corpus.len();
        Chunks {
            engine: self,
            next: 0,
            stop,
            step: 1,
            buffer: VecDeque::new(),
        }
    }

    /// Lazily iterate over the chunks of items `start..stop` by `step`
    pub fn slice(&mut self, start: usize, stop: usize, step: usize) -> Result<Chunks<'_, C>> {
        if step == 0 {
            return Err(CorpusError::config("slice step must be greater than 0"));
        }
        let stop = stop.min(self.corpus.len());
        Ok(Chunks {
            engine: self,
            next: start,
            stop,
            step,
            buffer: VecDeque::new(),
        })
    }

    fn plan_for(&mut self, index: usize, token_count: usize) -> Result<ChunkPlan> {
        if index >= self.index.len() {
            self.index.resize(index + 1, None);
        }
        if let Some(entry) = &self.index[index] {
            if entry.token_count == token_count {
                return Ok(entry.plan.clone());
            }
        }

        let plan = plan(&self.policy, token_count)?;
        log::debug!("Computed chunk plan for item {index} ({token_count} tokens)");
        self.index[index] = Some(IndexEntry {
            token_count,
            plan: plan.clone(),
        });
        Ok(plan)
    }

    fn emit(
        &mut self,
        index: usize,
        label: String,
        tokens: Vec<String>,
        plan: ChunkPlan,
    ) -> Vec<Chunk> {
        match plan {
            ChunkPlan::Skip => Vec::new(),
            ChunkPlan::Whole => vec![Chunk {
                label,
                tokens,
                source: index,
                span: None,
            }],
            ChunkPlan::Upscale { size } => {
                let tokens = upscale(&tokens, size, &mut self.rng);
                vec![Chunk {
                    label,
                    tokens,
                    source: index,
                    span: None,
                }]
            }
            ChunkPlan::Spans(spans) => spans
                .into_iter()
                .enumerate()
                .map(|(n, span)| Chunk {
                    label: format!("{label}_{n:04}"),
                    tokens: tokens[span.start..span.stop].to_vec(),
                    source: index,
                    span: Some(span),
                })
                .collect(),
        }
    }

    fn cached(&self) -> usize {
        self.index.iter().filter(|entry| entry.is_some()).count()
    }

    fn clear_index(&mut self) {
        self.index = vec![None; self.corpus.len()];
    }
}

/// Resample `pool` to exactly `size` tokens
///
/// The pool is repeated until it holds more than `size` tokens, then
/// `size` of them are drawn without regard to order.
fn upscale(pool: &[String], size: usize, rng: &mut StdRng) -> Vec<String> {
    let repeats = size / pool.len() + 1;
    let repeated: Vec<&String> = pool.iter().cycle().take(pool.len() * repeats).collect();
    repeated
        .choose_multiple(rng, size)
        .map(|token| (*token).clone())
        .collect()
}

/// Lazy iterator over chunks, one item at a time
pub struct Chunks<'a, C: TextCorpus> {
    engine: &'a mut ChunkEngine<C>,
    next: usize,
    stop: usize,
    step: usize,
    buffer: VecDeque<Chunk>,
}

impl<C: TextCorpus> Iterator for Chunks<'_, C> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.buffer.pop_front() {
                return Some(Ok(chunk));
            }
            if self.next >= self.stop {
                return None;
            }
            let index = self.next;
            self.next = self.next.saturating_add(self.step);
            match self.engine.get(index) {
                Ok(chunks) => self.buffer.extend(chunks),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
