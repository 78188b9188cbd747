//! Cutting tokenized items into fixed-size, optionally overlapping chunks

pub mod boundary;
mod engine;
mod policy;

pub use boundary::{ChunkPlan, Span};
pub use engine::{Chunk, ChunkEngine, Chunks};
pub use policy::{Amount, ChunkPolicy, ChunkPolicyBuilder, Sizing};
