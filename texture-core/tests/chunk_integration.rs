//! Chunking over realistic corpora

use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;
use texture_core::{
    Amount, ChunkEngine, ChunkPolicy, Content, Corpus, CorpusParams, Source, TokenizeMode,
};

const SONNET_18: &str = "Shall I compare thee to a summer's day?
Thou art more lovely and more temperate:
Rough winds do shake the darling buds of May,
And summer's lease hath all too short a date;
Sometime too hot the eye of heaven shines,
And often is his gold complexion dimm'd;";

fn tokens_of(text: &str) -> Vec<String> {
    let mut corpus = Corpus::bind(vec![("x", text)], None).unwrap();
    corpus.configure(CorpusParams::new().tokenize(TokenizeMode::On));
    match corpus.get(0).unwrap().1 {
        Content::Tokens(tokens) => tokens,
        Content::Text(_) => unreachable!(),
    }
}

#[test]
fn test_chunking_file_backed_items() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sonnet18.txt"), SONNET_18).unwrap();
    fs::write(dir.path().join("short.txt"), "So long lives this").unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());

    let policy = ChunkPolicy::chunk_size(10).unwrap();
    let mut engine = ChunkEngine::bind(Source::pattern(pattern), Some(true), policy).unwrap();
    let labels: Vec<String> = engine.iter().map(|c| c.unwrap().label).collect();

    // short.txt sorts first and is smaller than one chunk
    assert_eq!(labels[0], "short.txt");
    assert_eq!(labels[1], "sonnet18.txt_0000");
    assert_eq!(labels.len(), 1 + tokens_of(SONNET_18).len() / 10);
}

#[test]
fn test_rounded_chunks_reassemble_item() {
    let expected = tokens_of(SONNET_18);
    let policy = ChunkPolicy::builder()
        .chunk_size(Amount::Count(7))
        .rounded_size(true)
        .build()
        .unwrap();
    let mut engine = ChunkEngine::bind(vec![("s18", SONNET_18)], None, policy).unwrap();
    let rebuilt: Vec<String> = engine
        .iter()
        .flat_map(|c| c.unwrap().tokens)
        .collect();
    assert_eq!(rebuilt, expected);
}

#[test]
fn test_fractional_chunks_per_item() {
    let policy = ChunkPolicy::builder()
        .chunk_size(Amount::Fraction(0.25))
        .build()
        .unwrap();
    let texts = vec![
        ("long", SONNET_18),
        ("eight", "Thou art more lovely and more temperate too"),
    ];
    let mut engine = ChunkEngine::bind(texts, None, policy).unwrap();

    let eight = engine.get(1).unwrap();
    assert_eq!(eight.len(), 4);
    assert!(eight.iter().all(|c| c.tokens.len() == 2));

    let long = engine.get(0).unwrap();
    let size = tokens_of(SONNET_18).len() / 4;
    assert!(long.iter().all(|c| c.tokens.len() == size));
}

#[test]
fn test_engine_over_corpus_of_corpus() {
    let inner = Corpus::bind(vec![("s18", SONNET_18)], None).unwrap();
    let outer = Corpus::bind(inner, None).unwrap();
    let mut engine = ChunkEngine::new(outer, ChunkPolicy::chunk_size(5).unwrap());
    let first = engine.get(0).unwrap().remove(0);
    assert_eq!(first.label, "s18_0000");
    assert_eq!(first.tokens, vec!["shall", "i", "compare", "thee", "to"]);
}

proptest! {
    #[test]
    fn prop_rounded_chunks_cover_without_duplicates(
        words in prop::collection::vec("[a-z]{1,8}", 1..200),
        size in 1usize..40,
    ) {
        prop_assume!(size <= words.len());
        let policy = ChunkPolicy::builder()
            .chunk_size(Amount::Count(size))
            .rounded_size(true)
            .build()
            .unwrap();
        let mut engine = ChunkEngine::bind(vec![("p", words.clone())], None, policy).unwrap();
        let rebuilt: Vec<String> = engine.get(0).unwrap().into_iter().flat_map(|c| c.tokens).collect();
        prop_assert_eq!(rebuilt, words);
    }

    #[test]
    fn prop_overlap_distance_is_constant(
        words in prop::collection::vec("[a-z]{1,8}", 2..200),
        size in 2usize..40,
        overlap in 1usize..39,
    ) {
        prop_assume!(size <= words.len() && overlap < size);
        let policy = ChunkPolicy::builder()
            .chunk_size(Amount::Count(size))
            .overlap(Amount::Count(overlap))
            .build()
            .unwrap();
        let mut engine = ChunkEngine::bind(vec![("p", words)], None, policy).unwrap();
        let spans: Vec<_> = engine.get(0).unwrap().into_iter().filter_map(|c| c.span).collect();
        for pair in spans.windows(2) {
            prop_assert_eq!(pair[0].stop - pair[1].start, overlap);
        }
    }
}
