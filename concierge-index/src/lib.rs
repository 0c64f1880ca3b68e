//! BM25 inverted index: tokenization, Okapi scoring, and blob persistence (§4.1).

pub mod index;
pub mod tokenizer;

pub use index::{IndexBuilder, InvertedIndex};
