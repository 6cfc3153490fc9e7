//! # readalike Core
//!
//! Core library for the readalike recommendation engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Record`] - A catalog item with scored text fields and display metadata
//! - [`Dataset`] - An ordered, immutable snapshot of records
//! - [`Tokenizer`] - Lowercase alphanumeric tokenization with stop words
//! - [`TfIdfIndex`] - TF-IDF vector-space index with cosine similarity
//! - [`levenshtein`] - Edit distance and percent similarity scoring
//!
//! ## Example
//!
//! ```rust
//! use readalike_core::{levenshtein, Dataset, Record, TfIdfIndex, Tokenizer};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new("b1", "Dune", "Frank Herbert", "A desert planet saga"),
//!     Record::new("b2", "Dune Messiah", "Frank Herbert", "A desert planet sequel"),
//! ]);
//!
//! // Edit-distance similarity on titles, percent scale
//! let title_score = levenshtein::similarity("Dune", "Dune Messiah");
//! assert!(title_score > 0.0 && title_score < 100.0);
//!
//! // Cosine similarity on synopses
//! let corpus: Vec<&str> = dataset.iter().map(|r| r.synopsis.as_str()).collect();
//! let index = TfIdfIndex::build(&corpus, &Tokenizer::new());
//! let sims = index.similarity_to_all(0);
//! assert!((sims[0] - 1.0).abs() < 1e-9);
//! ```

pub mod levenshtein;
pub mod record;
pub mod text;
pub mod tfidf;

pub use record::{Dataset, Record, RecordId};
pub use text::{normalize, Tokenizer};
pub use tfidf::TfIdfIndex;
