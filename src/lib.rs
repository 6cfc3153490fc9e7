//! # readalike
//!
//! An in-memory read-alike recommendation engine.
//!
//! readalike ranks the records of a catalog by their similarity to a
//! selected record, blending edit-distance scores on short fields with
//! TF-IDF cosine similarity on synopses.
//!
//! ## Quick Start
//!
//! ```rust
//! use readalike::prelude::*;
//!
//! // Build a dataset
//! let dataset = Dataset::new(vec![
//!     Record::new("b1", "Dune", "Frank Herbert", "A desert planet saga"),
//!     Record::new("b2", "Dune Messiah", "Frank Herbert", "A desert planet sequel"),
//!     Record::new("b3", "The Hobbit", "J. R. R. Tolkien", "A journey to the mountain"),
//! ]);
//!
//! // Create the engine; the synopsis index is built up front
//! let engine = Recommender::new(dataset, RecommenderConfig::default());
//!
//! // Ask for read-alikes
//! let results = engine.recommend(&RecordId::from("b1")).unwrap();
//! assert_eq!(results[0].id, RecordId::from("b2"));
//!
//! // Every result carries its per-field breakdown
//! for result in &results {
//!     println!(
//!         "{}: total {:.1} (synopsis {:.1}, title {:.1}, author {:.1})",
//!         result.id,
//!         result.score,
//!         result.fields.synopsis,
//!         result.fields.title,
//!         result.fields.author,
//!     );
//! }
//! ```
//!
//! ## Crate Structure
//!
//! readalike is composed of two crates:
//!
//! - [`readalike-core`](https://docs.rs/readalike-core) - Records, tokenization, Levenshtein and TF-IDF scoring
//! - [`readalike-similarity`](https://docs.rs/readalike-similarity) - Weighted blending, ranking, and the engine
//!
//! ## Features
//!
//! - **Weighted Multi-Field Scoring**: Synopsis, title, and author blended by configurable weights
//! - **TF-IDF Synopsis Index**: Smoothed-idf vectors with cosine similarity, built once per dataset
//! - **Edit-Distance Scoring**: Case-insensitive Levenshtein percent similarity
//! - **Explainable Results**: Per-field score breakdown on every recommendation
//! - **Concurrent Queries**: Immutable snapshots with atomic dataset replacement

// Re-export core types
pub use readalike_core::{levenshtein, normalize, Dataset, Record, RecordId, TfIdfIndex, Tokenizer};

// Re-export the similarity engine
pub use readalike_similarity::{
    rank, Error, FieldScores, FieldWeights, Recommendation, RecommendationStats, Recommender,
    RecommenderConfig, Result, SynopsisScorer,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Dataset, Error, FieldScores, FieldWeights, Recommendation, RecommendationStats,
        Record, RecordId, Recommender, RecommenderConfig, Result, SynopsisScorer, TfIdfIndex,
        Tokenizer,
    };
}
