//! # readalike Similarity
//!
//! A weighted multi-field similarity engine for catalog records.
//!
//! This crate blends per-field text similarity scores into a single
//! ranked list of read-alike recommendations, with explainable
//! per-field breakdowns.
//!
//! ## Features
//!
//! - **Weighted Blending**: Synopsis, title, and author scores combined by configurable weights
//! - **Vector-Space Synopsis Scoring**: TF-IDF cosine similarity over the synopsis corpus
//! - **Edit-Distance Field Scoring**: Case-insensitive Levenshtein percent similarity for short fields
//! - **Explainability**: Per-field score breakdown on every result
//! - **Atomic Snapshots**: Concurrent queries stay safe across dataset replacement
//!
//! ## Example
//!
//! ```rust
//! use readalike_core::{Dataset, Record, RecordId};
//! use readalike_similarity::{Recommender, RecommenderConfig};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new("b1", "Dune", "Frank Herbert", "A desert planet saga"),
//!     Record::new("b2", "Dune Messiah", "Frank Herbert", "A desert planet sequel"),
//!     Record::new("b3", "The Hobbit", "J. R. R. Tolkien", "A journey to the mountain"),
//! ]);
//!
//! let engine = Recommender::new(dataset, RecommenderConfig::default());
//! let results = engine.recommend(&RecordId::from("b1")).unwrap();
//!
//! assert_eq!(results[0].id, RecordId::from("b2"));
//! for result in &results {
//!     println!("{}: {:.1} (synopsis {:.1})", result.id, result.score, result.fields.synopsis);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Dataset   │────>│   TF-IDF    │────>│  Snapshot   │
//! │  (records)  │     │   (index)   │     │  (atomic)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐           │
//!                      │   Scoring   │<──────────┘
//!                      │ (per field) │
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │    Rank     │
//!                      │   (top-k)   │
//!                      └─────────────┘
//! ```

pub mod engine;
pub mod error;
pub mod explain;
pub mod rank;
pub mod weights;

// Re-export main types for convenience
pub use engine::{Recommender, RecommenderConfig, SynopsisScorer};
pub use error::{Error, Result};
pub use explain::{Recommendation, RecommendationStats};
pub use rank::rank;
pub use weights::{FieldScores, FieldWeights};
