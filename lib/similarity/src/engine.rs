//! The recommendation engine: snapshot management and query scoring.

use std::sync::Arc;
use std::time::Instant;

use ahash::AHashSet;

use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use readalike_core::{levenshtein, Dataset, Record, RecordId, TfIdfIndex, Tokenizer};

use crate::error::{Error, Result};
use crate::explain::Recommendation;
use crate::rank::rank;
use crate::weights::{FieldScores, FieldWeights};

fn default_limit() -> usize {
    5
}

fn default_min_token_len() -> usize {
    1
}

/// Scorer used for the synopsis field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynopsisScorer {
    /// TF-IDF cosine over the synopsis corpus
    #[default]
    Vector,
    /// Levenshtein percent similarity against the selected synopsis
    Lexical,
}

/// Configuration for a [`Recommender`].
///
/// Tokenization settings (`min_token_len`, `stop_words`) apply to the
/// synopsis index and take effect when a snapshot is built; weights
/// and limit apply at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Field blend weights
    #[serde(default)]
    pub weights: FieldWeights,
    /// Result count for [`Recommender::recommend`]
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Minimum token length for the synopsis index
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    /// Terms dropped from the synopsis corpus before indexing
    #[serde(default)]
    pub stop_words: AHashSet<String>,
    /// Scorer for the synopsis field
    #[serde(default)]
    pub synopsis_scorer: SynopsisScorer,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            limit: default_limit(),
            min_token_len: default_min_token_len(),
            stop_words: AHashSet::new(),
            synopsis_scorer: SynopsisScorer::default(),
        }
    }
}

/// One dataset generation with its derived synopsis index.
///
/// Snapshots are immutable once published; queries hold an `Arc` to
/// the generation they started on and are unaffected by later swaps.
struct Snapshot {
    dataset: Dataset,
    index: TfIdfIndex,
}

/// Read-alike recommendation engine.
///
/// Holds an immutable dataset snapshot plus a TF-IDF index built
/// eagerly over the synopsis corpus. All methods take `&self`;
/// concurrent queries are safe, and [`Recommender::replace_dataset`]
/// publishes a freshly built snapshot atomically. Writers serialize
/// on `writer`, held across build-and-swap, so one mutation can
/// never publish over another; readers never touch it.
pub struct Recommender {
    config: RecommenderConfig,
    snapshot: RwLock<Arc<Snapshot>>,
    writer: Mutex<()>,
}

impl Recommender {
    /// Build an engine over `dataset`. The synopsis index is built
    /// here, not lazily on first query.
    pub fn new(dataset: Dataset, config: RecommenderConfig) -> Self {
        let snapshot = Arc::new(Self::build_snapshot(dataset, &config));
        Self {
            config,
            snapshot: RwLock::new(snapshot),
            writer: Mutex::new(()),
        }
    }

    /// Engine over `dataset` with default configuration.
    pub fn with_defaults(dataset: Dataset) -> Self {
        Self::new(dataset, RecommenderConfig::default())
    }

    fn build_snapshot(dataset: Dataset, config: &RecommenderConfig) -> Snapshot {
        let index = match config.synopsis_scorer {
            SynopsisScorer::Vector => {
                let started = Instant::now();

                let tokenizer = Tokenizer::new()
                    .with_min_token_len(config.min_token_len)
                    .with_stop_words(config.stop_words.iter().cloned());
                let corpus: Vec<&str> = dataset.iter().map(|r| r.synopsis.as_str()).collect();
                let index = TfIdfIndex::build(&corpus, &tokenizer);

                info!(
                    "built synopsis index: {} documents, {} terms in {:?}",
                    index.len(),
                    index.vocab_size(),
                    started.elapsed()
                );

                index
            }
            // lexical scoring never reads the index
            SynopsisScorer::Lexical => TfIdfIndex::default(),
        };

        Snapshot { dataset, index }
    }

    /// Engine configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Number of records in the current snapshot.
    #[must_use]
    pub fn count(&self) -> usize {
        self.snapshot.read().dataset.len()
    }

    /// Whether the current snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.read().dataset.is_empty()
    }

    /// Fetch a record from the current snapshot, for presentation.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.snapshot.read().dataset.get(id).cloned()
    }

    /// Replace the dataset. The new index is built before the swap,
    /// so readers only ever observe complete snapshots; queries
    /// already running continue on the generation they started with.
    pub fn replace_dataset(&self, dataset: Dataset) {
        let _writer = self.writer.lock();
        let next = Arc::new(Self::build_snapshot(dataset, &self.config));
        *self.snapshot.write() = next;
    }

    /// Re-derive the index from the current dataset, applying the
    /// configured tokenization. Identical content yields an
    /// equivalent index; readers keep the generation they hold until
    /// the swap.
    ///
    /// The writer lock is held from the dataset read through the
    /// swap, so a concurrent [`Recommender::replace_dataset`] cannot
    /// land in between and be published over with stale data.
    pub fn rebuild_index(&self) {
        let _writer = self.writer.lock();
        let dataset = self.snapshot.read().dataset.clone();
        let next = Arc::new(Self::build_snapshot(dataset, &self.config));
        *self.snapshot.write() = next;
    }

    /// Recommend records similar to `selected`, using the configured
    /// default limit.
    pub fn recommend(&self, selected: &RecordId) -> Result<Vec<Recommendation>> {
        self.recommend_top(selected, self.config.limit)
    }

    /// Recommend the `limit` records most similar to `selected`.
    pub fn recommend_top(&self, selected: &RecordId, limit: usize) -> Result<Vec<Recommendation>> {
        self.recommend_with(selected, limit, &self.config.weights)
    }

    /// Recommend with one-off weights, overriding the configured
    /// blend. Weights are applied as given; call
    /// [`FieldWeights::validate`] first if totals must stay on the
    /// percent scale.
    pub fn recommend_with(
        &self,
        selected: &RecordId,
        limit: usize,
        weights: &FieldWeights,
    ) -> Result<Vec<Recommendation>> {
        // Reject bad limits before any scoring work.
        if limit == 0 {
            return Err(Error::InvalidLimit(limit));
        }

        // Queries run lock-free on their own generation.
        let snapshot = Arc::clone(&*self.snapshot.read());

        let selected_pos = snapshot
            .dataset
            .position(selected)
            .ok_or_else(|| Error::RecordNotFound(selected.to_string()))?;

        let records = snapshot.dataset.records();
        let selected_record = &records[selected_pos];

        // Vector mode scores the whole corpus in one pass; lexical
        // mode compares synopses pairwise inside the scoring loop.
        let synopsis_sims: Option<Vec<f64>> = match self.config.synopsis_scorer {
            SynopsisScorer::Vector => Some(snapshot.index.similarity_to_all(selected_pos)),
            SynopsisScorer::Lexical => None,
        };

        let scored: Vec<Recommendation> = records
            .par_iter()
            .enumerate()
            .map(|(pos, record)| {
                let synopsis = match &synopsis_sims {
                    Some(sims) => {
                        (sims.get(pos).copied().unwrap_or(0.0) * 100.0).clamp(0.0, 100.0)
                    }
                    None => levenshtein::similarity(&record.synopsis, &selected_record.synopsis),
                };
                let fields = FieldScores {
                    synopsis,
                    title: levenshtein::similarity(&record.title, &selected_record.title),
                    author: levenshtein::similarity(&record.author, &selected_record.author),
                };
                Recommendation {
                    id: record.id.clone(),
                    score: weights.combine(&fields),
                    fields,
                }
            })
            .collect();

        let results = rank(scored, selected, limit)?;

        debug!(
            "query {}: scored {} candidates, returned {}",
            selected,
            records.len().saturating_sub(1),
            results.len()
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            Record::new("a", "Dune", "Frank Herbert", "A desert planet saga"),
            Record::new("b", "Dune Messiah", "Frank Herbert", "A desert planet sequel"),
            Record::new("c", "The Hobbit", "J. R. R. Tolkien", "A journey to the mountain"),
        ])
    }

    fn ids(results: &[Recommendation]) -> Vec<String> {
        results.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_recommend_orders_by_blended_score() {
        let engine = Recommender::with_defaults(sample_dataset());
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        assert_eq!(ids(&results), vec!["b", "c"]);
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_recommend_excludes_selected() {
        let engine = Recommender::with_defaults(sample_dataset());
        let results = engine.recommend(&RecordId::from("b")).unwrap();
        assert!(!results.iter().any(|r| r.id == RecordId::from("b")));
    }

    #[test]
    fn test_recommend_unknown_id() {
        let engine = Recommender::with_defaults(sample_dataset());
        let err = engine.recommend(&RecordId::from("zzz")).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound(_)));
    }

    #[test]
    fn test_recommend_zero_limit() {
        let engine = Recommender::with_defaults(sample_dataset());
        let err = engine
            .recommend_top(&RecordId::from("a"), 0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLimit(0)));
    }

    #[test]
    fn test_recommend_respects_configured_limit() {
        let config = RecommenderConfig {
            limit: 1,
            ..RecommenderConfig::default()
        };
        let engine = Recommender::new(sample_dataset(), config);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_score_is_weighted_blend_of_fields() {
        let engine = Recommender::with_defaults(sample_dataset());
        let weights = engine.config().weights;
        for result in engine.recommend(&RecordId::from("a")).unwrap() {
            let expected = weights.combine(&result.fields);
            assert!((result.score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_identical_records_score_hundred_per_field() {
        let dataset = Dataset::new(vec![
            Record::new("a", "Dune", "Frank Herbert", "A desert planet saga"),
            Record::new("twin", "Dune", "Frank Herbert", "A desert planet saga"),
        ]);
        let engine = Recommender::with_defaults(dataset);
        let results = engine.recommend(&RecordId::from("a")).unwrap();

        let twin = &results[0];
        assert!((twin.fields.title - 100.0).abs() < 1e-9);
        assert!((twin.fields.author - 100.0).abs() < 1e-9);
        assert!((twin.fields.synopsis - 100.0).abs() < 1e-6);
        assert!((twin.score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_fields_score_zero() {
        let dataset = Dataset::new(vec![
            Record::new("a", "Dune", "", "A desert planet saga"),
            Record::new("b", "Dune Messiah", "", "A desert planet sequel"),
        ]);
        let engine = Recommender::with_defaults(dataset);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        assert_eq!(results[0].fields.author, 0.0);
    }

    #[test]
    fn test_lexical_scorer_mode() {
        let config = RecommenderConfig {
            synopsis_scorer: SynopsisScorer::Lexical,
            ..RecommenderConfig::default()
        };
        let dataset = Dataset::new(vec![
            Record::new("a", "Dune", "Frank Herbert", "A desert planet saga"),
            Record::new("b", "Dune Messiah", "Frank Herbert", "A DESERT PLANET SAGA"),
        ]);
        let engine = Recommender::new(dataset, config);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        // lexical scoring is case-insensitive edit distance
        assert!((results[0].fields.synopsis - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommend_with_overrides_weights() {
        let dataset = Dataset::new(vec![
            // b matches a's title, c matches a's synopsis
            Record::new("a", "Dune", "", "ancient prophecy in the sand"),
            Record::new("b", "Dune", "", "completely unrelated text"),
            Record::new("c", "Zzzz", "", "ancient prophecy in the sand"),
        ]);
        let engine = Recommender::with_defaults(dataset);

        let title_heavy = FieldWeights::new(0.0, 1.0, 0.0);
        let results = engine
            .recommend_with(&RecordId::from("a"), 2, &title_heavy)
            .unwrap();
        assert_eq!(results[0].id, RecordId::from("b"));

        let synopsis_heavy = FieldWeights::new(1.0, 0.0, 0.0);
        let results = engine
            .recommend_with(&RecordId::from("a"), 2, &synopsis_heavy)
            .unwrap();
        assert_eq!(results[0].id, RecordId::from("c"));
    }

    #[test]
    fn test_min_token_len_filters_index() {
        let config = RecommenderConfig {
            min_token_len: 10,
            ..RecommenderConfig::default()
        };
        let dataset = Dataset::new(vec![
            Record::new("a", "Dune", "", "a desert planet saga"),
            Record::new("b", "Hobbit", "", "a desert planet saga"),
        ]);
        let engine = Recommender::new(dataset, config);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        // every token is shorter than 10 chars, so the corpus is empty
        assert_eq!(results[0].fields.synopsis, 0.0);
    }

    #[test]
    fn test_stop_words_remove_shared_terms() {
        let config = RecommenderConfig {
            stop_words: ["desert"].iter().map(|s| s.to_string()).collect(),
            ..RecommenderConfig::default()
        };
        let dataset = Dataset::new(vec![
            Record::new("a", "Dune", "", "desert"),
            Record::new("b", "Hobbit", "", "desert"),
        ]);
        let engine = Recommender::new(dataset, config);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        assert_eq!(results[0].fields.synopsis, 0.0);
    }

    #[test]
    fn test_empty_dataset_reports_not_found() {
        let engine = Recommender::with_defaults(Dataset::default());
        let err = engine.recommend(&RecordId::from("a")).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound(_)));
    }

    #[test]
    fn test_single_record_returns_no_candidates() {
        let dataset = Dataset::new(vec![Record::new("a", "Dune", "", "saga")]);
        let engine = Recommender::with_defaults(dataset);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_synopsis_corpus_still_ranks_by_title() {
        let dataset = Dataset::new(vec![
            Record::new("a", "Dune", "", ""),
            Record::new("b", "Dune Messiah", "", ""),
            Record::new("c", "Watership Down", "", ""),
        ]);
        let engine = Recommender::with_defaults(dataset);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        assert_eq!(results[0].id, RecordId::from("b"));
        assert_eq!(results[0].fields.synopsis, 0.0);
    }

    #[test]
    fn test_replace_dataset_swaps_snapshot() {
        let engine = Recommender::with_defaults(sample_dataset());
        assert_eq!(engine.count(), 3);

        engine.replace_dataset(Dataset::new(vec![
            Record::new("x", "Emma", "Jane Austen", "a match-making comedy"),
            Record::new("y", "Persuasion", "Jane Austen", "a second-chance romance"),
        ]));

        assert_eq!(engine.count(), 2);
        assert!(engine.get(&RecordId::from("a")).is_none());
        let results = engine.recommend(&RecordId::from("x")).unwrap();
        assert_eq!(ids(&results), vec!["y"]);
    }

    #[test]
    fn test_concurrent_rebuild_never_reverts_a_replace() {
        // big enough that the rebuild is still running when the
        // replacement arrives
        let big: Dataset = (0..5_000)
            .map(|i| {
                Record::new(
                    i as u64,
                    format!("Book {}", i),
                    "Author Name",
                    "a long desert planet saga with many recurring words",
                )
            })
            .collect();
        let engine = Arc::new(Recommender::with_defaults(big));

        let rebuilder = {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.rebuild_index())
        };
        std::thread::sleep(std::time::Duration::from_millis(5));
        engine.replace_dataset(Dataset::new(vec![Record::new(
            "only", "Dune", "Frank Herbert", "saga",
        )]));
        rebuilder.join().unwrap();

        // whichever writer ran last, the replacement must survive
        assert_eq!(engine.count(), 1);
        assert!(engine.get(&RecordId::from("only")).is_some());
    }

    #[test]
    fn test_lexical_mode_ignores_index_settings() {
        // tokenization config only shapes the vector index, which
        // lexical scoring never consults
        let config = RecommenderConfig {
            synopsis_scorer: SynopsisScorer::Lexical,
            min_token_len: 50,
            stop_words: ["desert"].iter().map(|s| s.to_string()).collect(),
            ..RecommenderConfig::default()
        };
        let dataset = Dataset::new(vec![
            Record::new("a", "Dune", "", "a desert planet saga"),
            Record::new("b", "Dune Messiah", "", "a desert planet saga"),
        ]);
        let engine = Recommender::new(dataset, config);
        let results = engine.recommend(&RecordId::from("a")).unwrap();
        assert!((results[0].fields.synopsis - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_config_stop_words_serde_round_trip() {
        let config = RecommenderConfig {
            stop_words: ["the", "a"].iter().map(|s| s.to_string()).collect(),
            ..RecommenderConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: RecommenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stop_words, config.stop_words);

        let config: RecommenderConfig = serde_json::from_str("{}").unwrap();
        assert!(config.stop_words.is_empty());
    }

    #[test]
    fn test_rebuild_index_is_equivalent() {
        let engine = Recommender::with_defaults(sample_dataset());
        let before = engine.recommend(&RecordId::from("a")).unwrap();
        engine.rebuild_index();
        let after = engine.recommend(&RecordId::from("a")).unwrap();
        assert_eq!(ids(&before), ids(&after));
        for (x, y) in before.iter().zip(after.iter()) {
            assert_eq!(x.score, y.score);
        }
    }

    #[test]
    fn test_get_returns_metadata() {
        let record = Record::new("a", "Dune", "Frank Herbert", "saga")
            .with_metadata(serde_json::json!({"isbn": "9780441013593"}));
        let engine = Recommender::with_defaults(Dataset::new(vec![record]));

        let fetched = engine.get(&RecordId::from("a")).unwrap();
        assert_eq!(fetched.metadata.unwrap()["isbn"], "9780441013593");
    }

    #[test]
    fn test_repeat_queries_are_deterministic() {
        let engine = Recommender::with_defaults(sample_dataset());
        let first = engine.recommend(&RecordId::from("a")).unwrap();
        let second = engine.recommend(&RecordId::from("a")).unwrap();
        assert_eq!(ids(&first), ids(&second));
        for (x, y) in first.iter().zip(second.iter()) {
            assert_eq!(x.score, y.score);
        }
    }
}
