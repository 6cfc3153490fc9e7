//! TF-IDF vector-space index with cosine similarity.
//!
//! Documents are embedded as L2-normalized sparse TF-IDF vectors, so
//! cosine similarity reduces to a sparse dot product. The index is
//! built once per corpus and is read-only afterwards.

use std::cmp::Ordering;

use ahash::{AHashMap, AHashSet};

use crate::text::Tokenizer;

/// Inverse document frequency with add-one smoothing:
/// `ln((1 + N) / (1 + df)) + 1`. Smoothing keeps every weight
/// positive and defined even for terms present in all documents.
fn smoothed_idf(doc_count: usize, doc_freq: usize) -> f64 {
    ((1.0 + doc_count as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

/// TF-IDF index over a text corpus, one document per record.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    /// Term to column in the weight space
    vocab: AHashMap<String, usize>,
    /// Smoothed inverse document frequency per column
    idf: Vec<f64>,
    /// One L2-normalized sparse vector per document, column-sorted
    rows: Vec<Vec<(usize, f64)>>,
}

impl TfIdfIndex {
    /// Build the index over `corpus`, tokenizing each document with
    /// `tokenizer`. Document positions in the index match positions
    /// in `corpus`. An empty corpus yields an empty index.
    pub fn build<S: AsRef<str>>(corpus: &[S], tokenizer: &Tokenizer) -> Self {
        let docs: Vec<Vec<String>> = corpus
            .iter()
            .map(|text| tokenizer.tokenize(text.as_ref()))
            .collect();

        let mut doc_freq: AHashMap<&str, usize> = AHashMap::new();
        for tokens in &docs {
            let unique: AHashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Sorted vocabulary keeps column assignment deterministic
        // regardless of hash-map iteration order.
        let mut terms: Vec<&str> = doc_freq.keys().copied().collect();
        terms.sort_unstable();

        let vocab: AHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(col, &term)| (term.to_string(), col))
            .collect();

        let idf: Vec<f64> = terms
            .iter()
            .map(|&term| smoothed_idf(docs.len(), doc_freq[term]))
            .collect();

        let rows: Vec<Vec<(usize, f64)>> = docs
            .iter()
            .map(|tokens| {
                let mut counts: AHashMap<usize, f64> = AHashMap::new();
                for token in tokens {
                    if let Some(&col) = vocab.get(token.as_str()) {
                        *counts.entry(col).or_insert(0.0) += 1.0;
                    }
                }

                let mut row: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(col, tf)| (col, tf * idf[col]))
                    .collect();
                row.sort_unstable_by_key(|&(col, _)| col);

                let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, weight) in &mut row {
                        *weight /= norm;
                    }
                }
                row
            })
            .collect();

        Self { vocab, idf, rows }
    }

    /// Number of indexed documents.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the index holds no documents.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct terms in the vocabulary.
    #[inline]
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Smoothed inverse document frequency of a term, if indexed.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocab.get(term).map(|&col| self.idf[col])
    }

    /// Cosine similarity of document `doc` against every document in
    /// the corpus, in corpus order. A document with a non-zero vector
    /// scores 1.0 against itself; a document that produced no tokens
    /// has a zero vector and scores 0.0 against everything, itself
    /// included. Returns an empty vector if `doc` is out of range.
    #[must_use]
    pub fn similarity_to_all(&self, doc: usize) -> Vec<f64> {
        match self.rows.get(doc) {
            Some(query) => self.rows.iter().map(|row| sparse_dot(query, row)).collect(),
            None => Vec::new(),
        }
    }

    /// Cosine similarity between two documents, 0.0 if either index
    /// is out of range.
    #[must_use]
    pub fn similarity(&self, a: usize, b: usize) -> f64 {
        match (self.rows.get(a), self.rows.get(b)) {
            (Some(x), Some(y)) => sparse_dot(x, y),
            _ => 0.0,
        }
    }
}

/// Dot product of two column-sorted sparse vectors.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut sum = 0.0;
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    sum
}
