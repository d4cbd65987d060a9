//! Pairwise cosine similarity over catalog soups.

use crate::tfidf::{SparseVector, TermId, TfIdfVectorizer};
use data_loader::{Catalog, RowId};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// A catalog row and its similarity to the query row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: RowId,
    pub score: f32,
}

/// TF-IDF vectors plus the dense N×N cosine matrix.
///
/// Built once and read-only afterwards. Row `i` of the matrix belongs to
/// catalog row `i`.
#[derive(Debug)]
pub struct SimilarityIndex {
    vectorizer: TfIdfVectorizer,
    vectors: Vec<SparseVector>,
    /// Row-major, `size * size`
    matrix: Vec<f32>,
    size: usize,
}

impl SimilarityIndex {
    /// Build the index from every record's soup
    #[instrument(skip(catalog), fields(movies = catalog.len()))]
    pub fn build(catalog: &Catalog) -> Self {
        let soups: Vec<String> = catalog.records().par_iter().map(|r| r.soup()).collect();
        Self::from_documents(&soups)
    }

    /// Build from raw documents, one per row
    pub fn from_documents<S: AsRef<str> + Sync>(documents: &[S]) -> Self {
        let start = Instant::now();
        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(documents);
        let size = vectors.len();

        let mut matrix = vec![0.0f32; size * size];
        if size > 0 {
            matrix
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(i, row)| {
                    for (j, cell) in row.iter_mut().enumerate() {
                        *cell = if i == j {
                            1.0
                        } else {
                            vectors[i].dot(&vectors[j])
                        };
                    }
                });
        }

        info!(
            "Similarity index built: {} movies, {} terms in {:?}",
            size,
            vectorizer.vocabulary_len(),
            start.elapsed()
        );

        Self {
            vectorizer,
            vectors,
            matrix,
            size,
        }
    }

    /// The `n` most similar rows to `row`, excluding `row` itself
    ///
    /// Ordered by descending similarity, ties by ascending row.
    /// Empty if `row` is out of range.
    pub fn neighbors(&self, row: RowId, n: usize) -> Vec<RowId> {
        self.neighbors_with_scores(row, n)
            .into_iter()
            .map(|neighbor| neighbor.row)
            .collect()
    }

    pub fn neighbors_with_scores(&self, row: RowId, n: usize) -> Vec<Neighbor> {
        let Some(scores) = self.row_scores(row) else {
            debug!("Row {} out of range ({} movies)", row, self.size);
            return Vec::new();
        };

        let mut neighbors: Vec<Neighbor> = scores
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != row)
            .map(|(other, &score)| Neighbor { row: other, score })
            .collect();

        // Stable sort keeps ascending row order among equal scores
        neighbors.sort_by(|a, b| b.score.total_cmp(&a.score));
        neighbors.truncate(n);
        neighbors
    }

    /// Cosine similarity between two rows
    pub fn similarity(&self, a: RowId, b: RowId) -> Option<f32> {
        self.row_scores(a)?.get(b).copied()
    }

    fn row_scores(&self, row: RowId) -> Option<&[f32]> {
        (row < self.size).then(|| &self.matrix[row * self.size..(row + 1) * self.size])
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    /// Non-zero `(term, weight)` pairs of a row's vector
    pub fn term_weights(&self, row: RowId) -> Vec<(&str, f32)> {
        self.vectors
            .get(row)
            .map(|vector| {
                vector
                    .entries()
                    .iter()
                    .filter_map(|&(term, weight): &(TermId, f32)| {
                        self.vectorizer.term(term).map(|name| (name, weight))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
