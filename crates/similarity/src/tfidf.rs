//! TF-IDF vectorizer.
//!
//! ## Weighting
//! - tf: raw count of the term in the document
//! - idf: `ln((1 + N) / (1 + df)) + 1` (smoothed, never zero)
//! - every vector is scaled to unit L2 norm, so a dot product is a cosine

use crate::tokenizer::tokenize;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Column of a term in the vocabulary
pub type TermId = u32;

/// Sparse weight vector, entries sorted by `TermId`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Build from `(term, weight)` pairs; sorts them by term
    pub fn from_entries(mut entries: Vec<(TermId, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(term, _)| term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }
}

/// Vocabulary plus IDF weights fitted on a document set
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, TermId>,
    /// Terms in column order (sorted)
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl TfIdfVectorizer {
    /// Learn vocabulary and document frequencies
    pub fn fit<S: AsRef<str> + Sync>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();
        Self::fit_tokens(&tokenized)
    }

    fn fit_tokens(tokenized: &[Vec<String>]) -> Self {
        let terms: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let vocabulary: HashMap<String, TermId> = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column as TermId))
            .collect();

        let mut df = vec![0u32; terms.len()];
        for tokens in tokenized {
            let unique: BTreeSet<TermId> = tokens
                .iter()
                .filter_map(|token| vocabulary.get(token).copied())
                .collect();
            for term in unique {
                df[term as usize] += 1;
            }
        }

        let n = tokenized.len() as f32;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        Self {
            vocabulary,
            terms,
            idf,
        }
    }

    /// Unit-length TF-IDF vector of a document; unknown terms are ignored
    pub fn transform(&self, document: &str) -> SparseVector {
        self.vectorize(&tokenize(document))
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for token in tokens {
            if let Some(&term) = self.vocabulary.get(token) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }
        let mut vector = SparseVector::from_entries(
            counts
                .into_iter()
                .map(|(term, tf)| (term, tf as f32 * self.idf[term as usize]))
                .collect(),
        );
        vector.normalize();
        vector
    }

    /// Fit on `documents` and return one vector per document, in order
    pub fn fit_transform<S: AsRef<str> + Sync>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();
        let vectorizer = Self::fit_tokens(&tokenized);
        let vectors = tokenized
            .par_iter()
            .map(|tokens| vectorizer.vectorize(tokens))
            .collect();
        (vectorizer, vectors)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.terms.len()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn idf(&self, id: TermId) -> Option<f32> {
        self.idf.get(id as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCS: [&str; 3] = [
        "space Horror SciFi Ridley Scott",
        "space marines Action SciFi James Cameron",
        "jungle Action John McTiernan",
    ];

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = TfIdfVectorizer::fit(&DOCS);
        assert_eq!(vectorizer.term(0), Some("action"));
        assert_eq!(vectorizer.vocabulary_len(), 12);
        assert!(vectorizer.term_id("the").is_none());
    }

    #[test]
    fn test_idf_downweights_common_terms() {
        let vectorizer = TfIdfVectorizer::fit(&DOCS);
        let common = vectorizer.idf(vectorizer.term_id("scifi").unwrap()).unwrap();
        let rare = vectorizer.idf(vectorizer.term_id("jungle").unwrap()).unwrap();
        assert!(rare > common);
        // N = 3, df = 2: ln(4/3) + 1
        assert!((common - ((4.0f32 / 3.0).ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let (_, vectors) = TfIdfVectorizer::fit_transform(&DOCS);
        for vector in &vectors {
            assert!((vector.norm() - 1.0).abs() < 1e-5);
        }
        assert!((vectors[0].dot(&vectors[0]) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_document_gives_zero_vector() {
        let (vectorizer, vectors) = TfIdfVectorizer::fit_transform(&["", "space"]);
        assert!(vectors[0].is_empty());
        assert_eq!(vectors[0].norm(), 0.0);
        assert!(vectorizer.transform("unknown words").is_empty());
    }

    #[test]
    fn test_dot_is_symmetric() {
        let (_, vectors) = TfIdfVectorizer::fit_transform(&DOCS);
        assert_eq!(vectors[0].dot(&vectors[1]), vectors[1].dot(&vectors[0]));
        assert_eq!(vectors[0].dot(&vectors[2]), 0.0);
    }
}
