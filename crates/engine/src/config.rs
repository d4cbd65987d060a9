//! Engine configuration.

use scoring::ScoringWeights;

/// Matching thresholds and scoring weights
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Minimum fuzzy ratio for a recommendation query
    pub recommend_cutoff: f64,
    /// Minimum fuzzy ratio for a comparison title
    pub compare_cutoff: f64,
    /// Fuzzy candidates offered for disambiguation
    pub compare_max_candidates: usize,
    /// Suggestions attached to a comparison winner
    pub suggestion_count: usize,
    /// Distinct movies a comparison needs
    pub min_compare_titles: usize,
    pub scoring: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recommend_cutoff: 0.6,
            compare_cutoff: 0.4,
            compare_max_candidates: 3,
            suggestion_count: 5,
            min_compare_titles: 2,
            scoring: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_recommend_cutoff(mut self, cutoff: f64) -> Self {
        self.recommend_cutoff = cutoff;
        self
    }

    pub fn with_compare_cutoff(mut self, cutoff: f64) -> Self {
        self.compare_cutoff = cutoff;
        self
    }

    pub fn with_compare_max_candidates(mut self, count: usize) -> Self {
        self.compare_max_candidates = count;
        self
    }

    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count;
        self
    }

    /// Never below 1: ranking an empty set has no winner
    pub fn with_min_compare_titles(mut self, count: usize) -> Self {
        self.min_compare_titles = count.max(1);
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringWeights) -> Self {
        self.scoring = scoring;
        self
    }
}
