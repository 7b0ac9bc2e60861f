use std::sync::Arc;

use crate::core::{
    features::extract_features,
    predictor::Predictor,
    scoring::{ScoringMode, Scorer},
};
use crate::models::{Profile, ScoredMentor};

/// How many mentors each scoring strategy handled in one ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingStats {
    pub learned: usize,
    pub coefficients: usize,
    pub fallback: usize,
    pub degraded: usize,
}

impl RankingStats {
    fn record(&mut self, mode: ScoringMode) {
        match mode {
            ScoringMode::Learned => self.learned += 1,
            ScoringMode::Coefficients => self.coefficients += 1,
            ScoringMode::Fallback => self.fallback += 1,
            ScoringMode::Degraded => self.degraded += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.learned + self.coefficients + self.fallback + self.degraded
    }
}

/// Result of ranking mentors for one student
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub mentors: Vec<ScoredMentor>,
    pub stats: RankingStats,
}

/// Ranks candidate mentors for a student
///
/// # Pipeline
/// 1. Feature extraction for each (student, mentor) pair
/// 2. Scoring, falling back per mentor when the predictor fails
/// 3. Stable sort by score, descending
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    scorer: Arc<Scorer>,
}

impl Ranker {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }

    pub fn with_predictor(predictor: Predictor) -> Self {
        Self::new(Scorer::new(predictor))
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Score every mentor and order them best first
    ///
    /// Every input mentor appears in the output exactly once, as a copy
    /// carrying its `matchScore`. Mentors with equal scores keep their input
    /// order.
    ///
    /// # Arguments
    /// * `student` - The student being matched
    /// * `mentors` - Candidate mentors, in caller order
    pub fn rank(&self, student: &Profile, mentors: &[Profile]) -> RankedResult {
        let mut stats = RankingStats::default();

        let mut scored: Vec<ScoredMentor> = mentors
            .iter()
            .map(|mentor| {
                let features = extract_features(student, mentor);
                let outcome = self.scorer.score(&features);
                stats.record(outcome.mode);

                let mut mentor = mentor.record().clone();
                // A stale score from the client must not shadow the new one
                mentor.remove("matchScore");

                ScoredMentor {
                    mentor,
                    match_score: outcome.score,
                }
            })
            .collect();

        // sort_by is stable, so ties keep input order
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        RankedResult {
            mentors: scored,
            stats,
        }
    }
}
