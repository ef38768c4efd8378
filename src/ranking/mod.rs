
use serde::Serialize;
use std::cmp::Ordering;

/// Weights applied when combining the similarity and skill-match
/// sub-scores. They are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub similarity: f64,
    pub skill_match: f64,
}

impl Default for ScoringWeights {
    #[inline]
    fn default() -> Self {
        Self {
            similarity: 0.6,
            skill_match: 0.4,
        }
    }
}

/// Per-resume sub-scores and the weighted final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreComponents {
    pub similarity: f64,
    pub skill_ratio: f64,
    pub final_score: f64,
}

/// One successfully scored resume.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub name: String,
    #[serde(flatten)]
    pub components: ScoreComponents,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// A resume that could not be scored. It stays in the report, flagged with
/// the reason, instead of being silently dropped.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningFailure {
    pub name: String,
    pub reason: String,
}

#[inline]
pub fn aggregate(similarity: f64, skill_ratio: f64, weights: ScoringWeights) -> ScoreComponents {
    ScoreComponents {
        similarity,
        skill_ratio,
        final_score: weights.similarity * similarity + weights.skill_match * skill_ratio,
    }
}

/// Sort results by final score, descending. The sort is stable, so resumes
/// with equal scores keep their input order.
#[inline]
pub fn rank(mut results: Vec<RankedResult>) -> Vec<RankedResult> {
    results.sort_by(|a, b| {
        b.components
            .final_score
            .partial_cmp(&a.components.final_score)
            .unwrap_or(Ordering::Equal)
    });
    results
}
