#[cfg(test)]
mod tests;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, warn};

use crate::Result;
use crate::config::Config;
use crate::extractor::{self, Document};
use crate::ranking::{self, RankedResult, ScoringWeights, ScreeningFailure};
use crate::scoring::{PreparedJob, Scorer};
use crate::skills::{self, SkillVocabulary};

/// Upper bound on resumes extracted at once. Extraction is blocking work,
/// so each resume runs on the blocking thread pool.
const DEFAULT_CONCURRENCY: usize = 4;

/// The full outcome of one screening run: scored resumes ranked by final
/// score, followed by the resumes that failed, with reasons.
#[derive(Debug, Serialize)]
pub struct ScreeningReport {
    pub job_name: String,
    pub job_skills: Vec<String>,
    pub results: Vec<RankedResult>,
    pub failures: Vec<ScreeningFailure>,
}

/// Runs the screening pipeline: extract the job description once, extract
/// and skill-match each resume independently, then score the batch.
#[derive(Debug)]
pub struct Screener {
    vocabulary: Arc<SkillVocabulary>,
    scorer: Scorer,
    weights: ScoringWeights,
    concurrency: usize,
}

/// One resume with its text and skills pulled out, waiting to be scored.
#[derive(Debug)]
struct ExtractedResume {
    name: String,
    text: String,
    skills: BTreeSet<String>,
}

impl Screener {
    #[inline]
    pub fn from_config(config: &Config) -> Result<Self> {
        let vocabulary = Arc::new(SkillVocabulary::compile(&config.skills.vocabulary)?);
        let scorer = Scorer::from_config(config)?;

        Ok(Self {
            vocabulary,
            scorer,
            weights: config.scoring.weights(),
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    #[inline]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Screen a batch of resumes against one job description.
    ///
    /// A failure extracting one resume is recorded against that resume and
    /// does not abort the rest of the batch. A failure on the job
    /// description itself is fatal, since nothing can be scored without
    /// it. Scoring runs over all surviving resumes in one pass, so
    /// semantic mode batches its embedding requests; if that pass fails,
    /// the affected resumes are reported as failures and the run still
    /// produces a report.
    #[inline]
    pub async fn screen(&self, job: Document, resumes: Vec<Document>) -> Result<ScreeningReport> {
        info!(
            "Screening {} resumes against job description '{}'",
            resumes.len(),
            job.name
        );

        let job_name = job.name.clone();

        // The job-side representation is computed once and shared
        // read-only across all resume tasks.
        let vocabulary = Arc::clone(&self.vocabulary);
        let scorer = self.scorer.clone();
        let (job_skills, prepared) =
            task::spawn_blocking(move || -> Result<(BTreeSet<String>, PreparedJob)> {
                let job_text = extractor::extract_text(&job)?;
                if job_text.trim().is_empty() {
                    warn!("Job description '{}' extracted to empty text", job.name);
                }
                let job_skills = vocabulary.extract_skills(&job_text)?;
                let prepared = scorer.prepare(&job_text)?;
                Ok((job_skills, prepared))
            })
            .await??;

        let prepared = Arc::new(prepared);

        let tasks = resumes.into_iter().enumerate().map(|(index, resume)| {
            let vocabulary = Arc::clone(&self.vocabulary);

            async move {
                let outcome =
                    task::spawn_blocking(move || extract_resume(&resume, &vocabulary)).await;
                (index, outcome)
            }
        });

        let mut outcomes: Vec<_> = stream::iter(tasks)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // Rejoin in input order so the stable tie-break in ranking stays
        // deterministic regardless of task completion order.
        outcomes.sort_by_key(|(index, _)| *index);

        let mut extracted = Vec::new();
        let mut failures = Vec::new();

        for (_, outcome) in outcomes {
            match outcome? {
                Ok(resume) => extracted.push(resume),
                Err(failure) => {
                    warn!("Resume '{}' failed: {}", failure.name, failure.reason);
                    failures.push(failure);
                }
            }
        }

        // One scoring pass over the whole batch; semantic mode chunks the
        // texts into batched embedding requests.
        let texts: Vec<String> = extracted.iter().map(|r| r.text.clone()).collect();
        let batch_prepared = Arc::clone(&prepared);
        let scores = task::spawn_blocking(move || batch_prepared.score_batch(&texts)).await?;

        let mut scored = Vec::new();
        match scores {
            Ok(scores) => {
                for (resume, similarity) in extracted.into_iter().zip(scores) {
                    scored.push(build_result(resume, similarity, &job_skills, self.weights));
                }
            }
            Err(e) => {
                warn!("Scoring pass failed: {}", e);
                for resume in extracted {
                    failures.push(ScreeningFailure {
                        name: resume.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let results = ranking::rank(scored);

        info!(
            "Scored {} resumes, {} failed",
            results.len(),
            failures.len()
        );

        Ok(ScreeningReport {
            job_name,
            job_skills: job_skills.iter().cloned().collect(),
            results,
            failures,
        })
    }
}

fn extract_resume(
    resume: &Document,
    vocabulary: &SkillVocabulary,
) -> std::result::Result<ExtractedResume, ScreeningFailure> {
    let fail = |reason: String| ScreeningFailure {
        name: resume.name.clone(),
        reason,
    };

    let text = extractor::extract_text(resume).map_err(|e| fail(e.to_string()))?;
    let skills = vocabulary
        .extract_skills(&text)
        .map_err(|e| fail(e.to_string()))?;

    Ok(ExtractedResume {
        name: resume.name.clone(),
        text,
        skills,
    })
}

fn build_result(
    resume: ExtractedResume,
    similarity: f64,
    job_skills: &BTreeSet<String>,
    weights: ScoringWeights,
) -> RankedResult {
    let skill_ratio = skills::skill_match_ratio(&resume.skills, job_skills);
    let components = ranking::aggregate(similarity, skill_ratio, weights);

    debug!(
        "Scored '{}': similarity {:.3}, skill ratio {:.3}, final {:.3}",
        resume.name, components.similarity, components.skill_ratio, components.final_score
    );

    let matched_skills: Vec<String> = job_skills.intersection(&resume.skills).cloned().collect();
    let missing_skills: Vec<String> = job_skills.difference(&resume.skills).cloned().collect();

    RankedResult {
        name: resume.name,
        components,
        matched_skills,
        missing_skills,
    }
}
