
pub mod lexical;
pub mod ollama;

use std::collections::HashMap;
use tracing::debug;

use crate::config::{Config, SimilarityMode};
use crate::{Result, ScreenError};

pub use ollama::OllamaClient;

/// Computes a similarity in [0, 1] between the job description and each
/// resume, using the configured strategy.
#[derive(Debug, Clone)]
pub struct Scorer {
    mode: SimilarityMode,
    client: Option<OllamaClient>,
}

/// The job-description side of the comparison, computed once per batch and
/// reused for every resume. For semantic mode this holds the cached JD
/// embedding, so the model is invoked exactly once for the job text.
#[derive(Debug)]
pub enum PreparedJob {
    Lexical {
        term_counts: HashMap<String, u32>,
    },
    Semantic {
        client: OllamaClient,
        embedding: Vec<f32>,
    },
}

impl Scorer {
    #[inline]
    pub fn from_config(config: &Config) -> Result<Self> {
        let mode = config.scoring.mode;
        let client = match mode {
            SimilarityMode::Lexical => None,
            SimilarityMode::Semantic => Some(
                OllamaClient::new(&config.ollama)
                    .map_err(|e| ScreenError::Embedding(e.to_string()))?,
            ),
        };

        Ok(Self { mode, client })
    }

    /// Precompute the job-description representation for a batch.
    #[inline]
    pub fn prepare(&self, job_text: &str) -> Result<PreparedJob> {
        match (&self.mode, &self.client) {
            (SimilarityMode::Lexical, _) => {
                let term_counts = lexical::term_frequencies(job_text);
                debug!(
                    "Prepared lexical job vector with {} distinct terms",
                    term_counts.len()
                );
                Ok(PreparedJob::Lexical { term_counts })
            }
            (SimilarityMode::Semantic, Some(client)) => {
                let embedding = client
                    .embed(job_text)
                    .map_err(|e| ScreenError::Embedding(e.to_string()))?;
                debug!(
                    "Prepared semantic job embedding with {} dimensions",
                    embedding.len()
                );
                Ok(PreparedJob::Semantic {
                    client: client.clone(),
                    embedding,
                })
            }
            (SimilarityMode::Semantic, None) => Err(ScreenError::Embedding(
                "semantic mode requires an Ollama client".to_string(),
            )),
        }
    }
}

impl PreparedJob {
    /// Score one resume text against the prepared job description.
    #[inline]
    pub fn score(&self, resume_text: &str) -> Result<f64> {
        let similarity = match self {
            Self::Lexical { term_counts } => {
                lexical::cosine(term_counts, &lexical::term_frequencies(resume_text))
            }
            Self::Semantic { client, embedding } => {
                let resume_embedding = client
                    .embed(resume_text)
                    .map_err(|e| ScreenError::Embedding(e.to_string()))?;
                cosine_similarity(embedding, &resume_embedding)?
            }
        };

        // Cosine over non-negative term counts stays in [0, 1]; embedding
        // cosine can dip slightly negative, so clamp for a stable contract.
        Ok(similarity.clamp(0.0, 1.0))
    }

    /// Score a whole batch of resume texts against the prepared job
    /// description. In semantic mode the texts are embedded through the
    /// client's batched API, chunked by the configured batch size.
    #[inline]
    pub fn score_batch(&self, resume_texts: &[String]) -> Result<Vec<f64>> {
        match self {
            Self::Lexical { .. } => resume_texts.iter().map(|text| self.score(text)).collect(),
            Self::Semantic { client, embedding } => {
                let resume_embeddings = client
                    .embed_batch(resume_texts)
                    .map_err(|e| ScreenError::Embedding(e.to_string()))?;

                resume_embeddings
                    .iter()
                    .map(|resume_embedding| {
                        Ok(cosine_similarity(embedding, resume_embedding)?.clamp(0.0, 1.0))
                    })
                    .collect()
            }
        }
    }
}

/// Cosine similarity between two dense vectors of equal dimension. Zero
/// when either vector has zero magnitude.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ScreenError::Embedding(format!(
            "embedding dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}
