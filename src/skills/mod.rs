
use fancy_regex::Regex;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::{Result, ScreenError};

/// Built-in skill terms used when the configuration does not override the
/// vocabulary.
const DEFAULT_TERMS: &[&str] = &[
    // Languages
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "go",
    "c++",
    "c#",
    "ruby",
    "kotlin",
    "swift",
    "sql",
    // Web
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "spring",
    "rest",
    "graphql",
    // Infrastructure
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "linux",
    "git",
    "jenkins",
    "ci/cd",
    // Data
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "kafka",
    "spark",
    "machine learning",
    "deep learning",
    "pandas",
    "tensorflow",
    "pytorch",
    // Practices
    "agile",
    "scrum",
    "tdd",
    "microservices",
];

#[inline]
pub fn default_vocabulary() -> Vec<String> {
    DEFAULT_TERMS.iter().map(|t| (*t).to_string()).collect()
}

/// A fixed, ordered set of skill terms with precompiled matchers.
///
/// Matching is case-insensitive and whole-word on both ends, so "java" does
/// not match inside "javascript". `+` and `#` count as word characters so
/// terms like "c++" and "c#" keep their boundaries.
#[derive(Debug)]
pub struct SkillVocabulary {
    entries: Vec<SkillPattern>,
}

#[derive(Debug)]
struct SkillPattern {
    term: String,
    pattern: Regex,
}

impl SkillVocabulary {
    /// Compile a vocabulary from a list of terms. Terms are trimmed and
    /// de-duplicated case-insensitively, keeping first-occurrence order.
    #[inline]
    pub fn compile<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() || !seen.insert(term.to_lowercase()) {
                continue;
            }

            let pattern = format!(r"(?i)(?<![\w+#]){}(?![\w+#])", fancy_regex::escape(term));
            let pattern = Regex::new(&pattern).map_err(|e| {
                ScreenError::Skills(format!("invalid pattern for term '{term}': {e}"))
            })?;

            entries.push(SkillPattern {
                term: term.to_string(),
                pattern,
            });
        }

        debug!("Compiled skill vocabulary with {} terms", entries.len());
        Ok(Self { entries })
    }

    /// The subset of vocabulary terms present in `text`, as canonical
    /// vocabulary spellings.
    #[inline]
    pub fn extract_skills(&self, text: &str) -> Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();

        for entry in &self.entries {
            let matched = entry.pattern.is_match(text).map_err(|e| {
                ScreenError::Skills(format!("match failed for term '{}': {e}", entry.term))
            })?;

            if matched {
                found.insert(entry.term.clone());
            }
        }

        Ok(found)
    }

    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fraction of job skills present in the resume, 0.0 when the job side is
/// empty.
#[inline]
pub fn skill_match_ratio(resume_skills: &BTreeSet<String>, job_skills: &BTreeSet<String>) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }

    let matched = resume_skills.intersection(job_skills).count();
    matched as f64 / job_skills.len() as f64
}
