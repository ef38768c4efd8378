use anyhow::{Context, Result};
use console::style;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::config::{Config, SimilarityMode};
use crate::extractor::Document;
use crate::ranking::ScreeningFailure;
use crate::screener::{Screener, ScreeningReport};

/// Per-run overrides for the screen command. Anything left `None` falls
/// back to the saved configuration.
#[derive(Debug, Default)]
pub struct ScreenOptions {
    pub mode: Option<SimilarityMode>,
    pub similarity_weight: Option<f64>,
    pub skill_weight: Option<f64>,
    pub concurrency: Option<usize>,
    pub json: bool,
}

/// Run the screening pipeline over one job description and a batch of
/// resumes, then print the ranked report.
#[inline]
pub async fn run_screening(
    job_path: &Path,
    resume_paths: &[PathBuf],
    options: ScreenOptions,
) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    if let Some(mode) = options.mode {
        config.scoring.mode = mode;
    }
    if let Some(weight) = options.similarity_weight {
        config.scoring.similarity_weight = weight;
    }
    if let Some(weight) = options.skill_weight {
        config.scoring.skill_weight = weight;
    }
    config.validate().context("Invalid configuration")?;

    info!(
        "Screening with mode {} (weights {}/{})",
        config.scoring.mode, config.scoring.similarity_weight, config.scoring.skill_weight
    );

    let job = Document::from_path(job_path).context("Failed to read job description")?;

    // A resume file that cannot be read still shows up in the report as a
    // failure instead of aborting the run.
    let mut resumes = Vec::new();
    let mut read_failures = Vec::new();
    for path in resume_paths {
        match Document::from_path(path) {
            Ok(document) => resumes.push(document),
            Err(e) => read_failures.push(ScreeningFailure {
                name: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    let mut screener = Screener::from_config(&config)?;
    if let Some(concurrency) = options.concurrency {
        screener = screener.with_concurrency(concurrency);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Scoring {} resumes...", resumes.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut report = screener.screen(job, resumes).await?;
    spinner.finish_and_clear();

    report.failures.extend(read_failures);

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ScreeningReport) {
    println!(
        "{}",
        style(format!("📋 Screening Results for {}", report.job_name))
            .bold()
            .cyan()
    );

    if report.job_skills.is_empty() {
        println!("Job skills: (none found in vocabulary)");
    } else {
        println!("Job skills: {}", report.job_skills.join(", "));
    }
    println!();

    if report.results.is_empty() {
        println!("No resumes could be scored.");
    }

    for (position, result) in report.results.iter().enumerate() {
        println!(
            "{:>3}. {}  {}",
            position + 1,
            style(&result.name).bold(),
            style(format!("{:.2}", result.components.final_score)).green()
        );
        println!(
            "     similarity {:.2} | skill match {:.2}",
            result.components.similarity, result.components.skill_ratio
        );

        if !result.matched_skills.is_empty() {
            println!(
                "     matched: {}",
                style(result.matched_skills.join(", ")).green()
            );
        }
        if !result.missing_skills.is_empty() {
            println!(
                "     missing: {}",
                style(result.missing_skills.join(", ")).yellow()
            );
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("⚠ Failed documents").bold().yellow());
        for failure in &report.failures {
            println!("   {}: {}", style(&failure.name).bold(), failure.reason);
        }
    }
}
