use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use resume_screener::Result;
use resume_screener::commands::{ScreenOptions, run_screening};
use resume_screener::config::{SimilarityMode, run_interactive_config, show_config};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Screens candidate resumes against a job description and ranks them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank a batch of resumes against one job description
    Screen {
        /// Path to the job description (PDF or DOCX)
        job: PathBuf,
        /// Paths to one or more resumes (PDF or DOCX)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,
        /// Similarity strategy: "lexical" or "semantic"
        #[arg(long, value_parser = parse_mode)]
        mode: Option<SimilarityMode>,
        /// Weight for the similarity sub-score
        #[arg(long)]
        similarity_weight: Option<f64>,
        /// Weight for the skill-match sub-score
        #[arg(long)]
        skill_weight: Option<f64>,
        /// Maximum number of resumes processed at once
        #[arg(long)]
        concurrency: Option<usize>,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Configure scoring mode, weights, and Ollama connection
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn parse_mode(value: &str) -> std::result::Result<SimilarityMode, String> {
    SimilarityMode::from_str(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            job,
            resumes,
            mode,
            similarity_weight,
            skill_weight,
            concurrency,
            json,
        } => {
            run_screening(
                &job,
                &resumes,
                ScreenOptions {
                    mode,
                    similarity_weight,
                    skill_weight,
                    concurrency,
                    json,
                },
            )
            .await?;
        }
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
    }

    Ok(())
}
