use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScreenError>;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Extraction error: {0}")]
    Extraction(#[from] extractor::ExtractionError),

    #[error("Skill matching error: {0}")]
    Skills(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod extractor;
pub mod ranking;
pub mod scoring;
pub mod screener;
pub mod skills;
