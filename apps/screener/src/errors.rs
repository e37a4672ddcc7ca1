use std::path::PathBuf;

use thiserror::Error;

use crate::extraction::ExtractionError;

/// Batch-level error type.
///
/// The first two variants abort a batch before any resume is touched; the rest
/// are contained to a single resume and reported through `FileOutcome::Failed`.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot list input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report for candidate {candidate} already written this run; skipping {path}")]
    DuplicateCandidate { candidate: String, path: PathBuf },

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cannot write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
