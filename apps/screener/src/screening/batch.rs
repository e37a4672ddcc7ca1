//! Batch Orchestrator — screens every resume in a directory, one at a time.
//!
//! Flow per file: extract_text → build_analysis_prompt → request_analysis →
//!                attach candidate name → write `<name>_report.json`.
//!
//! Every per-file result is a `FileOutcome`; none of them stops the batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::errors::ScreenError;
use crate::extraction::{extract_text, DocumentKind};
use crate::job_description::JobDescription;
use crate::llm_client::JsonCompletion;
use crate::screening::analyzer::request_analysis;
use crate::screening::prompts::build_analysis_prompt;
use crate::screening::report::CandidateReport;

pub const REPORT_SUFFIX: &str = "_report.json";

/// Terminal state of one resume.
#[derive(Debug)]
pub enum FileOutcome {
    /// Report written to this path.
    Written(PathBuf),
    /// Extraction produced no usable text.
    SkippedEmpty,
    /// The analysis call failed or returned an unusable answer.
    SkippedNoResult,
    /// Extraction or writing failed.
    Failed(ScreenError),
}

/// Counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub eligible: usize,
    pub written: usize,
    pub skipped_empty: usize,
    pub skipped_no_result: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Written(_) => self.written += 1,
            FileOutcome::SkippedEmpty => self.skipped_empty += 1,
            FileOutcome::SkippedNoResult => self.skipped_no_result += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Screens every `.pdf` / `.txt` file in `input_dir` and writes reports to `output_dir`.
///
/// Only a missing output directory that cannot be created, or an unreadable
/// input directory, is returned as an error.
pub async fn run_batch(
    job: &JobDescription,
    input_dir: &Path,
    output_dir: &Path,
    llm: &dyn JsonCompletion,
) -> Result<BatchSummary, ScreenError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| ScreenError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let resumes = list_resumes(input_dir).await?;
    info!(
        "Found {} resume(s) in {}",
        resumes.len(),
        input_dir.display()
    );

    let mut summary = BatchSummary {
        eligible: resumes.len(),
        ..Default::default()
    };

    // lowercased candidate names that already have a report from this run
    let mut written = HashSet::new();
    for path in &resumes {
        let key = candidate_name(path).to_lowercase();
        let outcome = if written.contains(&key) {
            let outcome = FileOutcome::Failed(ScreenError::DuplicateCandidate {
                candidate: candidate_name(path),
                path: path.clone(),
            });
            log_outcome(&display_name(path), &outcome);
            outcome
        } else {
            process_resume(job, path, output_dir, llm).await
        };
        if matches!(outcome, FileOutcome::Written(_)) {
            written.insert(key);
        }
        summary.record(&outcome);
    }

    Ok(summary)
}

/// Eligible files in `dir`, sorted by file name.
async fn list_resumes(dir: &Path) -> Result<Vec<PathBuf>, ScreenError> {
    let list_error = |source| ScreenError::InputDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(list_error)?;
    let mut resumes = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
        let path = entry.path();
        if DocumentKind::from_path(&path).is_some() {
            resumes.push(path);
        }
    }
    resumes.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(resumes)
}

/// Runs one resume through the pipeline and reports where it ended up.
pub async fn process_resume(
    job: &JobDescription,
    path: &Path,
    output_dir: &Path,
    llm: &dyn JsonCompletion,
) -> FileOutcome {
    let filename = display_name(path);
    info!("Processing {filename}...");

    let outcome = analyze_and_write(job, path, output_dir, llm).await;
    log_outcome(&filename, &outcome);
    outcome
}

fn log_outcome(filename: &str, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Written(report_path) => info!(
            "Successfully generated report for {filename} -> {}",
            report_path.display()
        ),
        FileOutcome::SkippedEmpty => warn!("Could not extract text from {filename}. Skipping."),
        FileOutcome::SkippedNoResult => warn!("Failed to get analysis for {filename}."),
        FileOutcome::Failed(e) => error!("An error occurred while processing {filename}: {e}"),
    }
}

async fn analyze_and_write(
    job: &JobDescription,
    path: &Path,
    output_dir: &Path,
    llm: &dyn JsonCompletion,
) -> FileOutcome {
    // PDF parsing is CPU-bound and reads the file synchronously
    let source = path.to_path_buf();
    let resume_text = match tokio::task::spawn_blocking(move || extract_text(&source)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return FileOutcome::Failed(e.into()),
        Err(e) => return FileOutcome::Failed(e.into()),
    };
    if resume_text.trim().is_empty() {
        return FileOutcome::SkippedEmpty;
    }

    let prompt = build_analysis_prompt(job, &resume_text);
    let Some(analysis) = request_analysis(llm, &prompt).await else {
        return FileOutcome::SkippedNoResult;
    };

    let candidate = candidate_name(path);
    let report_path = output_dir.join(format!("{candidate}{REPORT_SUFFIX}"));
    match write_report(&report_path, &CandidateReport::new(candidate, analysis)).await {
        Ok(()) => FileOutcome::Written(report_path),
        Err(e) => FileOutcome::Failed(e),
    }
}

async fn write_report(path: &Path, report: &CandidateReport) -> Result<(), ScreenError> {
    let bytes = report.to_pretty_json()?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ScreenError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// File name without its extension.
pub fn candidate_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
