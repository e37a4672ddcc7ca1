use tracing::warn;

use crate::llm_client::JsonCompletion;
use crate::screening::prompts::analysis_system;
use crate::screening::report::AnalysisReport;

/// Asks the model for an analysis of one resume.
///
/// Transport, auth, rate-limit, JSON and schema failures are all logged here
/// and come back as `None`; one bad candidate must not stop the batch.
pub async fn request_analysis(llm: &dyn JsonCompletion, prompt: &str) -> Option<AnalysisReport> {
    let value = match llm.call_json(prompt, &analysis_system()).await {
        Ok(value) => value,
        Err(e) => {
            warn!("An error occurred with the API call: {e}");
            return None;
        }
    };

    match AnalysisReport::from_value(value) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("Discarding analysis: {e}");
            None
        }
    }
}
