use std::path::PathBuf;

use crate::llm_client::LlmConfig;

const DEFAULT_JOB_DESCRIPTION: &str = "job_description.yml";
const DEFAULT_RESUMES_DIR: &str = "resumes/";
const DEFAULT_REPORTS_DIR: &str = "reports/";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Runtime configuration loaded from environment variables.
/// Every value has a default; a missing API key only fails at the first LLM call.
#[derive(Debug, Clone)]
pub struct Config {
    pub job_description_path: PathBuf,
    pub resumes_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub llm: LlmConfig,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config {
            job_description_path: env_or("JOB_DESCRIPTION_PATH", DEFAULT_JOB_DESCRIPTION).into(),
            resumes_dir: env_or("RESUMES_DIR", DEFAULT_RESUMES_DIR).into(),
            reports_dir: env_or("REPORTS_DIR", DEFAULT_REPORTS_DIR).into(),
            llm: LlmConfig {
                api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
                model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
            },
            rust_log: env_or("RUST_LOG", "info"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
