//! Analysis Report — the typed shape of the model's answer and of each written report.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Upper bound of `final_score`.
pub const MAX_FINAL_SCORE: u8 = 100;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Response does not match the report schema: {0}")]
    SchemaMismatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationMatch {
    #[serde(alias = "yes", alias = "YES")]
    Yes,
    #[serde(alias = "no", alias = "NO")]
    No,
    #[serde(alias = "partial", alias = "PARTIAL")]
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceMatch {
    #[serde(alias = "yes", alias = "YES")]
    Yes,
    #[serde(alias = "no", alias = "NO")]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CityTierMatch {
    #[serde(alias = "yes", alias = "YES")]
    Yes,
    #[serde(alias = "no", alias = "NO")]
    No,
    #[serde(
        rename = "Not Applicable",
        alias = "not applicable",
        alias = "NotApplicable",
        alias = "N/A"
    )]
    NotApplicable,
}

/// One candidate's match analysis as returned by the model.
///
/// Only `match_score` and `final_score` are mandatory; the rest default to
/// empty/null when the model leaves them out. Unknown fields are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub matched_required_skills: Vec<String>,
    #[serde(default)]
    pub missing_required_skills: Vec<String>,
    #[serde(default)]
    pub matched_optional_skills: Vec<String>,
    #[serde(default)]
    pub education_match: Option<EducationMatch>,
    #[serde(default)]
    pub experience_match: Option<ExperienceMatch>,
    #[serde(default)]
    pub keywords_matched: Vec<String>,
    #[serde(default)]
    pub soft_skills_match: Option<String>,
    #[serde(default)]
    pub resume_summary: Option<String>,
    pub match_score: f64,
    #[serde(default)]
    pub city_tier_match: Option<CityTierMatch>,
    #[serde(default, deserialize_with = "de_months")]
    pub longest_tenure_months: Option<u32>,
    #[serde(deserialize_with = "de_final_score")]
    pub final_score: u8,
}

impl AnalysisReport {
    /// Decodes the model's JSON object, rejecting anything outside the schema.
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        if !value.is_object() {
            return Err(ReportError::SchemaMismatch(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        let report: AnalysisReport = serde_json::from_value(value)
            .map_err(|e| ReportError::SchemaMismatch(e.to_string()))?;
        if report.final_score > MAX_FINAL_SCORE {
            return Err(ReportError::SchemaMismatch(format!(
                "final_score {} exceeds {}",
                report.final_score, MAX_FINAL_SCORE
            )));
        }
        Ok(report)
    }
}

/// The artifact written per candidate: the analysis plus the candidate name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    #[serde(flatten)]
    pub analysis: AnalysisReport,
    pub candidate_name: String,
}

impl CandidateReport {
    pub fn new(candidate_name: impl Into<String>, analysis: AnalysisReport) -> Self {
        Self {
            analysis,
            candidate_name: candidate_name.into(),
        }
    }

    /// Pretty JSON with 4-space indentation.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }
}

/// Whole numbers arrive as integers, but some models write `36.0`.
fn whole_number<E: de::Error>(field: &str, n: f64, max: u32) -> Result<u32, E> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(max) {
        Ok(n as u32)
    } else {
        Err(E::custom(format!(
            "{field} must be a whole number between 0 and {max}, got {n}"
        )))
    }
}

fn de_months<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(|m| whole_number("longest_tenure_months", m, u32::MAX))
        .transpose()
}

fn de_final_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let score = f64::deserialize(deserializer)?;
    // the 0-100 bound is checked in `from_value`; here only the u8 range matters
    whole_number("final_score", score, u32::from(u8::MAX)).map(|s| s as u8)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
