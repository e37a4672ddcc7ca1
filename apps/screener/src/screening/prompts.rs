// All LLM prompt constants for the Screening module.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::Value;

use crate::job_description::JobDescription;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for resume analysis.
pub fn analysis_system() -> String {
    format!(
        "You are an expert IT recruiter screening resumes for roles in India. {JSON_ONLY_SYSTEM}"
    )
}

/// Example of the exact object the model must return.
pub const REPORT_SCHEMA_EXAMPLE: &str = r#"{
    "matched_required_skills": [],
    "missing_required_skills": [],
    "matched_optional_skills": [],
    "education_match": "Yes/No/Partial",
    "experience_match": "Yes/No",
    "keywords_matched": [],
    "soft_skills_match": "A brief analysis of soft skills match.",
    "resume_summary": "A 2-3 sentence summary of the resume.",
    "match_score": 0.0,
    "city_tier_match": "Yes/No/Not Applicable",
    "longest_tenure_months": 0,
    "final_score": 0
}"#;

/// Resume analysis prompt template.
/// Replace: {city_tier}, {tier1_cities}, {tier2_cities}, {job_description_json},
///          {resume_text}, {schema}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume against the provided job description for an IT role in India.
Act as an expert IT recruiter and return a JSON object with a detailed analysis.

EVALUATION CRITERIA (IMPORTANT):
1. Semantic Matching: do not just keyword match. Understand the context. If the resume lists "API development" and the job requires "REST APIs", that is a strong match.
2. Scoring Logic for 'final_score' (0-100 integer):
   * 'final_score' must summarize the overall quality of the match.
   * Stability Bonus: candidates with a longer tenure in a single job ('longest_tenure_months') are more stable and should receive a higher score.
   * Geographic Diversity Bonus: candidates from Tier-3 cities are highly valued to promote diversity. If the candidate's most recent location is a Tier-3 city (any city not in the Tier-1 or Tier-2 lists), give them a significant bonus in the score.
3. City Tier Logic: based on the candidate's most recent location in the resume, determine whether their city tier matches the tier specified in the job description ({city_tier}).
   * Tier-1 Cities: {tier1_cities}
   * Tier-2 Cities (Examples): {tier2_cities}
   * Tier-3 Cities: All other cities.

JOB DESCRIPTION:
```json
{job_description_json}
```

RESUME TEXT:
```
{resume_text}
```

YOUR RESPONSE (must be ONLY the JSON object below):
Return a single, valid JSON object structured exactly as follows:
```json
{schema}
```"#;

/// Renders the analysis prompt for one resume. Pure and deterministic.
pub fn build_analysis_prompt(job: &JobDescription, resume_text: &str) -> String {
    let city_tier = job
        .city_tier()
        .unwrap_or_else(|| "Not specified".to_string());

    let tier1 = render_list(job.tier1_cities());
    let tier2 = render_list(job.tier2_cities());
    let job_json = job.to_prompt_json();
    let quoted_tier = format!("'{city_tier}'");

    render_template(ANALYSIS_PROMPT_TEMPLATE, |name| match name {
        "city_tier" => Some(quoted_tier.as_str()),
        "tier1_cities" => Some(tier1.as_str()),
        "tier2_cities" => Some(tier2.as_str()),
        "job_description_json" => Some(job_json.as_str()),
        "resume_text" => Some(resume_text),
        "schema" => Some(REPORT_SCHEMA_EXAMPLE),
        _ => None,
    })
}

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned. Unknown names and unmatched
/// braces are copied through as-is.
fn render_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after
            .find('}')
            .and_then(|close| lookup(&after[..close]).map(|v| (v, close)));
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_list(items: &[String]) -> String {
    let values: Vec<Value> = items.iter().cloned().map(Value::String).collect();
    Value::Array(values).to_string()
}
