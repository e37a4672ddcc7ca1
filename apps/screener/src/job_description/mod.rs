//! Job Description Loader — reads the target role from YAML and carries the city-tier lists.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Key in the YAML file holding the target city tier of the role.
pub const CITY_TIER_KEY: &str = "City_Tier";

pub const DEFAULT_TIER1_CITIES: &[&str] = &[
    "Chennai",
    "Bangalore",
    "Delhi",
    "Hyderabad",
    "Kolkata",
    "Mumbai",
];

pub const DEFAULT_TIER2_CITIES: &[&str] = &["Coimbatore", "Trichy", "Madurai"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read job description {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed job description {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Job description {path} must be a mapping at the top level")]
    NotAMapping { path: PathBuf },
}

/// Reference classification of a candidate location.
/// The batch leaves classification to the model; this mirrors its rule locally.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityTier {
    Tier1,
    Tier2,
    /// Any city not listed as Tier-1 or Tier-2.
    Tier3,
}

/// The role requirements plus the city-tier reference lists.
/// Read-only once `with_city_tiers` has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescription {
    fields: Map<String, Value>,
    tier1_cities: Vec<String>,
    tier2_cities: Vec<String>,
}

impl JobDescription {
    /// Parses a YAML job description. The city-tier lists start empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ParseFailure::Yaml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::NotAMapping => ConfigError::NotAMapping {
                path: path.to_path_buf(),
            },
        })
    }

    fn from_yaml_str(content: &str) -> Result<Self, ParseFailure> {
        match serde_yaml::from_str::<Value>(content).map_err(ParseFailure::Yaml)? {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            _ => Err(ParseFailure::NotAMapping),
        }
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            tier1_cities: Vec::new(),
            tier2_cities: Vec::new(),
        }
    }

    /// Attaches the Tier-1 and Tier-2 reference lists. Everything else is Tier-3.
    pub fn with_city_tiers<I, J, S, T>(mut self, tier1: I, tier2: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.tier1_cities = tier1.into_iter().map(Into::into).collect();
        self.tier2_cities = tier2.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches the built-in Indian city-tier lists.
    pub fn with_default_city_tiers(self) -> Self {
        self.with_city_tiers(
            DEFAULT_TIER1_CITIES.iter().copied(),
            DEFAULT_TIER2_CITIES.iter().copied(),
        )
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The target tier as written in the YAML (`"Tier-1"`, `1`, ...).
    pub fn city_tier(&self) -> Option<String> {
        match self.field(CITY_TIER_KEY)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn tier1_cities(&self) -> &[String] {
        &self.tier1_cities
    }

    pub fn tier2_cities(&self) -> &[String] {
        &self.tier2_cities
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn classify_city(&self, city: &str) -> CityTier {
        let city = city.trim();
        let listed = |list: &[String]| list.iter().any(|c| c.trim().eq_ignore_ascii_case(city));
        if listed(&self.tier1_cities) {
            CityTier::Tier1
        } else if listed(&self.tier2_cities) {
            CityTier::Tier2
        } else {
            CityTier::Tier3
        }
    }

    /// The job description with both city lists merged in, as indented JSON.
    pub fn to_prompt_json(&self) -> String {
        let mut merged = self.fields.clone();
        merged.insert("Tier-1_cities".to_string(), json_list(&self.tier1_cities));
        merged.insert("Tier-2_cities".to_string(), json_list(&self.tier2_cities));
        // A map of plain JSON values always serializes.
        serde_json::to_string_pretty(&Value::Object(merged)).unwrap_or_default()
    }
}

enum ParseFailure {
    Yaml(serde_yaml::Error),
    NotAMapping,
}

fn json_list(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_YAML: &str = r#"
Job_Title: Backend Developer
Required_Skills:
  - Java
  - Spring Boot
Optional_Skills:
  - Kubernetes
Education: B.E./B.Tech in Computer Science
Experience: 3+ years
City_Tier: Tier-1
"#;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_reads_mapping() {
        let file = write_temp(SAMPLE_YAML);
        let jd = JobDescription::load(file.path()).unwrap();
        assert_eq!(
            jd.field("Job_Title").and_then(Value::as_str),
            Some("Backend Developer")
        );
        assert_eq!(jd.field("Required_Skills").unwrap().as_array().unwrap().len(), 2);
        assert_eq!(jd.city_tier().as_deref(), Some("Tier-1"));
        assert!(jd.tier1_cities().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JobDescription::load(dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_yaml_is_config_error() {
        let file = write_temp("Required_Skills: [Java, Rust\nCity_Tier: : :");
        let err = JobDescription::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_scalar_document_is_rejected() {
        let file = write_temp("just a sentence");
        let err = JobDescription::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[test]
    fn test_numeric_city_tier_renders_as_text() {
        let file = write_temp("City_Tier: 2\n");
        let jd = JobDescription::load(file.path()).unwrap();
        assert_eq!(jd.city_tier().as_deref(), Some("2"));
    }

    #[test]
    fn test_classify_city_tier3_by_exclusion() {
        let jd = JobDescription::from_fields(Map::new())
            .with_city_tiers(["Bangalore"], ["Coimbatore"]);
        assert_eq!(jd.classify_city("Bangalore"), CityTier::Tier1);
        assert_eq!(jd.classify_city("Coimbatore"), CityTier::Tier2);
        assert_eq!(jd.classify_city("Salem"), CityTier::Tier3);
    }

    #[test]
    fn test_classify_city_ignores_case_and_padding() {
        let jd = JobDescription::from_fields(Map::new()).with_default_city_tiers();
        assert_eq!(jd.classify_city("  chennai "), CityTier::Tier1);
        assert_eq!(jd.classify_city("MADURAI"), CityTier::Tier2);
        assert_eq!(jd.classify_city(""), CityTier::Tier3);
    }

    #[test]
    fn test_prompt_json_includes_city_lists() {
        let file = write_temp(SAMPLE_YAML);
        let jd = JobDescription::load(file.path())
            .unwrap()
            .with_default_city_tiers();
        let rendered: Value = serde_json::from_str(&jd.to_prompt_json()).unwrap();
        assert_eq!(rendered["Tier-1_cities"].as_array().unwrap().len(), 6);
        assert_eq!(rendered["Tier-2_cities"][0], "Coimbatore");
        assert_eq!(rendered["Job_Title"], "Backend Developer");
    }

    #[test]
    fn test_prompt_json_keeps_yaml_key_order() {
        let file = write_temp(SAMPLE_YAML);
        let jd = JobDescription::load(file.path())
            .unwrap()
            .with_default_city_tiers();
        let rendered = jd.to_prompt_json();
        let position = |key: &str| rendered.find(&format!("\"{key}\"")).unwrap();
        assert!(position("Job_Title") < position("Required_Skills"));
        assert!(position("Required_Skills") < position("Optional_Skills"));
        assert!(position("Experience") < position("City_Tier"));
        assert!(position("City_Tier") < position("Tier-1_cities"));
        assert!(position("Tier-1_cities") < position("Tier-2_cities"));
    }
}
