//! Run configuration with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Schema validation via serde (`deny_unknown_fields`)
//! - Runtime semantic validation
//!
//! # Example YAML
//!
//! ```yaml
//! schema_version: "1.0"
//! duplicates: first_only
//! guard:
//!   check_finite: true
//!   max_steps: 10000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::guard::GuardConfig;
use crate::error::{RippleError, RippleResult};
use crate::pareto::DuplicatePolicy;

/// Supported schema versions.
const SUPPORTED_SCHEMA: &[&str] = &["1.0"];

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Handling of equal-cost candidates at a node.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Stop-on-error guard configuration.
    #[validate(nested)]
    #[serde(default)]
    pub guard: GuardConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl RunConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> RippleResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> RippleResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        // Poka-Yoke: validate all constraints
        config.validate()?;

        config.validate_semantic()?;

        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> RippleResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> RippleResult<()> {
        if !SUPPORTED_SCHEMA.contains(&self.schema_version.as_str()) {
            return Err(RippleError::config(format!(
                "unsupported schema version {}",
                self.schema_version
            )));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            duplicates: DuplicatePolicy::default(),
            guard: GuardConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct RunConfigBuilder {
    duplicates: Option<DuplicatePolicy>,
    max_steps: Option<u64>,
    check_finite: Option<bool>,
}

impl RunConfigBuilder {
    /// Set the duplicate policy.
    #[must_use]
    pub const fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = Some(policy);
        self
    }

    /// Cap the number of time steps.
    #[must_use]
    pub const fn max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Enable or disable the non-finite check.
    #[must_use]
    pub const fn check_finite(mut self, enabled: bool) -> Self {
        self.check_finite = Some(enabled);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> RunConfig {
        let mut config = RunConfig::default();

        if let Some(policy) = self.duplicates {
            config.duplicates = policy;
        }

        if self.max_steps.is_some() {
            config.guard.max_steps = self.max_steps;
        }

        if let Some(enabled) = self.check_finite {
            config.guard.check_finite = enabled;
        }

        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RunConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.duplicates, DuplicatePolicy::KeepAll);
        assert!(config.guard.check_finite);
        assert!(config.guard.max_steps.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = RunConfig::builder()
            .duplicates(DuplicatePolicy::FirstOnly)
            .max_steps(500)
            .check_finite(false)
            .build();

        assert_eq!(config.duplicates, DuplicatePolicy::FirstOnly);
        assert_eq!(config.guard.max_steps, Some(500));
        assert!(!config.guard.check_finite);
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r#"
schema_version: "1.0"
duplicates: first_only
guard:
  max_steps: 1000
"#;
        let config = RunConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.duplicates, DuplicatePolicy::FirstOnly);
        assert_eq!(config.guard.max_steps, Some(1000));
        assert!(config.guard.check_finite);
    }

    #[test]
    fn test_config_empty_yaml_uses_defaults() {
        let config = RunConfig::from_yaml("{}").unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_config_validation_fails_zero_steps() {
        let yaml = "guard:\n  max_steps: 0\n";
        let err = RunConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, RippleError::Validation(_)));
    }

    #[test]
    fn test_config_rejects_unknown_schema() {
        let err = RunConfig::from_yaml("schema_version: \"9.9\"\n").unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let err = RunConfig::from_yaml("seed: 42\n").unwrap_err();
        assert!(matches!(err, RippleError::YamlParse(_)));
    }

    #[test]
    fn test_config_load_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "duplicates: keep_all").unwrap();
        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.duplicates, DuplicatePolicy::KeepAll);

        assert!(RunConfig::load("/nonexistent/run.yaml").is_err());
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = RunConfig::builder().max_steps(42).build();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(RunConfig::from_yaml(&yaml).unwrap(), config);
    }
}
