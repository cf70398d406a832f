use serde::{Deserialize, Serialize};

use super::consts;
use crate::error::{LexdraftError, Result};

/// lexdraft.toml schema - engine-wide limits and defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub cascade: CascadeConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub parties: PartiesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            max_depth: consts::cascade::MAX_DEPTH,
        }
    }
}

fn default_max_depth() -> usize {
    consts::cascade::MAX_DEPTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_regex_cache_size")]
    pub regex_cache_size: usize,
    #[serde(default = "default_max_pattern_length")]
    pub max_pattern_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            regex_cache_size: consts::validation::REGEX_CACHE_SIZE,
            max_pattern_length: consts::validation::MAX_PATTERN_LENGTH,
        }
    }
}

fn default_regex_cache_size() -> usize {
    consts::validation::REGEX_CACHE_SIZE
}

fn default_max_pattern_length() -> usize {
    consts::validation::MAX_PATTERN_LENGTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_template_cache_size")]
    pub template_cache_size: usize,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_date_format")]
    pub default_date_format: String,
    /// Show `[field]` markers for missing values in preview renders
    #[serde(default = "default_preview_placeholders")]
    pub preview_placeholders: bool,
    /// Fail on paths missing from the context instead of rendering nothing
    #[serde(default)]
    pub strict_variables: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_cache_size: consts::render::TEMPLATE_CACHE_SIZE,
            timeout_ms: consts::render::TIMEOUT_MS,
            default_date_format: consts::render::DEFAULT_DATE_FORMAT.to_string(),
            preview_placeholders: true,
            strict_variables: false,
        }
    }
}

fn default_template_cache_size() -> usize {
    consts::render::TEMPLATE_CACHE_SIZE
}

fn default_timeout_ms() -> u64 {
    consts::render::TIMEOUT_MS
}

fn default_date_format() -> String {
    consts::render::DEFAULT_DATE_FORMAT.to_string()
}

fn default_preview_placeholders() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartiesConfig {
    #[serde(default = "default_versus")]
    pub default_versus: String,
}

impl Default for PartiesConfig {
    fn default() -> Self {
        Self {
            default_versus: consts::parties::DEFAULT_VERSUS.to_string(),
        }
    }
}

fn default_versus() -> String {
    consts::parties::DEFAULT_VERSUS.to_string()
}

impl EngineConfig {
    /// Read lexdraft.toml
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| LexdraftError::ConfigNotFound {
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| LexdraftError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write lexdraft.toml
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LexdraftError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content).map_err(LexdraftError::IoError)?;

        Ok(())
    }

    /// Reject limits that would make a cache or cascade unusable
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("cascade.max_depth", self.cascade.max_depth),
            (
                "validation.regex_cache_size",
                self.validation.regex_cache_size,
            ),
            (
                "validation.max_pattern_length",
                self.validation.max_pattern_length,
            ),
            ("render.template_cache_size", self.render.template_cache_size),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(LexdraftError::ConfigInvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.cascade.max_depth, 20);
        assert_eq!(config.validation.regex_cache_size, 100);
        assert_eq!(config.validation.max_pattern_length, 200);
        assert_eq!(config.render.template_cache_size, 50);
        assert_eq!(config.render.default_date_format, "MMMM D, YYYY");
        assert_eq!(config.parties.default_versus, "v.");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[cascade]
max_depth = 5

[validation]
regex_cache_size = 10
max_pattern_length = 64

[render]
template_cache_size = 3
timeout_ms = 500
default_date_format = "MM/DD/YYYY"
preview_placeholders = false

[parties]
default_versus = "vs."
"#;
        let config = EngineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.cascade.max_depth, 5);
        assert_eq!(config.validation.max_pattern_length, 64);
        assert_eq!(config.render.template_cache_size, 3);
        assert!(!config.render.preview_placeholders);
        assert_eq!(config.parties.default_versus, "vs.");
    }

    #[test]
    fn test_zero_cache_size_is_rejected() {
        let toml = "[render]\ntemplate_cache_size = 0\n";
        let err = EngineConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, LexdraftError::ConfigInvalidValue { .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = EngineConfig::from_toml_str("[cascade\nmax_depth = 1").unwrap_err();
        assert!(matches!(err, LexdraftError::ConfigParseError(_)));
    }
}
