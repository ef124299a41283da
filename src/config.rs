//! Configuration management for project-board.
//!
//! Supports layered configuration: defaults → working directory → user → env

use crate::domain::{Validatable, Value};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the per-directory configuration file
pub const LOCAL_CONFIG_FILE: &str = ".project-board.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl BoardConfig {
    /// Load configuration with hierarchy: defaults → local → user → env
    pub fn load(working_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let user_config = directories::ProjectDirs::from("com", "project-board", "project-board")
            .map(|dirs| dirs.config_dir().join("config.toml"));
        Self::load_from(working_dir, user_config.as_deref())
    }

    /// Load configuration from explicit locations.
    ///
    /// Missing files are skipped; a file that exists but does not parse is an error.
    pub fn load_from(
        working_dir: Option<&Path>,
        user_config: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File, FileFormat};

        let mut builder = Config::builder();

        // 1. Built-in defaults
        builder = builder.add_source(File::from_str(
            include_str!("../default_config.toml"),
            FileFormat::Toml,
        ));

        // 2. Local config (.project-board.toml in the working directory)
        if let Some(dir) = working_dir {
            let local = dir.join(LOCAL_CONFIG_FILE);
            if local.exists() {
                tracing::debug!("Loading local config from {:?}", local);
                builder = builder.add_source(File::from(local).required(false));
            }
        }

        // 3. User config (~/.config/project-board/config.toml)
        if let Some(path) = user_config {
            if path.exists() {
                builder = builder.add_source(File::from(path.to_path_buf()).required(false));
            }
        }

        // 4. Environment variables (PROJECT_BOARD__*)
        builder = builder.add_source(
            Environment::with_prefix("PROJECT_BOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Load a single configuration file on top of the defaults
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::load_from(None, Some(path))
    }

    /// Reject rule sets that no input could ever satisfy
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, rules) in [
            ("title", &self.validation.title),
            ("description", &self.validation.description),
            ("people", &self.validation.people),
        ] {
            if let (Some(lo), Some(hi)) = (rules.min_length, rules.max_length) {
                if lo > hi {
                    return Err(ConfigError::Invalid(format!(
                        "{name}: min_length {lo} exceeds max_length {hi}"
                    )));
                }
            }
            if let (Some(lo), Some(hi)) = (rules.min, rules.max) {
                if lo > hi {
                    return Err(ConfigError::Invalid(format!(
                        "{name}: min {lo} exceeds max {hi}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style navigation (j/k/h/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: default_vim_navigation(),
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_vim_navigation() -> bool {
    true
}

/// Validation rules applied by the project form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_title_rules")]
    pub title: FieldRules,
    #[serde(default = "default_description_rules")]
    pub description: FieldRules,
    #[serde(default = "default_people_rules")]
    pub people: FieldRules,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            title: default_title_rules(),
            description: default_description_rules(),
            people: default_people_rules(),
        }
    }
}

fn default_title_rules() -> FieldRules {
    FieldRules {
        required: true,
        ..FieldRules::default()
    }
}

fn default_description_rules() -> FieldRules {
    FieldRules {
        required: true,
        min_length: Some(5),
        max_length: Some(200),
        ..FieldRules::default()
    }
}

fn default_people_rules() -> FieldRules {
    FieldRules {
        required: true,
        min: Some(1.0),
        max: Some(10.0),
        ..FieldRules::default()
    }
}

/// Constraint set for one form field; absent constraints are not checked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRules {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl FieldRules {
    /// Attach these rules to a value
    pub fn apply<'a>(&self, value: Value<'a>) -> Validatable<'a> {
        Validatable {
            value,
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            min: self.min,
            max: self.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert!(config.ui.vim_navigation);
        assert!(config.validation.title.required);
        assert_eq!(config.validation.description.min_length, Some(5));
        assert_eq!(config.validation.description.max_length, Some(200));
        assert_eq!(config.validation.people.min, Some(1.0));
        assert_eq!(config.validation.people.max, Some(10.0));
    }

    #[test]
    fn test_embedded_defaults_match_code_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = BoardConfig::load_from(Some(dir.path()), None).unwrap();
        let defaults = BoardConfig::default();
        assert_eq!(loaded.ui.refresh_rate_ms, defaults.ui.refresh_rate_ms);
        assert_eq!(loaded.validation.title, defaults.validation.title);
        assert_eq!(loaded.validation.description, defaults.validation.description);
        assert_eq!(loaded.validation.people, defaults.validation.people);
    }

    #[test]
    fn test_local_config_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            "[validation.people]\nrequired = true\nmin = 2\nmax = 4\n",
        )
        .unwrap();

        let loaded = BoardConfig::load_from(Some(dir.path()), None).unwrap();
        assert_eq!(loaded.validation.people.min, Some(2.0));
        assert_eq!(loaded.validation.people.max, Some(4.0));
        // Untouched sections keep their defaults
        assert_eq!(loaded.validation.description.min_length, Some(5));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[validation.description]\nmin_length = 50\nmax_length = 10\n",
        )
        .unwrap();

        let err = BoardConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = BoardConfig::load_file(Path::new("/nonexistent/project-board.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
