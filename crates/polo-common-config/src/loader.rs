//! Configuration file loading and parsing.

use crate::env::{vars, Environment};
use crate::types::PoloConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Location of the settings file inside a project directory.
pub const CONFIG_FILE: &str = ".polo/config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the settings file; `POLO_CONFIG_PATH` overrides the default.
    pub fn config_path(&self) -> PathBuf {
        match Environment::get(vars::POLO_CONFIG_PATH) {
            Some(path) => PathBuf::from(path),
            None => self.base_path.join(CONFIG_FILE),
        }
    }

    /// Load configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<PoloConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(PoloConfig::default());
        }

        self.load_from(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(&self, path: impl AsRef<Path>) -> Result<PoloConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: PoloConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
            ConfigError::ParseError {
                line: None,
                message: e.to_string(),
            }
        })?;

        let mut result = String::with_capacity(content.len());
        let mut last = 0;
        for cap in re.captures_iter(content) {
            let Some(full_match) = cap.get(0) else {
                continue;
            };
            let var_name = &cap[1];
            let value = match (Environment::get(var_name), cap.get(2)) {
                (Some(v), _) => v,
                (None, Some(default)) => default.as_str().to_string(),
                (None, None) => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            };
            result.push_str(&content[last..full_match.start()]);
            result.push_str(&value);
            last = full_match.end();
        }
        result.push_str(&content[last..]);

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &PoloConfig) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::ValidationError {
            message: message.to_string(),
        };

        if config.update.domain.is_empty() {
            return Err(invalid("update.domain must not be empty"));
        }
        if config.reload.domain.is_empty() {
            return Err(invalid("reload.domain must not be empty"));
        }
        if config.update.locales_dir.as_os_str().is_empty() {
            return Err(invalid("update.locales_dir must not be empty"));
        }

        let locale_names = config.locales.iter().chain(&config.update.excluded_locales);
        for locale in locale_names {
            if locale.is_empty() || locale.contains(['/', '\\']) {
                return Err(ConfigError::ValidationError {
                    message: format!("invalid locale name: {locale:?}"),
                });
            }
        }

        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, config: &PoloConfig) -> Result<(), ConfigError> {
        let config_path = self.config_path();
        if let Some(config_dir) = config_path.parent() {
            std::fs::create_dir_all(config_dir)?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(config_path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) {
        let polo_dir = dir.join(".polo");
        fs::create_dir_all(&polo_dir).unwrap();
        fs::write(polo_dir.join("config.yaml"), content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config, PoloConfig::default());
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
locales: [en, fr]
update:
  roots: [app, lib]
  excluded_locales: [en]
  prune_obsoletes: true
reload:
  locale_paths: [app/locale]
"#,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();

        assert_eq!(config.locales, vec!["en", "fr"]);
        assert_eq!(config.update.roots, vec![PathBuf::from("app"), PathBuf::from("lib")]);
        assert!(config.update.prune_obsoletes);
        assert_eq!(config.reload.locale_paths, vec![PathBuf::from("app/locale")]);
        assert_eq!(config.update_locales(), vec!["fr"]);

        assert!(config.update.include_locations);
        assert_eq!(config.update.domain, "messages");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        match loader.load_from(dir.path().join("other.yaml")).unwrap_err() {
            ConfigError::NotFound { path } => assert!(path.ends_with("other.yaml")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("POLO_TEST_EXPAND", "test_value");
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${POLO_TEST_EXPAND}").unwrap();
        assert_eq!(result, "key: test_value");
        std::env::remove_var("POLO_TEST_EXPAND");
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${POLO_TEST_NONEXISTENT:-default}").unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        match loader.expand_env_vars("key: ${POLO_TEST_MISSING}").unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "POLO_TEST_MISSING"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_env_vars_in_single_value() {
        std::env::set_var("POLO_TEST_PREFIX", "app");
        std::env::set_var("POLO_TEST_SUFFIX", "locale");

        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("dir: ${POLO_TEST_PREFIX}/${POLO_TEST_SUFFIX}")
            .unwrap();
        assert_eq!(result, "dir: app/locale");

        std::env::remove_var("POLO_TEST_PREFIX");
        std::env::remove_var("POLO_TEST_SUFFIX");
    }

    #[test]
    fn test_env_var_expansion_in_config() {
        std::env::set_var("POLO_TEST_ROOT", "src");
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
update:
  roots: [${POLO_TEST_ROOT}]
  domain: ${POLO_TEST_DOMAIN:-django}
"#,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.update.roots, vec![PathBuf::from("src")]);
        assert_eq!(config.update.domain, "django");

        std::env::remove_var("POLO_TEST_ROOT");
    }

    #[test]
    fn test_validation_errors() {
        let loader = ConfigLoader::new(".");

        let mut config = PoloConfig::default();
        config.update.domain.clear();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("update.domain")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = PoloConfig::default();
        config.reload.domain.clear();
        assert!(loader.validate(&config).is_err());

        let mut config = PoloConfig::default();
        config.update.locales_dir = PathBuf::new();
        assert!(loader.validate(&config).is_err());

        let mut config = PoloConfig::default();
        config.locales = vec!["fr/../../etc".into()];
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("locale")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = PoloConfig::default();
        config.update.excluded_locales = vec![String::new()];
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
locales: [fr
update:
  roots: [app]
"#,
        );

        match ConfigLoader::new(dir.path()).load().unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_save_config() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());

        let mut config = PoloConfig::default();
        config.locales = vec!["fr".into()];
        config.update.roots = vec![PathBuf::from("app")];

        loader.save(&config).unwrap();
        assert!(dir.path().join(".polo/config.yaml").exists());

        let loaded = loader.load().unwrap();
        assert_eq!(loaded, config);
    }
}
