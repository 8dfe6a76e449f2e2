//! Configuration types for polo.
//!
//! This crate provides the settings read from `.polo/config.yaml` and the
//! environment helpers used alongside them.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_has_sensible_values() {
        let config = PoloConfig::default();

        assert!(config.locales.is_empty());

        assert!(config.update.roots.is_empty());
        assert!(config.update.excluded_locales.is_empty());
        assert!(config.update.include_locations);
        assert!(!config.update.prune_obsoletes);
        assert_eq!(config.update.domain, "messages");
        assert_eq!(config.update.locales_dir, PathBuf::from("locale"));

        assert!(config.reload.locale_paths.is_empty());
        assert_eq!(config.reload.domain, "messages");
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let yaml = serde_yaml::to_string(&PoloConfig::default()).unwrap();

        assert!(yaml.contains("locales:"));
        assert!(yaml.contains("update:"));
        assert!(yaml.contains("reload:"));
        assert!(yaml.contains("domain: messages"));
        assert!(yaml.contains("include_locations: true"));
    }

    #[test]
    fn test_partial_configs_merge_with_defaults() {
        let partial_yaml = r#"
locales: [fr, de]
update:
  roots: [app]
reload:
  domain: django
"#;

        let config: PoloConfig = serde_yaml::from_str(partial_yaml).unwrap();

        assert_eq!(config.locales, vec!["fr", "de"]);
        assert_eq!(config.update.roots, vec![PathBuf::from("app")]);
        assert_eq!(config.reload.domain, "django");

        assert_eq!(config.update.domain, "messages");
        assert!(config.reload.locale_paths.is_empty());
    }

    #[test]
    fn test_update_locales_skip_excluded() {
        let mut config = PoloConfig::default();
        config.locales = vec!["en".into(), "fr".into(), "de".into()];
        config.update.excluded_locales = vec!["en".into()];
        assert_eq!(config.update_locales(), vec!["fr", "de"]);
    }
}
