use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "HALAL_SCAN_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Model identifier sent with every chat completion request
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";

/// Ingredient substrings that are not halal-by-default without certification
pub const DEFAULT_RISK_KEYWORDS: &[&str] =
    &["chicken", "beef", "meat", "gelatin", "enzyme", "rennet"];

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Override for the upstream model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Override for the risk keyword list (lowercase substrings)
    #[serde(default)]
    pub risk_keywords: Option<Vec<String>>,
}

/// Application configuration
///
/// Immutable after startup; the risk keyword list and model identifier are
/// passed into the pipeline as explicit values, never mutated in place.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub risk_keywords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            model: DEFAULT_MODEL.to_string(),
            risk_keywords: DEFAULT_RISK_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let defaults = Config::default();

        Self {
            host,
            port,
            model: file.model.unwrap_or(defaults.model),
            risk_keywords: file.risk_keywords.unwrap_or(defaults.risk_keywords),
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.risk_keywords.len(), 6);
        assert!(config.risk_keywords.contains(&"gelatin".to_string()));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_file_overrides() {
        let yaml = "model: test/vision-model\nrisk_keywords:\n  - pork\n  - lard\n";
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.model.as_deref(), Some("test/vision-model"));
        assert_eq!(
            file.risk_keywords,
            Some(vec!["pork".to_string(), "lard".to_string()])
        );
    }

    #[test]
    fn test_config_file_partial() {
        let file: ConfigFile = serde_yaml::from_str("model: test/vision-model").unwrap();
        assert!(file.risk_keywords.is_none());
    }
}
