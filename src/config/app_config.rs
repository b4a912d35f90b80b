use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Remote platform settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Model used to probe credentials, whatever model the caller wants
    pub validation_model: String,
}

/// Local manifest directory settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub models_dir: PathBuf,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: crate::infrastructure::llm::DEFAULT_NOVITA_BASE_URL.to_string(),
            timeout_secs: 60,
            validation_model: "meta-llama/llama-3-8b-instruct".to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models/llm"),
            currency: "CNY".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.provider.base_url, "https://api.novita.ai/v3/openai");
        assert_eq!(config.provider.timeout(), Duration::from_secs(60));
        assert_eq!(
            config.provider.validation_model,
            "meta-llama/llama-3-8b-instruct"
        );
        assert_eq!(config.catalog.models_dir, PathBuf::from("models/llm"));
        assert_eq!(config.catalog.currency, "CNY");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[provider]\ntimeout_secs = 5\n\n[logging]\nformat = \"json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.provider.base_url, "https://api.novita.ai/v3/openai");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides_files() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("APP__PROVIDER__BASE_URL", "http://localhost:9999/v3/openai");
            std::env::set_var("APP__PROVIDER__TIMEOUT_SECS", "7");
            std::env::set_var("APP__CATALOG__CURRENCY", "USD");
            std::env::set_var("APP__LOGGING__FORMAT", "json");
        }

        let config = AppConfig::load().unwrap();

        // SAFETY: Test cleanup
        unsafe {
            std::env::remove_var("APP__PROVIDER__BASE_URL");
            std::env::remove_var("APP__PROVIDER__TIMEOUT_SECS");
            std::env::remove_var("APP__CATALOG__CURRENCY");
            std::env::remove_var("APP__LOGGING__FORMAT");
        }

        assert_eq!(config.provider.base_url, "http://localhost:9999/v3/openai");
        assert_eq!(config.provider.timeout_secs, 7);
        assert_eq!(config.catalog.currency, "USD");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.provider.validation_model,
            "meta-llama/llama-3-8b-instruct"
        );
    }
}
