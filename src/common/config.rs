//! Configuration schema, defaults, and layered loading.
//!
//! Precedence: defaults < config file < environment < CLI
use crate::session::OutputLanguage;
use crate::ui::labels::UiLanguage;
use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_PREFIX: &str = "VULTABLE_";
const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const MAX_REQUEST_TIMEOUT_SECS: u64 = 60 * 60;
const MAX_INDICATOR_PERIOD_MS: u64 = 10_000;

pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "vultable")
        .map(|p| p.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("vultable.toml"))
}

/// What happens to the picked file when a submission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep the file so the user can retry without picking it again.
    #[default]
    Retain,
    /// Drop the file; the user has to pick it again.
    Clear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Milliseconds between indicator steps
    pub period_ms: u64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self { period_ms: 100 }
    }
}

/// Fully resolved application configuration after all layers merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the conversion service, without the endpoint path.
    pub api_url: String,
    pub default_table_language: OutputLanguage,
    pub ui_language: UiLanguage,
    pub request_timeout_secs: u64,
    pub failure_policy: FailurePolicy,
    pub indicator: IndicatorSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_table_language: OutputLanguage::Eng,
            ui_language: UiLanguage::Eng,
            request_timeout_secs: 300,
            failure_policy: FailurePolicy::Retain,
            indicator: IndicatorSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn indicator_period(&self) -> Duration {
        Duration::from_millis(self.indicator.period_ms)
    }

    /// Rejects values the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        let api_url = self.api_url.trim();
        ensure!(!api_url.is_empty(), "Invalid config: api_url must not be empty");
        ensure!(
            api_url.starts_with("http://") || api_url.starts_with("https://"),
            "Invalid config: api_url must start with http:// or https://"
        );
        ensure!(
            self.request_timeout_secs >= 1,
            "Invalid config: request_timeout_secs must be >= 1"
        );
        ensure!(
            self.request_timeout_secs <= MAX_REQUEST_TIMEOUT_SECS,
            "Invalid config: request_timeout_secs must be <= {MAX_REQUEST_TIMEOUT_SECS}"
        );
        ensure!(
            self.indicator.period_ms >= 1,
            "Invalid config: indicator.period_ms must be >= 1"
        );
        ensure!(
            self.indicator.period_ms <= MAX_INDICATOR_PERIOD_MS,
            "Invalid config: indicator.period_ms must be <= {MAX_INDICATOR_PERIOD_MS}"
        );
        Ok(())
    }
}

/// Per-invocation values from the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_language: Option<UiLanguage>,
}

/// Loads config from defaults/file/env.
pub fn load_config() -> Result<AppConfig> {
    let path = config_path();

    // `__` separates nesting so `api_url` style keys stay intact
    let config: AppConfig = Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Failed to load configuration")?;

    config.validate()?;

    Ok(config)
}

/// Applies runtime overrides to a loaded config.
pub fn apply_overrides(mut config: AppConfig, overrides: &ConfigOverrides) -> Result<AppConfig> {
    if let Some(api_url) = &overrides.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(ui_language) = overrides.ui_language {
        config.ui_language = ui_language;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AppConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn rejects_non_http_api_url() {
        let config = AppConfig {
            api_url: "ftp://reports".into(),
            ..AppConfig::default()
        };
        let err = config.validate().expect_err("ftp is not allowed");
        assert!(err.to_string().contains("api_url"));
    }

    #[test]
    fn rejects_zero_indicator_period() {
        let mut config = AppConfig::default();
        config.indicator.period_ms = 0;
        let err = config.validate().expect_err("zero period");
        assert!(err.to_string().contains("indicator.period_ms"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn failure_policy_uses_lowercase_names() {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("failure_policy = \"clear\""))
            .extract()
            .expect("parse policy");
        assert_eq!(config.failure_policy, FailurePolicy::Clear);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = ConfigOverrides {
            api_url: Some("https://reports.example/api".into()),
            ui_language: None,
        };
        let config = apply_overrides(AppConfig::default(), &overrides).expect("valid override");

        assert_eq!(config.api_url, "https://reports.example/api");
        assert_eq!(config.ui_language, UiLanguage::Eng);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let overrides = ConfigOverrides {
            api_url: Some("".into()),
            ui_language: None,
        };
        assert!(apply_overrides(AppConfig::default(), &overrides).is_err());
    }
}
