use anyhow::{Context, Result, anyhow};

use super::schema::Config;
use crate::input::{Command, KeyBinding};
use crate::navigation::Route;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> Result<()> {
        // Validate version
        if config.version != "v1" {
            return Err(anyhow!(
                "Unsupported config version: {}. Expected: v1",
                config.version
            ));
        }

        Self::validate_server(config).context("Invalid server section")?;
        Self::validate_ui(config).context("Invalid ui section")?;

        for (key, command) in &config.keybindings {
            Self::validate_keybinding(key, command)
                .with_context(|| format!("Invalid keybinding: {}", key))?;
        }

        Ok(())
    }

    fn validate_server(config: &Config) -> Result<()> {
        let url = reqwest::Url::parse(&config.server.url)
            .with_context(|| format!("Invalid server URL: {}", config.server.url))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow!(
                "Server URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if !config.server.api_prefix.starts_with('/') {
            return Err(anyhow!(
                "API prefix must start with '/': {}",
                config.server.api_prefix
            ));
        }

        humantime::parse_duration(&config.server.timeout)
            .with_context(|| format!("Invalid timeout format: {}", config.server.timeout))?;

        Ok(())
    }

    fn validate_ui(config: &Config) -> Result<()> {
        let ui = &config.ui;

        if ui.page_size == 0 || ui.page_size > 1000 {
            return Err(anyhow!(
                "Page size must be between 1 and 1000, got {}",
                ui.page_size
            ));
        }

        humantime::parse_duration(&ui.filter_debounce)
            .with_context(|| format!("Invalid filter_debounce format: {}", ui.filter_debounce))?;
        humantime::parse_duration(&ui.ping_settle)
            .with_context(|| format!("Invalid ping_settle format: {}", ui.ping_settle))?;

        if matches!(Route::parse(&ui.start), Route::NotFound(_)) {
            return Err(anyhow!("Start route '{}' does not match any page", ui.start));
        }

        Ok(())
    }

    fn validate_keybinding(key: &str, command: &str) -> Result<()> {
        KeyBinding::parse(key).map_err(|e| anyhow!(e))?;
        command
            .parse::<Command>()
            .map_err(|e| anyhow!(e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let config = ConfigLoader::load_from_string("version: v2").unwrap();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("Unsupported config version"));
    }

    #[test]
    fn test_rejects_bad_url_scheme() {
        let config = ConfigLoader::load_from_string("server:\n  url: ftp://backup:21").unwrap();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let config = ConfigLoader::load_from_string("ui:\n  page_size: 0").unwrap();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_duration() {
        let config =
            ConfigLoader::load_from_string("ui:\n  filter_debounce: soon").unwrap();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_unknown_start_route() {
        let config = ConfigLoader::load_from_string("ui:\n  start: /backups").unwrap();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_accepts_detail_start_route() {
        let config =
            ConfigLoader::load_from_string("ui:\n  start: /clients/web-01").unwrap();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_unknown_command() {
        let config =
            ConfigLoader::load_from_string("keybindings:\n  x: launch_rocket").unwrap();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("launch_rocket"));
    }

    #[test]
    fn test_rejects_bad_key() {
        let config =
            ConfigLoader::load_from_string("keybindings:\n  \"ctrl+\": refresh").unwrap();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
