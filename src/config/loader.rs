use anyhow::{Context, Result};
use std::path::Path;

use super::schema::{Config, ThemeName};

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::load_from_string(&content)
    }

    pub fn load_from_string(content: &str) -> Result<Config> {
        // An empty file is a valid "all defaults" config
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config =
            serde_yaml::from_str(content).context("Failed to parse YAML config")?;

        Ok(config)
    }

    /// Read the persisted theme preference, if any
    pub fn load_theme(path: &Path) -> Option<ThemeName> {
        let content = std::fs::read_to_string(path).ok()?;
        ThemeName::parse(&content)
    }

    pub fn save_theme(path: &Path, theme: ThemeName) -> Result<()> {
        std::fs::write(path, format!("{}\n", theme.as_str()))
            .with_context(|| format!("Failed to write theme file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
version: v1
server:
  url: "http://backup.example.org:8433"
ui:
  page_size: 50
"#;

        let result = ConfigLoader::load_from_string(yaml);
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.version, "v1");
        assert_eq!(config.server.url, "http://backup.example.org:8433");
        assert_eq!(config.server.api_prefix, "/api/v1/");
        assert_eq!(config.ui.page_size, 50);
        assert_eq!(config.ui.start, "/dashboard");
        assert_eq!(config.ui.latest_jobs, 5);
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = ConfigLoader::load_from_string("   \n").unwrap();
        assert_eq!(config.ui.page_size, 25);
        assert_eq!(config.ui.theme, ThemeName::Dark);
        assert_eq!(
            config.ui.filter_debounce(),
            std::time::Duration::from_millis(200)
        );
        assert_eq!(config.ui.ping_settle(), std::time::Duration::from_millis(500));
    }

    #[test]
    fn test_load_keybindings_and_theme() {
        let yaml = r#"
ui:
  theme: light
keybindings:
  "ctrl+r": refresh
  x: ping_all
"#;
        let config = ConfigLoader::load_from_string(yaml).unwrap();
        assert_eq!(config.ui.theme, ThemeName::Light);
        assert_eq!(config.keybindings.get("ctrl+r").unwrap(), "refresh");
        assert_eq!(config.keybindings.get("x").unwrap(), "ping_all");
    }

    #[test]
    fn test_theme_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "relique-dash-theme-test-{}",
            std::process::id()
        ));
        ConfigLoader::save_theme(&path, ThemeName::Light).unwrap();
        assert_eq!(ConfigLoader::load_theme(&path), Some(ThemeName::Light));
        let _ = std::fs::remove_file(&path);
        assert_eq!(ConfigLoader::load_theme(&path), None);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(ConfigLoader::load_from_string("server: [unclosed").is_err());
    }
}
