use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Key → command overrides, merged over the default keymap
    #[serde(default)]
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerSettings::default(),
            ui: UiSettings::default(),
            logging: LoggingSettings::default(),
            keybindings: HashMap::new(),
        }
    }
}

fn default_version() -> String {
    "v1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Accept self-signed TLS certificates
    #[serde(default)]
    pub insecure: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_prefix: default_api_prefix(),
            timeout: default_timeout(),
            insecure: false,
        }
    }
}

impl ServerSettings {
    /// Request timeout, falling back to 30s when the value does not parse
    pub fn timeout(&self) -> Duration {
        humantime::parse_duration(&self.timeout).unwrap_or(Duration::from_secs(30))
    }
}

fn default_url() -> String {
    "https://localhost:8433".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1/".to_string()
}

fn default_timeout() -> String {
    "30s".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Route opened at startup
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default)]
    pub theme: ThemeName,
    /// File holding the last theme chosen with the toggle key
    #[serde(default)]
    pub theme_file: Option<PathBuf>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_filter_debounce")]
    pub filter_debounce: String,
    #[serde(default = "default_ping_settle")]
    pub ping_settle: String,
    #[serde(default = "default_latest_jobs")]
    pub latest_jobs: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            start: default_start(),
            theme: ThemeName::default(),
            theme_file: None,
            page_size: default_page_size(),
            filter_debounce: default_filter_debounce(),
            ping_settle: default_ping_settle(),
            latest_jobs: default_latest_jobs(),
        }
    }
}

impl UiSettings {
    pub fn filter_debounce(&self) -> Duration {
        humantime::parse_duration(&self.filter_debounce).unwrap_or(Duration::from_millis(200))
    }

    pub fn ping_settle(&self) -> Duration {
        humantime::parse_duration(&self.ping_settle).unwrap_or(Duration::from_millis(500))
    }
}

fn default_start() -> String {
    "/dashboard".to_string()
}

fn default_page_size() -> usize {
    25
}

fn default_filter_debounce() -> String {
    "200ms".to_string()
}

fn default_ping_settle() -> String {
    "500ms".to_string()
}

fn default_latest_jobs() -> usize {
    5
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(ThemeName::Dark),
            "light" => Some(ThemeName::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: default_level(),
        }
    }
}

impl LoggingSettings {
    /// Log file path; the terminal belongs to the TUI so logs never go to stderr
    pub fn file_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("relique-dash.log"))
    }
}

fn default_level() -> String {
    "info".to_string()
}
