use serde::{Deserialize, Serialize};

use super::client::Client;
use super::repository::Repository;
use super::time::null_default;

/// Subset of the server configuration exposed by `/config`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(deserialize_with = "null_default")]
    pub clients: Vec<Client>,
    #[serde(deserialize_with = "null_default")]
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStats {
    pub count: u64,
    pub total_size: u64,
}

/// Result of a client ping
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PingReport {
    #[serde(default)]
    pub ping_error: Option<String>,
}

impl PingReport {
    /// Alive only when the server reported an explicitly empty error
    pub fn is_alive(&self) -> bool {
        self.ping_error.as_deref() == Some("")
    }

    pub fn message(&self) -> &str {
        self.ping_error.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_report() {
        let ok: PingReport = serde_json::from_str(r#"{"ping_error": ""}"#).unwrap();
        assert!(ok.is_alive());

        let failed: PingReport =
            serde_json::from_str(r#"{"ping_error": "connection refused"}"#).unwrap();
        assert!(!failed.is_alive());
        assert_eq!(failed.message(), "connection refused");

        let missing: PingReport = serde_json::from_str("{}").unwrap();
        assert!(!missing.is_alive());
        assert_eq!(missing.message(), "");
    }

    #[test]
    fn test_server_config() {
        let config: ServerConfig = serde_json::from_str(
            r#"{"clients":[{"name":"a"},{"name":"b"}],"repositories":null,"port":8433}"#,
        )
        .unwrap();
        assert_eq!(config.clients.len(), 2);
        assert!(config.repositories.is_empty());
    }
}
