use serde::{Deserialize, Serialize};

use super::module::Module;
use super::server::PingReport;
use super::status::StatusCode;
use super::time::null_default;
use crate::config::{DEFAULT_CLIENT_SSH_PORT, DEFAULT_CLIENT_SSH_USER};

/// Connectivity state of a client; never sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientHealth {
    pub ssh_alive: StatusCode,
    pub ssh_alive_message: String,
    /// A ping is in flight
    pub loading: bool,
}

impl ClientHealth {
    pub fn label(&self) -> &'static str {
        match self.ssh_alive {
            StatusCode::Ok => "Reachable by SSH",
            StatusCode::Unknown => "SSH connectivity status unknown",
            _ => "Cannot reach client via SSH",
        }
    }

    pub fn start_ping(&mut self) {
        self.loading = true;
    }

    pub fn settle(&mut self, report: &PingReport) {
        self.loading = false;
        self.ssh_alive = if report.is_alive() {
            StatusCode::Ok
        } else {
            StatusCode::Critical
        };
        self.ssh_alive_message = report.message().to_string();
    }

    /// The ping request itself failed; the previous state stands
    pub fn ping_failed(&mut self) {
        self.loading = false;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub name: String,
    pub address: String,
    pub ssh_user: String,
    pub ssh_port: u32,
    #[serde(deserialize_with = "null_default")]
    pub modules: Vec<Module>,
    #[serde(skip)]
    pub health: ClientHealth,
}

impl Client {
    pub fn ssh_user_display(&self) -> &str {
        if self.ssh_user.is_empty() {
            DEFAULT_CLIENT_SSH_USER
        } else {
            &self.ssh_user
        }
    }

    pub fn ssh_port_display(&self) -> u32 {
        if self.ssh_port == 0 {
            u32::from(DEFAULT_CLIENT_SSH_PORT)
        } else {
            self.ssh_port
        }
    }

    /// `user@address:port` as used for the SSH check
    pub fn ssh_target(&self) -> String {
        format!(
            "{}@{}:{}",
            self.ssh_user_display(),
            self.address,
            self.ssh_port_display()
        )
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_ssh_settings() {
        let client: Client =
            serde_json::from_str(r#"{"name":"web","address":"10.0.0.2","ssh_user":"","ssh_port":0}"#)
                .unwrap();
        assert_eq!(client.ssh_user_display(), "relique");
        assert_eq!(client.ssh_port_display(), 22);
        assert_eq!(client.ssh_target(), "relique@10.0.0.2:22");
        assert_eq!(client.health.ssh_alive, StatusCode::Unknown);
    }

    #[test]
    fn test_modules_and_health_label() {
        let mut client: Client = serde_json::from_str(
            r#"{"name":"db","address":"db.lan","ssh_user":"backup","ssh_port":2222,
                "modules":[{"name":"postgres"},{"name":"etc"}]}"#,
        )
        .unwrap();
        assert_eq!(client.module_names(), vec!["postgres", "etc"]);
        assert_eq!(client.ssh_target(), "backup@db.lan:2222");

        assert_eq!(client.health.label(), "SSH connectivity status unknown");
        client.health.ssh_alive = StatusCode::Critical;
        assert_eq!(client.health.label(), "Cannot reach client via SSH");
    }

    #[test]
    fn test_null_modules() {
        let client: Client = serde_json::from_str(r#"{"name":"x","modules":null}"#).unwrap();
        assert!(client.modules.is_empty());
    }

    #[test]
    fn test_ping_transitions() {
        let mut health = ClientHealth::default();
        health.start_ping();
        assert!(health.loading);

        health.settle(&PingReport {
            ping_error: Some("connection refused".to_string()),
        });
        assert!(!health.loading);
        assert_eq!(health.ssh_alive, StatusCode::Critical);
        assert_eq!(health.ssh_alive_message, "connection refused");

        health.start_ping();
        health.ping_failed();
        assert!(!health.loading);
        assert_eq!(health.ssh_alive, StatusCode::Critical);

        health.settle(&PingReport {
            ping_error: Some(String::new()),
        });
        assert_eq!(health.ssh_alive, StatusCode::Ok);
    }
}
