use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::Client;
use super::module::Module;
use super::repository::Repository;
use super::time::lenient_time;

/// Backup artifact produced by a job; shares the job's uuid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub uuid: String,
    #[serde(deserialize_with = "lenient_time")]
    pub created_at: Option<DateTime<Utc>>,
    pub client: Option<Client>,
    pub module: Option<Module>,
    pub repository: Option<Repository>,
    pub number_of_elements: u64,
    pub number_of_files: u64,
    pub number_of_folders: u64,
    pub size_on_disk: u64,
}

impl Image {
    pub fn client_name(&self) -> &str {
        self.client.as_ref().map(|c| c.name.as_str()).unwrap_or_default()
    }

    pub fn module_name(&self) -> &str {
        self.module.as_ref().map(|m| m.name.as_str()).unwrap_or_default()
    }

    pub fn repository_name(&self) -> &str {
        self.repository
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_image() {
        let image: Image = serde_json::from_str(
            r#"{
                "uuid": "aa11-bb22",
                "created_at": "2024-02-01T12:00:00Z",
                "client": {"name": "web-01"},
                "module": {"name": "nginx"},
                "repository": null,
                "number_of_elements": 12,
                "number_of_files": 10,
                "number_of_folders": 2,
                "size_on_disk": 1048576
            }"#,
        )
        .unwrap();
        assert_eq!(image.client_name(), "web-01");
        assert_eq!(image.module_name(), "nginx");
        assert_eq!(image.repository_name(), "");
        assert_eq!(image.size_on_disk, 1_048_576);
        assert!(image.created_at.is_some());
    }
}
