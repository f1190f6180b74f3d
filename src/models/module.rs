use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::time::null_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupType {
    Diff,
    Full,
    CumulativeDiff,
    Restore,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BackupType {
    pub fn as_str(self) -> &'static str {
        match self {
            BackupType::Diff => "diff",
            BackupType::Full => "full",
            BackupType::CumulativeDiff => "cumulative_diff",
            BackupType::Restore => "restore",
            BackupType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BackupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backup configuration attachable to a client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub name: String,
    pub module_type: String,
    pub backup_type: BackupType,
    pub variant: String,
    #[serde(deserialize_with = "null_default")]
    pub available_variants: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub backup_paths: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub include: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub exclude: Vec<String>,
    pub exclude_cvs: bool,
    #[serde(deserialize_with = "null_default")]
    pub params: Map<String, Value>,
}

impl Module {
    pub fn variant_display(&self) -> &str {
        if self.variant.is_empty() {
            "default"
        } else {
            &self.variant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_module() {
        let json = r#"{
            "name": "postgres",
            "module_type": "postgres",
            "backup_type": "diff",
            "variant": "",
            "available_variants": ["default", "wal"],
            "backup_paths": ["/var/lib/postgresql"],
            "include": null,
            "exclude": ["*.tmp"],
            "exclude_cvs": true,
            "params": {"port": 5432}
        }"#;
        let module: Module = serde_json::from_str(json).unwrap();
        assert_eq!(module.backup_type, BackupType::Diff);
        assert_eq!(module.variant_display(), "default");
        assert!(module.include.is_empty());
        assert_eq!(module.params.get("port").and_then(Value::as_u64), Some(5432));
    }

    #[test]
    fn test_unknown_backup_type() {
        let module: Module =
            serde_json::from_str(r#"{"name":"x","backup_type":"snapshot"}"#).unwrap();
        assert_eq!(module.backup_type, BackupType::Unknown);

        let module: Module =
            serde_json::from_str(r#"{"name":"x","backup_type":"cumulative_diff","variant":"wal"}"#)
                .unwrap();
        assert_eq!(module.backup_type.to_string(), "cumulative_diff");
        assert_eq!(module.variant_display(), "wal");
    }
}
