use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::client::Client;
use super::module::{BackupType, Module};
use super::repository::Repository;
use super::status::StatusCode;
use super::time::lenient_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Active,
    Success,
    Incomplete,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Active => "active",
            JobStatus::Success => "success",
            JobStatus::Incomplete => "incomplete",
            JobStatus::Error => "error",
            JobStatus::Unknown => "unknown",
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            JobStatus::Success => StatusCode::Ok,
            JobStatus::Incomplete => StatusCode::Warning,
            JobStatus::Error => StatusCode::Critical,
            JobStatus::Active => StatusCode::Info,
            JobStatus::Pending | JobStatus::Unknown => StatusCode::Unknown,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Backup,
    Restore,
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Backup => "backup",
            JobType::Restore => "restore",
            JobType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single backup or restore run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub uuid: String,
    pub client: Option<Client>,
    pub module: Option<Module>,
    pub repository: Option<Repository>,
    pub status: JobStatus,
    pub done: bool,
    pub backup_type: BackupType,
    pub job_type: JobType,
    #[serde(deserialize_with = "lenient_time")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_time")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Job {
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

    pub fn running_label(&self) -> &'static str {
        if self.done { "Finished" } else { "In execution" }
    }
}

/// Per-status counts over a job list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobSummary {
    pub total: usize,
    pub running: usize,
    pub success: usize,
    pub incomplete: usize,
    pub error: usize,
}

impl JobSummary {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let count = |status: JobStatus| jobs.iter().filter(|j| j.status == status).count();
        Self {
            total: jobs.len(),
            running: count(JobStatus::Active),
            success: count(JobStatus::Success),
            incomplete: count(JobStatus::Incomplete),
            error: count(JobStatus::Error),
        }
    }
}
