//! Read-only view models of the Relique server objects

pub mod client;
pub mod image;
pub mod job;
pub mod module;
pub mod repository;
pub mod server;
pub mod status;
pub mod time;

pub use client::{Client, ClientHealth};
pub use image::Image;
pub use job::{Job, JobStatus, JobSummary, JobType};
pub use module::{BackupType, Module};
pub use repository::Repository;
pub use server::{ImageStats, PingReport, ServerConfig, VersionInfo};
pub use status::StatusCode;
