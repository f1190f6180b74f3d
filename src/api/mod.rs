//! Typed access to the Relique REST API

pub mod http;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DashError, Result};
use crate::models::{
    Client, Image, ImageStats, Job, Module, PingReport, Repository, ServerConfig, VersionInfo,
};

pub use http::HttpApi;

/// Query parameters accepted by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
}

impl ListParams {
    pub fn limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Total matching objects on the server
    pub count: u64,
}

#[derive(Debug, Deserialize)]
struct Meta {
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged, bound(deserialize = "T: DeserializeOwned"))]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped {
        /// Outer None: no `data` key. Inner None: `"data": null`.
        #[serde(default, deserialize_with = "present")]
        data: Option<Option<Vec<T>>>,
        count: Option<u64>,
        meta: Option<Meta>,
    },
}

/// Keeps a `null` value apart from a missing key
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl<T> TryFrom<ListBody<T>> for Page<T> {
    type Error = DashError;

    fn try_from(body: ListBody<T>) -> Result<Self> {
        match body {
            ListBody::Bare(data) => Ok(Page {
                count: data.len() as u64,
                data,
            }),
            ListBody::Wrapped { data, count, meta } => {
                let count = meta.and_then(|m| m.count).or(count);
                if data.is_none() && count.is_none() {
                    return Err(DashError::Api(
                        "response body is not a list".to_string(),
                    ));
                }
                let data = data.flatten().unwrap_or_default();
                let count = count.unwrap_or(data.len() as u64);
                Ok(Page { data, count })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailBody<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> DetailBody<T> {
    fn into_inner(self) -> T {
        match self {
            DetailBody::Wrapped { data } | DetailBody::Bare(data) => data,
        }
    }
}

pub(crate) fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Page<T>> {
    let body: ListBody<T> = serde_json::from_str(body)?;
    body.try_into()
}

pub(crate) fn decode_detail<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body: DetailBody<T> = serde_json::from_str(body)?;
    Ok(body.into_inner())
}

/// Every endpoint the dashboard reads
#[async_trait]
pub trait ReliqueApi: Send + Sync {
    async fn server_config(&self) -> Result<ServerConfig>;
    async fn version(&self) -> Result<VersionInfo>;

    async fn list_jobs(&self, params: &ListParams) -> Result<Page<Job>>;
    async fn get_job(&self, uuid: &str) -> Result<Job>;

    async fn list_clients(&self, params: &ListParams) -> Result<Page<Client>>;
    async fn get_client(&self, name: &str) -> Result<Client>;
    async fn ping_client(&self, name: &str) -> Result<PingReport>;

    async fn list_modules(&self, params: &ListParams) -> Result<Page<Module>>;
    async fn get_module(&self, name: &str) -> Result<Module>;

    async fn list_images(&self, params: &ListParams) -> Result<Page<Image>>;
    async fn get_image(&self, uuid: &str) -> Result<Image>;
    async fn image_stats(&self) -> Result<ImageStats>;

    async fn list_repositories(&self, params: &ListParams) -> Result<Page<Repository>>;
    async fn get_repository(&self, name: &str) -> Result<Repository>;
}
