use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ListParams, Page, ReliqueApi, decode_detail, decode_list};
use crate::config::ServerSettings;
use crate::error::{DashError, Result};
use crate::globals;
use crate::models::{
    Client, Image, ImageStats, Job, Module, PingReport, Repository, ServerConfig, VersionInfo,
};

/// Relique API over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpApi {
    base: Url,
    client: reqwest::Client,
}

impl HttpApi {
    /// Build from server settings, sharing the global HTTP client
    pub fn new(settings: &ServerSettings) -> Result<Self> {
        let base = Self::base_url(&settings.url, &settings.api_prefix)?;
        Ok(Self::with_client(base, globals::http_client().clone()))
    }

    pub fn with_client(base: Url, client: reqwest::Client) -> Self {
        Self { base, client }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Join the server URL and the API prefix
    pub fn base_url(url: &str, api_prefix: &str) -> Result<Url> {
        let mut base = Url::parse(url)
            .map_err(|e| DashError::Config(format!("invalid server url '{}': {}", url, e)))?;
        base.set_query(None);
        base.set_fragment(None);
        base.path_segments_mut()
            .map_err(|_| DashError::Config(format!("server url '{}' cannot be a base", url)))?
            .pop_if_empty()
            .extend(api_prefix.split('/').filter(|s| !s.is_empty()));
        Ok(base)
    }

    /// URL of an endpoint; every segment is percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DashError::Config(format!("cannot extend '{}'", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url, params: Option<&ListParams>) -> Result<String> {
        debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await?;
        if let Some(err) = status_error(response.status(), &url) {
            return Err(err);
        }

        Ok(response.text().await?)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &ListParams,
    ) -> Result<Page<T>> {
        let url = self.endpoint(segments)?;
        let body = self.fetch(url, Some(params)).await?;
        decode_list(&body)
    }

    async fn get_detail<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let body = self.fetch(url, None).await?;
        decode_detail(&body)
    }
}

/// Map a non-success status to an error; 404 is kept distinct
pub fn status_error(status: StatusCode, url: &Url) -> Option<DashError> {
    if status == StatusCode::NOT_FOUND {
        Some(DashError::NotFound(url.path().to_string()))
    } else if !status.is_success() {
        Some(DashError::Api(format!("{} returned {}", url.path(), status)))
    } else {
        None
    }
}

#[async_trait]
impl ReliqueApi for HttpApi {
    async fn server_config(&self) -> Result<ServerConfig> {
        self.get_detail(&["config"]).await
    }

    async fn version(&self) -> Result<VersionInfo> {
        self.get_detail(&["config", "version"]).await
    }

    async fn list_jobs(&self, params: &ListParams) -> Result<Page<Job>> {
        self.get_list(&["jobs"], params).await
    }

    async fn get_job(&self, uuid: &str) -> Result<Job> {
        self.get_detail(&["jobs", uuid]).await
    }

    async fn list_clients(&self, params: &ListParams) -> Result<Page<Client>> {
        self.get_list(&["clients"], params).await
    }

    async fn get_client(&self, name: &str) -> Result<Client> {
        self.get_detail(&["clients", name]).await
    }

    async fn ping_client(&self, name: &str) -> Result<PingReport> {
        self.get_detail(&["clients", name, "ping"]).await
    }

    async fn list_modules(&self, params: &ListParams) -> Result<Page<Module>> {
        self.get_list(&["modules"], params).await
    }

    async fn get_module(&self, name: &str) -> Result<Module> {
        self.get_detail(&["modules", name]).await
    }

    async fn list_images(&self, params: &ListParams) -> Result<Page<Image>> {
        self.get_list(&["images"], params).await
    }

    async fn get_image(&self, uuid: &str) -> Result<Image> {
        self.get_detail(&["images", uuid]).await
    }

    async fn image_stats(&self) -> Result<ImageStats> {
        self.get_detail(&["images", "stats"]).await
    }

    async fn list_repositories(&self, params: &ListParams) -> Result<Page<Repository>> {
        self.get_list(&["repositories"], params).await
    }

    async fn get_repository(&self, name: &str) -> Result<Repository> {
        self.get_detail(&["repositories", name]).await
    }
}
