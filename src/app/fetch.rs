//! Background loads. Every function here runs inside a spawned task and
//! turns API results into a `Payload` for the UI loop.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::{ListParams, ReliqueApi};
use crate::config::FULL_LIST_LIMIT;
use crate::error::Result;
use crate::models::{Client, Image, Job, JobSummary, Module, Repository};
use crate::navigation::Route;
use crate::view::{DashboardData, DetailData, Payload};

/// Fetch everything the page for `route` needs; None for pages without data
pub async fn load_route(
    api: &dyn ReliqueApi,
    route: &Route,
    latest_jobs: usize,
) -> Option<Payload> {
    debug!("Loading {}", route.path());
    let full = ListParams::limit(FULL_LIST_LIMIT);

    let payload = match route {
        Route::Dashboard => {
            Payload::Dashboard(Box::new(load_dashboard(api, latest_jobs).await))
        }
        Route::Jobs => Payload::Jobs(api.list_jobs(&full).await.map(|p| p.data)),
        Route::Clients => Payload::Clients(api.list_clients(&full).await.map(|p| p.data)),
        Route::Modules => Payload::Modules(api.list_modules(&full).await.map(|p| p.data)),
        Route::Images => Payload::Images(api.list_images(&full).await.map(|p| p.data)),
        Route::Repositories => {
            Payload::Repositories(api.list_repositories(&full).await.map(|p| p.data))
        }
        Route::JobDetails(uuid) => Payload::JobDetails(load_job(api, uuid).await),
        Route::ClientDetails(name) => Payload::ClientDetails(load_client(api, name).await),
        Route::ModuleDetails(name) => Payload::ModuleDetails(load_module(api, name).await),
        Route::ImageDetails(uuid) => Payload::ImageDetails(load_image(api, uuid).await),
        Route::RepositoryDetails(name) => {
            Payload::RepositoryDetails(load_repository(api, name).await)
        }
        Route::NotFound(_) => return None,
    };
    Some(payload)
}

/// Each part falls back on its own so one failing endpoint never blanks the page
pub async fn load_dashboard(api: &dyn ReliqueApi, latest_jobs: usize) -> DashboardData {
    let day_ago = Utc::now() - chrono::Duration::hours(24);
    let recent = ListParams::limit(FULL_LIST_LIMIT).after(day_ago);
    let latest = ListParams::limit(latest_jobs as u64);

    let modules = ListParams::limit(FULL_LIST_LIMIT);

    let (recent, version, stats, config, installed, latest) = tokio::join!(
        api.list_jobs(&recent),
        api.version(),
        api.image_stats(),
        api.server_config(),
        api.list_modules(&modules),
        api.list_jobs(&latest),
    );

    let summary = match recent {
        Ok(page) => JobSummary::from_jobs(&page.data),
        Err(e) => {
            warn!("Cannot load recent jobs: {}", e);
            JobSummary::default()
        }
    };
    let version = match version {
        Ok(info) => info.version.unwrap_or_else(|| "unknown".to_string()),
        Err(e) => {
            warn!("Cannot load server version: {}", e);
            "unknown".to_string()
        }
    };

    DashboardData {
        summary,
        version,
        image_stats: stats.inspect_err(|e| warn!("Cannot load image stats: {}", e)).ok(),
        config: config.inspect_err(|e| warn!("Cannot load server config: {}", e)).ok(),
        modules_installed: installed
            .map(|p| p.data.len())
            .inspect_err(|e| warn!("Cannot load installed modules: {}", e))
            .unwrap_or(0),
        latest_jobs: latest
            .map(|p| p.data)
            .inspect_err(|e| warn!("Cannot load latest jobs: {}", e))
            .unwrap_or_default(),
    }
}

/// Optional single object: a missing one is normal, anything else is logged
fn optional<T>(result: Result<T>, what: &str) -> Vec<T> {
    match result {
        Ok(value) => vec![value],
        Err(e) if e.is_not_found() => Vec::new(),
        Err(e) => {
            warn!("Cannot load {}: {}", what, e);
            Vec::new()
        }
    }
}

async fn load_job(api: &dyn ReliqueApi, uuid: &str) -> Result<DetailData<Job, Image>> {
    let job = api.get_job(uuid).await?;
    // images share the uuid of the job that produced them
    let image = optional(api.get_image(uuid).await, "generated image");
    Ok(DetailData {
        item: job,
        related: image,
    })
}

async fn load_client(api: &dyn ReliqueApi, name: &str) -> Result<DetailData<Client, Image>> {
    let client = api.get_client(name).await?;
    let params = ListParams::limit(FULL_LIST_LIMIT).with_client(name);
    let images = api
        .list_images(&params)
        .await
        .map(|p| p.data)
        .inspect_err(|e| warn!("Cannot load images of client {}: {}", name, e))
        .unwrap_or_default();
    Ok(DetailData {
        item: client,
        related: images,
    })
}

async fn load_module(api: &dyn ReliqueApi, name: &str) -> Result<DetailData<Module, Client>> {
    let module = api.get_module(name).await?;
    let clients = api
        .list_clients(&ListParams::limit(FULL_LIST_LIMIT))
        .await
        .map(|p| p.data)
        .inspect_err(|e| warn!("Cannot load clients: {}", e))
        .unwrap_or_default()
        .into_iter()
        .filter(|c| c.modules.iter().any(|m| m.name == name))
        .collect();
    Ok(DetailData {
        item: module,
        related: clients,
    })
}

async fn load_image(api: &dyn ReliqueApi, uuid: &str) -> Result<DetailData<Image, Job>> {
    let image = api.get_image(uuid).await?;
    let job = optional(api.get_job(uuid).await, "source job");
    Ok(DetailData {
        item: image,
        related: job,
    })
}

async fn load_repository(
    api: &dyn ReliqueApi,
    name: &str,
) -> Result<DetailData<Repository, Image>> {
    let repository = api.get_repository(name).await?;
    let images = api
        .list_images(&ListParams::limit(FULL_LIST_LIMIT))
        .await
        .map(|p| p.data)
        .inspect_err(|e| warn!("Cannot load images: {}", e))
        .unwrap_or_default()
        .into_iter()
        .filter(|i| i.repository_name() == name)
        .collect();
    Ok(DetailData {
        item: repository,
        related: images,
    })
}

/// Ping one client. A successful answer is held back for `settle` so the
/// spinner stays visible; a failed request reports at once.
pub async fn ping(api: &dyn ReliqueApi, client: String, settle: Duration) -> Payload {
    match api.ping_client(&client).await {
        Ok(report) => {
            info!(client = %client, alive = report.is_alive(), "Ping answered");
            tokio::time::sleep(settle).await;
            Payload::PingSettled { client, report }
        }
        Err(e) => {
            warn!(client = %client, "Ping failed: {}", e);
            Payload::PingFailed {
                client,
                error: e.to_string(),
            }
        }
    }
}
