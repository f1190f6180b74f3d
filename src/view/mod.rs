//! Per-route page state and rendering

pub mod cards;
pub mod columns;
pub mod dashboard;
pub mod detail;
pub mod list;
pub mod pane;

use ratatui::{Frame, layout::Rect};
use tracing::debug;

pub use dashboard::{DashboardData, DashboardView};
pub use detail::{DetailData, DetailView, LoadState};
pub use list::ListView;
pub use pane::{TableControl, TablePane};

use crate::error::Result;
use crate::models::{Client, Image, Job, Module, PingReport, Repository};
use crate::navigation::Route;
use crate::table::TableOptions;
use crate::ui::{Theme, render_message};
use columns::{
    client_columns, client_link, image_columns, image_link, job_columns, job_link, module_columns,
    module_link, repository_columns, repository_link,
};

/// Data delivered by a background fetch or ping
#[derive(Debug)]
pub enum Payload {
    Dashboard(Box<DashboardData>),
    Jobs(Result<Vec<Job>>),
    Clients(Result<Vec<Client>>),
    Modules(Result<Vec<Module>>),
    Images(Result<Vec<Image>>),
    Repositories(Result<Vec<Repository>>),
    JobDetails(Result<DetailData<Job, Image>>),
    ClientDetails(Result<DetailData<Client, Image>>),
    ModuleDetails(Result<DetailData<Module, Client>>),
    ImageDetails(Result<DetailData<Image, Job>>),
    RepositoryDetails(Result<DetailData<Repository, Image>>),
    PingSettled { client: String, report: PingReport },
    PingFailed { client: String, error: String },
}

pub enum View {
    Dashboard(DashboardView),
    Jobs(ListView<Job>),
    Clients(ListView<Client>),
    Modules(ListView<Module>),
    Images(ListView<Image>),
    Repositories(ListView<Repository>),
    JobDetails(DetailView<Job, Image>),
    ClientDetails(DetailView<Client, Image>),
    ModuleDetails(DetailView<Module, Client>),
    ImageDetails(DetailView<Image, Job>),
    RepositoryDetails(DetailView<Repository, Image>),
    NotFound(String),
}

impl View {
    /// Empty page for a route, waiting for its first payload
    pub fn for_route(route: &Route, page_size: usize) -> Self {
        let full = TableOptions::default().with_page_size(page_size);
        match route {
            Route::Dashboard => View::Dashboard(DashboardView::new()),
            Route::Jobs => {
                View::Jobs(ListView::new("Jobs", job_columns(), page_size).with_link(job_link))
            }
            Route::Clients => View::Clients(
                ListView::new("Clients", client_columns(), page_size).with_link(client_link),
            ),
            Route::Modules => View::Modules(
                ListView::new("Modules", module_columns(), page_size).with_link(module_link),
            ),
            Route::Images => View::Images(
                ListView::new("Images", image_columns(), page_size).with_link(image_link),
            ),
            Route::Repositories => View::Repositories(
                ListView::new("Repositories", repository_columns(), page_size)
                    .with_link(repository_link),
            ),
            Route::JobDetails(uuid) => View::JobDetails(DetailView::new(
                uuid.as_str(),
                TablePane::new("Generated image", image_columns(), TableOptions::plain())
                    .with_link(image_link),
            )),
            Route::ClientDetails(name) => View::ClientDetails(DetailView::new(
                name.as_str(),
                TablePane::new("Images", image_columns(), full).with_link(image_link),
            )),
            Route::ModuleDetails(name) => View::ModuleDetails(DetailView::new(
                name.as_str(),
                TablePane::new("Clients using this module", client_columns(), full)
                    .with_link(client_link),
            )),
            Route::ImageDetails(uuid) => View::ImageDetails(DetailView::new(
                uuid.as_str(),
                TablePane::new("Generated by job", job_columns(), TableOptions::plain())
                    .with_link(job_link),
            )),
            Route::RepositoryDetails(name) => View::RepositoryDetails(DetailView::new(
                name.as_str(),
                TablePane::new("Stored images", image_columns(), full).with_link(image_link),
            )),
            Route::NotFound(path) => View::NotFound(path.clone()),
        }
    }

    /// The table keyboard commands act on, if the page has one ready
    pub fn table_mut(&mut self) -> Option<&mut dyn TableControl> {
        match self {
            View::Dashboard(v) => v
                .data
                .is_some()
                .then_some(&mut v.latest as &mut dyn TableControl),
            View::Jobs(v) => v.is_loaded().then_some(&mut v.pane as &mut dyn TableControl),
            View::Clients(v) => v.is_loaded().then_some(&mut v.pane as &mut dyn TableControl),
            View::Modules(v) => v.is_loaded().then_some(&mut v.pane as &mut dyn TableControl),
            View::Images(v) => v.is_loaded().then_some(&mut v.pane as &mut dyn TableControl),
            View::Repositories(v) => {
                v.is_loaded().then_some(&mut v.pane as &mut dyn TableControl)
            }
            View::JobDetails(v) => ready_related(&v.state, &mut v.related),
            View::ClientDetails(v) => ready_related(&v.state, &mut v.related),
            View::ModuleDetails(v) => ready_related(&v.state, &mut v.related),
            View::ImageDetails(v) => ready_related(&v.state, &mut v.related),
            View::RepositoryDetails(v) => ready_related(&v.state, &mut v.related),
            View::NotFound(_) => None,
        }
    }

    pub fn table(&mut self) -> Option<&dyn TableControl> {
        self.table_mut().map(|t| &*t)
    }

    pub fn begin_refresh(&mut self) {
        match self {
            View::Dashboard(v) => v.begin_refresh(),
            View::Jobs(v) => v.begin_refresh(),
            View::Clients(v) => v.begin_refresh(),
            View::Modules(v) => v.begin_refresh(),
            View::Images(v) => v.begin_refresh(),
            View::Repositories(v) => v.begin_refresh(),
            View::JobDetails(v) => v.begin_refresh(),
            View::ClientDetails(v) => v.begin_refresh(),
            View::ModuleDetails(v) => v.begin_refresh(),
            View::ImageDetails(v) => v.begin_refresh(),
            View::RepositoryDetails(v) => v.begin_refresh(),
            View::NotFound(_) => {}
        }
    }

    /// Whether a spinner or skeleton is on screen
    pub fn is_busy(&self) -> bool {
        match self {
            View::Dashboard(v) => v.data.is_none() || v.latest.table.is_loading(),
            View::Jobs(v) => list_busy(v),
            View::Clients(v) => {
                list_busy(v) || v.pane.table.rows().iter().any(|c| c.health.loading)
            }
            View::Modules(v) => list_busy(v),
            View::Images(v) => list_busy(v),
            View::Repositories(v) => list_busy(v),
            View::JobDetails(v) => detail_busy(v),
            View::ClientDetails(v) => {
                detail_busy(v) || v.state.ready().is_some_and(|c| c.health.loading)
            }
            View::ModuleDetails(v) => detail_busy(v),
            View::ImageDetails(v) => detail_busy(v),
            View::RepositoryDetails(v) => detail_busy(v),
            View::NotFound(_) => false,
        }
    }

    /// Hand a payload to the page; false when it belongs to another page
    pub fn apply(&mut self, payload: Payload) -> bool {
        match (self, payload) {
            (View::Dashboard(v), Payload::Dashboard(data)) => v.finish(*data),
            (View::Jobs(v), Payload::Jobs(rows)) => v.finish(rows),
            (View::Clients(v), Payload::Clients(rows)) => v.finish(rows),
            (View::Modules(v), Payload::Modules(rows)) => v.finish(rows),
            (View::Images(v), Payload::Images(rows)) => v.finish(rows),
            (View::Repositories(v), Payload::Repositories(rows)) => v.finish(rows),
            (View::JobDetails(v), Payload::JobDetails(data)) => v.finish(data),
            (View::ClientDetails(v), Payload::ClientDetails(data)) => v.finish(data),
            (View::ModuleDetails(v), Payload::ModuleDetails(data)) => v.finish(data),
            (View::ImageDetails(v), Payload::ImageDetails(data)) => v.finish(data),
            (View::RepositoryDetails(v), Payload::RepositoryDetails(data)) => v.finish(data),
            (View::Clients(v), Payload::PingSettled { client, report }) => {
                v.settle_ping(&client, &report)
            }
            (View::Clients(v), Payload::PingFailed { client, .. }) => v.fail_ping(&client),
            (View::ClientDetails(v), Payload::PingSettled { client, report }) => {
                match v.state.ready_mut() {
                    Some(c) if c.name == client => c.health.settle(&report),
                    _ => return false,
                }
            }
            (View::ClientDetails(v), Payload::PingFailed { client, .. }) => {
                match v.state.ready_mut() {
                    Some(c) if c.name == client => c.health.ping_failed(),
                    _ => return false,
                }
            }
            (_, payload) => {
                debug!("Payload does not match the current page: {:?}", payload);
                return false;
            }
        }
        true
    }

    /// Mark clients as pinging; returns the names that are on this page
    pub fn start_ping(&mut self, names: &[String]) -> Vec<String> {
        match self {
            View::Clients(v) => {
                v.start_ping(names.iter().map(String::as_str));
                let on_page = v.client_names();
                names
                    .iter()
                    .filter(|n| on_page.contains(*n))
                    .cloned()
                    .collect()
            }
            View::ClientDetails(v) => match v.state.ready_mut() {
                Some(c) if names.contains(&c.name) => {
                    c.health.start_ping();
                    vec![c.name.clone()]
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Client the single-ping command targets
    pub fn ping_target(&mut self) -> Option<String> {
        match self {
            View::Clients(v) => v.pane.selected_row().map(|c| c.name.clone()),
            View::ClientDetails(v) => v.state.ready().map(|c| c.name.clone()),
            _ => None,
        }
    }

    /// Every client the ping-all command targets
    pub fn ping_all_targets(&self) -> Vec<String> {
        match self {
            View::Clients(v) => v.client_names(),
            View::ClientDetails(v) => v
                .state
                .ready()
                .map(|c| vec![c.name.clone()])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, tick: usize) {
        match self {
            View::Dashboard(v) => v.render(frame, area, theme, tick),
            View::Jobs(v) => v.render(frame, area, theme, tick),
            View::Clients(v) => v.render(frame, area, theme, tick),
            View::Modules(v) => v.render(frame, area, theme, tick),
            View::Images(v) => v.render(frame, area, theme, tick),
            View::Repositories(v) => v.render(frame, area, theme, tick),
            View::JobDetails(v) => v.render(frame, area, theme, tick),
            View::ClientDetails(v) => v.render(frame, area, theme, tick),
            View::ModuleDetails(v) => v.render(frame, area, theme, tick),
            View::ImageDetails(v) => v.render(frame, area, theme, tick),
            View::RepositoryDetails(v) => v.render(frame, area, theme, tick),
            View::NotFound(path) => {
                let message = format!("Nothing lives at {}", path);
                let banner = Rect {
                    height: area.height.min(3),
                    ..area
                };
                render_message(frame, banner, "Page not found", &message, theme);
            }
        }
    }
}

fn ready_related<'a, T, R>(
    state: &LoadState<T>,
    related: &'a mut TablePane<R>,
) -> Option<&'a mut dyn TableControl> {
    state.ready().is_some().then_some(related as &mut dyn TableControl)
}

fn list_busy<T>(view: &ListView<T>) -> bool {
    !view.is_loaded() || view.pane.table.is_loading()
}

fn detail_busy<T, R>(view: &DetailView<T, R>) -> bool {
    view.state.is_loading() || view.related.table.is_loading()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;

    fn clients(names: &[&str]) -> Vec<Client> {
        names
            .iter()
            .map(|n| Client {
                name: n.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_table_only_once_loaded() {
        let mut view = View::for_route(&Route::Jobs, 25);
        assert!(view.table_mut().is_none());
        assert!(view.is_busy());

        assert!(view.apply(Payload::Jobs(Ok(Vec::new()))));
        assert!(view.table_mut().is_some());
        assert!(!view.is_busy());

        let mut missing = View::for_route(&Route::JobDetails("x".to_string()), 25);
        missing.apply(Payload::JobDetails(Err(DashError::NotFound("/jobs/x".to_string()))));
        assert!(missing.table_mut().is_none());
    }

    #[test]
    fn test_mismatched_payload_is_rejected() {
        let mut view = View::for_route(&Route::Clients, 25);
        assert!(!view.apply(Payload::Jobs(Ok(Vec::new()))));
        assert!(view.is_busy());
    }

    #[test]
    fn test_ping_on_client_list() {
        let mut view = View::for_route(&Route::Clients, 25);
        view.apply(Payload::Clients(Ok(clients(&["web", "db"]))));

        assert_eq!(view.ping_target().as_deref(), Some("web"));
        let started = view.start_ping(&["db".to_string(), "gone".to_string()]);
        assert_eq!(started, vec!["db".to_string()]);
        assert!(view.is_busy());

        assert!(view.apply(Payload::PingFailed {
            client: "db".to_string(),
            error: "timeout".to_string(),
        }));
        assert!(!view.is_busy());
    }

    #[test]
    fn test_ping_on_client_details() {
        let mut view = View::for_route(&Route::ClientDetails("web".to_string()), 25);
        assert!(view.ping_all_targets().is_empty());
        view.apply(Payload::ClientDetails(Ok(DetailData {
            item: clients(&["web"]).remove(0),
            related: Vec::new(),
        })));
        assert_eq!(view.ping_all_targets(), vec!["web".to_string()]);

        view.start_ping(&["web".to_string()]);
        assert!(view.apply(Payload::PingSettled {
            client: "web".to_string(),
            report: PingReport {
                ping_error: Some(String::new()),
            },
        }));
        let View::ClientDetails(v) = &view else {
            panic!("expected client details");
        };
        assert_eq!(
            v.state.ready().unwrap().health.ssh_alive,
            crate::models::StatusCode::Ok
        );

        assert!(!view.apply(Payload::PingSettled {
            client: "other".to_string(),
            report: PingReport::default(),
        }));
    }

    #[test]
    fn test_open_from_list() {
        let mut view = View::for_route(&Route::Repositories, 25);
        view.apply(Payload::Repositories(Ok(vec![Repository {
            name: "local".to_string(),
            ..Default::default()
        }])));
        let route = view.table().and_then(|t| t.open_selected());
        assert_eq!(route, Some(Route::RepositoryDetails("local".to_string())));
    }
}
