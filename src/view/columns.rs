//! Column sets for every list page

use ratatui::text::{Line, Span};

use crate::models::{Client, Image, Job, Module, Repository};
use crate::navigation::Route;
use crate::table::{CellValue, Column, SortKind};
use crate::ui::status::{bool_badge, status_badge, status_dot, tag};
use crate::util::{format_date, format_size, short_uuid};

/// Shown in the health column while a ping is in flight
pub const PINGING: &str = "◌";

fn module_tag(name: &str) -> Line<'static> {
    if name.is_empty() {
        Line::from("")
    } else {
        Line::from(tag(name))
    }
}

fn tags(names: &[&str]) -> Line<'static> {
    let mut spans = Vec::with_capacity(names.len() * 2);
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(tag(*name));
    }
    Line::from(spans)
}

pub fn job_columns() -> Vec<Column<Job>> {
    vec![
        Column::new("uuid", "ID", |j: &Job| CellValue::from(j.uuid.as_str()))
            .cell(|_, j| Line::from(short_uuid(&j.uuid).to_string()))
            .sortable(false)
            .width(10),
        Column::new("client", "Client", |j: &Job| CellValue::from(j.client_name())),
        Column::new("module", "Module", |j: &Job| CellValue::from(j.module_name()))
            .cell(|_, j| module_tag(j.module_name())),
        Column::new("type", "Type", |j: &Job| CellValue::from(j.job_type.as_str())).width(9),
        Column::new("status", "Status", |j: &Job| CellValue::from(j.status.as_str()))
            .cell(|_, j| Line::from(status_badge(j.status.as_str(), j.status.status_code())))
            .width(13),
        Column::new("start", "Start", |j: &Job| CellValue::from(j.start_time))
            .cell(|_, j| Line::from(format_date(j.start_time)))
            .sort_by(SortKind::Datetime)
            .width(20),
        Column::new("end", "End", |j: &Job| CellValue::from(j.end_time))
            .cell(|_, j| Line::from(format_date(j.end_time)))
            .sort_by(SortKind::Datetime)
            .width(20),
    ]
}

pub fn client_columns() -> Vec<Column<Client>> {
    vec![
        Column::new("health", "Health", |c: &Client| {
            CellValue::Number(f64::from(c.health.ssh_alive.code()))
        })
        .cell(|_, c| {
            if c.health.loading {
                Line::from(PINGING)
            } else {
                Line::from(status_dot(c.health.ssh_alive))
            }
        })
        .sort_by(SortKind::Basic)
        .filterable(false)
        .width(8),
        Column::new("name", "Name", |c: &Client| CellValue::from(c.name.as_str())),
        Column::new("address", "Address", |c: &Client| {
            CellValue::from(c.address.as_str())
        }),
        Column::new("modules", "Modules", |c: &Client| {
            CellValue::from(c.module_names().join(" "))
        })
        .cell(|_, c| tags(&c.module_names())),
    ]
}

pub fn module_columns() -> Vec<Column<Module>> {
    vec![
        Column::new("name", "Name", |m: &Module| CellValue::from(m.name.as_str())),
        Column::new("type", "Type", |m: &Module| CellValue::from(m.module_type.as_str())),
        Column::new("backup_type", "Backup type", |m: &Module| {
            CellValue::from(m.backup_type.as_str())
        })
        .width(16),
        Column::new("variants", "Variants", |m: &Module| {
            CellValue::from(m.available_variants.join(" "))
        })
        .cell(|_, m| {
            let names: Vec<&str> = m.available_variants.iter().map(String::as_str).collect();
            tags(&names)
        }),
    ]
}

pub fn image_columns() -> Vec<Column<Image>> {
    vec![
        Column::new("uuid", "ID", |i: &Image| CellValue::from(i.uuid.as_str()))
            .cell(|_, i| Line::from(short_uuid(&i.uuid).to_string()))
            .sortable(false)
            .width(10),
        Column::new("client", "Client", |i: &Image| CellValue::from(i.client_name())),
        Column::new("module", "Module", |i: &Image| CellValue::from(i.module_name()))
            .cell(|_, i| module_tag(i.module_name())),
        Column::new("date", "Date", |i: &Image| CellValue::from(i.created_at))
            .cell(|_, i| Line::from(format_date(i.created_at)))
            .sort_by(SortKind::Datetime)
            .width(20),
        Column::new("size", "Size", |i: &Image| CellValue::from(i.size_on_disk))
            .cell(|_, i| Line::from(format_size(i.size_on_disk)))
            .filterable(false)
            .width(12),
        Column::new("files", "Files", |i: &Image| CellValue::from(i.number_of_files))
            .filterable(false)
            .width(8),
    ]
}

pub fn repository_columns() -> Vec<Column<Repository>> {
    vec![
        Column::new("name", "Name", |r: &Repository| CellValue::from(r.name.as_str())),
        Column::new("type", "Type", |r: &Repository| {
            CellValue::from(r.repo_type.as_str())
        })
        .width(10),
        Column::new("path", "Path", |r: &Repository| CellValue::from(r.path.as_str())),
        Column::new("default", "Default", |r: &Repository| CellValue::from(r.default))
            .cell(|_, r| Line::from(bool_badge(r.default)))
            .filterable(false)
            .width(9),
    ]
}

pub fn job_link(job: &Job) -> Route {
    Route::JobDetails(job.uuid.clone())
}

pub fn client_link(client: &Client) -> Route {
    Route::ClientDetails(client.name.clone())
}

pub fn module_link(module: &Module) -> Route {
    Route::ModuleDetails(module.name.clone())
}

pub fn image_link(image: &Image) -> Route {
    Route::ImageDetails(image.uuid.clone())
}

pub fn repository_link(repository: &Repository) -> Route {
    Route::RepositoryDetails(repository.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobStatus, StatusCode};
    use crate::table::{DataTable, TableOptions};

    fn job(uuid: &str, client: &str, status: JobStatus) -> Job {
        Job {
            uuid: uuid.to_string(),
            client: Some(Client {
                name: client.to_string(),
                ..Default::default()
            }),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_job_id_is_short_and_unsortable() {
        let columns = job_columns();
        let j = job("3f2a9c1e-aaaa-bbbb-cccc-000000000000", "web", JobStatus::Success);
        assert_eq!(columns[0].render(&j).to_string(), "3f2a9c1e");
        assert!(!columns[0].sortable);
        assert_eq!(columns[4].render(&j).to_string(), " success ");
    }

    #[test]
    fn test_job_filter_matches_client() {
        let mut table = DataTable::new(job_columns(), TableOptions::default()).with_rows(vec![
            job("1", "web-01", JobStatus::Active),
            job("2", "db-01", JobStatus::Error),
        ]);
        table.set_global_filter("db");
        assert_eq!(table.filtered_len(), 1);
        assert_eq!(table.visible_rows()[0].uuid, "2");
    }

    #[test]
    fn test_health_sorts_by_code() {
        let mut ok = Client {
            name: "b".to_string(),
            ..Default::default()
        };
        ok.health.ssh_alive = StatusCode::Ok;
        let unknown = Client {
            name: "a".to_string(),
            ..Default::default()
        };

        let mut table =
            DataTable::new(client_columns(), TableOptions::default()).with_rows(vec![unknown, ok]);
        table.toggle_sort(0);
        assert_eq!(table.visible_rows()[0].name, "b");

        // health is not a text column
        table.set_global_filter("Reachable");
        assert_eq!(table.filtered_len(), 0);
    }

    #[test]
    fn test_pinging_marker() {
        let mut client = Client::default();
        client.health.loading = true;
        assert_eq!(client_columns()[0].render(&client).to_string(), PINGING);
    }

    #[test]
    fn test_links() {
        let repo = Repository {
            name: "local".to_string(),
            ..Default::default()
        };
        assert_eq!(repository_link(&repo).path(), "/repositories/local");
        let j = job("abc", "web", JobStatus::Pending);
        assert_eq!(job_link(&j).path(), "/jobs/abc");
    }
}
