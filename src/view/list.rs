use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};
use tracing::warn;

use super::pane::TablePane;
use crate::error::Result;
use crate::models::{Client, PingReport};
use crate::navigation::Route;
use crate::table::{Column, TableOptions};
use crate::ui::{Theme, render_loading_indicator, render_message};

/// A full-list page: one table over every object of a kind
pub struct ListView<T> {
    pub pane: TablePane<T>,
    /// Set once the first response arrived, successful or not
    loaded: bool,
    error: Option<String>,
}

impl<T> ListView<T> {
    pub fn new(title: &str, columns: Vec<Column<T>>, page_size: usize) -> Self {
        Self {
            pane: TablePane::new(
                title,
                columns,
                TableOptions::default().with_page_size(page_size),
            ),
            loaded: false,
            error: None,
        }
    }

    pub fn with_link(mut self, link: fn(&T) -> Route) -> Self {
        self.pane = self.pane.with_link(link);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Existing rows stay on screen as skeletons until the reload lands
    pub fn begin_refresh(&mut self) {
        if self.loaded {
            self.pane.table.set_loading(true);
        }
    }

    /// A failed load leaves an empty table and an inline message
    pub fn finish(&mut self, result: Result<Vec<T>>) {
        match result {
            Ok(rows) => {
                self.pane.set_rows(rows);
                self.error = None;
            }
            Err(e) => {
                warn!("Cannot load {}: {}", self.pane.title, e);
                self.pane.set_rows(Vec::new());
                self.error = Some(e.to_string());
            }
        }
        self.loaded = true;
        self.pane.table.set_loading(false);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, tick: usize) {
        if !self.loaded {
            let label = format!("Loading {}", self.pane.title.to_lowercase());
            render_loading_indicator(frame, area, tick, &label, theme);
            return;
        }

        let table_area = match &self.error {
            Some(error) => {
                let [message, rest] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
                let title = format!("Cannot load {}", self.pane.title.to_lowercase());
                render_message(frame, message, &title, error, theme);
                rest
            }
            None => area,
        };
        self.pane.render(frame, table_area, theme, tick, true);
    }
}

impl ListView<Client> {
    /// Mark the named clients as pinging; returns how many matched
    pub fn start_ping<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> usize {
        let names: Vec<&str> = names.into_iter().collect();
        let mut matched = 0;
        self.pane.table.update_rows(|client| {
            if names.contains(&client.name.as_str()) {
                client.health.start_ping();
                matched += 1;
            }
        });
        matched
    }

    pub fn settle_ping(&mut self, name: &str, report: &PingReport) {
        self.pane.table.update_rows(|client| {
            if client.name == name {
                client.health.settle(report);
            }
        });
    }

    pub fn fail_ping(&mut self, name: &str) {
        self.pane.table.update_rows(|client| {
            if client.name == name {
                client.health.ping_failed();
            }
        });
    }

    pub fn client_names(&self) -> Vec<String> {
        self.pane.table.rows().iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use crate::models::StatusCode;
    use crate::view::columns::client_columns;
    use ratatui::{Terminal, backend::TestBackend};

    fn clients(names: &[&str]) -> Vec<Client> {
        names
            .iter()
            .map(|n| Client {
                name: n.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn screen(view: &ListView<Client>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area(), &Theme::dark(), 0))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_first_load_then_refresh() {
        let mut view = ListView::new("Clients", client_columns(), 25);
        assert!(screen(&view).contains("Loading clients..."));

        view.begin_refresh();
        assert!(!view.pane.table.is_loading());

        view.finish(Ok(clients(&["web", "db"])));
        assert!(view.is_loaded());
        assert!(screen(&view).contains("web"));

        view.begin_refresh();
        assert!(view.pane.table.is_loading());
        assert!(!screen(&view).contains("web"));

        view.finish(Ok(clients(&["web"])));
        assert!(!view.pane.table.is_loading());
        assert_eq!(view.pane.table.total_rows(), 1);
    }

    #[test]
    fn test_failure_shows_message_and_empty_table() {
        let mut view = ListView::new("Clients", client_columns(), 25);
        view.finish(Err(DashError::Api("clients returned 500".to_string())));
        assert!(view.error().is_some());
        let screen = screen(&view);
        assert!(screen.contains("Cannot load clients"));
        assert!(screen.contains("Nothing to show"));
    }

    #[test]
    fn test_ping_updates_only_matching_rows() {
        let mut view = ListView::new("Clients", client_columns(), 25);
        view.finish(Ok(clients(&["web", "db"])));

        assert_eq!(view.start_ping(["web"]), 1);
        let rows = view.pane.table.rows();
        assert!(rows[0].health.loading);
        assert!(!rows[1].health.loading);

        view.settle_ping(
            "web",
            &PingReport {
                ping_error: Some(String::new()),
            },
        );
        assert_eq!(view.pane.table.rows()[0].health.ssh_alive, StatusCode::Ok);
        assert_eq!(view.pane.table.rows()[1].health.ssh_alive, StatusCode::Unknown);

        let all = view.client_names();
        assert_eq!(view.start_ping(all.iter().map(String::as_str)), 2);
        view.fail_ping("db");
        assert!(!view.pane.table.rows()[1].health.loading);
        assert!(view.pane.table.rows()[0].health.loading);
    }
}
