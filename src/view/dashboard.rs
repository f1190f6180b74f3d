use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::columns::{job_columns, job_link};
use super::pane::TablePane;
use crate::models::{ImageStats, Job, JobSummary, ServerConfig, StatusCode};
use crate::table::TableOptions;
use crate::ui::status::status_color;
use crate::ui::{Card, Theme, render_loading_indicator};
use crate::util::format_size;

/// Everything the overview shows. Each part degrades on its own when its
/// request fails, so the page always renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    /// Jobs started in the last 24 hours
    pub summary: JobSummary,
    /// "unknown" when the version endpoint fails
    pub version: String,
    pub image_stats: Option<ImageStats>,
    pub config: Option<ServerConfig>,
    /// Size of the modules listing; 0 when it fails
    pub modules_installed: usize,
    pub latest_jobs: Vec<Job>,
}

fn count(value: usize, status: StatusCode) -> Line<'static> {
    Line::from(Span::styled(
        value.to_string(),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    ))
}

fn unavailable() -> Line<'static> {
    Line::from("unavailable")
}

impl DashboardData {
    pub fn cards(&self) -> Vec<Card> {
        let summary = &self.summary;
        let jobs = Card::new("Jobs, last 24h")
            .row("Total", summary.total.to_string())
            .row("Running", count(summary.running, StatusCode::Info))
            .row("Success", count(summary.success, StatusCode::Ok))
            .row("Incomplete", count(summary.incomplete, StatusCode::Warning))
            .row("Error", count(summary.error, StatusCode::Critical));

        let server = Card::new("Relique").row("Version", self.version.clone());

        let images = match self.image_stats {
            Some(stats) => Card::new("Images")
                .row("Count", stats.count.to_string())
                .row("Size on disk", format_size(stats.total_size)),
            None => Card::new("Images").row("Count", unavailable()),
        };

        let policy = match &self.config {
            Some(config) => Card::new("Backup policy")
                .row("Clients", config.clients.len().to_string())
                .row("Repositories", config.repositories.len().to_string()),
            None => Card::new("Backup policy").row("Clients", unavailable()),
        }
        .row("Modules installed", self.modules_installed.to_string());

        vec![jobs, server, images, policy]
    }
}

pub struct DashboardView {
    pub data: Option<DashboardData>,
    pub latest: TablePane<Job>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            data: None,
            latest: TablePane::new("Latest jobs", job_columns(), TableOptions::plain())
                .with_link(job_link),
        }
    }

    pub fn begin_refresh(&mut self) {
        if self.data.is_some() {
            self.latest.table.set_loading(true);
        }
    }

    pub fn finish(&mut self, mut data: DashboardData) {
        self.latest.set_rows(std::mem::take(&mut data.latest_jobs));
        self.latest.table.set_loading(false);
        self.data = Some(data);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, tick: usize) {
        let Some(data) = &self.data else {
            render_loading_indicator(frame, area, tick, "Loading overview", theme);
            return;
        };

        let cards = data.cards();
        let height = cards.iter().map(Card::height).max().unwrap_or(0);
        let [top, bottom] =
            Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(area);

        let columns = Layout::horizontal(vec![Constraint::Fill(1); cards.len()]).split(top);
        for (card, column) in cards.iter().zip(columns.iter()) {
            card.render(frame, *column, theme);
        }
        self.latest.render(frame, bottom, theme, tick, true);
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}
