use ratatui::{Frame, layout::Rect};
use tracing::warn;

use super::cards::{
    client_card, client_health_card, client_modules_card, image_card, job_settings_card,
    job_timeline_card, module_card, module_params_card, render_cards, repository_card,
};
use super::pane::TablePane;
use crate::error::Result;
use crate::models::{Client, Image, Job, Module, Repository};
use crate::ui::{Card, Theme, render_loading_indicator, render_message};

/// Outcome of fetching a single object
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    NotFound,
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T>, what: &str) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) if e.is_not_found() => {
                warn!("{} not found: {}", what, e);
                LoadState::NotFound
            }
            Err(e) => {
                warn!("Cannot load {}: {}", what, e);
                LoadState::Failed(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// A fetched object together with the rows of its related table
#[derive(Debug, Clone, PartialEq)]
pub struct DetailData<T, R> {
    pub item: T,
    pub related: Vec<R>,
}

/// Objects that have a details page
pub trait Subject {
    /// Lowercase name used in messages
    const NOUN: &'static str;

    fn cards(&self, tick: usize, theme: &Theme) -> Vec<Card>;
}

impl Subject for Job {
    const NOUN: &'static str = "job";

    fn cards(&self, _tick: usize, _theme: &Theme) -> Vec<Card> {
        let mut cards = vec![job_settings_card(self), job_timeline_card(self)];
        if let Some(client) = &self.client {
            cards.push(client_card(client));
        }
        if let Some(module) = &self.module {
            cards.push(module_card(module));
        }
        cards
    }
}

impl Subject for Client {
    const NOUN: &'static str = "client";

    fn cards(&self, tick: usize, theme: &Theme) -> Vec<Card> {
        vec![client_health_card(self, tick, theme), client_modules_card(self)]
    }
}

impl Subject for Module {
    const NOUN: &'static str = "module";

    fn cards(&self, _tick: usize, _theme: &Theme) -> Vec<Card> {
        let mut cards = vec![module_card(self)];
        cards.extend(module_params_card(self));
        cards
    }
}

impl Subject for Image {
    const NOUN: &'static str = "image";

    fn cards(&self, _tick: usize, _theme: &Theme) -> Vec<Card> {
        let mut cards = vec![image_card(self)];
        if let Some(module) = &self.module {
            cards.push(module_card(module));
        }
        cards
    }
}

impl Subject for Repository {
    const NOUN: &'static str = "repository";

    fn cards(&self, _tick: usize, _theme: &Theme) -> Vec<Card> {
        vec![repository_card(self)]
    }
}

/// Details page: cards for one object above a table of related rows
pub struct DetailView<T, R> {
    /// uuid or name the page was opened with
    pub key: String,
    pub state: LoadState<T>,
    pub related: TablePane<R>,
}

impl<T: Subject, R> DetailView<T, R> {
    pub fn new(key: impl Into<String>, related: TablePane<R>) -> Self {
        Self {
            key: key.into(),
            state: LoadState::Loading,
            related,
        }
    }

    pub fn begin_refresh(&mut self) {
        if self.state.ready().is_some() {
            self.related.table.set_loading(true);
        }
    }

    pub fn finish(&mut self, result: Result<DetailData<T, R>>) {
        let what = format!("{} {}", T::NOUN, self.key);
        match result {
            Ok(data) => {
                self.state = LoadState::Ready(data.item);
                self.related.set_rows(data.related);
            }
            Err(e) => {
                self.state = LoadState::from_result(Err(e), &what);
                self.related.set_rows(Vec::new());
            }
        }
        self.related.table.set_loading(false);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, tick: usize) {
        let banner = Rect {
            height: area.height.min(3),
            ..area
        };
        match &self.state {
            LoadState::Loading => {
                let label = format!("Loading {}", T::NOUN);
                render_loading_indicator(frame, area, tick, &label, theme);
            }
            LoadState::NotFound => {
                let message = format!("Could not find {} {}", T::NOUN, self.key);
                render_message(frame, banner, "Not found", &message, theme);
            }
            LoadState::Failed(error) => {
                let title = format!("Cannot load {}", T::NOUN);
                render_message(frame, banner, &title, error, theme);
            }
            LoadState::Ready(item) => {
                let used = render_cards(frame, area, &item.cards(tick, theme), theme);
                let rest = Rect {
                    y: area.y + used,
                    height: area.height.saturating_sub(used),
                    ..area
                };
                if rest.height > 2 {
                    self.related.render(frame, rest, theme, tick, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use crate::table::TableOptions;
    use crate::view::columns::image_columns;
    use ratatui::{Terminal, backend::TestBackend};

    fn view() -> DetailView<Repository, Image> {
        DetailView::new(
            "local",
            TablePane::new("Stored images", image_columns(), TableOptions::default()),
        )
    }

    fn screen(view: &DetailView<Repository, Image>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
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
    fn test_not_found_is_distinct_from_failure() {
        let mut v = view();
        v.finish(Err(DashError::NotFound("/repositories/local".to_string())));
        assert_eq!(v.state, LoadState::NotFound);
        assert!(screen(&v).contains("Not found"));

        let mut v = view();
        v.finish(Err(DashError::Api("repositories/local returned 500".to_string())));
        assert!(matches!(v.state, LoadState::Failed(_)));
        assert!(screen(&v).contains("Cannot load repository"));
    }

    #[test]
    fn test_ready_renders_cards_and_related_rows() {
        let mut v = view();
        assert!(screen(&v).contains("Loading repository..."));

        let image = Image {
            uuid: "c0ffee00-1111".to_string(),
            size_on_disk: 2048,
            ..Default::default()
        };
        v.finish(Ok(DetailData {
            item: Repository {
                name: "local".to_string(),
                path: "/srv/backups".to_string(),
                ..Default::default()
            },
            related: vec![image],
        }));

        let screen = screen(&v);
        assert!(screen.contains("/srv/backups"));
        assert!(screen.contains("Stored images"));
        assert!(screen.contains("c0ffee00"));
        assert!(screen.contains("2 KiB"));
    }

    #[test]
    fn test_refresh_keeps_item() {
        let mut v = view();
        v.begin_refresh();
        assert!(!v.related.table.is_loading());

        v.finish(Ok(DetailData {
            item: Repository::default(),
            related: Vec::new(),
        }));
        v.begin_refresh();
        assert!(v.related.table.is_loading());
        assert!(v.state.ready().is_some());
    }

    #[test]
    fn test_job_cards() {
        let job = Job {
            client: Some(Client::default()),
            ..Default::default()
        };
        let cards = job.cards(0, &Theme::dark());
        assert_eq!(cards.len(), 3);
        assert!(cards[2].value("SSH").is_none());
    }
}
