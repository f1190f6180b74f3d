mod fetch;
mod render;
mod types;

pub use types::Message;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_input::{Input, InputRequest};

use crate::api::ReliqueApi;
use crate::config::{Config, ConfigLoader};
use crate::error::Result;
use crate::input::{Command, Keymap};
use crate::navigation::{NavigationFrame, NavigationStack, Route, Section};
use crate::table::Debouncer;
use crate::ui::Theme;
use crate::view::{Payload, View};
use types::StatusMessage;

/// Spinner frame interval while something is loading
const TICK: Duration = Duration::from_millis(100);

pub struct App {
    config: Config,
    keymap: Keymap,
    api: Arc<dyn ReliqueApi>,

    route: Route,
    view: View,
    history: NavigationStack,
    /// Bumped on every navigation and refresh
    generation: u64,
    /// Page and row to restore once the page's data arrives
    pending_position: Option<(usize, usize)>,

    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,

    theme: Theme,
    search: Option<Input>,
    debouncer: Debouncer<String>,
    show_help: bool,
    status: Option<StatusMessage>,

    running: bool,
    needs_render: bool,
    tick: usize,
    last_tick: Instant,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn ReliqueApi>) -> Self {
        let route = Route::parse(&config.ui.start);
        let theme_name = config
            .ui
            .theme_file
            .as_deref()
            .and_then(ConfigLoader::load_theme)
            .unwrap_or(config.ui.theme);
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            keymap: Keymap::from_config(&config.keybindings),
            view: View::for_route(&route, config.ui.page_size),
            route,
            api,
            history: NavigationStack::default(),
            generation: 0,
            pending_position: None,
            tx,
            rx,
            theme: Theme::from_name(theme_name),
            search: None,
            debouncer: Debouncer::new(config.ui.filter_debounce()),
            show_help: false,
            status: None,
            running: false,
            needs_render: true,
            tick: 0,
            last_tick: Instant::now(),
            config,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        info!("Opening {}", self.route);
        self.spawn_load();

        while self.running {
            while let Ok(message) = self.rx.try_recv() {
                self.handle_message(message);
            }
            self.on_tick(Instant::now());

            if self.needs_render {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_render = false;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(_, _) => self.needs_render = true,
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn spawn_load(&self) {
        let api = Arc::clone(&self.api);
        let route = self.route.clone();
        let tx = self.tx.clone();
        let generation = self.generation;
        let latest_jobs = self.config.ui.latest_jobs;

        tokio::spawn(async move {
            if let Some(payload) = fetch::load_route(api.as_ref(), &route, latest_jobs).await {
                // the receiver only goes away when the app exits
                let _ = tx.send(Message {
                    generation,
                    payload,
                });
            }
        });
    }

    /// One task per client, no cap; each answer only touches its own row
    fn spawn_pings(&mut self, names: Vec<String>) {
        let names = self.view.start_ping(&names);
        if names.is_empty() {
            return;
        }
        debug!("Pinging {} client(s)", names.len());
        let settle = self.config.ui.ping_settle();
        for name in names {
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            let generation = self.generation;
            tokio::spawn(async move {
                let payload = fetch::ping(api.as_ref(), name, settle).await;
                let _ = tx.send(Message {
                    generation,
                    payload,
                });
            });
        }
        self.needs_render = true;
    }

    fn handle_message(&mut self, message: Message) {
        if message.generation != self.generation {
            debug!(
                "Dropping stale message from generation {} (current {})",
                message.generation, self.generation
            );
            return;
        }

        let auto_ping = match &message.payload {
            Payload::ClientDetails(Ok(data)) => Some(data.item.name.clone()),
            _ => None,
        };

        if self.view.apply(message.payload) {
            if let Some((page, selected)) = self.pending_position.take() {
                if let Some(table) = self.view.table_mut() {
                    table.restore_position(page, selected);
                }
            }
            self.needs_render = true;
        }

        if let Some(name) = auto_ping {
            self.spawn_pings(vec![name]);
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.apply_filter(&query);
        }

        if self.status.as_ref().is_some_and(|s| s.expired(now)) {
            self.status = None;
            self.needs_render = true;
        }

        if self.view.is_busy() && now.saturating_duration_since(self.last_tick) >= TICK {
            self.tick = self.tick.wrapping_add(1);
            self.last_tick = now;
            self.needs_render = true;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.needs_render = true;

        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.search.is_some() {
            self.handle_search_key(key);
            return;
        }

        match self.keymap.lookup(&key) {
            Some(command) => self.execute(command),
            None => debug!("Unbound key {:?}", key.code),
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::Help => self.show_help = true,
            Command::Back => self.go_back(),
            Command::Refresh => self.refresh(),
            Command::ToggleTheme => self.toggle_theme(),
            Command::GotoDashboard => self.navigate(Section::Dashboard.route()),
            Command::GotoJobs => self.navigate(Section::Jobs.route()),
            Command::GotoClients => self.navigate(Section::Clients.route()),
            Command::GotoModules => self.navigate(Section::Modules.route()),
            Command::GotoImages => self.navigate(Section::Images.route()),
            Command::GotoRepositories => self.navigate(Section::Repositories.route()),
            Command::Open => {
                if let Some(route) = self.view.table().and_then(|t| t.open_selected()) {
                    self.navigate(route);
                }
            }
            Command::Search => self.start_search(),
            Command::Ping => {
                if let Some(name) = self.view.ping_target() {
                    self.spawn_pings(vec![name]);
                }
            }
            Command::PingAll => {
                let names = self.view.ping_all_targets();
                if !names.is_empty() {
                    self.status = Some(StatusMessage::info(format!(
                        "Pinging {} client(s)",
                        names.len()
                    )));
                }
                self.spawn_pings(names);
            }
            table_command => {
                if let Some(table) = self.view.table_mut() {
                    match table_command {
                        Command::Down => table.select_next(),
                        Command::Up => table.select_previous(),
                        Command::Top => table.select_first(),
                        Command::Bottom => table.select_last(),
                        Command::Sort => table.toggle_sort(),
                        Command::ColumnLeft => table.column_left(),
                        Command::ColumnRight => table.column_right(),
                        Command::NextPage => table.next_page(),
                        Command::PreviousPage => table.previous_page(),
                        Command::FirstPage => table.first_page(),
                        Command::LastPage => table.last_page(),
                        Command::PageSize => table.cycle_page_size(),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Open a route, remembering where we were
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            self.refresh();
            return;
        }
        let (page, selected) = self.view.table().map(|t| t.position()).unwrap_or((0, 0));
        self.history
            .push(NavigationFrame::new(self.route.clone()).with_position(page, selected));
        self.enter(route, None);
    }

    /// Clear an active filter first; otherwise return to the previous page
    fn go_back(&mut self) {
        let filtered = self.view.table().is_some_and(|t| !t.filter().is_empty());
        if filtered {
            self.debouncer.cancel();
            self.apply_filter("");
            return;
        }
        if let Some(frame) = self.history.pop() {
            self.enter(frame.route, Some((frame.page_index, frame.selected_index)));
        }
    }

    fn enter(&mut self, route: Route, position: Option<(usize, usize)>) {
        info!("Opening {}", route);
        self.generation += 1;
        self.view = View::for_route(&route, self.config.ui.page_size);
        self.route = route;
        self.pending_position = position;
        self.search = None;
        self.debouncer.cancel();
        self.spawn_load();
    }

    fn refresh(&mut self) {
        debug!("Refreshing {}", self.route);
        self.generation += 1;
        self.view.begin_refresh();
        self.spawn_load();
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let Some(path) = self.config.ui.theme_file.clone() else {
            return;
        };
        match ConfigLoader::save_theme(&path, self.theme.name) {
            Ok(()) => debug!("Saved theme to {:?}", path),
            Err(e) => {
                warn!("Cannot save theme: {:#}", e);
                self.status = Some(StatusMessage::error("Cannot save theme preference"));
            }
        }
    }

    fn start_search(&mut self) {
        let Some(table) = self.view.table() else {
            return;
        };
        if table.is_filterable() {
            self.search = Some(Input::new(table.filter().to_string()));
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let Some(input) = self.search.as_mut() else {
            return;
        };

        let request = match key.code {
            KeyCode::Esc => {
                self.search = None;
                self.debouncer.cancel();
                self.apply_filter("");
                return;
            }
            KeyCode::Enter => {
                let query = input.value().to_string();
                self.search = None;
                self.debouncer.cancel();
                self.apply_filter(&query);
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
                return;
            }
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };

        if input.handle(request).is_some_and(|change| change.value) {
            let query = input.value().to_string();
            self.debouncer.push(query, Instant::now());
        }
    }

    fn apply_filter(&mut self, query: &str) {
        if let Some(table) = self.view.table_mut() {
            if table.filter() != query {
                debug!("Filter set to {:?}", query);
                table.set_filter(query);
                self.needs_render = true;
            }
        }
    }
}
