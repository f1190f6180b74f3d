// Keyboard handling: key binding parsing and the command keymap
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A key as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyBinding {
    /// Plain character, case sensitive ("p" and "P" differ)
    Char(char),
    /// Control + character combination
    Ctrl(char),
    Enter,
    Esc,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

impl KeyBinding {
    /// Parse a key string from configuration
    ///
    /// Supports formats:
    /// - Single char: "p", "P", "/", "]"
    /// - Ctrl combination: "ctrl+r", "Ctrl+R", "CTRL+R" (case insensitive)
    /// - Named keys: "Enter", "Esc", "Tab", "Up", "PageDown", ...
    ///
    /// # Examples
    /// ```
    /// use relique_dash::input::KeyBinding;
    ///
    /// assert_eq!(KeyBinding::parse("p").unwrap(), KeyBinding::Char('p'));
    /// assert_eq!(KeyBinding::parse("ctrl+r").unwrap(), KeyBinding::Ctrl('r'));
    /// assert_eq!(KeyBinding::parse("PageDown").unwrap(), KeyBinding::PageDown);
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() {
            return Err("Key cannot be empty".to_string());
        }

        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(KeyBinding::Char(ch));
        }

        let lower = s.to_lowercase();
        if let Some(stripped) = lower.strip_prefix("ctrl+") {
            let mut rest = stripped.chars();
            return match (rest.next(), rest.next()) {
                (Some(ch), None) if ch.is_ascii_alphanumeric() => Ok(KeyBinding::Ctrl(ch)),
                (Some(_), None) => Err(format!(
                    "Invalid Ctrl combination '{}': character must be alphanumeric",
                    s
                )),
                _ => Err(format!(
                    "Invalid Ctrl combination '{}': expected single character after 'ctrl+'",
                    s
                )),
            };
        }

        match lower.as_str() {
            "enter" | "return" => Ok(KeyBinding::Enter),
            "esc" | "escape" => Ok(KeyBinding::Esc),
            "tab" => Ok(KeyBinding::Tab),
            "backspace" => Ok(KeyBinding::Backspace),
            "up" => Ok(KeyBinding::Up),
            "down" => Ok(KeyBinding::Down),
            "left" => Ok(KeyBinding::Left),
            "right" => Ok(KeyBinding::Right),
            "pageup" => Ok(KeyBinding::PageUp),
            "pagedown" => Ok(KeyBinding::PageDown),
            "home" => Ok(KeyBinding::Home),
            "end" => Ok(KeyBinding::End),
            "space" => Ok(KeyBinding::Char(' ')),
            _ => Err(format!(
                "Invalid key format '{}': expected single character, 'ctrl+X' or a key name",
                s
            )),
        }
    }

    /// Convert a terminal key event into a binding, if it has one
    pub fn from_event(key: &KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let binding = match key.code {
            KeyCode::Char(c) if ctrl => KeyBinding::Ctrl(c.to_ascii_lowercase()),
            KeyCode::Char(c) => KeyBinding::Char(c),
            KeyCode::Enter => KeyBinding::Enter,
            KeyCode::Esc => KeyBinding::Esc,
            KeyCode::Tab => KeyBinding::Tab,
            KeyCode::Backspace => KeyBinding::Backspace,
            KeyCode::Up => KeyBinding::Up,
            KeyCode::Down => KeyBinding::Down,
            KeyCode::Left => KeyBinding::Left,
            KeyCode::Right => KeyBinding::Right,
            KeyCode::PageUp => KeyBinding::PageUp,
            KeyCode::PageDown => KeyBinding::PageDown,
            KeyCode::Home => KeyBinding::Home,
            KeyCode::End => KeyBinding::End,
            _ => return None,
        };
        Some(binding)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyBinding::Char(' ') => write!(f, "Space"),
            KeyBinding::Char(c) => write!(f, "{}", c),
            KeyBinding::Ctrl(c) => write!(f, "Ctrl+{}", c.to_ascii_uppercase()),
            KeyBinding::Enter => write!(f, "Enter"),
            KeyBinding::Esc => write!(f, "Esc"),
            KeyBinding::Tab => write!(f, "Tab"),
            KeyBinding::Backspace => write!(f, "Backspace"),
            KeyBinding::Up => write!(f, "Up"),
            KeyBinding::Down => write!(f, "Down"),
            KeyBinding::Left => write!(f, "Left"),
            KeyBinding::Right => write!(f, "Right"),
            KeyBinding::PageUp => write!(f, "PageUp"),
            KeyBinding::PageDown => write!(f, "PageDown"),
            KeyBinding::Home => write!(f, "Home"),
            KeyBinding::End => write!(f, "End"),
        }
    }
}

/// Everything a key can trigger outside of the search input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Command {
    Quit,
    Help,
    Back,
    Refresh,
    ToggleTheme,
    GotoDashboard,
    GotoJobs,
    GotoClients,
    GotoModules,
    GotoImages,
    GotoRepositories,
    Down,
    Up,
    Top,
    Bottom,
    Open,
    Search,
    Sort,
    ColumnLeft,
    ColumnRight,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    PageSize,
    Ping,
    PingAll,
}

impl Command {
    pub const ALL: [Command; 27] = [
        Command::Quit,
        Command::Help,
        Command::Back,
        Command::Refresh,
        Command::ToggleTheme,
        Command::GotoDashboard,
        Command::GotoJobs,
        Command::GotoClients,
        Command::GotoModules,
        Command::GotoImages,
        Command::GotoRepositories,
        Command::Down,
        Command::Up,
        Command::Top,
        Command::Bottom,
        Command::Open,
        Command::Search,
        Command::Sort,
        Command::ColumnLeft,
        Command::ColumnRight,
        Command::NextPage,
        Command::PreviousPage,
        Command::FirstPage,
        Command::LastPage,
        Command::PageSize,
        Command::Ping,
        Command::PingAll,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Quit => "quit",
            Command::Help => "help",
            Command::Back => "back",
            Command::Refresh => "refresh",
            Command::ToggleTheme => "toggle_theme",
            Command::GotoDashboard => "goto_dashboard",
            Command::GotoJobs => "goto_jobs",
            Command::GotoClients => "goto_clients",
            Command::GotoModules => "goto_modules",
            Command::GotoImages => "goto_images",
            Command::GotoRepositories => "goto_repositories",
            Command::Down => "down",
            Command::Up => "up",
            Command::Top => "top",
            Command::Bottom => "bottom",
            Command::Open => "open",
            Command::Search => "search",
            Command::Sort => "sort",
            Command::ColumnLeft => "column_left",
            Command::ColumnRight => "column_right",
            Command::NextPage => "next_page",
            Command::PreviousPage => "previous_page",
            Command::FirstPage => "first_page",
            Command::LastPage => "last_page",
            Command::PageSize => "page_size",
            Command::Ping => "ping",
            Command::PingAll => "ping_all",
        }
    }

    /// Short description shown in the help overlay
    pub fn description(self) -> &'static str {
        match self {
            Command::Quit => "Quit",
            Command::Help => "Toggle this help",
            Command::Back => "Clear filter, then go back",
            Command::Refresh => "Reload current page",
            Command::ToggleTheme => "Switch dark/light theme",
            Command::GotoDashboard => "Dashboard",
            Command::GotoJobs => "All jobs",
            Command::GotoClients => "All clients",
            Command::GotoModules => "All modules",
            Command::GotoImages => "All images",
            Command::GotoRepositories => "All repositories",
            Command::Down => "Next row",
            Command::Up => "Previous row",
            Command::Top => "First row of page",
            Command::Bottom => "Last row of page",
            Command::Open => "Open selected row",
            Command::Search => "Search table",
            Command::Sort => "Cycle sort on column",
            Command::ColumnLeft => "Previous column",
            Command::ColumnRight => "Next column",
            Command::NextPage => "Next page",
            Command::PreviousPage => "Previous page",
            Command::FirstPage => "First page",
            Command::LastPage => "Last page",
            Command::PageSize => "Change page size",
            Command::Ping => "Ping selected client",
            Command::PingAll => "Ping all clients",
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| format!("Unknown command '{}'", s))
    }
}

/// Resolved key → command table
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Command>,
}

impl Keymap {
    /// Build a keymap from default bindings overridden by user bindings.
    /// Entries that fail to parse are skipped; the config validator reports them.
    pub fn from_config(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = HashMap::new();
        let defaults = crate::config::default_keybindings();

        for (key, command) in defaults.iter().chain(overrides.iter()) {
            match (KeyBinding::parse(key), command.parse::<Command>()) {
                (Ok(binding), Ok(command)) => {
                    bindings.insert(binding, command);
                }
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!(key = %key, command = %command, "Ignoring keybinding: {}", e);
                }
            }
        }

        Self { bindings }
    }

    pub fn lookup(&self, key: &KeyEvent) -> Option<Command> {
        KeyBinding::from_event(key).and_then(|binding| self.bindings.get(&binding).copied())
    }

    /// Keys bound to each command, sorted for display
    pub fn describe(&self) -> Vec<(Command, Vec<String>)> {
        let mut by_command: HashMap<Command, Vec<String>> = HashMap::new();
        for (binding, command) in &self.bindings {
            by_command
                .entry(*command)
                .or_default()
                .push(binding.to_string());
        }

        let mut entries: Vec<(Command, Vec<String>)> = by_command
            .into_iter()
            .map(|(command, mut keys)| {
                keys.sort();
                (command, keys)
            })
            .collect();
        entries.sort_by_key(|(command, _)| *command);
        entries
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(KeyBinding::parse("l").unwrap(), KeyBinding::Char('l'));
        assert_eq!(KeyBinding::parse("P").unwrap(), KeyBinding::Char('P'));
        assert_eq!(KeyBinding::parse("]").unwrap(), KeyBinding::Char(']'));
        assert_eq!(KeyBinding::parse("1").unwrap(), KeyBinding::Char('1'));
    }

    #[test]
    fn test_parse_ctrl() {
        assert_eq!(KeyBinding::parse("ctrl+l").unwrap(), KeyBinding::Ctrl('l'));
        assert_eq!(KeyBinding::parse("Ctrl+L").unwrap(), KeyBinding::Ctrl('l'));
        assert_eq!(KeyBinding::parse("CTRL+D").unwrap(), KeyBinding::Ctrl('d'));
        assert_eq!(KeyBinding::parse("ctrl+1").unwrap(), KeyBinding::Ctrl('1'));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(KeyBinding::parse("Enter").unwrap(), KeyBinding::Enter);
        assert_eq!(KeyBinding::parse("esc").unwrap(), KeyBinding::Esc);
        assert_eq!(KeyBinding::parse("PageUp").unwrap(), KeyBinding::PageUp);
        assert_eq!(KeyBinding::parse("space").unwrap(), KeyBinding::Char(' '));
    }

    #[test]
    fn test_parse_errors() {
        assert!(KeyBinding::parse("").is_err());
        assert!(KeyBinding::parse("ctrl+").is_err());
        assert!(KeyBinding::parse("ctrl+ll").is_err());
        assert!(KeyBinding::parse("ctrl+/").is_err());
        assert!(KeyBinding::parse("invalid").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyBinding::Char('l').to_string(), "l");
        assert_eq!(KeyBinding::Ctrl('l').to_string(), "Ctrl+L");
        assert_eq!(KeyBinding::PageDown.to_string(), "PageDown");
    }

    #[test]
    fn test_command_names_roundtrip() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>().unwrap(), command);
        }
        assert!("teleport".parse::<Command>().is_err());
    }

    #[test]
    fn test_default_keymap_lookup() {
        let keymap = Keymap::default();

        let event = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(&event), Some(Command::Ping));

        let event = KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(keymap.lookup(&event), Some(Command::PingAll));

        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keymap.lookup(&event), Some(Command::Quit));

        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(keymap.lookup(&event), Some(Command::Open));

        let event = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(&event), None);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut overrides = HashMap::new();
        overrides.insert("p".to_string(), "refresh".to_string());
        overrides.insert("ctrl+p".to_string(), "ping".to_string());
        overrides.insert("bogus".to_string(), "ping".to_string());
        let keymap = Keymap::from_config(&overrides);

        let event = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(&event), Some(Command::Refresh));

        let event = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(keymap.lookup(&event), Some(Command::Ping));
    }

    #[test]
    fn test_describe_lists_every_default_command() {
        let described = Keymap::default().describe();
        let quit = described
            .iter()
            .find(|(command, _)| *command == Command::Quit)
            .unwrap();
        assert_eq!(quit.1, vec!["Ctrl+C".to_string(), "q".to_string()]);
        assert_eq!(described.len(), Command::ALL.len());
    }
}
