use std::collections::HashMap;

/// Default keybindings for the application, as key → command name
pub fn default_keybindings() -> HashMap<String, String> {
    let mut bindings = HashMap::new();

    // Global
    bindings.insert("q".to_string(), "quit".to_string());
    bindings.insert("Ctrl+c".to_string(), "quit".to_string());
    bindings.insert("?".to_string(), "help".to_string());
    bindings.insert("Esc".to_string(), "back".to_string());
    bindings.insert("h".to_string(), "back".to_string());
    bindings.insert("r".to_string(), "refresh".to_string());
    bindings.insert("t".to_string(), "toggle_theme".to_string());

    // Sections
    bindings.insert("1".to_string(), "goto_dashboard".to_string());
    bindings.insert("2".to_string(), "goto_jobs".to_string());
    bindings.insert("3".to_string(), "goto_clients".to_string());
    bindings.insert("4".to_string(), "goto_modules".to_string());
    bindings.insert("5".to_string(), "goto_images".to_string());
    bindings.insert("6".to_string(), "goto_repositories".to_string());

    // Rows
    bindings.insert("j".to_string(), "down".to_string());
    bindings.insert("Down".to_string(), "down".to_string());
    bindings.insert("k".to_string(), "up".to_string());
    bindings.insert("Up".to_string(), "up".to_string());
    bindings.insert("g".to_string(), "top".to_string());
    bindings.insert("G".to_string(), "bottom".to_string());
    bindings.insert("Enter".to_string(), "open".to_string());
    bindings.insert("l".to_string(), "open".to_string());

    // Table specific
    bindings.insert("/".to_string(), "search".to_string());
    bindings.insert("s".to_string(), "sort".to_string());
    bindings.insert("<".to_string(), "column_left".to_string());
    bindings.insert("Left".to_string(), "column_left".to_string());
    bindings.insert(">".to_string(), "column_right".to_string());
    bindings.insert("Right".to_string(), "column_right".to_string());
    bindings.insert("]".to_string(), "next_page".to_string());
    bindings.insert("PageDown".to_string(), "next_page".to_string());
    bindings.insert("[".to_string(), "previous_page".to_string());
    bindings.insert("PageUp".to_string(), "previous_page".to_string());
    bindings.insert("}".to_string(), "last_page".to_string());
    bindings.insert("{".to_string(), "first_page".to_string());
    bindings.insert("+".to_string(), "page_size".to_string());

    // Client health
    bindings.insert("p".to_string(), "ping".to_string());
    bindings.insert("P".to_string(), "ping_all".to_string());

    bindings
}

/// Page sizes offered by the page size selector
pub const PAGE_SIZES: [usize; 5] = [5, 10, 25, 50, 100];

/// Limit used when a view wants the complete list from the server
pub const FULL_LIST_LIMIT: u64 = 10_000;

/// Visible window of the page number list
pub const PAGINATION_WINDOW: usize = 6;

/// Fallback SSH settings shown for clients that leave them empty
pub const DEFAULT_CLIENT_SSH_USER: &str = "relique";
pub const DEFAULT_CLIENT_SSH_PORT: u16 = 22;
