pub mod format;

pub use format::{format_date, format_elapsed, format_size, short_uuid};
