pub mod route;
pub mod stack;

pub use route::{Crumb, Route, Section, breadcrumbs, match_path};
pub use stack::{NavigationFrame, NavigationStack};
