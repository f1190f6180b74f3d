pub mod api;
pub mod app;
pub mod config;
pub mod globals;
pub mod input;
pub mod models;
pub mod navigation;
pub mod table;
pub mod ui;
pub mod util;
pub mod view;

pub mod error;

pub use error::DashError;
