pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::ConfigValidator;
