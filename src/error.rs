use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl DashError {
    /// Whether the server answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        match self {
            DashError::NotFound(_) => true,
            DashError::Http(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(DashError::NotFound("/clients/web".to_string()).is_not_found());
        assert!(!DashError::Api("status 500".to_string()).is_not_found());
        assert!(!DashError::Config("bad".to_string()).is_not_found());
    }
}
