use serde::{Deserialize, Serialize};

/// Storage backend holding images
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    #[serde(rename = "type")]
    pub repo_type: String,
    pub path: String,
    pub default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let repo: Repository =
            serde_json::from_str(r#"{"name":"local","type":"local","path":"/var/lib/relique","default":true}"#)
                .unwrap();
        assert_eq!(repo.repo_type, "local");
        assert!(repo.default);

        let sparse: Repository = serde_json::from_str(r#"{"name":"nas"}"#).unwrap();
        assert_eq!(sparse.path, "");
        assert!(!sparse.default);
    }
}
