use std::collections::HashMap;
use std::fmt;

/// Route table in match order: path pattern, crumb name.
/// `:param` segments capture exactly one non-empty path segment.
const ROUTES: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/dashboard", "Overview"),
    ("/jobs", "All jobs"),
    ("/jobs/:job_uuid", "Job details"),
    ("/clients", "All clients"),
    ("/clients/:client_name", "Client details"),
    ("/modules", "All modules"),
    ("/modules/:module_name", "Module details"),
    ("/images", "All images"),
    ("/images/:img_uuid", "Image details"),
    ("/repositories", "All repositories"),
    ("/repositories/:repo_name", "Repository details"),
];

/// A resolved page location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Jobs,
    JobDetails(String),
    Clients,
    ClientDetails(String),
    Modules,
    ModuleDetails(String),
    Images,
    ImageDetails(String),
    Repositories,
    RepositoryDetails(String),
    NotFound(String),
}

/// One breadcrumb entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

impl Crumb {
    fn new(name: &str, path: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
        }
    }
}

/// Match `path` against `pattern`, returning captured params on success
pub fn match_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (expected, actual) in pattern_segments.iter().zip(path_segments.iter()) {
        if let Some(name) = expected.strip_prefix(':') {
            params.insert(name.to_string(), (*actual).to_string());
        } else if expected != actual {
            return None;
        }
    }

    Some(params)
}

fn find_route(path: &str) -> Option<(&'static str, HashMap<String, String>)> {
    ROUTES
        .iter()
        .find_map(|(pattern, _)| match_path(pattern, path).map(|params| (*pattern, params)))
}

/// Breadcrumbs for a path: every route whose pattern is contained in the
/// matched pattern, in table order, with params substituted.
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    let Some((matched, params)) = find_route(path) else {
        return vec![Crumb::new("Home", "/"), Crumb::new("Page not found", "404")];
    };

    ROUTES
        .iter()
        .filter(|(pattern, _)| matched.contains(pattern))
        .map(|(pattern, name)| {
            let mut resolved = pattern.to_string();
            for (param, value) in &params {
                resolved = resolved.replace(&format!(":{}", param), value);
            }
            Crumb::new(name, resolved)
        })
        .collect()
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let Some((pattern, params)) = find_route(path) else {
            return Route::NotFound(path.to_string());
        };

        let param = |name: &str| params.get(name).cloned().unwrap_or_default();

        match pattern {
            "/" | "/dashboard" => Route::Dashboard,
            "/jobs" => Route::Jobs,
            "/jobs/:job_uuid" => Route::JobDetails(param("job_uuid")),
            "/clients" => Route::Clients,
            "/clients/:client_name" => Route::ClientDetails(param("client_name")),
            "/modules" => Route::Modules,
            "/modules/:module_name" => Route::ModuleDetails(param("module_name")),
            "/images" => Route::Images,
            "/images/:img_uuid" => Route::ImageDetails(param("img_uuid")),
            "/repositories" => Route::Repositories,
            "/repositories/:repo_name" => Route::RepositoryDetails(param("repo_name")),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::JobDetails(uuid) => format!("/jobs/{}", uuid),
            Route::Clients => "/clients".to_string(),
            Route::ClientDetails(name) => format!("/clients/{}", name),
            Route::Modules => "/modules".to_string(),
            Route::ModuleDetails(name) => format!("/modules/{}", name),
            Route::Images => "/images".to_string(),
            Route::ImageDetails(uuid) => format!("/images/{}", uuid),
            Route::Repositories => "/repositories".to_string(),
            Route::RepositoryDetails(name) => format!("/repositories/{}", name),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        breadcrumbs(&self.path())
    }

    /// Sidebar section this route belongs to
    pub fn section(&self) -> Option<Section> {
        match self {
            Route::Dashboard => Some(Section::Dashboard),
            Route::Jobs | Route::JobDetails(_) => Some(Section::Jobs),
            Route::Clients | Route::ClientDetails(_) => Some(Section::Clients),
            Route::Modules | Route::ModuleDetails(_) => Some(Section::Modules),
            Route::Images | Route::ImageDetails(_) => Some(Section::Images),
            Route::Repositories | Route::RepositoryDetails(_) => Some(Section::Repositories),
            Route::NotFound(_) => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Top-level sections, reachable from anywhere with the number keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Jobs,
    Clients,
    Modules,
    Images,
    Repositories,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Jobs,
        Section::Clients,
        Section::Modules,
        Section::Images,
        Section::Repositories,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Jobs => "Jobs",
            Section::Clients => "Clients",
            Section::Modules => "Modules",
            Section::Images => "Images",
            Section::Repositories => "Repositories",
        }
    }

    pub fn route(self) -> Route {
        match self {
            Section::Dashboard => Route::Dashboard,
            Section::Jobs => Route::Jobs,
            Section::Clients => Route::Clients,
            Section::Modules => Route::Modules,
            Section::Images => Route::Images,
            Section::Repositories => Route::Repositories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_path_params() {
        let params = match_path("/clients/:client_name", "/clients/web-01").unwrap();
        assert_eq!(params.get("client_name").unwrap(), "web-01");

        assert!(match_path("/clients/:client_name", "/clients").is_none());
        assert!(match_path("/clients/:client_name", "/clients/a/b").is_none());
        assert!(match_path("/jobs", "/clients").is_none());
    }

    #[test]
    fn test_match_path_ignores_slashes_and_query() {
        assert!(match_path("/jobs", "/jobs/").is_some());
        assert!(match_path("/jobs", "/jobs?limit=5").is_some());
        assert!(match_path("/", "").is_some());
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
        assert_eq!(Route::parse("/jobs"), Route::Jobs);
        assert_eq!(
            Route::parse("/jobs/5f1c-aa"),
            Route::JobDetails("5f1c-aa".to_string())
        );
        assert_eq!(
            Route::parse("/repositories/local"),
            Route::RepositoryDetails("local".to_string())
        );
        assert_eq!(
            Route::parse("/backups"),
            Route::NotFound("/backups".to_string())
        );
    }

    #[test]
    fn test_path_roundtrip() {
        let routes = vec![
            Route::Jobs,
            Route::JobDetails("uuid-1".to_string()),
            Route::ClientDetails("web".to_string()),
            Route::ModuleDetails("postgres".to_string()),
            Route::ImageDetails("img-1".to_string()),
            Route::Repositories,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_breadcrumbs_for_detail_page() {
        let crumbs = breadcrumbs("/clients/web-01");
        assert_eq!(
            crumbs,
            vec![
                Crumb::new("Home", "/"),
                Crumb::new("All clients", "/clients"),
                Crumb::new("Client details", "/clients/web-01"),
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_for_list_page() {
        let crumbs = breadcrumbs("/images");
        assert_eq!(
            crumbs,
            vec![Crumb::new("Home", "/"), Crumb::new("All images", "/images")]
        );
    }

    #[test]
    fn test_breadcrumbs_for_home() {
        assert_eq!(breadcrumbs("/"), vec![Crumb::new("Home", "/")]);
    }

    #[test]
    fn test_breadcrumbs_not_found() {
        let crumbs = breadcrumbs("/nowhere/at/all");
        assert_eq!(
            crumbs,
            vec![Crumb::new("Home", "/"), Crumb::new("Page not found", "404")]
        );
    }

    #[test]
    fn test_sections() {
        assert_eq!(
            Route::JobDetails("x".to_string()).section(),
            Some(Section::Jobs)
        );
        assert_eq!(Route::NotFound("/x".to_string()).section(), None);
        for section in Section::ALL {
            assert_eq!(section.route().section(), Some(section));
        }
    }
}
