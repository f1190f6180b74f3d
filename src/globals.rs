use crate::{config::ServerSettings, error::Result};
use std::sync::OnceLock;
use std::time::Duration;

/// Global HTTP client for all requests to the Relique server
static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Initialize the global HTTP client from server settings
/// This should be called once at application startup
pub fn init_http_client(settings: &ServerSettings) -> Result<()> {
    let client = build_http_client(settings.timeout(), settings.insecure)?;
    HTTP_CLIENT
        .set(client)
        .map_err(|_| anyhow::anyhow!("HTTP client already initialized"))?;
    Ok(())
}

/// Get a reference to the global HTTP client
/// Lazily initialized with defaults when `init_http_client` was never called
pub fn http_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_default()
    })
}

fn build_http_client(timeout: Duration, insecure: bool) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        // Relique servers commonly run with self-signed certificates
        .danger_accept_invalid_certs(insecure)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_singleton() {
        let client1 = http_client();
        let client2 = http_client();
        assert!(std::ptr::eq(client1, client2));
    }

    #[test]
    fn test_build_insecure_client() {
        assert!(build_http_client(Duration::from_secs(5), true).is_ok());
    }
}
