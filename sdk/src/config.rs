//! Client configuration.
//!
//! Credentials come from the environment (a `.env` file is loaded when
//! present):
//!
//! | Variable                  | Required | Default                  |
//! |---------------------------|----------|--------------------------|
//! | `FANCOURIER_USERNAME`     | yes      |                          |
//! | `FANCOURIER_PASSWORD`     | yes      |                          |
//! | `FANCOURIER_CLIENT_ID`    | yes      |                          |
//! | `FANCOURIER_BASE_URL`     | no       | `https://www.selfawb.ro` |
//! | `FANCOURIER_TIMEOUT_SECS` | no       | `30`                     |

use std::env;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.selfawb.ro";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Account and endpoint settings.
#[derive(Clone)]
pub struct ClientConfig {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("client_id", &self.client_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with explicit credentials and default endpoint.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_id: client_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a config from `FANCOURIER_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            required_var("FANCOURIER_USERNAME")?,
            required_var("FANCOURIER_PASSWORD")?,
            required_var("FANCOURIER_CLIENT_ID")?,
        );

        if let Ok(base_url) = env::var("FANCOURIER_BASE_URL") {
            config = config.with_base_url(&base_url);
        }

        if let Ok(secs) = env::var("FANCOURIER_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ApiError::InvalidConfig(format!("FANCOURIER_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn required_var(name: &str) -> ApiResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::MissingConfig(format!("{} not set", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let config = ClientConfig::new("user", "secret", "7032158").with_base_url("http://localhost:8080/");
        assert_eq!(
            config.endpoint_url("import_awb_integrat.php"),
            "http://localhost:8080/import_awb_integrat.php"
        );
        assert_eq!(
            config.endpoint_url("/import_awb_integrat.php"),
            "http://localhost:8080/import_awb_integrat.php"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("user", "secret", "7032158");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_debug_hides_password() {
        let config = ClientConfig::new("user", "secret", "7032158");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("user"));
    }
}
