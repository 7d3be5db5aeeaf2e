/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the staffing API, without trailing slash.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api/v1".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                         |
    /// |---------------------------------|---------------------------------|
    /// | `BOOTHLOG_API_URL`              | `http://localhost:3000/api/v1`  |
    /// | `BOOTHLOG_REQUEST_TIMEOUT_SECS` | `30`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = std::env::var("BOOTHLOG_API_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let request_timeout_secs = match std::env::var("BOOTHLOG_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid("BOOTHLOG_REQUEST_TIMEOUT_SECS", &raw, e))?,
            Err(_) => defaults.request_timeout_secs,
        };

        Ok(Self {
            api_url,
            request_timeout_secs,
        })
    }
}
