use std::path::PathBuf;

use boothlog_client::{ClientConfig, ConfigError};
use chrono::FixedOffset;

/// Default offset used to print and export timestamps (Brasília time).
pub const DEFAULT_UTC_OFFSET: &str = "-03:00";

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub client: ClientConfig,
    /// Directory holding the check-in session file.
    pub session_dir: PathBuf,
    /// Directory PDF exports are written to.
    pub export_dir: PathBuf,
    /// Offset timestamps are shown in.
    pub utc_offset: FixedOffset,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `BOOTHLOG_SESSION_DIR` | `<system temp>/boothlog-<user>` |
    /// | `BOOTHLOG_EXPORT_DIR`  | `.`                             |
    /// | `BOOTHLOG_UTC_OFFSET`  | `-03:00`                        |
    ///
    /// plus the client variables read by [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let client = ClientConfig::from_env()?;

        let session_dir = std::env::var("BOOTHLOG_SESSION_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let user = std::env::var("USER").or_else(|_| std::env::var("USERNAME")).ok();
                default_session_dir(user.as_deref())
            });

        let export_dir = std::env::var("BOOTHLOG_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let raw_offset =
            std::env::var("BOOTHLOG_UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset = parse_utc_offset(&raw_offset)?;

        Ok(Self {
            client,
            session_dir,
            export_dir,
            utc_offset,
        })
    }
}

/// Per-user session directory under the system temp dir, so accounts on a
/// shared host never read each other's check-in.
pub fn default_session_dir(user: Option<&str>) -> PathBuf {
    let user: String = user
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    let name = if user.is_empty() {
        "boothlog".to_string()
    } else {
        format!("boothlog-{user}")
    };
    std::env::temp_dir().join(name)
}

/// Parse `±HH:MM` into an offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    raw.trim()
        .parse::<FixedOffset>()
        .map_err(|e| ConfigError::invalid("BOOTHLOG_UTC_OFFSET", raw, e))
}
