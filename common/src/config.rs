use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Terminal behaviour of the console.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the banner printed before every command.
    pub no_banner: bool,
    /// `0` prints everything, `1` drops headers and decorations, `2` prints bare rows.
    pub quiet: u8,
}

/// Where the rental backend lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Validates the project URL and public key.
    ///
    /// Trailing slashes are trimmed so paths can be appended directly.
    pub fn new(url: Option<String>, anon_key: Option<String>) -> Result<Self, ConfigError> {
        let url: String = url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUrl)?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url));
        }

        let anon_key: String = anon_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingAnonKey)?;

        Ok(Self {
            url,
            anon_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Default location of the persisted session: `$HOME/.fleetdash/session.json`.
pub fn default_session_path() -> PathBuf {
    let home: PathBuf = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".fleetdash").join("session.json")
}
