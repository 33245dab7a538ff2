//! Session configuration
//!
//! The configuration is an immutable value handed to the session client at
//! construction. It is usually loaded from `INVENTORY_*` environment
//! variables, optionally layered over a config file.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Port the backend listens on when none is configured
pub const DEFAULT_PORT: u16 = 28192;

/// Connection settings for the inventory backend
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Global switch; when false the client never touches the network
    pub enabled: bool,
    /// Backend host name or address
    pub host: String,
    /// Backend port, `DEFAULT_PORT` when unset
    pub port: Option<u16>,
    /// Login user
    pub username: String,
    /// Login password
    pub password: String,
    /// Location group used when a query does not name one
    pub location_group: Option<String>,
    /// Retries allowed after the first attempt for server-class failures
    pub max_retries: u32,
    /// Close the connection after every request
    pub auto_close: bool,
    /// Read/write timeout applied to each request, in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            location_group: None,
            max_retries: 1,
            auto_close: true,
            request_timeout_ms: 30_000,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("location_group", &self.location_group)
            .field("max_retries", &self.max_retries)
            .field("auto_close", &self.auto_close)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl SessionConfig {
    /// Creates an enabled configuration with the given credentials
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from `INVENTORY_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Loads configuration from a file, with environment variables taking precedence
    pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Parses configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("INVENTORY")
    }

    /// Sets the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the default location group
    pub fn with_location_group(mut self, location_group: impl Into<String>) -> Self {
        self.location_group = Some(location_group.into());
        self
    }

    /// Sets the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets whether connections close after every request
    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    /// Sets the per-request timeout, kept to the millisecond
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }

    /// Sets the global enabled switch
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// True when enabled and host, username and password are all present
    pub fn is_configured(&self) -> bool {
        self.enabled
            && !self.host.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.password.trim().is_empty()
    }

    /// Port to connect to
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// `host:port` for connecting and logging
    pub fn address(&self) -> String {
        format!("{}:{}", self.host.trim(), self.effective_port())
    }

    /// Timeout applied to each request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
