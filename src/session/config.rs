//! Session configuration and controller addressing.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use owls_client::Session;
//!
//! # fn example() -> owls_client::Result<()> {
//! let session = Session::builder()
//!     .handshake_timeout(Duration::from_secs(2))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

use super::core::Session;

// ============================================================================
// Constants
// ============================================================================

/// Default time to wait for the controller's pixel count after `init`.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time to wait for the WebSocket upgrade.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// SessionConfig
// ============================================================================

/// Timeouts applied by a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum wait for the handshake reply.
    pub handshake_timeout: Duration,
    /// Maximum wait for the transport to open.
    pub connect_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl SessionConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.handshake_timeout.is_zero() {
            return Err(Error::config("Handshake timeout must be greater than zero"));
        }
        if self.connect_timeout.is_zero() {
            return Err(Error::config("Connect timeout must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// SessionBuilder
// ============================================================================

/// Builder for configuring a [`Session`].
///
/// Use [`Session::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct SessionBuilder {
    /// Handshake timeout override.
    handshake_timeout: Option<Duration>,
    /// Connect timeout override.
    connect_timeout: Option<Duration>,
}

impl SessionBuilder {
    /// Creates a builder with default timeouts.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long to wait for the pixel count after `init`.
    #[inline]
    #[must_use]
    pub fn handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = Some(timeout);
        self
    }

    /// Sets how long to wait for the WebSocket upgrade.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Returns the resulting configuration without validating it.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        let defaults = SessionConfig::default();
        SessionConfig {
            handshake_timeout: self.handshake_timeout.unwrap_or(defaults.handshake_timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
        }
    }

    /// Builds the session with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a timeout is zero.
    pub fn build(self) -> Result<Session> {
        Session::with_config(self.config())
    }
}

// ============================================================================
// ControllerAddr
// ============================================================================

/// Host and port of a pixel controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerAddr {
    host: String,
    port: u16,
}

impl ControllerAddr {
    /// Creates a validated controller address.
    ///
    /// Surrounding whitespace in `host` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the host is empty or the port is 0.
    pub fn new(host: impl AsRef<str>, port: u16) -> Result<Self> {
        let host = host.as_ref().trim();

        if host.is_empty() {
            return Err(Error::config("Controller host is required"));
        }
        if port == 0 {
            return Err(Error::config("Controller port must be between 1 and 65535"));
        }

        Ok(Self {
            host: host.to_owned(),
            port,
        })
    }

    /// Returns the host.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the WebSocket URL, `ws://host:port`.
    ///
    /// Bare IPv6 literals are bracketed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the host is not a valid URL host.
    pub fn ws_url(&self) -> Result<Url> {
        let url = Url::parse(&format!("ws://{self}"))?;
        Ok(url)
    }
}

impl fmt::Display for ControllerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
