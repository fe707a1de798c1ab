//! Session manager: connection lifecycle and status.
//!
//! # State Machine
//!
//! ```text
//!              connect()                 pixel count received
//! Disconnected ─────────► Connecting ─────────────────────────► Ready
//!      ▲                      │                                   │
//!      │   timeout, bad reply,│                                   │
//!      └──────────────────────┴───── disconnect(), remote close ──┘
//! ```
//!
//! There is no automatic reconnect. A dropped connection stays
//! `Disconnected` until `connect` is called again.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::protocol::{Command, ReadyData, parse_pixel_count};
use crate::transport::Connection;

use super::config::{ControllerAddr, SessionBuilder, SessionConfig};
use super::state::{Phase, SessionState, StatusReport};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a session.
pub(crate) struct SessionInner {
    /// Timeouts.
    pub config: SessionConfig,
    /// Connection, phase and pixel counts.
    pub state: Mutex<SessionState>,
}

impl SessionInner {
    /// Resets the session after the transport closed on its own.
    ///
    /// Ignored if the session has since moved on to another connection.
    fn handle_transport_closed(&self, epoch: u64) {
        let mut state = self.state.lock();
        if state.epoch != epoch {
            trace!(epoch, current = state.epoch, "Ignoring close of stale connection");
            return;
        }
        state.reset();
        info!("Controller connection closed");
    }
}

// ============================================================================
// Session
// ============================================================================

/// A client session with one pixel controller.
///
/// Owns at most one WebSocket connection plus the pixel-count shadow state.
/// Cloning yields another handle to the same session.
///
/// # Example
///
/// ```no_run
/// use owls_client::Session;
///
/// # async fn example() -> owls_client::Result<()> {
/// let session = Session::new();
/// let ready = session.connect("localhost", 8000).await?;
/// println!("strip has {} pixels", ready.pixel_count);
///
/// session.set_pixels(0.0, 0.0, 255.0)?;
/// session.show()?;
/// session.disconnect();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    /// Shared inner state.
    pub(crate) inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Session")
            .field("phase", &state.phase)
            .field("physical_pixel_count", &state.physical_pixel_count)
            .field("virtual_pixel_count", &state.virtual_pixel_count)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Session - Construction
// ============================================================================

impl Session {
    /// Creates a disconnected session with default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(SessionConfig::default())
    }

    /// Creates a configuration builder for the session.
    #[inline]
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Creates a disconnected session with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                config,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Returns the session configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.inner.config
    }
}

// ============================================================================
// Session - Lifecycle
// ============================================================================

impl Session {
    /// Connects to the controller at `ws://host:port` and performs the handshake.
    ///
    /// Sends `init` as soon as the transport opens, then waits for the
    /// controller's pixel count. On success both the physical and the
    /// virtual pixel count equal the reported count and the session is
    /// ready. An existing connection is closed first, without sending `clear`.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] / [`Error::Url`] if the address is invalid
    /// - [`Error::Connection`] / [`Error::ConnectionTimeout`] if the transport cannot open
    /// - [`Error::ConnectionTimeout`] if no reply arrives within the handshake timeout
    /// - [`Error::MalformedHandshake`] if the reply is not a positive integer
    /// - [`Error::ConnectionClosed`] if the connection drops during the handshake
    ///
    /// On every error the session is left disconnected.
    pub async fn connect(&self, host: &str, port: u16) -> Result<ReadyData> {
        let addr = ControllerAddr::new(host, port)?;
        let url = addr.ws_url()?;

        let (epoch, previous) = self.inner.state.lock().begin_connect();
        if let Some(previous) = previous {
            debug!("Closing previous connection");
            previous.clear_close_handler();
            previous.shutdown();
        }

        info!(%addr, "Connecting to controller");

        let connection = Connection::open(&url, self.inner.config.connect_timeout)
            .await
            .inspect_err(|e| warn!(%addr, error = %e, "Controller unavailable"))?;

        {
            let mut state = self.inner.state.lock();
            if state.epoch != epoch {
                connection.shutdown();
                return Err(Error::connection("Connect superseded"));
            }
            state.connection = Some(connection.clone());
            state.phase = Phase::Connecting;
        }

        let weak: Weak<SessionInner> = Arc::downgrade(&self.inner);
        connection.set_close_handler(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.handle_transport_closed(epoch);
            }
        }));

        match self.handshake(&connection, epoch).await {
            Ok(ready) => {
                info!(%addr, pixel_count = ready.pixel_count, "Controller ready");
                Ok(ready)
            }
            Err(e) => {
                warn!(%addr, error = %e, "Handshake failed");
                self.abort_connect(&connection, epoch);
                Err(e)
            }
        }
    }

    /// Connects, then calls `on_ready` with the pixel count.
    ///
    /// `on_ready` is not called if the connect fails.
    ///
    /// # Errors
    ///
    /// Same as [`Session::connect`].
    pub async fn connect_with_callback<F>(&self, host: &str, port: u16, on_ready: F) -> Result<()>
    where
        F: FnOnce(u32),
    {
        let ready = self.connect(host, port).await?;
        on_ready(ready.pixel_count);
        Ok(())
    }

    /// Disconnects from the controller.
    ///
    /// Sends `clear`, suppresses the close notification and closes the
    /// transport. The pixel counts are reset to 0. Does nothing when
    /// already disconnected.
    pub fn disconnect(&self) {
        let connection = self.inner.state.lock().reset();
        match connection {
            Some(connection) => {
                Self::close_with_clear(&connection);
                info!("Disconnected from controller");
            }
            None => debug!("Disconnect requested while not connected"),
        }
    }

    /// Tears down the connection when the host unloads the driver.
    ///
    /// Like [`Session::disconnect`], but keeps the pixel counts.
    pub fn shutdown(&self) {
        let connection = self.inner.state.lock().detach();
        if let Some(connection) = connection {
            Self::close_with_clear(&connection);
            info!("Session shut down");
        }
    }
}

// ============================================================================
// Session - Status
// ============================================================================

impl Session {
    /// Returns the `(status, message)` snapshot shown by the host.
    #[must_use]
    pub fn status(&self) -> StatusReport {
        StatusReport::from(self.inner.state.lock().status())
    }

    /// Returns `true` once the handshake has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.state.lock().ready_connection().is_ok()
    }

    /// Returns `true` while waiting for the handshake reply.
    #[must_use]
    pub fn is_connecting(&self) -> bool {
        self.inner.state.lock().phase == Phase::Connecting
    }

    /// Returns the number of LEDs reported by the controller.
    ///
    /// 0 when no handshake has completed since the last disconnect.
    #[must_use]
    pub fn physical_pixel_count(&self) -> u32 {
        self.inner.state.lock().physical_pixel_count
    }
}

// ============================================================================
// Session - Internal
// ============================================================================

impl Session {
    /// Sends one command if the session is ready.
    pub(crate) fn send_command(&self, command: Command) -> Result<()> {
        let state = self.inner.state.lock();
        let connection = state.ready_connection()?;
        connection.send_text(command.to_string())?;
        trace!(%command, "Command sent");
        Ok(())
    }

    /// Sends `init` and waits for the pixel count.
    async fn handshake(&self, connection: &Connection, epoch: u64) -> Result<ReadyData> {
        connection.send_text(Command::Init.to_string())?;

        let reply = connection
            .wait_reply(self.inner.config.handshake_timeout)
            .await?;
        let ready = parse_pixel_count(&reply)?;

        let mut state = self.inner.state.lock();
        if state.epoch != epoch || state.phase != Phase::Connecting {
            return Err(Error::ConnectionClosed);
        }
        state.mark_ready(ready.pixel_count);

        Ok(ready)
    }

    /// Closes a connection whose handshake failed.
    fn abort_connect(&self, connection: &Connection, epoch: u64) {
        connection.clear_close_handler();
        connection.shutdown();

        let mut state = self.inner.state.lock();
        if state.epoch == epoch {
            state.reset();
        }
    }

    /// Sends `clear`, then closes without a close notification.
    fn close_with_clear(connection: &Connection) {
        if let Err(e) = connection.send_text(Command::Clear.to_string()) {
            debug!(error = %e, "Could not send clear before closing");
        }
        connection.clear_close_handler();
        connection.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::session::Status;

    #[test]
    fn test_session_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Session>();
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }

    #[test]
    fn test_new_session_not_ready() {
        let session = Session::new();
        let report = session.status();
        assert_eq!(report.status, Status::NotReady);
        assert_eq!(report.msg, "not_ready");
        assert!(!session.is_ready());
        assert!(!session.is_connecting());
        assert_eq!(session.physical_pixel_count(), 0);
    }

    #[test]
    fn test_disconnect_when_disconnected_is_noop() {
        let session = Session::new();
        session.disconnect();
        session.shutdown();
        assert_eq!(session.status().status, Status::NotReady);
    }

    #[test]
    fn test_with_config_validates() {
        let config = SessionConfig {
            handshake_timeout: std::time::Duration::ZERO,
            ..SessionConfig::default()
        };
        assert!(Session::with_config(config).is_err());
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_address() {
        let session = Session::new();
        let err = session.connect("", 8000).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = session.connect("localhost", 0).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(!session.is_connecting());
    }
}
