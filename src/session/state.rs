//! Session status and pixel shadow state.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

use crate::error::{Error, Result};
use crate::transport::Connection;

// ============================================================================
// Status
// ============================================================================

/// Session status as reported to the host.
///
/// Serializes as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Status {
    /// No completed handshake. Shown as a yellow indicator.
    NotReady,
    /// Handshake completed, commands accepted. Shown as a green indicator.
    Ready,
}

impl Status {
    /// Returns the host's numeric status code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::NotReady => 1,
            Self::Ready => 2,
        }
    }

    /// Returns the host's textual status.
    #[inline]
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotReady => "not_ready",
            Self::Ready => "ready",
        }
    }
}

impl From<Status> for u8 {
    #[inline]
    fn from(status: Status) -> Self {
        status.code()
    }
}

// ============================================================================
// StatusReport
// ============================================================================

/// Snapshot of `(status, message)` for the host's status query.
///
/// # Format
///
/// ```json
/// { "status": 2, "msg": "ready" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Current status.
    pub status: Status,
    /// Text matching `status`.
    pub msg: &'static str,
}

impl From<Status> for StatusReport {
    #[inline]
    fn from(status: Status) -> Self {
        Self {
            status,
            msg: status.message(),
        }
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Connection lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Phase {
    /// No transport.
    #[default]
    Disconnected,
    /// Transport open, `init` sent, waiting for the pixel count.
    Connecting,
    /// Handshake completed.
    Ready,
}

// ============================================================================
// SessionState
// ============================================================================

/// Mutable session state, guarded by the session mutex.
///
/// `virtual_pixel_count <= physical_pixel_count` always holds, and both are
/// at least 1 while `phase` is `Ready`.
#[derive(Default)]
pub(crate) struct SessionState {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Active transport; present while connecting or ready.
    pub connection: Option<Connection>,
    /// Bumped whenever the current connection is replaced or dropped.
    pub epoch: u64,
    /// LEDs on the strip, from the handshake.
    pub physical_pixel_count: u32,
    /// Addressable window size.
    pub virtual_pixel_count: u32,
}

impl SessionState {
    /// Returns the host-facing status.
    #[inline]
    pub fn status(&self) -> Status {
        if self.phase == Phase::Ready && self.connection.is_some() {
            Status::Ready
        } else {
            Status::NotReady
        }
    }

    /// Returns the connection if the handshake has completed.
    pub fn ready_connection(&self) -> Result<&Connection> {
        match (self.phase, self.connection.as_ref()) {
            (Phase::Ready, Some(connection)) => Ok(connection),
            _ => Err(Error::NotReady),
        }
    }

    /// Starts a new connection attempt, returning the previous connection.
    pub fn begin_connect(&mut self) -> (u64, Option<Connection>) {
        let previous = self.detach();
        self.physical_pixel_count = 0;
        self.virtual_pixel_count = 0;
        (self.epoch, previous)
    }

    /// Completes the handshake.
    pub fn mark_ready(&mut self, pixel_count: u32) {
        self.phase = Phase::Ready;
        self.physical_pixel_count = pixel_count;
        self.virtual_pixel_count = pixel_count;
    }

    /// Drops the connection and clears the pixel counts.
    pub fn reset(&mut self) -> Option<Connection> {
        let connection = self.detach();
        self.physical_pixel_count = 0;
        self.virtual_pixel_count = 0;
        connection
    }

    /// Drops the connection, keeping the pixel counts.
    pub fn detach(&mut self) -> Option<Connection> {
        self.epoch = self.epoch.wrapping_add(1);
        self.phase = Phase::Disconnected;
        self.connection.take()
    }
}

// ============================================================================
// Tests
// ============================================================================
