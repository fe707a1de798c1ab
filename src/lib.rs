//! OWLS client - drive an addressable LED pixel strip over WebSocket.
//!
//! This library talks to an OWLS controller: a small server that owns a
//! physical LED strip and accepts one-line text commands.
//!
//! # Architecture
//!
//! - **Session**: one WebSocket connection per [`Session`], a handshake that
//!   learns the strip length, and a shadow copy of the pixel counts
//! - **Commands**: every pixel operation clamps its arguments and emits
//!   exactly one text frame, in call order
//! - **Extension**: a block-editor facade that maps block function names to
//!   session methods and reports connection status
//!
//! Commands are fire-and-forget. The controller only replies once, to the
//! handshake, with its pixel count.
//!
//! # Quick Start
//!
//! ```no_run
//! use owls_client::{Result, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = Session::new();
//!     let ready = session.connect("localhost", 8000).await?;
//!     println!("Strip has {} pixels", ready.pixel_count);
//!
//!     session.auto_show("Off")?;
//!     session.set_pixels(0.0, 0.0, 64.0)?;
//!     session.set_pixel(0.0, 255.0, 0.0, 0.0)?;
//!     session.show()?;
//!
//!     session.disconnect();
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error types and [`Result`] alias |
//! | [`extension`] | Block descriptor and dispatch: [`Extension`] |
//! | [`protocol`] | Command grammar and handshake parsing |
//! | [`session`] | Connection lifecycle and pixel commands: [`Session`] |
//! | [`transport`] | WebSocket connection and event loop (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Block editor integration.
pub mod extension;

/// Wire grammar of the controller protocol.
pub mod protocol;

/// Session lifecycle and pixel commands.
pub mod session;

/// WebSocket transport layer.
///
/// Internal module owning the socket and its event loop.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{Error, Result};

// Extension types
pub use extension::{BlockFunction, Descriptor, Extension, Locale};

// Protocol types
pub use protocol::{AutoShow, Color, Command, ReadyData, ShiftDirection};

// Session types
pub use session::{ControllerAddr, Session, SessionBuilder, SessionConfig, Status, StatusReport};
