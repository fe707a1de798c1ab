//! Client session with a pixel controller.
//!
//! A [`Session`] owns a single WebSocket connection and the pixel-count
//! shadow state, and exposes one method per pixel operation.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Timeouts, builder and controller address |
//! | `core` | Session struct, connect/disconnect, status |
//! | `pixels` | Pixel commands with argument clamping |
//! | `state` | Status codes and shadow state |
//!
//! # Example
//!
//! ```ignore
//! let session = Session::new();
//! session.connect("localhost", 8000).await?;
//!
//! session.auto_show("Off")?;
//! session.set_pixel(0.0, 255.0, 0.0, 0.0)?;
//! session.show()?;
//!
//! session.set_pixel_count(8.0)?;
//! assert_eq!(session.get_pixel_count(), 8);
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod config;
mod core;
mod pixels;
mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{
    ControllerAddr, DEFAULT_CONNECT_TIMEOUT, DEFAULT_HANDSHAKE_TIMEOUT, SessionBuilder,
    SessionConfig,
};
pub use core::Session;
pub use state::{Status, StatusReport};
