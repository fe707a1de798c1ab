//! OWLS text protocol.
//!
//! This module defines the message format exchanged with the pixel
//! controller.
//!
//! # Protocol Overview
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | [`Command`] | Client → Controller | One text command per message |
//! | Handshake reply | Controller → Client | Physical pixel count, once |
//!
//! Commands are fire-and-forget. The only inbound message is the reply
//! to `init`.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `color` | Color triple and channel clamping |
//! | `command` | Command definitions and menu label parsing |
//! | `handshake` | Pixel count reply parsing |

// ============================================================================
// Submodules
// ============================================================================

/// Color triple and channel clamping.
pub mod color;

/// Command definitions.
pub mod command;

/// Handshake reply parsing.
pub mod handshake;

// ============================================================================
// Re-exports
// ============================================================================

pub use color::{Color, color_limit};
pub use command::{AutoShow, Command, ShiftDirection};
pub use handshake::{ReadyData, parse_pixel_count};
