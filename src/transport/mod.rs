//! WebSocket transport layer.
//!
//! This module handles communication between the client (Rust) and the
//! pixel controller via WebSocket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Session (Rust) │                              │  Controller     │
//! │                 │         WebSocket            │  (LED strip)    │
//! │  Connection     │─────────────────────────────►│                 │
//! │  (client)       │      ws://host:port          │  WebSocket      │
//! │                 │◄──── pixel count (once) ─────│  Server         │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Connection::open` - WebSocket client handshake
//! 2. `Connection::send_text("init")` - start the controller handshake
//! 3. `Connection::wait_reply` - receive the pixel count
//! 4. `Connection::send_text` - fire-and-forget commands
//! 5. `Connection::shutdown` - close after queued commands
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{CloseHandler, Connection};
