//! Block editor integration.
//!
//! This module describes the driver to a visual block editor and routes
//! block invocations to a [`Session`](crate::Session).
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Descriptor`] | Blocks, menus and project URL for one locale |
//! | [`Locale`] | English or Dutch labels |
//! | [`Extension`] | Block dispatch, status query, shutdown hook |
//!
//! # Example
//!
//! ```no_run
//! use owls_client::{Extension, Locale, Session};
//! use serde_json::json;
//!
//! # async fn example() -> owls_client::Result<()> {
//! let extension = Extension::new(Session::new(), Locale::from_language_tag("nl-NL"));
//! println!("{}", extension.descriptor().to_json()?);
//!
//! extension.invoke("cnct", &[json!("localhost"), json!(8000)]).await?;
//! extension.invoke("setPixels", &[json!(255), json!(0), json!(0)]).await?;
//! let count = extension.invoke("getPixelCount", &[]).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Block descriptor and locales.
pub mod descriptor;

/// Block dispatch and host callbacks.
pub mod host;

// ============================================================================
// Re-exports
// ============================================================================

pub use descriptor::{Block, BlockType, Descriptor, EXTENSION_NAME, Locale, Menus, PROJECT_URL};
pub use host::{BlockFunction, Extension};
