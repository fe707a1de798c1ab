//! Block invocation, status query and shutdown hook for the editor.
//!
//! The editor calls blocks by function name with loosely typed arguments.
//! [`Extension::invoke`] converts those arguments and forwards the call to
//! the [`Session`]. Session failures (not connected, controller gone) are
//! logged and swallowed so a running script never stops on them; the
//! status indicator reports the connection state instead.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::session::{Session, StatusReport};

use super::descriptor::{Descriptor, Locale};

// ============================================================================
// BlockFunction
// ============================================================================

/// Functions the descriptor's blocks invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFunction {
    /// `cnct(host, port)`
    Connect,
    /// `discnct()`
    Disconnect,
    /// `clearPixels()`
    ClearPixels,
    /// `setPixels(r, g, b)`
    SetPixels,
    /// `setPixel(index, r, g, b)`
    SetPixel,
    /// `autoShow(state)`
    AutoShow,
    /// `show()`
    Show,
    /// `shiftPixels(direction)`
    ShiftPixels,
    /// `dim(amount)`
    Dim,
    /// `setPixelCount(count)`
    SetPixelCount,
    /// `getPixelCount()`
    GetPixelCount,
}

impl BlockFunction {
    /// Every block function, in palette order.
    pub const ALL: [Self; 11] = [
        Self::Connect,
        Self::Disconnect,
        Self::ClearPixels,
        Self::SetPixels,
        Self::SetPixel,
        Self::AutoShow,
        Self::Show,
        Self::ShiftPixels,
        Self::Dim,
        Self::SetPixelCount,
        Self::GetPixelCount,
    ];

    /// Returns the function name used in the descriptor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Connect => "cnct",
            Self::Disconnect => "discnct",
            Self::ClearPixels => "clearPixels",
            Self::SetPixels => "setPixels",
            Self::SetPixel => "setPixel",
            Self::AutoShow => "autoShow",
            Self::Show => "show",
            Self::ShiftPixels => "shiftPixels",
            Self::Dim => "dim",
            Self::SetPixelCount => "setPixelCount",
            Self::GetPixelCount => "getPixelCount",
        }
    }

    /// Returns the number of arguments the function takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Disconnect | Self::ClearPixels | Self::Show | Self::GetPixelCount => 0,
            Self::AutoShow | Self::ShiftPixels | Self::Dim | Self::SetPixelCount => 1,
            Self::Connect => 2,
            Self::SetPixels => 3,
            Self::SetPixel => 4,
        }
    }
}

// ============================================================================
// Extension
// ============================================================================

/// The driver as seen by the block editor.
pub struct Extension {
    /// Session that executes the blocks.
    session: Session,
    /// Descriptor for the selected locale.
    descriptor: Descriptor,
    /// Function name lookup.
    functions: FxHashMap<&'static str, BlockFunction>,
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("session", &self.session)
            .field("block_count", &self.descriptor.blocks.len())
            .finish_non_exhaustive()
    }
}

impl Extension {
    /// Creates an extension around `session` with labels for `locale`.
    #[must_use]
    pub fn new(session: Session, locale: Locale) -> Self {
        let functions = BlockFunction::ALL
            .iter()
            .map(|function| (function.name(), *function))
            .collect();

        Self {
            session,
            descriptor: Descriptor::for_locale(locale),
            functions,
        }
    }

    /// Returns the block descriptor.
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Returns the underlying session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Status query callback.
    #[must_use]
    pub fn status(&self) -> StatusReport {
        self.session.status()
    }

    /// Shutdown callback, run when the editor unloads the extension.
    pub fn shutdown(&self) {
        self.session.shutdown();
    }

    /// Invokes a block function.
    ///
    /// Numbers may arrive as JSON numbers, numeric strings or booleans.
    /// Reporter blocks return `Some(value)`; command blocks return `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] if no block has that function name
    /// - [`Error::InvalidArgument`] if arguments are missing or not convertible
    ///
    /// Session failures are logged and yield `Ok(None)`.
    pub async fn invoke(&self, function: &str, args: &[Value]) -> Result<Option<Value>> {
        let block = *self
            .functions
            .get(function)
            .ok_or_else(|| Error::unknown_command(function))?;

        if args.len() != block.arity() {
            return Err(Error::invalid_argument(format!(
                "{function} expects {} argument(s), got {}",
                block.arity(),
                args.len()
            )));
        }

        debug!(function, ?args, "Invoking block");

        let outcome = match block {
            BlockFunction::Connect => {
                let host = text_arg(args, 0)?;
                let port = port_arg(args, 1)?;
                self.session.connect(&host, port).await.map(|_| None)
            }
            BlockFunction::Disconnect => {
                self.session.disconnect();
                Ok(None)
            }
            BlockFunction::ClearPixels => self.session.clear_pixels().map(|()| None),
            BlockFunction::SetPixels => {
                let (r, g, b) = (number_arg(args, 0)?, number_arg(args, 1)?, number_arg(args, 2)?);
                self.session.set_pixels(r, g, b).map(|()| None)
            }
            BlockFunction::SetPixel => {
                let index = number_arg(args, 0)?;
                let (r, g, b) = (number_arg(args, 1)?, number_arg(args, 2)?, number_arg(args, 3)?);
                self.session.set_pixel(index, r, g, b).map(|_| None)
            }
            BlockFunction::AutoShow => {
                let label = text_arg(args, 0)?;
                self.session.auto_show(label.as_str()).map(|()| None)
            }
            BlockFunction::Show => self.session.show().map(|()| None),
            BlockFunction::ShiftPixels => {
                let label = text_arg(args, 0)?;
                self.session.shift_pixels(label.as_str()).map(|()| None)
            }
            BlockFunction::Dim => {
                let amount = number_arg(args, 0)?;
                self.session.dim(amount).map(|()| None)
            }
            BlockFunction::SetPixelCount => {
                let count = number_arg(args, 0)?;
                self.session.set_pixel_count(count).map(|_| None)
            }
            BlockFunction::GetPixelCount => {
                Ok(Some(Value::from(self.session.get_pixel_count())))
            }
        };

        match outcome {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(function, error = %e, "Block had no effect");
                Ok(None)
            }
        }
    }
}

// ============================================================================
// Argument Conversion
// ============================================================================

/// Reads argument `index` as a number.
fn number_arg(args: &[Value], index: usize) -> Result<f64> {
    match &args[index] {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| Error::invalid_argument(format!("argument {index} is not a finite number"))),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0.0);
            }
            text.parse::<f64>().map_err(|_| {
                Error::invalid_argument(format!("argument {index} is not a number: {text:?}"))
            })
        }
        Value::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
        other => Err(Error::invalid_argument(format!(
            "argument {index} is not a number: {other}"
        ))),
    }
}

/// Reads argument `index` as text.
fn text_arg(args: &[Value], index: usize) -> Result<String> {
    match &args[index] {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(Error::invalid_argument(format!(
            "argument {index} is not text: {other}"
        ))),
    }
}

/// Reads argument `index` as a TCP port.
fn port_arg(args: &[Value], index: usize) -> Result<u16> {
    let port = number_arg(args, index)?;
    if port.fract() != 0.0 || !(1.0..=f64::from(u16::MAX)).contains(&port) {
        return Err(Error::invalid_argument(format!("invalid port: {port}")));
    }
    Ok(port as u16)
}

// ============================================================================
// Tests
// ============================================================================
