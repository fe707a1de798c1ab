//! Pixel commands.
//!
//! Each method validates and clamps its arguments, then sends exactly one
//! command. All of them except [`Session::get_pixel_count`] fail with
//! [`Error::NotReady`](crate::Error::NotReady) and send nothing unless the
//! handshake has completed.

use tracing::debug;

use crate::error::Result;
use crate::protocol::{AutoShow, Color, Command, ShiftDirection, color_limit};

use super::Session;

// ============================================================================
// Session - Pixels
// ============================================================================

impl Session {
    /// Turns every pixel off.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn clear_pixels(&self) -> Result<()> {
        self.send_command(Command::Clear)
    }

    /// Sets every pixel to one color. Channels are clamped to `[0, 255]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn set_pixels(&self, red: f64, green: f64, blue: f64) -> Result<()> {
        self.send_command(Command::SetPixels(Color::clamped(red, green, blue)))
    }

    /// Sets one pixel. Channels are clamped to `[0, 255]`.
    ///
    /// The index must satisfy `0 <= index <= virtual pixel count`. The upper
    /// bound is inclusive, matching what the controller firmware accepts.
    /// Fractional indices are truncated after the range check.
    ///
    /// Returns `false` without sending anything if the index is out of range.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn set_pixel(&self, index: f64, red: f64, green: f64, blue: f64) -> Result<bool> {
        let state = self.inner.state.lock();
        let connection = state.ready_connection()?;

        let limit = state.virtual_pixel_count;
        if !(0.0..=f64::from(limit)).contains(&index) {
            debug!(index, limit, "Pixel index out of range, ignoring");
            return Ok(false);
        }

        let command = Command::SetPixel {
            index: index as u32,
            color: Color::clamped(red, green, blue),
        };
        connection.send_text(command.to_string())?;

        Ok(true)
    }

    /// Switches automatic refresh on or off.
    ///
    /// Accepts an [`AutoShow`], a `bool`, or a localized menu label
    /// (`"On"` / `"Aan"` mean on, anything else means off).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn auto_show(&self, mode: impl Into<AutoShow>) -> Result<()> {
        self.send_command(Command::AutoShow(mode.into()))
    }

    /// Pushes buffered changes to the strip.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn show(&self) -> Result<()> {
        self.send_command(Command::Show)
    }

    /// Shifts the strip contents by one pixel.
    ///
    /// Accepts a [`ShiftDirection`] or a localized menu label
    /// (`"Left"` / `"Links"` mean left, anything else means right).
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn shift_pixels(&self, direction: impl Into<ShiftDirection>) -> Result<()> {
        self.send_command(Command::Shift(direction.into()))
    }

    /// Dims all pixels. The amount is rounded up, then clamped to `[0, 255]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn dim(&self, amount: f64) -> Result<()> {
        self.send_command(Command::Dim(color_limit(amount.ceil())))
    }

    /// Restricts addressing to the first `count` pixels.
    ///
    /// The count is truncated and bounded to `[1, physical pixel count]`.
    /// Returns the count that was applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not ready.
    pub fn set_pixel_count(&self, count: f64) -> Result<u32> {
        let mut state = self.inner.state.lock();
        let connection = state.ready_connection()?;

        let applied = clamp_pixel_count(count, state.physical_pixel_count);
        connection.send_text(Command::SetVirtualPixels(applied).to_string())?;
        state.virtual_pixel_count = applied;

        debug!(requested = count, applied, "Virtual pixel count set");
        Ok(applied)
    }

    /// Returns the virtual pixel count. Never touches the network.
    ///
    /// 0 when no handshake has completed since the last disconnect.
    #[must_use]
    pub fn get_pixel_count(&self) -> u32 {
        self.inner.state.lock().virtual_pixel_count
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Truncates `requested` and bounds it to `[1, physical]`. NaN yields 1.
fn clamp_pixel_count(requested: f64, physical: u32) -> u32 {
    // Saturating cast; NaN becomes 0 and is lifted to 1 below.
    let truncated = requested as i64;
    truncated.clamp(1, i64::from(physical.max(1))) as u32
}

// ============================================================================
// Tests
// ============================================================================
