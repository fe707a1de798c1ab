//! Color triple and channel clamping.
//!
//! Host values arrive as arbitrary numbers. Every channel is truncated
//! toward zero and bounded to `[0, 255]` before it reaches the wire.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Channel Clamping
// ============================================================================

/// Truncates toward zero and bounds the result to `[0, 255]`.
///
/// `NaN` maps to 0. Values already in range pass through unchanged.
#[inline]
#[must_use]
pub fn color_limit(value: f64) -> u8 {
    // Float-to-int `as` casts saturate and map NaN to 0.
    value.trunc() as u8
}

// ============================================================================
// Color
// ============================================================================

/// An RGB color with each channel in `[0, 255]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from exact channel values.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from host numbers, clamping each channel.
    #[inline]
    #[must_use]
    pub fn clamped(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: color_limit(r),
            g: color_limit(g),
            b: color_limit(b),
        }
    }
}

impl fmt::Display for Color {
    /// Renders the channels as space-separated decimals, as on the wire.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

// ============================================================================
// Tests
// ============================================================================
