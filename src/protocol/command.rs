//! Wire commands sent to the pixel controller.
//!
//! Every command is one line of ASCII text with space-separated tokens.
//!
//! # Grammar
//!
//! | Command | Wire form |
//! |---------|-----------|
//! | [`Command::Init`] | `init` |
//! | [`Command::Clear`] | `clear` |
//! | [`Command::SetPixels`] | `setpixels <r> <g> <b>` |
//! | [`Command::SetPixel`] | `setpixel <index> <r> <g> <b>` |
//! | [`Command::AutoShow`] | `autoshow on\|off` |
//! | [`Command::Show`] | `show` |
//! | [`Command::Shift`] | `shift left\|right` |
//! | [`Command::Dim`] | `dim <amount>` |
//! | [`Command::SetVirtualPixels`] | `setVirtualPixels <count>` |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use super::Color;

// ============================================================================
// Localized Labels
// ============================================================================

/// Menu labels the host may pass for "autoshow on", per locale.
const AUTO_SHOW_ON_LABELS: [&str; 2] = ["On", "Aan"];

/// Menu labels the host may pass for "shift left", per locale.
const SHIFT_LEFT_LABELS: [&str; 2] = ["Left", "Links"];

// ============================================================================
// AutoShow
// ============================================================================

/// Whether the controller refreshes the strip after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoShow {
    /// Refresh after every change.
    On,
    /// Refresh only on an explicit `show`.
    Off,
}

impl AutoShow {
    /// Parses a localized menu label. Anything but an affirmative label is `Off`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if AUTO_SHOW_ON_LABELS.contains(&label) {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Returns the wire token.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl From<&str> for AutoShow {
    #[inline]
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<bool> for AutoShow {
    #[inline]
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

// ============================================================================
// ShiftDirection
// ============================================================================

/// Direction in which the controller rotates the strip contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftDirection {
    /// Towards index 0.
    Left,
    /// Away from index 0.
    Right,
}

impl ShiftDirection {
    /// Parses a localized menu label. Anything but a "left" label is `Right`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if SHIFT_LEFT_LABELS.contains(&label) {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Returns the wire token.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl From<&str> for ShiftDirection {
    #[inline]
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

// ============================================================================
// Command
// ============================================================================

/// A single client-to-controller command.
///
/// Rendered to wire text through [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the handshake; the controller answers with its pixel count.
    Init,
    /// Turn every pixel off.
    Clear,
    /// Set every pixel to one color.
    SetPixels(Color),
    /// Set one pixel.
    SetPixel {
        /// Pixel index.
        index: u32,
        /// Pixel color.
        color: Color,
    },
    /// Toggle automatic refresh.
    AutoShow(AutoShow),
    /// Push buffered changes to the strip.
    Show,
    /// Rotate strip contents by one pixel.
    Shift(ShiftDirection),
    /// Dim all pixels by an amount.
    Dim(u8),
    /// Restrict addressing to the first `n` pixels.
    SetVirtualPixels(u32),
}

impl Command {
    /// Returns the leading command token.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Clear => "clear",
            Self::SetPixels(_) => "setpixels",
            Self::SetPixel { .. } => "setpixel",
            Self::AutoShow(_) => "autoshow",
            Self::Show => "show",
            Self::Shift(_) => "shift",
            Self::Dim(_) => "dim",
            Self::SetVirtualPixels(_) => "setVirtualPixels",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::Init | Self::Clear | Self::Show => f.write_str(name),
            Self::SetPixels(color) => write!(f, "{name} {color}"),
            Self::SetPixel { index, color } => write!(f, "{name} {index} {color}"),
            Self::AutoShow(mode) => write!(f, "{name} {}", mode.as_str()),
            Self::Shift(direction) => write!(f, "{name} {}", direction.as_str()),
            Self::Dim(amount) => write!(f, "{name} {amount}"),
            Self::SetVirtualPixels(count) => write!(f, "{name} {count}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_commands() {
        assert_eq!(Command::Init.to_string(), "init");
        assert_eq!(Command::Clear.to_string(), "clear");
        assert_eq!(Command::Show.to_string(), "show");
    }

    #[test]
    fn test_set_pixels() {
        let cmd = Command::SetPixels(Color::clamped(-10.0, 300.0, 128.7));
        assert_eq!(cmd.to_string(), "setpixels 0 255 128");
    }

    #[test]
    fn test_set_pixel() {
        let cmd = Command::SetPixel {
            index: 7,
            color: Color::new(1, 2, 3),
        };
        assert_eq!(cmd.to_string(), "setpixel 7 1 2 3");
    }

    #[test]
    fn test_set_virtual_pixels_keeps_camel_case() {
        assert_eq!(
            Command::SetVirtualPixels(12).to_string(),
            "setVirtualPixels 12"
        );
    }

    #[test]
    fn test_dim() {
        assert_eq!(Command::Dim(4).to_string(), "dim 4");
    }

    #[test]
    fn test_auto_show_labels() {
        assert_eq!(AutoShow::from_label("On"), AutoShow::On);
        assert_eq!(AutoShow::from_label("Aan"), AutoShow::On);
        assert_eq!(AutoShow::from_label("Off"), AutoShow::Off);
        assert_eq!(AutoShow::from_label("Uit"), AutoShow::Off);
        assert_eq!(AutoShow::from_label("on"), AutoShow::Off);
        assert_eq!(AutoShow::from_label(""), AutoShow::Off);
    }

    #[test]
    fn test_auto_show_wire() {
        assert_eq!(Command::AutoShow("Aan".into()).to_string(), "autoshow on");
        assert_eq!(Command::AutoShow(false.into()).to_string(), "autoshow off");
    }

    #[test]
    fn test_shift_labels() {
        assert_eq!(ShiftDirection::from_label("Left"), ShiftDirection::Left);
        assert_eq!(ShiftDirection::from_label("Links"), ShiftDirection::Left);
        assert_eq!(ShiftDirection::from_label("Right"), ShiftDirection::Right);
        assert_eq!(ShiftDirection::from_label("Rechts"), ShiftDirection::Right);
        assert_eq!(ShiftDirection::from_label("up"), ShiftDirection::Right);
    }

    #[test]
    fn test_shift_wire() {
        assert_eq!(
            Command::Shift(ShiftDirection::Left).to_string(),
            "shift left"
        );
        assert_eq!(
            Command::Shift(ShiftDirection::Right).to_string(),
            "shift right"
        );
    }
}
