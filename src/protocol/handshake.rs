//! Handshake reply parsing.
//!
//! After receiving `init`, the controller answers with exactly one message:
//! its physical pixel count as a decimal string.

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};

// ============================================================================
// ReadyData
// ============================================================================

/// Data received in the handshake reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyData {
    /// Number of LEDs on the connected strip.
    pub pixel_count: u32,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses the controller's handshake reply.
///
/// Surrounding whitespace is ignored. The count must be a positive decimal
/// integer; a strip reporting no pixels could never satisfy the
/// `1 <= virtual <= physical` window.
///
/// # Errors
///
/// Returns [`Error::MalformedHandshake`] for non-numeric, negative or zero replies.
pub fn parse_pixel_count(reply: &str) -> Result<ReadyData> {
    let pixel_count = reply
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::malformed_handshake(reply))?;

    if pixel_count == 0 {
        return Err(Error::malformed_handshake(reply));
    }

    Ok(ReadyData { pixel_count })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_count() {
        let data = parse_pixel_count("60").expect("valid reply");
        assert_eq!(data.pixel_count, 60);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let data = parse_pixel_count(" 144\n").expect("valid reply");
        assert_eq!(data.pixel_count, 144);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for reply in ["", "abc", "60abc", "-5", "6.5", "0"] {
            let err = parse_pixel_count(reply).unwrap_err();
            assert!(
                matches!(err, Error::MalformedHandshake { .. }),
                "reply {reply:?} should be malformed"
            );
        }
    }
}
