//! Block descriptor handed to the block editor.
//!
//! The descriptor lists every block the extension offers, the menus those
//! blocks use and a project URL. Two label sets exist: English (default)
//! and Dutch.
//!
//! # Format
//!
//! ```json
//! {
//!   "blocks": [
//!     ["w", "Connect to OWLS on host %s and port %n.", "cnct", "Host", "Port"],
//!     [" ", "Clear All Pixels", "clearPixels"],
//!     ["r", "number of pixels", "getPixelCount"]
//!   ],
//!   "menus": { "direction": ["Left", "Right"], "showstate": ["On", "Off"] },
//!   "url": "https://github.com/ronbuist/owls"
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

// ============================================================================
// Constants
// ============================================================================

/// Name the extension registers under.
pub const EXTENSION_NAME: &str = "owls";

/// Project page linked from the editor.
pub const PROJECT_URL: &str = "https://github.com/ronbuist/owls";

// ============================================================================
// Locale
// ============================================================================

/// Language of block labels and menu items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English labels.
    #[default]
    English,
    /// Dutch labels.
    Dutch,
}

impl Locale {
    /// Picks a locale from a browser-style language tag such as `nl-NL`.
    ///
    /// Any tag containing `NL` (case-insensitive) selects Dutch.
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Self {
        if tag.to_uppercase().contains("NL") {
            Self::Dutch
        } else {
            Self::English
        }
    }
}

// ============================================================================
// BlockType
// ============================================================================

/// Kind of block, as the editor's one-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Plain command block.
    Command,
    /// Command block the editor waits on until it completes.
    Wait,
    /// Reporter block returning a value.
    Reporter,
}

impl BlockType {
    /// Returns the editor's type code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Command => " ",
            Self::Wait => "w",
            Self::Reporter => "r",
        }
    }
}

// ============================================================================
// Block
// ============================================================================

/// One block definition.
///
/// Serializes as `[type, label, function, defaults...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block kind.
    pub block_type: BlockType,
    /// Label with `%s` / `%n` / `%m.menu` placeholders.
    pub label: &'static str,
    /// Function the editor invokes.
    pub function: &'static str,
    /// Default argument values, one per placeholder.
    pub defaults: &'static [&'static str],
}

impl Block {
    const fn new(
        block_type: BlockType,
        label: &'static str,
        function: &'static str,
        defaults: &'static [&'static str],
    ) -> Self {
        Self {
            block_type,
            label,
            function,
            defaults,
        }
    }

    /// Returns the number of arguments the block takes.
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.defaults.len()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3 + self.defaults.len()))?;
        seq.serialize_element(self.block_type.code())?;
        seq.serialize_element(self.label)?;
        seq.serialize_element(self.function)?;
        for default in self.defaults {
            seq.serialize_element(default)?;
        }
        seq.end()
    }
}

// ============================================================================
// Menus
// ============================================================================

/// Dropdown menus referenced by `%m.<name>` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menus {
    /// Shift directions, "left" first.
    pub direction: [&'static str; 2],
    /// Autoshow states, "on" first.
    pub showstate: [&'static str; 2],
}

// ============================================================================
// Descriptor
// ============================================================================

/// Full extension descriptor for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Block definitions in palette order.
    pub blocks: Vec<Block>,
    /// Dropdown menus.
    pub menus: Menus,
    /// Project page.
    pub url: &'static str,
}

impl Descriptor {
    /// Builds the descriptor for `locale`.
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::English => Self::english(),
            Locale::Dutch => Self::dutch(),
        }
    }

    /// Looks up a block by function name.
    #[must_use]
    pub fn block(&self, function: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.function == function)
    }

    /// Serializes the descriptor to the editor's JSON shape.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn english() -> Self {
        use BlockType::{Command, Reporter, Wait};

        Self {
            blocks: vec![
                Block::new(Wait, "Connect to OWLS on host %s and port %n.", "cnct", &["Host", "Port"]),
                Block::new(Command, "Disconnect from OWLS server", "discnct", &[]),
                Block::new(Command, "Clear All Pixels", "clearPixels", &[]),
                Block::new(Command, "Set All Pixels to color red %n green %n blue %n", "setPixels", &["0", "0", "0"]),
                Block::new(Command, "Set pixel %n to color red %n green %n blue %n", "setPixel", &["0", "0", "0", "0"]),
                Block::new(Command, "Autoshow %m.showstate", "autoShow", &["On"]),
                Block::new(Command, "Show pixels", "show", &[]),
                Block::new(Command, "Shift pixels %m.direction", "shiftPixels", &["Left"]),
                Block::new(Command, "Dim pixels %n", "dim", &["1"]),
                Block::new(Command, "Set number of pixels to %n", "setPixelCount", &["8"]),
                Block::new(Reporter, "number of pixels", "getPixelCount", &[]),
            ],
            menus: Menus {
                direction: ["Left", "Right"],
                showstate: ["On", "Off"],
            },
            url: PROJECT_URL,
        }
    }

    fn dutch() -> Self {
        use BlockType::{Command, Reporter, Wait};

        Self {
            blocks: vec![
                Block::new(Wait, "Verbind met OWLS op %s poort %n.", "cnct", &["Host", "Poort"]),
                Block::new(Command, "Verbreek verbinding met OWLS", "discnct", &[]),
                Block::new(Command, "Alle pixels uit", "clearPixels", &[]),
                Block::new(Command, "Kleur alle pixels rood %n groen %n blauw %n", "setPixels", &["0", "0", "0"]),
                Block::new(Command, "Kleur pixel %n rood %n groen %n blauw %n", "setPixel", &["0", "0", "0", "0"]),
                Block::new(Command, "Direct zien %m.showstate", "autoShow", &["Aan"]),
                Block::new(Command, "Toon pixels", "show", &[]),
                Block::new(Command, "Verschuif pixels %m.direction", "shiftPixels", &["Links"]),
                Block::new(Command, "Maak pixels %n donker", "dim", &["1"]),
                Block::new(Command, "Stel aantal pixels in op %n", "setPixelCount", &["8"]),
                Block::new(Reporter, "Aantal pixels", "getPixelCount", &[]),
            ],
            menus: Menus {
                direction: ["Links", "Rechts"],
                showstate: ["Aan", "Uit"],
            },
            url: PROJECT_URL,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::protocol::{AutoShow, ShiftDirection};

    #[test]
    fn test_locale_from_language_tag() {
        assert_eq!(Locale::from_language_tag("nl-NL"), Locale::Dutch);
        assert_eq!(Locale::from_language_tag("nl"), Locale::Dutch);
        assert_eq!(Locale::from_language_tag("en-US"), Locale::English);
        assert_eq!(Locale::from_language_tag(""), Locale::English);
    }

    #[test]
    fn test_locales_share_functions() {
        let english = Descriptor::for_locale(Locale::English);
        let dutch = Descriptor::for_locale(Locale::Dutch);

        assert_eq!(english.blocks.len(), 11);
        assert_eq!(dutch.blocks.len(), 11);
        for (en, nl) in english.blocks.iter().zip(&dutch.blocks) {
            assert_eq!(en.function, nl.function);
            assert_eq!(en.block_type, nl.block_type);
            assert_eq!(en.arity(), nl.arity());
        }
    }

    #[test]
    fn test_menus_parse_to_expected_commands() {
        for locale in [Locale::English, Locale::Dutch] {
            let menus = Descriptor::for_locale(locale).menus;
            assert_eq!(ShiftDirection::from_label(menus.direction[0]), ShiftDirection::Left);
            assert_eq!(ShiftDirection::from_label(menus.direction[1]), ShiftDirection::Right);
            assert_eq!(AutoShow::from_label(menus.showstate[0]), AutoShow::On);
            assert_eq!(AutoShow::from_label(menus.showstate[1]), AutoShow::Off);
        }
    }

    #[test]
    fn test_block_lookup() {
        let descriptor = Descriptor::for_locale(Locale::English);
        let block = descriptor.block("setPixel").expect("block exists");
        assert_eq!(block.arity(), 4);
        assert!(descriptor.block("explode").is_none());
    }

    #[test]
    fn test_block_json_shape() {
        let descriptor = Descriptor::for_locale(Locale::English);
        let json: serde_json::Value =
            serde_json::from_str(&descriptor.to_json().expect("serialize")).expect("parse");

        assert_eq!(
            json["blocks"][0],
            serde_json::json!(["w", "Connect to OWLS on host %s and port %n.", "cnct", "Host", "Port"])
        );
        assert_eq!(json["blocks"][10], serde_json::json!(["r", "number of pixels", "getPixelCount"]));
        assert_eq!(json["menus"]["showstate"], serde_json::json!(["On", "Off"]));
        assert_eq!(json["url"], PROJECT_URL);
    }
}
