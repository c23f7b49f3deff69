//! Flag types and small enums shared by nodes and tokens.

use serde::Serialize;

bitflags::bitflags! {
    /// Flags for syntax tree nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        const LET                           = 1 << 0;
        const CONST                         = 1 << 1;
        /// Zero-length placeholder synthesized during error recovery.
        const MISSING                       = 1 << 2;
        /// A diagnostic was reported while parsing this node.
        const THIS_NODE_HAS_ERROR           = 1 << 3;
        /// Parsed from a `.d.ql` file.
        const AMBIENT                       = 1 << 4;
        /// Parsed with the Strict language variant.
        const STRICT                        = 1 << 5;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Flags describing a scanned token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const UNTERMINATED                      = 1 << 1;
        const SCIENTIFIC                        = 1 << 2;
        /// Legacy octal such as `017`.
        const OCTAL                             = 1 << 3;
        const HEX_SPECIFIER                     = 1 << 4;
        const BINARY_SPECIFIER                  = 1 << 5;
        const OCTAL_SPECIFIER                   = 1 << 6;
        const CONTAINS_SEPARATOR                = 1 << 7;
        const IS_INVALID                        = 1 << 8;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

/// Language variant a file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LanguageVariant {
    #[default]
    Standard,
    /// Strict-mode reserved words may not be used as identifiers and legacy
    /// octal literals are errors.
    Strict,
}

impl NodeFlags {
    pub fn is_missing(self) -> bool {
        self.contains(NodeFlags::MISSING)
    }
}
