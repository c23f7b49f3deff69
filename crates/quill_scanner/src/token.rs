//! Token information produced by the scanner.

use quill_ast::syntax_kind::{SyntaxKind, TokenClass};
use quill_ast::types::TokenFlags;
use quill_core::text::{TextPos, TextRange};

/// Information about a scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// Coarse lexical class of `kind`.
    pub class: TokenClass,
    /// Where the token's leading trivia begins.
    pub full_start: TextPos,
    /// Start position in the source text, after trivia.
    pub start: TextPos,
    /// End position in the source text (exclusive).
    pub end: TextPos,
    /// The text of the token. String literals carry their processed value.
    pub text: String,
    /// Token flags (preceding line break, numeric format, etc.).
    pub flags: TokenFlags,
}

impl TokenInfo {
    pub fn new(kind: SyntaxKind, full_start: TextPos, start: TextPos, end: TextPos) -> Self {
        Self {
            kind,
            class: TokenClass::of(kind),
            full_start,
            start,
            end,
            text: String::new(),
            flags: TokenFlags::NONE,
        }
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = text;
        self
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The length of this token in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether this token has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Span without leading trivia.
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Span of the leading trivia.
    pub fn leading_trivia(&self) -> TextRange {
        TextRange::new(self.full_start, self.start)
    }

    /// Whether there was a line break before this token.
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn is_trivia(&self) -> bool {
        self.class.is_trivia()
    }
}

/// A comment found in trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRange {
    /// `SingleLineCommentTrivia`, `MultiLineCommentTrivia` or `ShebangTrivia`.
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// Whether a line break directly follows the comment.
    pub has_trailing_new_line: bool,
}
