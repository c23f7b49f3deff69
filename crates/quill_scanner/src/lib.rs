//! quill_scanner: Lexer for Quill source text.
//!
//! Produces tokens from UTF-8 source text with byte-offset positions:
//! - Punctuators and compound assignment operators
//! - Decimal, hex, binary, octal and legacy octal numeric literals
//! - String literals with escape sequences
//! - Unicode identifiers and keyword recognition
//! - Comments and whitespace as skipped or returned trivia

mod char_codes;
mod scanner;
mod token;

pub use char_codes::{is_identifier_part, is_identifier_start, is_line_break};
pub use scanner::{
    leading_comment_ranges, scan_at, tokenize, tokenize_with_trivia, Scanner, ScannerState,
    Tokens,
};
pub use token::{CommentRange, TokenInfo};
