//! quill_parser: Recursive descent parser for Quill.
//!
//! Parses the scanner's token stream into an index-arena syntax tree owned
//! by a [`SourceFile`].

mod parser;
mod precedence;
mod utilities;

pub use parser::{Parser, MAX_RECURSION_DEPTH};
pub use utilities::{is_start_of_expression, is_start_of_statement};

use quill_ast::source_file::SourceFile;
use quill_ast::types::LanguageVariant;
use quill_core::FatalError;

/// Parse `text` into a [`SourceFile`] using the process-wide interner.
///
/// Syntax errors are reported as diagnostics on the returned file. An `Err`
/// means the input could not be represented at all (for example, text too
/// large for 32-bit positions).
pub fn parse(
    file_name: &str,
    text: &str,
    language_variant: LanguageVariant,
) -> Result<SourceFile, FatalError> {
    Parser::new(file_name, text, language_variant).parse_source_file()
}

/// Alias of [`parse`].
pub fn parse_source_file(
    file_name: &str,
    text: &str,
    language_variant: LanguageVariant,
) -> Result<SourceFile, FatalError> {
    parse(file_name, text, language_variant)
}
