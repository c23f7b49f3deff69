//! Parser utility functions.

use quill_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start a statement.
pub fn is_start_of_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::SemicolonToken
    ) || is_start_of_expression(kind)
}

/// Check if a token kind can start an expression.
pub fn is_start_of_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::OpenParenToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
    ) || is_identifier_like(kind)
}

/// Identifiers and the words that are identifiers outside strict mode.
pub fn is_identifier_like(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || kind.is_strict_mode_reserved_word()
}

/// Legacy octal spelling to its `0o` form, e.g. `017` to `0o17`.
pub fn octal_literal_suggestion(text: &str) -> String {
    let digits = text.trim_start_matches('0');
    if digits.is_empty() {
        "0o0".to_string()
    } else {
        format!("0o{}", digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_starts() {
        assert!(is_start_of_statement(SyntaxKind::LetKeyword));
        assert!(is_start_of_statement(SyntaxKind::SemicolonToken));
        assert!(is_start_of_statement(SyntaxKind::OpenParenToken));
        assert!(is_start_of_statement(SyntaxKind::YieldKeyword));
        assert!(!is_start_of_statement(SyntaxKind::CloseBraceToken));
        assert!(!is_start_of_statement(SyntaxKind::IfKeyword));
        assert!(!is_start_of_statement(SyntaxKind::EqualsToken));
    }

    #[test]
    fn test_octal_suggestion() {
        assert_eq!(octal_literal_suggestion("017"), "0o17");
        assert_eq!(octal_literal_suggestion("00"), "0o0");
        assert_eq!(octal_literal_suggestion("0007"), "0o7");
    }
}
