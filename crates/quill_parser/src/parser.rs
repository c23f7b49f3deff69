//! The Quill parser implementation.
//!
//! A recursive descent parser over the scanner's token stream. Nodes are
//! allocated bottom-up into a [`NodeArena`]: a node is allocated after all of
//! its children, and the arena links each child to its parent at that point.
//! Syntax errors never abort the parse; they become diagnostics plus
//! zero-length placeholder nodes flagged `MISSING`.

use quill_ast::arena::NodeArena;
use quill_ast::node::{NodeId, NodeKind};
use quill_ast::source_file::{is_declaration_file_name, IdentifierTable, SourceFile, SourceFileParts};
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{LanguageVariant, NodeFlags, TokenFlags};
use quill_core::intern::{global_interner, StringInterner};
use quill_core::text::{TextPos, TextRange, TextSpan};
use quill_core::FatalError;
use quill_diagnostics::{messages, Diagnostic, DiagnosticCategory, DiagnosticCollection, DiagnosticMessage};
use quill_scanner::Scanner;
use tracing::{debug, trace};

use crate::precedence::{get_binary_operator_precedence, is_right_associative, OperatorPrecedence};
use crate::utilities::{is_identifier_like, is_start_of_statement, octal_literal_suggestion};

/// Maximum expression nesting depth. Deeper input gets `Expression expected.`
/// and a placeholder instead of recursing further.
pub const MAX_RECURSION_DEPTH: u32 = 200;

type ParseResult = Result<NodeId, FatalError>;

/// The parser produces a [`SourceFile`] from Quill source text.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    file_name: String,
    source_text: &'a str,
    language_variant: LanguageVariant,
    is_declaration_file: bool,
    arena: NodeArena,
    identifiers: IdentifierTable,
    identifier_count: u32,
    diagnostics: DiagnosticCollection,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    /// End of the most recently consumed token.
    last_token_end: TextPos,
}

impl<'a> Parser<'a> {
    pub fn new(file_name: &str, source_text: &'a str, language_variant: LanguageVariant) -> Self {
        Self {
            scanner: Scanner::new(source_text),
            file_name: file_name.to_string(),
            source_text,
            language_variant,
            is_declaration_file: is_declaration_file_name(file_name),
            arena: NodeArena::with_capacity(source_text.len() / 4 + 2),
            identifiers: IdentifierTable::new(global_interner()),
            identifier_count: 0,
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
            last_token_end: 0,
        }
    }

    /// Intern identifiers into `interner` instead of the process-wide one.
    pub fn with_interner(mut self, interner: StringInterner) -> Self {
        self.identifiers = IdentifierTable::new(interner);
        self
    }

    pub fn parse_source_file(mut self) -> Result<SourceFile, FatalError> {
        let len = self.source_text.len();
        if len > u32::MAX as usize {
            return Err(FatalError::SourceTooLarge {
                len,
                max: u32::MAX as usize,
            });
        }
        let len = len as TextPos;

        self.next_token()?;
        let statements = self.parse_statements()?;

        let end_of_file_token = self.arena.alloc_leaf(
            NodeKind::EndOfFileToken,
            TextRange::empty(len),
            self.scanner.token_full_start(),
            NodeFlags::NONE,
        );

        let mut root_flags = NodeFlags::NONE;
        if self.language_variant == LanguageVariant::Strict {
            root_flags |= NodeFlags::STRICT;
        }
        if self.is_declaration_file {
            root_flags |= NodeFlags::AMBIENT;
        }
        let root = self.arena.alloc_with_children(
            NodeKind::SourceFile {
                statements,
                end_of_file_token,
            },
            TextRange::new(0, len),
            0,
            root_flags,
        )?;

        let mut diagnostics = self.scanner.take_diagnostics();
        diagnostics.extend(std::mem::take(&mut self.diagnostics));
        let diagnostics: Vec<Diagnostic> = diagnostics
            .into_diagnostics()
            .into_iter()
            .map(|d| d.with_file(self.file_name.as_str()))
            .collect();

        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            identifiers = self.identifier_count,
            diagnostics = diagnostics.len(),
            "parsed source file"
        );

        SourceFile::new(SourceFileParts {
            file_name: self.file_name,
            text: self.source_text.to_string(),
            language_variant: self.language_variant,
            arena: self.arena,
            root,
            identifiers: self.identifiers,
            identifier_count: self.identifier_count,
            diagnostics,
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    fn next_token(&mut self) -> Result<SyntaxKind, FatalError> {
        let previous_end = self.scanner.token_end();
        self.last_token_end = previous_end;
        let kind = self.scanner.scan();
        let start = self.scanner.token_start();
        if start < previous_end {
            return Err(FatalError::NonMonotonicScan {
                previous_end,
                start,
            });
        }
        trace!(kind = ?kind, start, end = self.scanner.token_end(), "token");
        Ok(kind)
    }

    #[inline]
    fn token_pos(&self) -> TextPos {
        self.scanner.token_start()
    }

    #[inline]
    fn token_end(&self) -> TextPos {
        self.scanner.token_end()
    }

    /// Start and full start of a node beginning at the current token.
    #[inline]
    fn node_start(&self) -> (TextPos, TextPos) {
        (self.scanner.token_start(), self.scanner.token_full_start())
    }

    fn parse_optional(&mut self, kind: SyntaxKind) -> Result<bool, FatalError> {
        if self.current_token() == kind {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_expected(&mut self, kind: SyntaxKind) -> Result<bool, FatalError> {
        if self.parse_optional(kind)? {
            return Ok(true);
        }
        let text = kind.token_text().unwrap_or("token");
        self.error_at_current(&messages::_0_EXPECTED, &[text]);
        Ok(false)
    }

    /// Whether a statement may end here without an explicit `;`.
    fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.scanner.has_preceding_line_break()
    }

    fn parse_semicolon(&mut self) -> Result<(), FatalError> {
        if self.parse_optional(SyntaxKind::SemicolonToken)? {
            return Ok(());
        }
        if !self.can_parse_semicolon() {
            self.error_at_current(&messages::_0_EXPECTED, &[";"]);
        }
        Ok(())
    }

    fn error_at_current(&mut self, msg: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(self.token_pos(), self.token_end());
        self.diagnostics.add(Diagnostic::at(span, msg, args));
    }

    fn error_at_node(&mut self, node: NodeId, msg: &DiagnosticMessage, args: &[&str]) {
        let span = self.arena[node].range.to_span();
        self.diagnostics.add(Diagnostic::at(span, msg, args));
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Allocate a node that began at `start`. Its end is the furthest of the
    /// last consumed token and its children.
    fn finish_node(
        &mut self,
        kind: NodeKind,
        start: TextPos,
        full_start: TextPos,
        flags: NodeFlags,
    ) -> ParseResult {
        let mut end = self.last_token_end.max(start);
        kind.for_each_child(|child| end = end.max(self.arena[child].range.end));
        let range = TextRange::new(start, end);
        if kind.has_children() {
            self.arena.alloc_with_children(kind, range, full_start, flags)
        } else {
            Ok(self.arena.alloc_leaf(kind, range, full_start, flags))
        }
    }

    /// A zero-length identifier at the current token, consuming nothing.
    fn create_missing_identifier(&mut self) -> NodeId {
        let pos = self.token_pos();
        self.arena.alloc_leaf(
            NodeKind::Identifier { text: None },
            TextRange::empty(pos),
            pos,
            NodeFlags::MISSING,
        )
    }

    fn is_missing(&self, node: NodeId) -> bool {
        self.arena[node].is_missing()
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statements(&mut self) -> Result<Vec<NodeId>, FatalError> {
        let mut statements = Vec::new();
        // Inside a run of tokens that cannot start a statement.
        let mut skipping = false;
        while self.current_token() != SyntaxKind::EndOfFileToken {
            let token = self.current_token();
            if is_start_of_statement(token) {
                skipping = false;
                let saved_pos = self.token_pos();
                statements.push(self.parse_statement()?);

                // Every statement rule consumes its first token; this only
                // guards against a rule that fails to.
                if self.token_pos() == saved_pos && self.current_token() != SyntaxKind::EndOfFileToken {
                    self.next_token()?;
                }
            } else {
                // The scanner has already reported invalid characters.
                if token != SyntaxKind::Unknown {
                    if !skipping {
                        self.error_at_current(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                    }
                    skipping = true;
                }
                self.next_token()?;
            }
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> ParseResult {
        match self.current_token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement()
            }
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_empty_statement(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        self.next_token()?;
        self.finish_node(NodeKind::EmptyStatement, pos, full_start, NodeFlags::NONE)
    }

    fn parse_expression_statement(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        self.finish_node(
            NodeKind::ExpressionStatement { expression },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }

    fn parse_variable_statement(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let declaration_list = self.parse_variable_declaration_list()?;
        self.parse_semicolon()?;
        self.finish_node(
            NodeKind::VariableStatement { declaration_list },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }

    fn parse_variable_declaration_list(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let flags = match self.current_token() {
            SyntaxKind::LetKeyword => NodeFlags::LET | NodeFlags::BLOCK_SCOPED,
            SyntaxKind::ConstKeyword => NodeFlags::CONST | NodeFlags::BLOCK_SCOPED,
            _ => NodeFlags::NONE,
        };
        self.next_token()?;

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration(flags)?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.finish_node(
            NodeKind::VariableDeclarationList { declarations },
            pos,
            full_start,
            flags,
        )
    }

    fn parse_variable_declaration(&mut self, list_flags: NodeFlags) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let name = self.parse_identifier()?;
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken)? {
            Some(self.parse_assignment_expression()?)
        } else {
            None
        };

        match initializer {
            Some(init) if self.is_declaration_file => {
                self.error_at_node(init, &messages::INITIALIZERS_ARE_NOT_ALLOWED_IN_AMBIENT_CONTEXTS, &[]);
            }
            None if list_flags.contains(NodeFlags::CONST)
                && !self.is_declaration_file
                && !self.is_missing(name) =>
            {
                self.error_at_node(name, &messages::CONST_DECLARATIONS_MUST_BE_INITIALIZED, &[]);
            }
            _ => {}
        }

        self.finish_node(
            NodeKind::VariableDeclaration { name, initializer },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Parse an identifier in binding or reference position. Strict-mode
    /// reserved words are identifiers in the standard variant.
    fn parse_identifier(&mut self) -> ParseResult {
        let token = self.current_token();
        if !is_identifier_like(token) {
            self.error_at_current(&messages::IDENTIFIER_EXPECTED, &[]);
            return Ok(self.create_missing_identifier());
        }
        if token != SyntaxKind::Identifier && self.language_variant == LanguageVariant::Strict {
            let text = self.scanner.token_value().to_string();
            self.error_at_current(
                &messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE,
                &[text.as_str()],
            );
        }
        self.consume_identifier()
    }

    /// Parse the name after `.`, where any keyword is allowed.
    fn parse_identifier_name(&mut self) -> ParseResult {
        let token = self.current_token();
        if token == SyntaxKind::Identifier || token.is_keyword() {
            self.consume_identifier()
        } else {
            self.error_at_current(&messages::IDENTIFIER_EXPECTED, &[]);
            Ok(self.create_missing_identifier())
        }
    }

    fn consume_identifier(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let key = self.identifiers.record(self.scanner.token_value());
        self.identifier_count += 1;
        self.next_token()?;
        self.finish_node(NodeKind::Identifier { text: Some(key) }, pos, full_start, NodeFlags::NONE)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let mut expr = self.parse_assignment_expression()?;
        while self.parse_optional(SyntaxKind::CommaToken)? {
            let right = self.parse_assignment_expression()?;
            expr = self.finish_node(
                NodeKind::BinaryExpression {
                    left: expr,
                    operator: SyntaxKind::CommaToken,
                    right,
                },
                pos,
                full_start,
                NodeFlags::NONE,
            )?;
        }
        Ok(expr)
    }

    /// Run `f` one nesting level deeper, or report and return a placeholder
    /// once [`MAX_RECURSION_DEPTH`] is reached.
    fn with_recursion_guard(&mut self, f: impl FnOnce(&mut Self) -> ParseResult) -> ParseResult {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error_at_current(&messages::EXPRESSION_EXPECTED, &[]);
            return Ok(self.create_missing_identifier());
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }

    fn parse_assignment_expression(&mut self) -> ParseResult {
        self.with_recursion_guard(Self::parse_assignment_expression_worker)
    }

    fn parse_assignment_expression_worker(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let expr = self.parse_conditional_expression()?;

        let operator = self.current_token();
        if !operator.is_assignment_operator() {
            return Ok(expr);
        }
        if !self.is_missing(expr) && !self.is_valid_reference(expr) {
            self.error_at_node(
                expr,
                &messages::THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE,
                &[],
            );
        }
        self.next_token()?;
        let right = self.parse_assignment_expression()?;
        self.finish_node(
            NodeKind::BinaryExpression {
                left: expr,
                operator,
                right,
            },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }

    fn parse_conditional_expression(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let condition = self.parse_binary_expression(OperatorPrecedence::Comma)?;
        if !self.parse_optional(SyntaxKind::QuestionToken)? {
            return Ok(condition);
        }
        let when_true = self.parse_assignment_expression()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression()?;
        self.finish_node(
            NodeKind::ConditionalExpression {
                condition,
                when_true,
                when_false,
            },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }

    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let mut left = self.parse_unary_expression()?;

        loop {
            let operator = self.current_token();
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid {
                break;
            }
            let binds = if is_right_associative(operator) {
                precedence >= min_precedence
            } else {
                precedence > min_precedence
            };
            if !binds {
                break;
            }

            if is_right_associative(operator) {
                left = self.parse_right_associative_run(left, pos, full_start, operator)?;
                continue;
            }

            self.next_token()?;
            let right = self.parse_binary_expression(precedence)?;
            left = self.finish_node(
                NodeKind::BinaryExpression {
                    left,
                    operator,
                    right,
                },
                pos,
                full_start,
                NodeFlags::NONE,
            )?;
        }

        Ok(left)
    }

    /// Parse `first op x op y ...` for a right-associative `op` in a loop and
    /// fold it from the right, so long chains do not grow the stack.
    fn parse_right_associative_run(
        &mut self,
        first: NodeId,
        pos: TextPos,
        full_start: TextPos,
        operator: SyntaxKind,
    ) -> ParseResult {
        let mut pending = Vec::new();
        let mut operand = first;
        let mut start = (pos, full_start);
        while self.current_token() == operator {
            pending.push((operand, start));
            self.next_token()?;
            start = self.node_start();
            operand = self.parse_unary_expression()?;
        }

        let mut right = operand;
        while let Some((left, (pos, full_start))) = pending.pop() {
            right = self.finish_node(
                NodeKind::BinaryExpression {
                    left,
                    operator,
                    right,
                },
                pos,
                full_start,
                NodeFlags::NONE,
            )?;
        }
        Ok(right)
    }

    fn parse_unary_expression(&mut self) -> ParseResult {
        match self.current_token() {
            SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken => {
                self.with_recursion_guard(Self::parse_prefix_unary_expression)
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_prefix_unary_expression(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let operator = self.current_token();
        self.next_token()?;
        let operand = self.parse_unary_expression()?;
        if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
            self.check_update_operand(operand);
        }
        self.finish_node(
            NodeKind::PrefixUnaryExpression { operator, operand },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }

    fn parse_postfix_expression(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let operand = self.parse_left_hand_side_expression()?;
        let operator = self.current_token();
        if !matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            || self.scanner.has_preceding_line_break()
        {
            return Ok(operand);
        }
        self.check_update_operand(operand);
        self.next_token()?;
        self.finish_node(
            NodeKind::PostfixUnaryExpression { operand, operator },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }

    fn check_update_operand(&mut self, operand: NodeId) {
        if !self.is_missing(operand) && !self.is_valid_reference(operand) {
            self.error_at_node(
                operand,
                &messages::INVALID_LEFT_HAND_SIDE_EXPRESSION_IN_POSTFIX_OPERATION,
                &[],
            );
        }
    }

    /// Identifiers and property accesses, possibly parenthesized.
    fn is_valid_reference(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            match &self.arena[current].kind {
                NodeKind::Identifier { .. } | NodeKind::PropertyAccessExpression { .. } => {
                    return true
                }
                NodeKind::ParenthesizedExpression { expression } => current = *expression,
                _ => return false,
            }
        }
    }

    fn parse_left_hand_side_expression(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let mut expr = self.parse_primary_expression()?;

        loop {
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token()?;
                    let name = self.parse_identifier_name()?;
                    expr = self.finish_node(
                        NodeKind::PropertyAccessExpression {
                            expression: expr,
                            name,
                        },
                        pos,
                        full_start,
                        NodeFlags::NONE,
                    )?;
                }
                SyntaxKind::OpenParenToken => {
                    self.next_token()?;
                    let arguments = self.parse_argument_list()?;
                    self.parse_expected(SyntaxKind::CloseParenToken)?;
                    expr = self.finish_node(
                        NodeKind::CallExpression {
                            expression: expr,
                            arguments,
                        },
                        pos,
                        full_start,
                        NodeFlags::NONE,
                    )?;
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_argument_list(&mut self) -> Result<Vec<NodeId>, FatalError> {
        let mut arguments = Vec::new();
        loop {
            if matches!(
                self.current_token(),
                SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
            ) {
                break;
            }
            arguments.push(self.parse_assignment_expression()?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        Ok(arguments)
    }

    fn parse_primary_expression(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        let kind = match self.current_token() {
            token if is_identifier_like(token) => return self.parse_identifier(),
            SyntaxKind::NumericLiteral => {
                let text = self.scanner.token_value().to_string();
                let flags = self.scanner.token_flags() & TokenFlags::NUMERIC_LITERAL_FLAGS;
                if flags.contains(TokenFlags::OCTAL) {
                    self.report_octal_literal(&text);
                }
                NodeKind::NumericLiteral { text, flags }
            }
            SyntaxKind::StringLiteral => NodeKind::StringLiteral {
                value: self.scanner.token_value().to_string(),
                unterminated: self.scanner.token_flags().contains(TokenFlags::UNTERMINATED),
            },
            SyntaxKind::TrueKeyword => NodeKind::TrueKeyword,
            SyntaxKind::FalseKeyword => NodeKind::FalseKeyword,
            SyntaxKind::NullKeyword => NodeKind::NullKeyword,
            SyntaxKind::OpenParenToken => return self.parse_parenthesized_expression(),
            _ => {
                self.error_at_current(&messages::EXPRESSION_EXPECTED, &[]);
                return Ok(self.create_missing_identifier());
            }
        };
        self.next_token()?;
        self.finish_node(kind, pos, full_start, NodeFlags::NONE)
    }

    /// Legacy octal literals are a warning in the standard variant and an
    /// error in the strict one.
    fn report_octal_literal(&mut self, text: &str) {
        let suggestion = octal_literal_suggestion(text);
        let span = TextSpan::from_bounds(self.token_pos(), self.token_end());
        let mut diagnostic = Diagnostic::at(
            span,
            &messages::OCTAL_LITERALS_ARE_NOT_ALLOWED_USE_THE_SYNTAX_0,
            &[suggestion.as_str()],
        );
        if self.language_variant == LanguageVariant::Standard {
            diagnostic = diagnostic.with_category(DiagnosticCategory::Warning);
        }
        self.diagnostics.add(diagnostic);
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult {
        let (pos, full_start) = self.node_start();
        self.next_token()?; // (
        let expression = self.parse_expression()?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        self.finish_node(
            NodeKind::ParenthesizedExpression { expression },
            pos,
            full_start,
            NodeFlags::NONE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_isolated(text: &str) -> SourceFile {
        Parser::new("test.ql", text, LanguageVariant::Standard)
            .with_interner(StringInterner::new())
            .parse_source_file()
            .expect("parse should not fail")
    }

    #[test]
    fn test_empty_source() {
        let file = parse_isolated("");
        assert!(file.statements().is_empty());
        assert!(file.parse_diagnostics().is_empty());
        assert_eq!(file.node_count(), 2);
    }

    #[test]
    fn test_node_count_includes_root_and_eof() {
        // root, statement, list, declaration, name, initializer, eof
        let file = parse_isolated("let x = 1;");
        assert_eq!(file.node_count(), 7);
    }

    #[test]
    fn test_last_token_end_tracks_consumed_tokens() {
        let file = parse_isolated("a ;  ");
        let stmt = file.statements()[0];
        assert_eq!(file.node(stmt).range, TextRange::new(0, 3));
    }

    #[test]
    fn test_binary_precedence() {
        let file = parse_isolated("a + b * c");
        let stmt = file.statements()[0];
        let NodeKind::ExpressionStatement { expression } = file.node(stmt).kind else {
            panic!("expected expression statement");
        };
        let NodeKind::BinaryExpression { operator, right, .. } = &file.node(expression).kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*operator, SyntaxKind::PlusToken);
        assert_eq!(file.node(*right).syntax_kind(), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let file = parse_isolated("a ** b ** c");
        let stmt = file.statements()[0];
        let NodeKind::ExpressionStatement { expression } = file.node(stmt).kind else {
            panic!("expected expression statement");
        };
        let NodeKind::BinaryExpression { left, right, .. } = &file.node(expression).kind else {
            panic!("expected binary expression");
        };
        assert_eq!(file.node(*left).syntax_kind(), SyntaxKind::Identifier);
        assert_eq!(file.node(*right).syntax_kind(), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_exponent_run_spans() {
        let file = parse_isolated("a ** b ** c * d");
        let stmt = file.statements()[0];
        let NodeKind::ExpressionStatement { expression } = file.node(stmt).kind else {
            panic!("expected expression statement");
        };
        let NodeKind::BinaryExpression { left, operator, .. } = &file.node(expression).kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*operator, SyntaxKind::AsteriskToken);
        assert_eq!(file.node(*left).range, TextRange::new(0, 11));
        let NodeKind::BinaryExpression { right, .. } = &file.node(*left).kind else {
            panic!("expected exponent expression");
        };
        assert_eq!(file.node(*right).range, TextRange::new(5, 11));
        assert_eq!(file.node(*right).parent(), Some(*left));
        assert!(file.parse_diagnostics().is_empty());
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let file = parse_isolated("a - b - c");
        let stmt = file.statements()[0];
        let NodeKind::ExpressionStatement { expression } = file.node(stmt).kind else {
            panic!("expected expression statement");
        };
        let NodeKind::BinaryExpression { left, right, .. } = &file.node(expression).kind else {
            panic!("expected binary expression");
        };
        assert_eq!(file.node(*left).syntax_kind(), SyntaxKind::BinaryExpression);
        assert_eq!(file.node(*right).syntax_kind(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_recursion_limit_reports_expression_expected() {
        let depth = MAX_RECURSION_DEPTH as usize + 10;
        let text = "!".repeat(depth) + "x";
        let file = parse_isolated(&text);
        let codes: Vec<u32> = file.parse_diagnostics().iter().map(|d| d.code).collect();
        assert!(codes.contains(&1109), "{:?}", codes);
        file.validate().expect("tree stays valid");
    }
}
