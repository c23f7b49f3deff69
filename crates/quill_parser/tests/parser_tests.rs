//! Parser integration tests.
//!
//! Verifies that the parser builds the expected trees, spans and diagnostics
//! from Quill source.

use quill_ast::node::{NodeId, NodeKind};
use quill_ast::source_file::SourceFile;
use quill_ast::syntax_kind::SyntaxKind;
use quill_ast::types::{LanguageVariant, NodeFlags};
use quill_core::text::TextRange;
use quill_core::StringInterner;
use quill_diagnostics::DiagnosticCategory;
use quill_parser::{parse, Parser};

/// Helper: parse source text in the standard variant.
fn parse_ok(source: &str) -> SourceFile {
    parse("test.ql", source, LanguageVariant::Standard).expect("parse should not fail")
}

fn parse_strict(source: &str) -> SourceFile {
    parse("test.ql", source, LanguageVariant::Strict).expect("parse should not fail")
}

fn codes(file: &SourceFile) -> Vec<u32> {
    file.parse_diagnostics().iter().map(|d| d.code).collect()
}

fn positions(file: &SourceFile) -> Vec<u32> {
    file.parse_diagnostics().iter().map(|d| d.position()).collect()
}

/// Helper: the statement kinds of a file.
fn statement_kinds(file: &SourceFile) -> Vec<SyntaxKind> {
    file.statements()
        .iter()
        .map(|&id| file.node(id).syntax_kind())
        .collect()
}

/// Helper: the expression of the `index`th statement, which must be an
/// expression statement.
fn expression_of(file: &SourceFile, index: usize) -> NodeId {
    match file.node(file.statements()[index]).kind {
        NodeKind::ExpressionStatement { expression } => expression,
        ref other => panic!("expected expression statement, got {:?}", other.syntax_kind()),
    }
}

/// Helper: the declarations of the `index`th statement, which must be a
/// variable statement.
fn declarations_of(file: &SourceFile, index: usize) -> (NodeId, Vec<NodeId>) {
    let NodeKind::VariableStatement { declaration_list } = file.node(file.statements()[index]).kind
    else {
        panic!("expected variable statement");
    };
    let NodeKind::VariableDeclarationList { declarations } = &file.node(declaration_list).kind
    else {
        panic!("expected declaration list");
    };
    (declaration_list, declarations.clone())
}

// ============================================================================
// Basic properties
// ============================================================================

#[test]
fn test_comment_only_file() {
    let file = parse_ok("// comment");
    assert!(file.statements().is_empty());
    assert!(file.parse_diagnostics().is_empty());
    assert_eq!(file.text(), "// comment");
    assert_eq!(file.end(), 10);

    let eof = file.node(file.end_of_file_token());
    assert_eq!(eof.range, TextRange::empty(10));
    assert_eq!(eof.full_start, 0);
}

#[test]
fn test_single_let_declaration() {
    let file = parse_ok("let x = 1");
    assert_eq!(statement_kinds(&file), vec![SyntaxKind::VariableStatement]);
    let (list, declarations) = declarations_of(&file, 0);
    assert!(file.node(list).flags.contains(NodeFlags::LET));
    assert_eq!(declarations.len(), 1);

    let NodeKind::VariableDeclaration { name, initializer } = file.node(declarations[0]).kind else {
        panic!("expected variable declaration");
    };
    assert_eq!(file.identifier_text(name), Some("x"));
    let initializer = initializer.expect("initializer");
    assert_eq!(file.text_of(initializer), "1");

    assert_eq!(file.identifier_count(), 1);
    assert!(file.parse_diagnostics().is_empty());
    assert_eq!(file.end(), 9);
    assert_eq!(file.node(file.statements()[0]).range, TextRange::new(0, 9));
}

#[test]
fn test_missing_binding_name() {
    let file = parse_ok("let = 1");
    assert_eq!(codes(&file), vec![1003]);
    assert_eq!(positions(&file), vec![4]);

    let (_, declarations) = declarations_of(&file, 0);
    let NodeKind::VariableDeclaration { name, initializer } = file.node(declarations[0]).kind else {
        panic!("expected variable declaration");
    };
    let name_node = file.node(name);
    assert_eq!(name_node.syntax_kind(), SyntaxKind::Identifier);
    assert!(name_node.is_missing());
    assert!(name_node.flags.contains(NodeFlags::MISSING));
    assert_eq!(name_node.range, TextRange::empty(4));
    assert!(initializer.is_some());

    // Missing identifiers are neither interned nor counted.
    assert_eq!(file.identifier_count(), 0);
    assert!(file.identifiers().is_empty());
}

#[test]
fn test_empty_file() {
    let file = parse_ok("");
    assert!(file.statements().is_empty());
    assert!(file.parse_diagnostics().is_empty());
    assert_eq!(file.node(file.root()).range, TextRange::new(0, 0));
}

#[test]
fn test_parse_is_deterministic() {
    let source = "let a = f(1, 'two') ? b.c : -d;\nx = y ?? z\n} (";
    let first = parse_ok(source);
    let second = parse_ok(source);
    assert_eq!(first.dump_tree(), second.dump_tree());
    assert_eq!(codes(&first), codes(&second));
    assert_eq!(positions(&first), positions(&second));
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_statement_kinds() {
    let file = parse_ok("var a = 1; ; a;");
    assert_eq!(
        statement_kinds(&file),
        vec![
            SyntaxKind::VariableStatement,
            SyntaxKind::EmptyStatement,
            SyntaxKind::ExpressionStatement,
        ]
    );
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_declaration_list_flags() {
    let file = parse_ok("var a\nlet b\nconst c = 1");
    let flags: Vec<NodeFlags> = (0..3)
        .map(|i| file.node(declarations_of(&file, i).0).flags)
        .collect();
    assert!(!flags[0].intersects(NodeFlags::LET | NodeFlags::CONST));
    assert!(flags[1].contains(NodeFlags::LET));
    assert!(flags[2].contains(NodeFlags::CONST));
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_multiple_declarations() {
    let file = parse_ok("let a = 1, b, c = a;");
    let (_, declarations) = declarations_of(&file, 0);
    assert_eq!(declarations.len(), 3);
    assert_eq!(file.identifier_count(), 4);
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_automatic_semicolon_insertion() {
    let file = parse_ok("a\nb\nlet c = 1\nc");
    assert_eq!(file.statements().len(), 4);
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_missing_semicolon_on_same_line() {
    let file = parse_ok("x y");
    assert_eq!(file.statements().len(), 2);
    assert_eq!(codes(&file), vec![1005]);
    assert_eq!(positions(&file), vec![2]);
    assert_eq!(file.parse_diagnostics()[0].message_text, "';' expected.");
}

#[test]
fn test_skipped_tokens_report_once_per_run() {
    let file = parse_ok("} ) let x = 1; ] ]");
    assert_eq!(statement_kinds(&file), vec![SyntaxKind::VariableStatement]);
    assert_eq!(codes(&file), vec![1128, 1128]);
    assert_eq!(positions(&file), vec![0, 15]);
}

#[test]
fn test_statement_spans_exclude_trivia() {
    let file = parse_ok("  let x = 1;  ");
    let stmt = file.node(file.statements()[0]);
    assert_eq!(stmt.range, TextRange::new(2, 12));
    assert_eq!(stmt.full_start, 0);

    let eof = file.node(file.end_of_file_token());
    assert_eq!(eof.range, TextRange::empty(14));
    assert_eq!(eof.full_start, 12);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_call_and_property_access_chain() {
    let file = parse_ok("f(a, b)(c).d");
    let outer = expression_of(&file, 0);
    let NodeKind::PropertyAccessExpression { expression, name } = file.node(outer).kind else {
        panic!("expected property access");
    };
    assert_eq!(file.identifier_text(name), Some("d"));

    let NodeKind::CallExpression { expression: callee, arguments } = &file.node(expression).kind
    else {
        panic!("expected call");
    };
    assert_eq!(arguments.len(), 1);
    let NodeKind::CallExpression { arguments: inner_args, .. } = &file.node(*callee).kind else {
        panic!("expected inner call");
    };
    assert_eq!(inner_args.len(), 2);
    assert_eq!(file.node(outer).range, TextRange::new(0, 12));
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_keyword_property_names() {
    let file = parse_ok("a.if.null");
    assert!(file.parse_diagnostics().is_empty());
    assert_eq!(file.identifier_count(), 3);
}

#[test]
fn test_conditional_expression() {
    let file = parse_ok("a ? b : c");
    let expr = expression_of(&file, 0);
    assert_eq!(file.node(expr).syntax_kind(), SyntaxKind::ConditionalExpression);
    assert_eq!(file.children(expr).len(), 3);

    let file = parse_ok("a ? b");
    assert_eq!(codes(&file), vec![1005, 1109]);
    assert_eq!(positions(&file), vec![5, 5]);
    assert_eq!(file.parse_diagnostics()[0].message_text, "':' expected.");
}

#[test]
fn test_assignment_is_right_associative() {
    let file = parse_ok("a = b += 1");
    let expr = expression_of(&file, 0);
    let NodeKind::BinaryExpression { operator, right, .. } = file.node(expr).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, SyntaxKind::EqualsToken);
    assert_eq!(file.node(right).kind.operator(), Some(SyntaxKind::PlusEqualsToken));
}

#[test]
fn test_comma_expression() {
    let file = parse_ok("a, b, c");
    let expr = expression_of(&file, 0);
    let NodeKind::BinaryExpression { left, operator, .. } = file.node(expr).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, SyntaxKind::CommaToken);
    assert_eq!(file.node(left).kind.operator(), Some(SyntaxKind::CommaToken));
}

#[test]
fn test_unary_and_postfix() {
    let file = parse_ok("-!~x; a++; --b;");
    let first = expression_of(&file, 0);
    assert_eq!(file.node(first).kind.operator(), Some(SyntaxKind::MinusToken));
    let second = expression_of(&file, 1);
    assert_eq!(file.node(second).syntax_kind(), SyntaxKind::PostfixUnaryExpression);
    let third = expression_of(&file, 2);
    assert_eq!(file.node(third).syntax_kind(), SyntaxKind::PrefixUnaryExpression);
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_postfix_not_applied_across_line_break() {
    let file = parse_ok("a\n++b");
    assert_eq!(file.statements().len(), 2);
    assert_eq!(file.node(expression_of(&file, 0)).syntax_kind(), SyntaxKind::Identifier);
    assert_eq!(
        file.node(expression_of(&file, 1)).syntax_kind(),
        SyntaxKind::PrefixUnaryExpression
    );
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_literals() {
    let file = parse_ok("1.5; 'str'; true; false; null; 0x1F;");
    let kinds: Vec<SyntaxKind> = (0..6)
        .map(|i| file.node(expression_of(&file, i)).syntax_kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::NumericLiteral,
            SyntaxKind::StringLiteral,
            SyntaxKind::TrueKeyword,
            SyntaxKind::FalseKeyword,
            SyntaxKind::NullKeyword,
            SyntaxKind::NumericLiteral,
        ]
    );
    let NodeKind::StringLiteral { value, unterminated } = &file.node(expression_of(&file, 1)).kind
    else {
        panic!("expected string literal");
    };
    assert_eq!(value, "str");
    assert!(!unterminated);
}

#[test]
fn test_parenthesized_expression() {
    let file = parse_ok("(a + b) * c");
    let expr = expression_of(&file, 0);
    let NodeKind::BinaryExpression { left, operator, .. } = file.node(expr).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, SyntaxKind::AsteriskToken);
    assert_eq!(file.node(left).syntax_kind(), SyntaxKind::ParenthesizedExpression);
    assert_eq!(file.node(left).range, TextRange::new(0, 7));
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_expression_expected() {
    let file = parse_ok("let x = ;");
    assert_eq!(codes(&file), vec![1109]);
    assert_eq!(positions(&file), vec![8]);
}

#[test]
fn test_unclosed_call() {
    let file = parse_ok("f(1,");
    assert_eq!(codes(&file), vec![1005]);
    assert_eq!(positions(&file), vec![4]);
    file.validate().expect("valid tree");
}

#[test]
fn test_unterminated_string_is_reported() {
    let file = parse_ok("let s = 'abc");
    assert_eq!(codes(&file), vec![1002]);
    assert_eq!(positions(&file), vec![8]);
    let (_, declarations) = declarations_of(&file, 0);
    let NodeKind::VariableDeclaration { initializer: Some(init), .. } = file.node(declarations[0]).kind
    else {
        panic!("expected initializer");
    };
    assert!(matches!(
        file.node(init).kind,
        NodeKind::StringLiteral { unterminated: true, .. }
    ));
}

#[test]
fn test_diagnostics_are_sorted_stably() {
    let file = parse_ok("x y €");
    assert_eq!(codes(&file), vec![1005, 1127, 1005]);
    assert_eq!(positions(&file), vec![2, 4, 4]);
    assert!(file
        .parse_diagnostics()
        .iter()
        .all(|d| d.file.as_deref() == Some("test.ql")));
}

#[test]
fn test_const_must_be_initialized() {
    let file = parse_ok("const x;");
    assert_eq!(codes(&file), vec![1155]);
    assert_eq!(positions(&file), vec![6]);
}

#[test]
fn test_declaration_file_initializers() {
    let file = parse("types.d.ql", "const x = 1;\nconst y;", LanguageVariant::Standard)
        .expect("parse should not fail");
    assert!(file.is_declaration_file());
    assert!(file.node(file.root()).flags.contains(NodeFlags::AMBIENT));
    assert_eq!(codes(&file), vec![1039]);
    assert_eq!(positions(&file), vec![10]);
}

#[test]
fn test_invalid_assignment_target() {
    let file = parse_ok("1 = 2;");
    assert_eq!(codes(&file), vec![2364]);
    assert_eq!(positions(&file), vec![0]);

    let file = parse_ok("(a) = 1; a.b = 2; a += 3;");
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_invalid_update_operand() {
    let file = parse_ok("1++; ++(a + b);");
    assert_eq!(codes(&file), vec![2357, 2357]);
    assert_eq!(positions(&file), vec![0, 7]);

    let file = parse_ok("++a.b; (c)--;");
    assert!(file.parse_diagnostics().is_empty());
}

#[test]
fn test_octal_literal_is_warning_in_standard_variant() {
    let file = parse_ok("017;");
    let diagnostics = file.parse_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1121);
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
    assert_eq!(
        diagnostics[0].message_text,
        "Octal literals are not allowed. Use the syntax '0o17'."
    );
    assert!(!file.has_errors());

    let file = parse_strict("017;");
    assert_eq!(file.parse_diagnostics()[0].category, DiagnosticCategory::Error);
    assert!(file.has_errors());
}

#[test]
fn test_strict_mode_reserved_words() {
    let source = "let static = 1; yield;";
    let file = parse_ok(source);
    assert!(file.parse_diagnostics().is_empty());

    let file = parse_strict(source);
    assert!(file.node(file.root()).flags.contains(NodeFlags::STRICT));
    assert_eq!(codes(&file), vec![1212, 1212]);
    assert_eq!(positions(&file), vec![4, 16]);
    assert_eq!(
        file.parse_diagnostics()[0].message_text,
        "Identifier expected. 'static' is a reserved word in strict mode."
    );
    // The words are still parsed as identifiers.
    assert_eq!(file.identifier_count(), 2);
}

#[test]
fn test_reserved_word_is_not_a_binding_name() {
    let file = parse_ok("let if = 1;");
    assert_eq!(codes(&file)[0], 1003);
    assert_eq!(positions(&file)[0], 4);
    file.validate().expect("valid tree");
}

#[test]
fn test_display_uses_line_and_column() {
    let file = parse_ok("let a = 1;\nlet = 2;");
    let diagnostic = &file.parse_diagnostics()[0];
    let rendered = diagnostic
        .display_with(file.text(), file.line_map())
        .to_string();
    assert_eq!(rendered, "test.ql(2,5): error QL1003: Identifier expected.");
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifier_table_counts_occurrences() {
    let file = parse_ok("a = a + b; a");
    assert_eq!(file.identifier_count(), 4);
    assert_eq!(file.identifiers().len(), 2);
    assert_eq!(file.identifiers().occurrences("a"), 3);
    assert_eq!(file.identifiers().occurrences("b"), 1);
    let spellings: Vec<&str> = file.identifiers().iter().map(|(text, _)| text).collect();
    assert_eq!(spellings, vec!["a", "b"]);
}

#[test]
fn test_shared_interner() {
    let interner = StringInterner::new();
    let first = Parser::new("a.ql", "alpha + beta", LanguageVariant::Standard)
        .with_interner(interner.clone())
        .parse_source_file()
        .expect("parse should not fail");
    let second = Parser::new("b.ql", "beta + gamma", LanguageVariant::Standard)
        .with_interner(interner.clone())
        .parse_source_file()
        .expect("parse should not fail");

    assert_eq!(interner.len(), 3);
    assert_eq!(
        first.identifiers().get("beta"),
        second.identifiers().get("beta")
    );
    assert!(first.identifiers().interner().ptr_eq(&interner));
}

// ============================================================================
// Tree structure
// ============================================================================

#[test]
fn test_parent_links() {
    let file = parse_ok("let x = f(1);");
    assert_eq!(file.parent(file.root()), None);
    for (id, node) in file.arena().iter() {
        if id == file.root() {
            continue;
        }
        let parent = node.parent().expect("every non-root node has a parent");
        assert!(file.children(parent).contains(&id));
    }
}

#[test]
fn test_node_at_position_and_ancestors() {
    let file = parse_ok("let x = foo(1);");
    let node = file.node_at_position(9);
    assert_eq!(file.node(node).syntax_kind(), SyntaxKind::Identifier);
    assert_eq!(file.text_of(node), "foo");

    let ancestor_kinds: Vec<SyntaxKind> = file
        .ancestors(node)
        .map(|id| file.node(id).syntax_kind())
        .collect();
    assert_eq!(
        ancestor_kinds,
        vec![
            SyntaxKind::CallExpression,
            SyntaxKind::VariableDeclaration,
            SyntaxKind::VariableDeclarationList,
            SyntaxKind::VariableStatement,
            SyntaxKind::SourceFile,
        ]
    );
}

#[test]
fn test_dump_tree() {
    let file = parse_ok("x = 1");
    let expected = "\
SourceFile 0..5
  ExpressionStatement 0..5
    BinaryExpression 0..5 =
      Identifier 0..1 \"x\"
      NumericLiteral 4..5 \"1\"
  EndOfFileToken 5..5
";
    assert_eq!(file.dump_tree(), expected);
}

#[test]
fn test_malformed_inputs_produce_valid_trees() {
    let inputs = [
        "let",
        "let x =",
        "const",
        "(",
        "((a)",
        "a.",
        "f(,)",
        "a ? : b",
        "= = =",
        "let x = 1 2 3",
        "} } }",
        "'unterminated\nlet y",
        "/* open comment",
        "0x; 0b2; 1__0",
        "a +\n;",
        "€€€",
    ];
    for input in inputs {
        let file = parse_ok(input);
        file.validate().unwrap_or_else(|e| panic!("{:?}: {}", input, e));
        assert!(!file.parse_diagnostics().is_empty(), "{:?} should report", input);
        assert_eq!(file.node(file.end_of_file_token()).range.end as usize, input.len());
    }
}

/// Parse on the test thread's own stack and check the tree stays whole.
fn parse_nested(text: &str) -> SourceFile {
    let file = parse("deep.ql", text, LanguageVariant::Standard).expect("parse should not fail");
    file.validate().expect("valid tree");
    assert_eq!(file.node(file.end_of_file_token()).range.end as usize, text.len());
    file
}

#[test]
fn test_deep_nesting_is_bounded() {
    let depth = 300;
    let file = parse_nested(&format!("{}1{}", "(".repeat(depth), ")".repeat(depth)));
    assert!(codes(&file).contains(&1109));
}

#[test]
fn test_long_exponent_chain_parses_without_diagnostics() {
    let operands = 10_000;
    let text = "a ** ".repeat(operands - 1) + "a";
    let file = parse_nested(&text);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", codes(&file));
    // root, statement, operands, operators, end of file
    assert_eq!(file.node_count(), 2 + operands + (operands - 1) + 1);

    let expression = expression_of(&file, 0);
    assert_eq!(file.node(expression).range, TextRange::new(0, text.len() as u32));
    let NodeKind::BinaryExpression { left, right, .. } = &file.node(expression).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(file.node(*left).syntax_kind(), SyntaxKind::Identifier);
    assert_eq!(file.node(*right).syntax_kind(), SyntaxKind::BinaryExpression);
}

#[test]
fn test_assignment_chains() {
    let shallow = (0..150).map(|i| format!("v{i} = ")).collect::<String>() + "1";
    let file = parse_nested(&shallow);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", codes(&file));

    let deep = "a = ".repeat(1_000) + "1";
    let file = parse_nested(&deep);
    assert!(codes(&file).contains(&1109));
}

#[test]
fn test_nested_conditionals() {
    let shallow = format!("{}x{}", "c ? ".repeat(150), " : y".repeat(150));
    let file = parse_nested(&shallow);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", codes(&file));

    let deep = format!("{}x{}", "c ? ".repeat(1_000), " : y".repeat(1_000));
    let file = parse_nested(&deep);
    assert!(codes(&file).contains(&1109));
}

#[test]
fn test_nested_calls() {
    let shallow = format!("{}x{}", "f(".repeat(150), ")".repeat(150));
    let file = parse_nested(&shallow);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", codes(&file));

    let deep = format!("{}x{}", "f(".repeat(1_000), ")".repeat(1_000));
    let file = parse_nested(&deep);
    assert!(codes(&file).contains(&1109));
}

#[test]
fn test_long_prefix_unary_chain() {
    let file = parse_nested(&("~".repeat(1_000) + "x"));
    assert!(codes(&file).contains(&1109));
}
