//! AST visitor trait for traversing the syntax tree.
//!
//! Provides both an `AstVisitor` trait for customizable pre-order traversal
//! and a `for_each_child` function for generic iteration over children.

use crate::node::{NodeId, NodeKind};
use crate::source_file::SourceFile;

/// Invoke `f` on each child of `id`, in source order.
pub fn for_each_child(file: &SourceFile, id: NodeId, f: impl FnMut(NodeId)) {
    file.node(id).kind.for_each_child(f);
}

/// Visit every child of `id` with `visitor`.
pub fn walk_children<V: AstVisitor + ?Sized>(visitor: &mut V, file: &SourceFile, id: NodeId) {
    for child in file.children(id) {
        visitor.visit_node(file, child);
    }
}

/// A visitor over a [`SourceFile`]. Implement the methods for the kinds you
/// care about; the defaults walk into children.
pub trait AstVisitor {
    fn visit_source_file(&mut self, file: &SourceFile) {
        for &stmt in file.statements() {
            self.visit_node(file, stmt);
        }
        self.visit_end_of_file_token(file, file.end_of_file_token());
    }

    /// Dispatch on the node's kind.
    fn visit_node(&mut self, file: &SourceFile, id: NodeId) {
        match file.node(id).kind {
            NodeKind::SourceFile { .. } => self.visit_source_file(file),
            NodeKind::VariableStatement { .. } => self.visit_variable_statement(file, id),
            NodeKind::VariableDeclarationList { .. } => {
                self.visit_variable_declaration_list(file, id)
            }
            NodeKind::VariableDeclaration { .. } => self.visit_variable_declaration(file, id),
            NodeKind::ExpressionStatement { .. } => self.visit_expression_statement(file, id),
            NodeKind::EmptyStatement => self.visit_empty_statement(file, id),
            NodeKind::Identifier { .. } => self.visit_identifier(file, id),
            NodeKind::NumericLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::TrueKeyword
            | NodeKind::FalseKeyword
            | NodeKind::NullKeyword => self.visit_literal(file, id),
            NodeKind::ParenthesizedExpression { .. } => self.visit_parenthesized(file, id),
            NodeKind::PrefixUnaryExpression { .. } | NodeKind::PostfixUnaryExpression { .. } => {
                self.visit_unary_expression(file, id)
            }
            NodeKind::BinaryExpression { .. } => self.visit_binary_expression(file, id),
            NodeKind::ConditionalExpression { .. } => self.visit_conditional_expression(file, id),
            NodeKind::CallExpression { .. } => self.visit_call_expression(file, id),
            NodeKind::PropertyAccessExpression { .. } => {
                self.visit_property_access_expression(file, id)
            }
            NodeKind::EndOfFileToken => self.visit_end_of_file_token(file, id),
        }
    }

    // -- Statements --

    fn visit_variable_statement(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_variable_declaration_list(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_variable_declaration(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_expression_statement(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_empty_statement(&mut self, _file: &SourceFile, _id: NodeId) {}

    // -- Expressions --

    fn visit_identifier(&mut self, _file: &SourceFile, _id: NodeId) {}

    fn visit_literal(&mut self, _file: &SourceFile, _id: NodeId) {}

    fn visit_parenthesized(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_unary_expression(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_binary_expression(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_conditional_expression(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_call_expression(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_property_access_expression(&mut self, file: &SourceFile, id: NodeId) {
        walk_children(self, file, id);
    }

    fn visit_end_of_file_token(&mut self, _file: &SourceFile, _id: NodeId) {}
}
