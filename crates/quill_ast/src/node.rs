//! Syntax tree node definitions.
//!
//! Every node is stored in a [`NodeArena`](crate::arena::NodeArena) and
//! refers to its children and parent by [`NodeId`]. The kind-specific
//! payload lives in [`NodeKind`]; the common header (span, flags, parent)
//! lives in [`Node`].

use crate::syntax_kind::SyntaxKind;
use crate::types::{NodeFlags, TokenFlags};
use quill_core::intern::InternedString;
use quill_core::text::{TextPos, TextRange};
use serde::Serialize;
use std::fmt;

/// Index of a node in its arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// A node header plus its kind-specific payload.
///
/// `range` excludes leading trivia; `full_start` is where the trivia of the
/// node's first token begins. Kind, range and flags are fixed when the node
/// is allocated. The parent is assigned once, when the parent is allocated.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub range: TextRange,
    pub full_start: TextPos,
    pub flags: NodeFlags,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, range: TextRange, full_start: TextPos, flags: NodeFlags) -> Self {
        debug_assert!(full_start <= range.start);
        Self {
            kind,
            range,
            full_start,
            flags,
            parent: None,
        }
    }

    /// The node's syntax kind tag.
    #[inline]
    pub fn syntax_kind(&self) -> SyntaxKind {
        self.kind.syntax_kind()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.start
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    /// Range including leading trivia.
    #[inline]
    pub fn full_range(&self) -> TextRange {
        TextRange::new(self.full_start, self.range.end)
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.is_missing()
    }
}

// ============================================================================
// Node Kinds
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    SourceFile {
        statements: Vec<NodeId>,
        end_of_file_token: NodeId,
    },

    // -- Statements --
    VariableStatement {
        declaration_list: NodeId,
    },
    /// `let`/`const`/`var` plus its declarations. The keyword is recorded as
    /// `NodeFlags::LET` / `NodeFlags::CONST` (neither means `var`).
    VariableDeclarationList {
        declarations: Vec<NodeId>,
    },
    VariableDeclaration {
        name: NodeId,
        initializer: Option<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    EmptyStatement,

    // -- Expressions --
    /// `text` is `None` for a missing identifier.
    Identifier {
        text: Option<InternedString>,
    },
    NumericLiteral {
        text: String,
        flags: TokenFlags,
    },
    /// `value` is the literal's content with escapes processed.
    StringLiteral {
        value: String,
        unterminated: bool,
    },
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ParenthesizedExpression {
        expression: NodeId,
    },
    PrefixUnaryExpression {
        operator: SyntaxKind,
        operand: NodeId,
    },
    PostfixUnaryExpression {
        operand: NodeId,
        operator: SyntaxKind,
    },
    BinaryExpression {
        left: NodeId,
        operator: SyntaxKind,
        right: NodeId,
    },
    ConditionalExpression {
        condition: NodeId,
        when_true: NodeId,
        when_false: NodeId,
    },
    CallExpression {
        expression: NodeId,
        arguments: Vec<NodeId>,
    },
    PropertyAccessExpression {
        expression: NodeId,
        name: NodeId,
    },

    EndOfFileToken,
}

impl NodeKind {
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            NodeKind::SourceFile { .. } => SyntaxKind::SourceFile,
            NodeKind::VariableStatement { .. } => SyntaxKind::VariableStatement,
            NodeKind::VariableDeclarationList { .. } => SyntaxKind::VariableDeclarationList,
            NodeKind::VariableDeclaration { .. } => SyntaxKind::VariableDeclaration,
            NodeKind::ExpressionStatement { .. } => SyntaxKind::ExpressionStatement,
            NodeKind::EmptyStatement => SyntaxKind::EmptyStatement,
            NodeKind::Identifier { .. } => SyntaxKind::Identifier,
            NodeKind::NumericLiteral { .. } => SyntaxKind::NumericLiteral,
            NodeKind::StringLiteral { .. } => SyntaxKind::StringLiteral,
            NodeKind::TrueKeyword => SyntaxKind::TrueKeyword,
            NodeKind::FalseKeyword => SyntaxKind::FalseKeyword,
            NodeKind::NullKeyword => SyntaxKind::NullKeyword,
            NodeKind::ParenthesizedExpression { .. } => SyntaxKind::ParenthesizedExpression,
            NodeKind::PrefixUnaryExpression { .. } => SyntaxKind::PrefixUnaryExpression,
            NodeKind::PostfixUnaryExpression { .. } => SyntaxKind::PostfixUnaryExpression,
            NodeKind::BinaryExpression { .. } => SyntaxKind::BinaryExpression,
            NodeKind::ConditionalExpression { .. } => SyntaxKind::ConditionalExpression,
            NodeKind::CallExpression { .. } => SyntaxKind::CallExpression,
            NodeKind::PropertyAccessExpression { .. } => SyntaxKind::PropertyAccessExpression,
            NodeKind::EndOfFileToken => SyntaxKind::EndOfFileToken,
        }
    }

    /// Call `f` on each direct child, in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
        match self {
            NodeKind::SourceFile {
                statements,
                end_of_file_token,
            } => {
                statements.iter().copied().for_each(&mut f);
                f(*end_of_file_token);
            }
            NodeKind::VariableStatement { declaration_list } => f(*declaration_list),
            NodeKind::VariableDeclarationList { declarations } => {
                declarations.iter().copied().for_each(f)
            }
            NodeKind::VariableDeclaration { name, initializer } => {
                f(*name);
                if let Some(init) = initializer {
                    f(*init);
                }
            }
            NodeKind::ExpressionStatement { expression } => f(*expression),
            NodeKind::ParenthesizedExpression { expression } => f(*expression),
            NodeKind::PrefixUnaryExpression { operand, .. } => f(*operand),
            NodeKind::PostfixUnaryExpression { operand, .. } => f(*operand),
            NodeKind::BinaryExpression { left, right, .. } => {
                f(*left);
                f(*right);
            }
            NodeKind::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                f(*condition);
                f(*when_true);
                f(*when_false);
            }
            NodeKind::CallExpression {
                expression,
                arguments,
            } => {
                f(*expression);
                arguments.iter().copied().for_each(f);
            }
            NodeKind::PropertyAccessExpression { expression, name } => {
                f(*expression);
                f(*name);
            }
            NodeKind::EmptyStatement
            | NodeKind::Identifier { .. }
            | NodeKind::NumericLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::TrueKeyword
            | NodeKind::FalseKeyword
            | NodeKind::NullKeyword
            | NodeKind::EndOfFileToken => {}
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.for_each_child(|id| out.push(id));
        out
    }

    pub fn has_children(&self) -> bool {
        let mut any = false;
        self.for_each_child(|_| any = true);
        any
    }

    /// The operator token of a unary or binary expression.
    pub fn operator(&self) -> Option<SyntaxKind> {
        match self {
            NodeKind::PrefixUnaryExpression { operator, .. }
            | NodeKind::PostfixUnaryExpression { operator, .. }
            | NodeKind::BinaryExpression { operator, .. } => Some(*operator),
            _ => None,
        }
    }
}
