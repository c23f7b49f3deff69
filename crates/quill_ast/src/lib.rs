//! quill_ast: Syntax tree definitions for the Quill parser.
//!
//! Nodes live in an index arena owned by their [`SourceFile`]. Each node has
//! a [`SyntaxKind`] tag derived from its [`NodeKind`] payload, a span, flags
//! and a parent link.

pub mod arena;
pub mod dump;
pub mod node;
pub mod source_file;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use arena::NodeArena;
pub use dump::{NodeDump, SourceFileDump};
pub use node::*;
pub use source_file::*;
pub use syntax_kind::{SyntaxKind, TokenClass};
pub use types::*;
pub use visitor::AstVisitor;
