//! The parsed source file aggregate.

use crate::arena::NodeArena;
use crate::node::{Node, NodeId, NodeKind};
use crate::types::LanguageVariant;
use quill_core::collections::OrderedMap;
use quill_core::error::FatalError;
use quill_core::intern::{InternedString, StringInterner};
use quill_core::text::{LineAndColumn, LineMap, TextPos};
use quill_diagnostics::Diagnostic;

/// Extension of declaration files.
pub const DECLARATION_EXTENSION: &str = ".d.ql";
/// Extension of ordinary source files.
pub const SOURCE_EXTENSION: &str = ".ql";

/// Whether `file_name` names a declaration file.
pub fn is_declaration_file_name(file_name: &str) -> bool {
    file_name.ends_with(DECLARATION_EXTENSION)
}

// ============================================================================
// Identifier table
// ============================================================================

/// Distinct identifier spellings of one file, in first-seen order, with the
/// number of times each occurs.
///
/// The table keeps a handle to the interner its keys came from, so keys stay
/// resolvable for the life of the table even when that interner is shared
/// or the process-wide interner is later reset.
#[derive(Debug, Clone)]
pub struct IdentifierTable {
    interner: StringInterner,
    occurrences: OrderedMap<InternedString, u32>,
}

impl IdentifierTable {
    pub fn new(interner: StringInterner) -> Self {
        Self {
            interner,
            occurrences: OrderedMap::new(),
        }
    }

    /// Intern `text` and count one more occurrence of it.
    pub fn record(&mut self, text: &str) -> InternedString {
        let key = self.interner.intern(text);
        *self.occurrences.get_or_insert_with(key, || 0) += 1;
        key
    }

    /// The key for `text` if it occurs in this file.
    pub fn get(&self, text: &str) -> Option<InternedString> {
        self.interner
            .get(text)
            .filter(|key| self.occurrences.contains_key(key))
    }

    /// How many times `text` occurs as an identifier (0 if never).
    pub fn occurrences(&self, text: &str) -> u32 {
        self.get(text)
            .and_then(|key| self.occurrences.get(&key).copied())
            .unwrap_or(0)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.get(text).is_some()
    }

    pub fn resolve(&self, key: InternedString) -> Option<&str> {
        self.interner.try_resolve(key)
    }

    /// Number of distinct spellings.
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Total occurrences across all spellings.
    pub fn total_occurrences(&self) -> u32 {
        self.occurrences.values().sum()
    }

    /// Spellings and their counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.occurrences
            .iter()
            .map(|(key, count)| (self.interner.resolve(*key), *count))
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }
}

// ============================================================================
// Source file
// ============================================================================

/// Everything the parser hands over to build a [`SourceFile`].
#[derive(Debug)]
pub struct SourceFileParts {
    pub file_name: String,
    pub text: String,
    pub language_variant: LanguageVariant,
    pub arena: NodeArena,
    pub root: NodeId,
    pub identifiers: IdentifierTable,
    pub identifier_count: u32,
    pub diagnostics: Vec<Diagnostic>,
}

/// A parsed file: its text, its syntax tree and its parse diagnostics.
///
/// Immutable once built. The root node spans the whole text; `statements`
/// and `end_of_file_token` are the root's children.
#[derive(Debug, Clone)]
pub struct SourceFile {
    file_name: String,
    text: String,
    language_variant: LanguageVariant,
    is_declaration_file: bool,
    arena: NodeArena,
    root: NodeId,
    statements: Vec<NodeId>,
    end_of_file_token: NodeId,
    identifiers: IdentifierTable,
    identifier_count: u32,
    parse_diagnostics: Vec<Diagnostic>,
    line_map: LineMap,
}

impl SourceFile {
    /// Assemble and validate a source file.
    ///
    /// Diagnostics are stably sorted by position. Fails if the tree breaks
    /// any structural invariant (see [`SourceFile::validate`]).
    pub fn new(parts: SourceFileParts) -> Result<Self, FatalError> {
        let SourceFileParts {
            file_name,
            text,
            language_variant,
            arena,
            root,
            identifiers,
            identifier_count,
            mut diagnostics,
        } = parts;

        let (statements, end_of_file_token) = match arena.get(root).map(|n| &n.kind) {
            Some(NodeKind::SourceFile {
                statements,
                end_of_file_token,
            }) => (statements.clone(), *end_of_file_token),
            _ => return Err(FatalError::InvalidRoot { node: root.as_u32() }),
        };

        diagnostics.sort_by_key(Diagnostic::position);

        let file = Self {
            is_declaration_file: is_declaration_file_name(&file_name),
            line_map: LineMap::new(&text),
            file_name,
            text,
            language_variant,
            arena,
            root,
            statements,
            end_of_file_token,
            identifiers,
            identifier_count,
            parse_diagnostics: diagnostics,
        };
        file.validate()?;
        Ok(file)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_variant(&self) -> LanguageVariant {
        self.language_variant
    }

    pub fn is_declaration_file(&self) -> bool {
        self.is_declaration_file
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn statements(&self) -> &[NodeId] {
        &self.statements
    }

    pub fn end_of_file_token(&self) -> NodeId {
        self.end_of_file_token
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn identifiers(&self) -> &IdentifierTable {
        &self.identifiers
    }

    /// Number of (non-missing) identifier occurrences.
    pub fn identifier_count(&self) -> u32 {
        self.identifier_count
    }

    /// Number of nodes, including the root and the end-of-file token.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn parse_diagnostics(&self) -> &[Diagnostic] {
        &self.parse_diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.parse_diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Length of the text; also the end of the root and of the end-of-file token.
    pub fn end(&self) -> TextPos {
        self.text.len() as TextPos
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        self.line_map.line_and_column_of(&self.text, pos)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.parent(id)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.arena.children(id)
    }

    /// Parents of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Source text covered by a node (without leading trivia).
    pub fn text_of(&self, id: NodeId) -> &str {
        self.text.get(self.arena[id].range.to_range()).unwrap_or("")
    }

    /// Text of an identifier node; `None` for other kinds and for missing
    /// identifiers.
    pub fn identifier_text(&self, id: NodeId) -> Option<&str> {
        match self.arena[id].kind {
            NodeKind::Identifier { text: Some(key) } => self.identifiers.resolve(key),
            _ => None,
        }
    }

    /// The innermost node whose span contains `pos`, or the root.
    pub fn node_at_position(&self, pos: TextPos) -> NodeId {
        let mut current = self.root;
        'descend: loop {
            for child in self.arena.children(current) {
                if self.arena[child].range.contains(pos) {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Check the tree's structural invariants:
    ///
    /// - the root spans `[0, len]` and has no parent;
    /// - each child's span lies inside its parent's span;
    /// - siblings are in source order and do not overlap;
    /// - each child's parent link names the node that owns it;
    /// - every node is reachable from the root.
    pub fn validate(&self) -> Result<(), FatalError> {
        let root = &self.arena[self.root];
        if root.parent.is_some()
            || root.range.start != 0
            || root.range.end != self.end()
        {
            return Err(FatalError::InvalidRoot {
                node: self.root.as_u32(),
            });
        }

        let mut visited = 0usize;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            visited += 1;
            let node = &self.arena[id];
            let mut prev_end = node.range.start;
            for child_id in node.kind.children() {
                let child = self
                    .arena
                    .get(child_id)
                    .ok_or(FatalError::UnreachableNode {
                        node: child_id.as_u32(),
                    })?;
                if child.parent != Some(id) {
                    return Err(FatalError::ParentMismatch {
                        child: child_id.as_u32(),
                        parent: child.parent.map_or(u32::MAX, NodeId::as_u32),
                    });
                }
                if !node.range.contains_range(child.range) {
                    return Err(FatalError::SpanContainment {
                        parent: id.as_u32(),
                        parent_start: node.range.start,
                        parent_end: node.range.end,
                        child: child_id.as_u32(),
                        child_start: child.range.start,
                        child_end: child.range.end,
                    });
                }
                if child.range.start < prev_end {
                    return Err(FatalError::ChildOrder {
                        parent: id.as_u32(),
                        child: child_id.as_u32(),
                    });
                }
                prev_end = child.range.end;
                stack.push(child_id);
            }
        }

        if visited != self.arena.len() {
            let orphan = self
                .arena
                .iter()
                .find(|(id, node)| node.parent.is_none() && *id != self.root)
                .map_or(u32::MAX, |(id, _)| id.as_u32());
            return Err(FatalError::UnreachableNode { node: orphan });
        }
        Ok(())
    }
}
