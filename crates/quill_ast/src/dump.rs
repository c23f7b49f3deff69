//! Human- and machine-readable renderings of a parsed file.

use crate::node::{NodeId, NodeKind};
use crate::source_file::SourceFile;
use crate::syntax_kind::SyntaxKind;
use crate::types::{LanguageVariant, NodeFlags};
use quill_diagnostics::Diagnostic;
use serde::Serialize;
use std::fmt::Write;

/// Serializable snapshot of one node and its subtree.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDump {
    pub id: NodeId,
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "is_false")]
    pub missing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<SyntaxKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDump>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticDump {
    pub code: u32,
    pub category: String,
    pub start: u32,
    pub length: u32,
    pub message: String,
}

/// Serializable snapshot of a whole file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFileDump {
    pub file_name: String,
    pub language_variant: LanguageVariant,
    pub is_declaration_file: bool,
    pub node_count: usize,
    pub identifier_count: u32,
    pub identifiers: Vec<String>,
    pub root: NodeDump,
    pub diagnostics: Vec<DiagnosticDump>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl From<&Diagnostic> for DiagnosticDump {
    fn from(d: &Diagnostic) -> Self {
        Self {
            code: d.code,
            category: d.category.to_string(),
            start: d.position(),
            length: d.span.map_or(0, |s| s.length),
            message: d.message_text.clone(),
        }
    }
}

impl SourceFile {
    /// Snapshot of the subtree rooted at `id`.
    pub fn dump_node(&self, id: NodeId) -> NodeDump {
        let node = self.node(id);
        NodeDump {
            id,
            kind: node.syntax_kind(),
            pos: node.range.start,
            end: node.range.end,
            missing: node.is_missing(),
            text: self.leaf_text(id),
            operator: node.kind.operator(),
            children: self
                .children(id)
                .into_iter()
                .map(|child| self.dump_node(child))
                .collect(),
        }
    }

    pub fn to_dump(&self) -> SourceFileDump {
        SourceFileDump {
            file_name: self.file_name().to_string(),
            language_variant: self.language_variant(),
            is_declaration_file: self.is_declaration_file(),
            node_count: self.node_count(),
            identifier_count: self.identifier_count(),
            identifiers: self
                .identifiers()
                .iter()
                .map(|(text, _)| text.to_string())
                .collect(),
            root: self.dump_node(self.root()),
            diagnostics: self.parse_diagnostics().iter().map(DiagnosticDump::from).collect(),
        }
    }

    /// JSON rendering of [`SourceFile::to_dump`].
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        let dump = self.to_dump();
        if pretty {
            serde_json::to_string_pretty(&dump)
        } else {
            serde_json::to_string(&dump)
        }
    }

    /// Indented one-node-per-line rendering of the tree.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            let _ = write!(
                out,
                "{:indent$}{:?} {}..{}",
                "",
                node.syntax_kind(),
                node.range.start,
                node.range.end,
                indent = depth * 2
            );
            if let Some(op) = node.kind.operator() {
                let _ = write!(out, " {}", op.token_text().unwrap_or("?"));
            }
            if node.flags.contains(NodeFlags::CONST) {
                out.push_str(" const");
            } else if node.flags.contains(NodeFlags::LET) {
                out.push_str(" let");
            }
            if node.is_missing() {
                out.push_str(" <missing>");
            } else if let Some(text) = self.leaf_text(id) {
                let _ = write!(out, " {:?}", text);
            }
            out.push('\n');

            for child in self.children(id).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    fn leaf_text(&self, id: NodeId) -> Option<String> {
        match &self.node(id).kind {
            NodeKind::Identifier { .. } => self.identifier_text(id).map(str::to_string),
            NodeKind::NumericLiteral { text, .. } => Some(text.clone()),
            NodeKind::StringLiteral { value, .. } => Some(value.clone()),
            _ => None,
        }
    }
}
