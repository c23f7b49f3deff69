//! Unrecoverable parser errors.
//!
//! Syntax problems are never reported here; they become diagnostics on the
//! source file. A `FatalError` means the parse cannot produce a trustworthy
//! tree at all, and the caller receives no partial result.

use crate::text::TextPos;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// The source does not fit in 32-bit offsets.
    #[error("source text of {len} bytes exceeds the maximum of {max} bytes")]
    SourceTooLarge { len: usize, max: usize },

    /// The scanner produced a token starting before the previous token ended.
    #[error("scan position moved backwards: token at {start} after previous end {previous_end}")]
    NonMonotonicScan { previous_end: TextPos, start: TextPos },

    /// A node's span is not inside its parent's span.
    #[error("node {child} span {child_start}..{child_end} escapes parent {parent} span {parent_start}..{parent_end}")]
    SpanContainment {
        parent: u32,
        parent_start: TextPos,
        parent_end: TextPos,
        child: u32,
        child_start: TextPos,
        child_end: TextPos,
    },

    /// Sibling nodes are out of source order or overlap.
    #[error("children of node {parent} are out of source order at node {child}")]
    ChildOrder { parent: u32, child: u32 },

    /// A node was given a parent twice.
    #[error("node {child} already has parent {existing}, cannot attach to {parent}")]
    NodeReparented { child: u32, existing: u32, parent: u32 },

    /// A node's recorded parent does not list it as a child.
    #[error("node {child} records parent {parent} which does not own it")]
    ParentMismatch { child: u32, parent: u32 },

    /// A node was allocated but is not reachable from the root.
    #[error("node {node} is not reachable from the source file root")]
    UnreachableNode { node: u32 },

    /// The root node is not a source file, or does not span the whole text.
    #[error("node {node} is not a valid source file root")]
    InvalidRoot { node: u32 },
}
