//! Index-based node storage.
//!
//! The arena owns every node of one source file. Children are allocated
//! before their parent; allocating the parent records the parent link on
//! each child exactly once.

use crate::node::{Node, NodeId, NodeKind};
use crate::types::NodeFlags;
use quill_core::error::FatalError;
use quill_core::text::{TextPos, TextRange};
use std::ops::Index;

#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a node that has no children.
    pub fn alloc_leaf(
        &mut self,
        kind: NodeKind,
        range: TextRange,
        full_start: TextPos,
        flags: NodeFlags,
    ) -> NodeId {
        debug_assert!(!kind.has_children(), "leaf allocation of {:?}", kind.syntax_kind());
        self.push(Node::new(kind, range, full_start, flags))
    }

    /// Allocate a node and make it the parent of every child named in `kind`.
    ///
    /// Fails if any child already has a parent.
    pub fn alloc_with_children(
        &mut self,
        kind: NodeKind,
        range: TextRange,
        full_start: TextPos,
        flags: NodeFlags,
    ) -> Result<NodeId, FatalError> {
        let children = kind.children();
        let id = self.push(Node::new(kind, range, full_start, flags));
        for child in children {
            self.set_parent(child, id)?;
        }
        Ok(id)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) -> Result<(), FatalError> {
        let node = &mut self.nodes[child.index()];
        if let Some(existing) = node.parent {
            return Err(FatalError::NodeReparented {
                child: child.as_u32(),
                existing: existing.as_u32(),
                parent: parent.as_u32(),
            });
        }
        node.parent = Some(parent);
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Direct children of `id` in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self[id].kind.children()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
