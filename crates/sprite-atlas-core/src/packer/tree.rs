//! Binary space-partition tree that hands out atlas slots.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. A free leaf
//! is consumed by the first allocation that fits it: the allocated rectangle
//! takes its top-left corner and the leftover becomes two free children, a
//! strip to the right of the allocation (same height) and a strip below it
//! (full width). Consumed nodes are never split again and nodes are never
//! removed.

use crate::error::{AtlasError, Result};
use crate::model::Rect;
use tracing::{trace, warn};

/// Handle to a node inside a [`PackingTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementNode {
    bounds: Rect,
    used: bool,
    children: Option<[NodeId; 2]>,
}

impl PlacementNode {
    fn free(bounds: Rect) -> Self {
        Self {
            bounds,
            used: false,
            children: None,
        }
    }

    /// Region of the atlas this node covers.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    /// `[right, bottom]` once the node has been consumed.
    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }
}

#[derive(Debug, Clone)]
pub struct PackingTree {
    nodes: Vec<PlacementNode>,
    padding: u32,
}

impl PackingTree {
    const ROOT: NodeId = NodeId(0);

    pub fn new(width: u32, height: u32, padding: u32) -> Self {
        Self {
            nodes: vec![PlacementNode::free(Rect::new(0, 0, width, height))],
            padding,
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn node(&self, id: NodeId) -> Option<&PlacementNode> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PlacementNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Finds the first free node (depth-first, right child before bottom
    /// child) that can hold `width × height`, consumes it and returns it.
    ///
    /// `Ok(None)` means nothing in the tree is large enough at this
    /// orientation; the tree is left untouched in that case. The allocated
    /// rectangle is `(node.x, node.y, width, height)`, not the node's extent.
    pub fn allocate(&mut self, width: u32, height: u32) -> Result<Option<NodeId>> {
        let Some(id) = self.find(width, height) else {
            return Ok(None);
        };
        self.split(id, width, height)?;
        Ok(Some(id))
    }

    fn find(&self, width: u32, height: u32) -> Option<NodeId> {
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.used {
                match node.children {
                    Some([right, bottom]) => {
                        stack.push(bottom);
                        stack.push(right);
                    }
                    None => trace!(node = ?node.bounds, "used node without children"),
                }
            } else if width <= node.bounds.w && height <= node.bounds.h {
                trace!(node = ?node.bounds, width, height, "node fits");
                return Some(id);
            } else {
                trace!(node = ?node.bounds, width, height, "node too small");
            }
        }
        None
    }

    fn split(&mut self, id: NodeId, width: u32, height: u32) -> Result<()> {
        let b = self.nodes[id.0].bounds;
        let pad_w = if b.w.saturating_sub(width) >= self.padding {
            self.padding
        } else {
            0
        };
        let pad_h = if b.h.saturating_sub(height) >= self.padding {
            self.padding
        } else {
            0
        };
        let right_w = b.w.checked_sub(width).and_then(|v| v.checked_sub(pad_w));
        let bottom_h = b.h.checked_sub(height).and_then(|v| v.checked_sub(pad_h));
        let (Some(right_w), Some(bottom_h)) = (right_w, bottom_h) else {
            warn!(node = ?b, width, height, padding = self.padding, "invalid split");
            return Err(AtlasError::InvalidSplitGeometry {
                node: b,
                width,
                height,
                padding: self.padding,
            });
        };

        let right = Rect::new(b.x + width + pad_w, b.y, right_w, height);
        let bottom = Rect::new(b.x, b.y + height + pad_h, b.w, bottom_h);
        let right_id = NodeId(self.nodes.len());
        self.nodes.push(PlacementNode::free(right));
        let bottom_id = NodeId(self.nodes.len());
        self.nodes.push(PlacementNode::free(bottom));

        let node = &mut self.nodes[id.0];
        node.used = true;
        node.children = Some([right_id, bottom_id]);
        Ok(())
    }
}

impl std::ops::Index<NodeId> for PackingTree {
    type Output = PlacementNode;

    fn index(&self, id: NodeId) -> &PlacementNode {
        &self.nodes[id.0]
    }
}
