//! Render tree geometry.
//!
//! The render tree is the layout engine's output contract: positioned boxes
//! keyed to IR node ids. Renderers combine it with the IR (looked up by
//! `ref`) to map component kinds to drawing primitives; this crate never
//! performs that mapping.

use serde::{Deserialize, Serialize};

pub use wireframe_ir::Viewport;

/// A positioned box for one IR node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    /// Render node id (equal to the IR node id it was produced from)
    pub id: String,
    /// The IR node this box belongs to
    #[serde(rename = "ref")]
    pub target: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// True when resolved content exceeded this node's allotted box.
    /// Clip-versus-scroll is the renderer's decision.
    pub overflow: bool,
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// Depth-first search for a node by id.
    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// All nodes in this subtree, depth first, self included.
    pub fn flatten(&self) -> Vec<&RenderNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

/// Geometry for one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderScreen {
    /// The IR screen id
    pub screen: String,
    pub name: String,
    pub root: RenderNode,
}

/// Geometry for a whole document at one viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTree {
    pub screens: Vec<RenderScreen>,
}

impl RenderTree {
    /// Search every screen for a node by id.
    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        self.screens.iter().find_map(|screen| screen.root.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<RenderNode>) -> RenderNode {
        RenderNode {
            id: id.to_string(),
            target: id.to_string(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            overflow: false,
            children,
        }
    }

    #[test]
    fn test_find_descends() {
        let tree = node("a", vec![node("b", vec![node("c", vec![])])]);
        assert!(tree.find("c").is_some());
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_flatten_is_depth_first() {
        let tree = node("a", vec![node("b", vec![node("c", vec![])]), node("d", vec![])]);
        let ids: Vec<&str> = tree.flatten().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_ref_field_name_in_wire_form() {
        let json = serde_json::to_value(node("layout-stack-0", vec![])).expect("serialize");
        assert_eq!(json["ref"], "layout-stack-0");
        assert_eq!(json["overflow"], false);
    }
}
