//! Render tree nodes.

use logpane_protocol::Method;

/// One node of a surface's render tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    /// A single console line.
    Item { method: Method, html: String },
    /// A toggle header with nested content.
    Group {
        label_html: String,
        collapsed: bool,
        children: Vec<RenderNode>,
    },
}

impl RenderNode {
    pub fn is_group(&self) -> bool {
        matches!(self, RenderNode::Group { .. })
    }

    /// The node's own markup: item content or group label.
    pub fn html(&self) -> &str {
        match self {
            RenderNode::Item { html, .. } => html,
            RenderNode::Group { label_html, .. } => label_html,
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Item { .. } => &[],
            RenderNode::Group { children, .. } => children,
        }
    }
}
