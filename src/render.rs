/*!
 * ASCII tree rendering
 */

use crate::types::TreeNode;

const BRANCH: &str = "├── ";
const ELBOW: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Renders a [`TreeNode`] as connector-prefixed lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeRenderer;

impl TreeRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the tree; root name first, lines joined by `\n`, no trailing newline
    pub fn render(&self, root: &TreeNode) -> String {
        let mut lines = vec![root.name().to_string()];
        self.render_children(root.children(), "", &mut lines);
        lines.join("\n")
    }

    fn render_children(&self, children: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let connector = if last { ELBOW } else { BRANCH };
            lines.push(format!("{}{}{}", prefix, connector, child.name()));

            if let TreeNode::Dir { children, .. } = child {
                let continuation = if last { BLANK } else { PIPE };
                self.render_children(children, &format!("{}{}", prefix, continuation), lines);
            }
        }
    }
}
