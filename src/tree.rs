/*!
 * Flattening and rendering of layout trees
 */

use crate::types::TreeNode;

/// Separator used in flattened paths, independent of the host platform
pub const PATH_SEPARATOR: char = '/';

/// Collect the relative path of every file leaf, depth-first.
///
/// Each path is `prefix` followed by the ancestor directory names (each
/// followed by `/`) and the leaf name. Order follows `nodes` exactly.
pub fn flatten_paths(nodes: &[TreeNode], prefix: &str) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(nodes, prefix, &mut paths);
    paths
}

fn collect_paths(nodes: &[TreeNode], prefix: &str, paths: &mut Vec<String>) {
    for node in nodes {
        match node {
            TreeNode::File(name) => paths.push(format!("{}{}", prefix, name)),
            TreeNode::Directory(dir) => {
                let nested = format!("{}{}{}", prefix, dir.name, PATH_SEPARATOR);
                collect_paths(&dir.children, &nested, paths);
            }
        }
    }
}

/// Render a layout diagram rooted at `root_name`.
///
/// The root line carries no branch glyphs; directories end with `/`.
///
/// ```
/// use copycode::tree::render_tree;
/// use copycode::types::{DirectoryNode, TreeNode};
///
/// let children = vec![
///     TreeNode::File("Cargo.toml".to_string()),
///     TreeNode::Directory(DirectoryNode {
///         name: "src".to_string(),
///         children: vec![TreeNode::File("main.rs".to_string())],
///     }),
/// ];
///
/// assert_eq!(
///     render_tree("demo", &children),
///     "demo/\n├── Cargo.toml\n└── src/\n    └── main.rs"
/// );
/// ```
pub fn render_tree(root_name: &str, children: &[TreeNode]) -> String {
    let mut lines = vec![format!("{}{}", root_name, PATH_SEPARATOR)];
    render_children(children, "", &mut lines);
    lines.join("\n")
}

fn render_children(nodes: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let connector = if is_last { "└── " } else { "├── " };

        match node {
            TreeNode::File(name) => lines.push(format!("{}{}{}", prefix, connector, name)),
            TreeNode::Directory(dir) => {
                lines.push(format!(
                    "{}{}{}{}",
                    prefix, connector, dir.name, PATH_SEPARATOR
                ));
                let child_prefix = if is_last {
                    format!("{}    ", prefix)
                } else {
                    format!("{}│   ", prefix)
                };
                render_children(&dir.children, &child_prefix, lines);
            }
        }
    }
}
