/*!
 * Core types and data structures for copycode
 */

use serde::Serialize;

use crate::language::CommentStyle;

/// What the path classifier saw at the selected path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (after following symlinks)
    File,
    /// Directory (after following symlinks)
    Directory,
    /// Anything else, including paths that could not be inspected
    Other,
}

/// Represents a directory in the layout tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory basename
    pub name: String,
    /// Children in layout order
    pub children: Vec<TreeNode>,
}

/// A node of the layout tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Leaf: a file, known only by its basename
    File(String),
    /// Internal node: a directory and its children
    Directory(DirectoryNode),
}

impl TreeNode {
    /// Basename of the entry
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File(name) => name,
            TreeNode::Directory(dir) => &dir.name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    /// Number of file leaves at or below this node
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::File(_) => 1,
            TreeNode::Directory(dir) => dir.children.iter().map(TreeNode::leaf_count).sum(),
        }
    }
}

/// One formatted file, before it is rendered into a fenced block
#[derive(Debug, Clone, Serialize)]
pub struct FileBlock {
    /// Label shown in the comment line (relative path or basename)
    pub name: String,
    /// Fenced code block language tag
    pub language_tag: String,
    /// Detected content type (editor language identifier)
    pub content_type: &'static str,
    /// Line comment syntax selected from the content type
    pub comment_style: CommentStyle,
    /// Raw file text
    pub content: String,
}

impl FileBlock {
    /// The one-line comment naming the file
    pub fn comment_line(&self) -> String {
        self.comment_style.wrap(&self.name)
    }
}

/// Everything produced by one invocation, ready to be rendered
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Rendered layout tree, present when a directory was selected
    pub layout: Option<String>,
    /// File blocks in flattener order
    pub files: Vec<FileBlock>,
    /// Display names of files that could not be read as text
    #[serde(skip_serializing)]
    pub skipped: Vec<String>,
}
