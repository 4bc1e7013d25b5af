/*!
 * copycode - Copy a file or directory as a Markdown document
 *
 * A directory becomes a file layout tree followed by one fenced code block
 * per text file; a single file becomes one fenced code block. Each block
 * opens with a comment naming the file, in the comment syntax of its
 * language.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod language;
pub mod logger;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config, Destination, OutputFormat};
pub use error::{CopyCodeError, Result};
pub use language::CommentStyle;
pub use report::{CopyReport, Reporter};
pub use scanner::Scanner;
pub use types::{DirectoryNode, Document, EntryKind, FileBlock, TreeNode};
pub use writer::{render_markdown, DocumentWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message shown after every successful run, whatever the document holds
pub const CONFIRMATION: &str = "Copied code";
