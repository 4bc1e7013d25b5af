/*!
 * Document rendering and delivery for copycode
 */

use std::fs;
use std::io::{self, Write};

use tracing::info;

use crate::clipboard::copy_to_clipboard;
use crate::config::{Config, Destination, OutputFormat};
use crate::error::{CopyCodeError, Result};
use crate::types::{Document, FileBlock};

/// Caption heading the layout block
pub const LAYOUT_CAPTION: &str = "// File layout";

/// Code fence delimiter
const FENCE: &str = "```";

/// Separator between the layout block and each file block
const BLOCK_SEPARATOR: &str = "\n\n";

/// Renders a document and delivers it to its destination
pub struct DocumentWriter {
    /// Writer configuration
    config: Config,
}

impl DocumentWriter {
    /// Create a new document writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render the document in the configured format
    pub fn render(&self, document: &Document) -> Result<String> {
        match self.config.format {
            OutputFormat::Markdown => Ok(render_markdown(document)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        }
    }

    /// Render the document and hand it to the configured destination.
    ///
    /// Returns the number of bytes delivered.
    pub fn write(&self, document: &Document) -> Result<usize> {
        let text = self.render(document)?;

        match &self.config.destination {
            Destination::Clipboard => copy_to_clipboard(&text)?,
            Destination::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|e| CopyCodeError::io("<stdout>", e))?;
            }
            Destination::File(path) => {
                fs::write(path, &text).map_err(|e| CopyCodeError::io(path, e))?;
            }
        }

        info!(
            "Wrote {} bytes to {}",
            text.len(),
            self.config.destination
        );
        Ok(text.len())
    }
}

/// Assemble the Markdown document.
///
/// The layout block (for directories) and every file block are joined by a
/// blank line. A document with neither renders as an empty string.
pub fn render_markdown(document: &Document) -> String {
    let mut sections = Vec::with_capacity(document.files.len() + 1);

    if let Some(layout) = &document.layout {
        sections.push(layout_block(layout));
    }
    sections.extend(document.files.iter().map(file_block));

    sections.join(BLOCK_SEPARATOR)
}

/// Wrap a rendered tree in the captioned layout block
pub fn layout_block(tree: &str) -> String {
    format!("{FENCE}\n{LAYOUT_CAPTION}\n\n{tree}\n{FENCE}")
}

/// Fenced block: language tag, comment line naming the file, raw content
pub fn file_block(block: &FileBlock) -> String {
    format!(
        "{FENCE}{}\n{}\n{}\n{FENCE}",
        block.language_tag,
        block.comment_line(),
        block.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::CommentStyle;

    fn block(name: &str, tag: &str, style: CommentStyle, content: &str) -> FileBlock {
        FileBlock {
            name: name.to_string(),
            language_tag: tag.to_string(),
            content_type: "test",
            comment_style: style,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_file_block() {
        let py = block("script.py", "py", CommentStyle::Hash, "print('hi')");
        assert_eq!(file_block(&py), "```py\n# script.py\nprint('hi')\n```");

        let html = block("web/index.html", "html", CommentStyle::Html, "<p></p>");
        assert_eq!(
            file_block(&html),
            "```html\n<!-- web/index.html -->\n<p></p>\n```"
        );
    }

    #[test]
    fn test_file_block_keeps_trailing_newline() {
        let rs = block("main.rs", "rs", CommentStyle::DoubleSlash, "fn main() {}\n");
        assert_eq!(file_block(&rs), "```rs\n// main.rs\nfn main() {}\n\n```");
    }

    #[test]
    fn test_layout_block() {
        assert_eq!(
            layout_block("demo/\n└── a.txt"),
            "```\n// File layout\n\ndemo/\n└── a.txt\n```"
        );
    }

    #[test]
    fn test_render_markdown_directory() {
        let document = Document {
            layout: Some("demo/\n├── a.rs\n└── b.css".to_string()),
            files: vec![
                block("a.rs", "rs", CommentStyle::DoubleSlash, "A"),
                block("b.css", "css", CommentStyle::SlashStar, "B"),
            ],
            skipped: Vec::new(),
        };

        let expected = "```\n// File layout\n\ndemo/\n├── a.rs\n└── b.css\n```\n\n\
```rs\n// a.rs\nA\n```\n\n\
```css\n/* b.css */\nB\n```";
        assert_eq!(render_markdown(&document), expected);
    }

    #[test]
    fn test_render_markdown_single_file_and_empty() {
        let document = Document {
            layout: None,
            files: vec![block("x.go", "go", CommentStyle::DoubleSlash, "package x")],
            skipped: Vec::new(),
        };
        assert_eq!(render_markdown(&document), "```go\n// x.go\npackage x\n```");

        assert_eq!(render_markdown(&Document::default()), "");
    }

    #[test]
    fn test_render_json() {
        let mut config = Config::for_target("/tmp");
        config.format = OutputFormat::Json;
        let writer = DocumentWriter::new(config);

        let document = Document {
            layout: Some("demo/".to_string()),
            files: vec![block("a.py", "py", CommentStyle::Hash, "x = 1")],
            skipped: vec!["blob.bin".to_string()],
        };

        let json: serde_json::Value =
            serde_json::from_str(&writer.render(&document).unwrap()).unwrap();
        assert_eq!(json["layout"], "demo/");
        assert_eq!(json["files"][0]["name"], "a.py");
        assert_eq!(json["files"][0]["comment_style"], "#");
        assert_eq!(json["files"][0]["content_type"], "test");
        assert!(json.get("skipped").is_none());
    }
}
