/*!
 * Path classification, directory scanning and file reading
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{CopyCodeError, Result};
use crate::language::{comment_style, detect_content_type, fence_tag};
use crate::tree::{flatten_paths, render_tree};
use crate::types::{DirectoryNode, Document, EntryKind, FileBlock, TreeNode};
use crate::utils::{display_name, is_excluded, looks_like_text, TEXT_SAMPLE_SIZE};

/// Scanner for the selected path
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar for file reads
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Classify the configured target and collect its document
    pub fn scan(&self) -> Result<Document> {
        let target = &self.config.target;

        match classify(target) {
            EntryKind::Directory => self.scan_directory_document(target),
            EntryKind::File => Ok(self.scan_file_document(target)),
            EntryKind::Other => {
                debug!("{} is neither a file nor a directory", target.display());
                Ok(Document::default())
            }
        }
    }

    fn scan_directory_document(&self, root: &Path) -> Result<Document> {
        let children = self.build_tree(root)?;
        let layout = render_tree(&display_name(root), &children);
        let paths = flatten_paths(&children, "");

        let (files, skipped) = self.read_blocks(root, &paths);

        Ok(Document {
            layout: Some(layout),
            files,
            skipped,
        })
    }

    fn scan_file_document(&self, path: &Path) -> Document {
        let name = display_name(path);
        self.progress.set_length(1);

        let (files, skipped) = match self.read_file_block(path, &name) {
            Ok(block) => (vec![block], Vec::new()),
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                (Vec::new(), vec![name])
            }
        };
        self.progress.inc(1);

        Document {
            layout: None,
            files,
            skipped,
        }
    }

    /// List the children of `root`, recursively, in layout order.
    ///
    /// Files come before directories; inside each group the order of the
    /// directory listing is kept.
    pub fn build_tree(&self, root: &Path) -> Result<Vec<TreeNode>> {
        let mut ancestors = Vec::new();
        if self.config.detect_cycles {
            ancestors.push(canonical(root));
        }
        self.scan_directory(root, 1, &mut ancestors)
    }

    /// Scan a directory whose entries sit at `level` below the root
    fn scan_directory(
        &self,
        abs_path: &Path,
        level: usize,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<Vec<TreeNode>> {
        let mut contents = Vec::new();

        for entry in WalkDir::new(abs_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    if e.depth() == 0 || e.path() == Some(abs_path) {
                        return Err(walk_error(abs_path, e));
                    }
                    // A link back to the directory being listed; walkdir reports it
                    // before `should_descend` can, so show it unexpanded here
                    if e.loop_ancestor().is_some() {
                        if let Some(name) = e.path().and_then(Path::file_name) {
                            let name = name.to_string_lossy().to_string();
                            if !is_excluded(&name) {
                                warn!("Not expanding {}: directory cycle", name);
                                contents.push(TreeNode::Directory(DirectoryNode {
                                    name,
                                    children: Vec::new(),
                                }));
                            }
                            continue;
                        }
                    }
                    warn!("Skipping entry in {}: {}", abs_path.display(), e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();
            if is_excluded(&name) {
                continue;
            }

            if !entry.file_type().is_dir() {
                contents.push(TreeNode::File(name));
                continue;
            }

            let children = if self.should_descend(entry.path(), level, ancestors) {
                let pushed = self.config.detect_cycles;
                if pushed {
                    ancestors.push(canonical(entry.path()));
                }
                let result = self.scan_directory(entry.path(), level + 1, ancestors);
                if pushed {
                    ancestors.pop();
                }

                match result {
                    Ok(children) => children,
                    Err(e) => {
                        warn!(
                            "Error processing directory {}: {}",
                            entry.path().display(),
                            e
                        );
                        continue;
                    }
                }
            } else {
                Vec::new()
            };

            contents.push(TreeNode::Directory(DirectoryNode { name, children }));
        }

        // Two buckets: files keep their listing order, then directories keep theirs
        let (files, dirs): (Vec<_>, Vec<_>) = contents.into_iter().partition(|n| !n.is_dir());
        let mut ordered = files;
        ordered.extend(dirs);

        Ok(ordered)
    }

    fn should_descend(&self, path: &Path, level: usize, ancestors: &[PathBuf]) -> bool {
        if let Some(max) = self.config.max_depth {
            if level >= max {
                debug!("Not expanding {} (max depth {})", path.display(), max);
                return false;
            }
        }

        if self.config.detect_cycles && ancestors.contains(&canonical(path)) {
            warn!("Not expanding {}: directory cycle", path.display());
            return false;
        }

        true
    }

    /// Read every file concurrently, keeping the order of `paths`.
    ///
    /// Returns the blocks that could be built and the names that were skipped.
    pub fn read_blocks(&self, root: &Path, paths: &[String]) -> (Vec<FileBlock>, Vec<String>) {
        self.progress.set_length(paths.len() as u64);

        let results: Vec<Result<FileBlock>> = paths
            .par_iter()
            .map(|rel| {
                let result = self.read_file_block(&root.join(rel), rel);
                self.progress.inc(1);
                result
            })
            .collect();

        let mut files = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (rel, result) in paths.iter().zip(results) {
            match result {
                Ok(block) => files.push(block),
                Err(e) => {
                    debug!("Skipping {}: {}", rel, e);
                    skipped.push(rel.clone());
                }
            }
        }

        (files, skipped)
    }

    /// Read one file and annotate it for its fenced block
    pub fn read_file_block(&self, abs_path: &Path, name: &str) -> Result<FileBlock> {
        self.progress
            .set_message(format!("Current file: {}", shorten(name)));

        let content = read_text(abs_path)?;
        let content_type = detect_content_type(abs_path);

        Ok(FileBlock {
            name: name.to_string(),
            language_tag: fence_tag(abs_path),
            content_type,
            comment_style: comment_style(content_type),
            content,
        })
    }
}

/// Determine whether `path` is a file, a directory or neither
pub fn classify(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => EntryKind::File,
        Ok(metadata) if metadata.is_dir() => EntryKind::Directory,
        _ => EntryKind::Other,
    }
}

/// Read a file the way an editor opens it as text.
///
/// Fails for unreadable files, invalid UTF-8 and binary-looking content.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| CopyCodeError::io(path, e))?;

    let sample = &bytes[..bytes.len().min(TEXT_SAMPLE_SIZE)];
    if !looks_like_text(sample) {
        return Err(CopyCodeError::NotText(path.to_path_buf()));
    }

    String::from_utf8(bytes).map_err(|_| CopyCodeError::NotText(path.to_path_buf()))
}

fn walk_error(path: &Path, err: walkdir::Error) -> CopyCodeError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(source) => CopyCodeError::io(path, source),
        None => CopyCodeError::Walk(message),
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

// Keep progress messages short enough for one terminal line
fn shorten(name: &str) -> String {
    let count = name.chars().count();
    if count > 40 {
        let tail: String = name.chars().skip(count - 37).collect();
        format!("...{}", tail)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("src/main.rs"), "src/main.rs");

        let long = "a/".repeat(30) + "file.rs";
        let short = shorten(&long);
        assert!(short.starts_with("..."));
        assert_eq!(short.chars().count(), 40);
        assert!(short.ends_with("file.rs"));
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(
            classify(Path::new("/definitely/not/a/real/path")),
            EntryKind::Other
        );
    }
}
