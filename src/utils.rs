/*!
 * Utility functions for copycode
 */

use std::path::Path;

/// Directory names skipped at every depth. Exact, case-sensitive match.
pub const EXCLUDED_DIRS: [&str; 3] = ["node_modules", "__pycache__", ".git"];

/// Bytes inspected when deciding whether a file is text
pub const TEXT_SAMPLE_SIZE: usize = 8192;

/// Check if an entry name is one of the excluded noise directories
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// Basename used to label the selected path.
///
/// Falls back to the whole path for roots such as `/` that have no basename.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Heuristic text check on the leading bytes of a file.
///
/// Control bytes 0x00-0x08 and 0x0E-0x1F count as binary; a sample is text
/// when fewer than 10% of its bytes are binary. Empty input is text.
pub fn looks_like_text(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return true;
    }

    let binary_count = sample
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();
    let binary_ratio = binary_count as f32 / sample.len() as f32;

    binary_ratio < 0.1
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
