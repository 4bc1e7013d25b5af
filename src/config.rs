/*!
 * Configuration handling for copycode
 */

use std::env;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use strum::Display;

use crate::ensure;
use crate::error::Result;

/// How the finished document is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown with a file layout block and fenced file blocks
    #[default]
    Markdown,
    /// The structured document as pretty-printed JSON
    Json,
}

/// Where the finished document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// System clipboard
    Clipboard,
    /// Standard output
    Stdout,
    /// A file on disk
    File(PathBuf),
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Clipboard => write!(f, "clipboard"),
            Destination::Stdout => write!(f, "stdout"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Command-line arguments for copycode
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "copycode",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy a file or directory as Markdown",
    long_about = "Copies a file, or every text file below a directory together with a file layout tree, to the clipboard as fenced Markdown code blocks."
)]
pub struct Args {
    /// File or directory to copy
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Print the document to stdout instead of copying it
    #[clap(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Write the document to a file instead of copying it
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    /// Number of threads used to read files
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Expand at most this many directory levels
    #[clap(long, value_name = "LEVELS")]
    pub max_depth: Option<usize>,

    /// Do not re-enter a directory that is already being listed (symlink loops)
    #[clap(long)]
    pub detect_cycles: bool,

    /// Print a summary table to stderr after copying
    #[clap(long)]
    pub report: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Selected file or directory, absolute
    pub target: PathBuf,

    /// Where the document is delivered
    pub destination: Destination,

    /// Rendering of the document
    pub format: OutputFormat,

    /// Number of threads used for file reads
    pub num_threads: usize,

    /// Maximum number of directory levels to expand
    pub max_depth: Option<usize>,

    /// Whether to guard against directory cycles
    pub detect_cycles: bool,

    /// Whether to print a summary report
    pub report: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let destination = match (args.stdout, args.output) {
            (true, _) => Destination::Stdout,
            (false, Some(path)) => Destination::File(path),
            (false, None) => Destination::Clipboard,
        };

        Self {
            target: absolutize(&args.path),
            destination,
            format: args.format,
            num_threads: args.threads,
            max_depth: args.max_depth,
            detect_cycles: args.detect_cycles,
            report: args.report,
        }
    }

    /// Configuration for `target` with every option at its default
    pub fn for_target(target: impl AsRef<Path>) -> Self {
        Self {
            target: absolutize(target.as_ref()),
            destination: Destination::Clipboard,
            format: OutputFormat::Markdown,
            num_threads: 4,
            max_depth: None,
            detect_cycles: false,
            report: false,
        }
    }

    /// Validate the configuration
    ///
    /// The target need not exist: an unclassifiable path produces an empty
    /// document.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.num_threads > 0,
            Config,
            "--threads must be at least 1"
        );

        if let Some(depth) = self.max_depth {
            ensure!(depth > 0, Config, "--max-depth must be at least 1");
        }

        if let Destination::File(path) = &self.destination {
            if let Some(parent) = path.parent() {
                ensure!(
                    parent.as_os_str().is_empty() || parent.is_dir(),
                    Config,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
            ensure!(
                !path.is_dir(),
                Config,
                "Output path is a directory: {}",
                path.display()
            );
        }

        Ok(())
    }
}

/// Resolve `path` against the current directory without touching symlinks
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
