//! Global error handling for copycode
//!
//! Only errors that abort a whole run live here. A file that cannot be read
//! as text never becomes a `CopyCodeError` visible to the user: the scanner
//! drops it from the document and moves on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for copycode operations
#[derive(Error, Debug)]
pub enum CopyCodeError {
    /// File system error tied to a specific path
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    /// Directory listing errors
    #[error("Walk error: {0}")]
    Walk(String),

    /// File exists but the host refuses to treat it as text
    #[error("Not a text file: {0}")]
    NotText(PathBuf),

    /// Clipboard sink errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CopyCodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CopyCodeError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<CopyCodeError> for io::Error {
    fn from(err: CopyCodeError) -> Self {
        match err {
            CopyCodeError::Io { source, .. } => source,
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}

/// Specialized Result type for copycode operations
pub type Result<T> = std::result::Result<T, CopyCodeError>;

/// Creates a CopyCodeError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CopyCodeError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
