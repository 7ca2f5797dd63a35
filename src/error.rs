//! Global error handling for treedoc
//!
//! Per-file read problems never show up here: they are rendered inline as
//! placeholder text. Only per-run failures (configuration, output writes)
//! travel through this type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for treedoc operations
#[derive(Error, Debug)]
pub enum TreeDocError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Root directory could not be listed at all
    #[error("Traversal error: {0}")]
    Traversal(String),

    /// An output file could not be created or written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Output location
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for treedoc operations
pub type Result<T> = std::result::Result<T, TreeDocError>;

/// Creates a TreeDocError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::TreeDocError::$error_type(format!($($arg)*))
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

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            TreeDocError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

/// Attach the output path to an io::Error raised while writing it
pub(crate) fn write_error(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> TreeDocError {
    let path = path.into();
    move |source| TreeDocError::Write { path, source }
}

impl From<TreeDocError> for io::Error {
    fn from(err: TreeDocError) -> Self {
        match err {
            TreeDocError::Io(e) => e,
            TreeDocError::Write { source, .. } => source,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
