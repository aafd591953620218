//! Error handling for the mold application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for mold operations.
///
/// This enum represents all possible errors that can occur while loading
/// data, parsing templates, rendering and walking a template tree.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// A source path (template root, template file or data file) is absent
    #[error("path not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    /// The data file carries an extension that is not a recognized format
    #[error("unsupported data file format: '{extension}', use .json, .yaml or .yml")]
    UnsupportedFormat { extension: String },

    /// Malformed template expression syntax or malformed data file content.
    /// Raised before any data resolution is attempted.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Execution-time rendering failure: unresolved field, a non-mapping
    /// value indexed as a mapping, or a helper invoked incorrectly
    #[error("render error: {0}")]
    RenderError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Invalid command-line usage detected after argument parsing
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Any of the above, attributed to the relative path that was being
    /// processed when the tree walk failed
    #[error("error processing '{}': {}", path.display(), cause)]
    ProcessError { path: PathBuf, cause: Box<Error> },
}

impl Error {
    /// Wraps an error with the relative path being processed at the time
    /// of failure.
    pub fn with_path<P: Into<PathBuf>>(self, path: P) -> Self {
        Error::ProcessError { path: path.into(), cause: Box::new(self) }
    }
}

/// Convenience type alias for Results with mold's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
