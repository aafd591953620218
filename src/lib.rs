//! mold is a template processing system for project scaffolding.
//! It walks a template directory, renders placeholder expressions against a
//! user-supplied data file, and writes the result to an output tree, leaving
//! non-template files untouched.

/// Static placeholder discovery over parsed templates
pub mod analyzer;

/// Command-line interface module for the mold application
pub mod cli;

/// Common constants (template suffix, default directories)
pub mod constants;

/// Error types and handling for the mold application
pub mod error;

/// File copying and permission mirroring
pub mod fsutils;

/// Case-conversion helper functions callable from templates
pub mod helpers;

/// Data file loading (JSON and YAML) into the data context
pub mod loader;

/// Template expression parsing into an expression tree
pub mod parser;

/// Tree-walk orchestration: render-vs-copy over a template directory
pub mod processor;

/// Template and path rendering against a bound data context
pub mod renderer;
