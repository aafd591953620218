//! Common constants used throughout the mold application.

/// Marker suffix identifying files whose content must be rendered; the
/// suffix is stripped from the destination file name.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Default directory holding template sets.
pub const TEMPLATES_DIR: &str = "templates";

/// Sample data file names looked up to hint the user when --data-file is
/// missing.
pub const SAMPLE_DATA_FILES: [&str; 2] = ["template.yaml", "template.json"];
