//! Static placeholder discovery for mold templates.
//!
//! Walks a template's parsed expression tree and collects the distinct
//! dot-joined field names it references, without binding any data. This
//! backs the pre-flight `placeholders` command, which reports the inputs a
//! template tree requires before the user writes a data file.

use crate::constants::TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use crate::parser::{self, Expr, Node};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extracts the set of distinct placeholder names referenced by template
/// text.
///
/// Nested chains are recorded whole (`.a.b.c` yields `"a.b.c"`), repeated
/// references collapse, and names are compared case-sensitively. Helper
/// arguments are inspected, and the bodies and else-bodies of `if` and
/// `range` blocks are recursed into.
///
/// # Errors
/// * `Error::ParseError` if the template syntax is malformed. Data is never
///   consulted, so no `RenderError` can occur here.
pub fn identify_placeholders(template: &str) -> Result<BTreeSet<String>> {
    let nodes = parser::parse(template)?;
    let mut placeholders = BTreeSet::new();
    collect_nodes(&nodes, &mut placeholders);
    Ok(placeholders)
}

/// Reads a template file and extracts its placeholder set.
///
/// # Errors
/// * `Error::NotFound` if the file is absent
/// * `Error::ParseError` as for [`identify_placeholders`]
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<BTreeSet<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound { path: path.to_path_buf() });
    }
    let template = fs::read_to_string(path)?;
    identify_placeholders(&template)
}

/// Outcome of scanning a whole template tree for placeholders.
///
/// Discovery is advisory: template files that fail to parse are recorded in
/// `failures` instead of aborting the scan, so one broken file does not
/// block listing the placeholders of the valid ones.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Union of placeholder names across all parsed template files.
    pub placeholders: BTreeSet<String>,
    /// Per-file failures, attributed to paths relative to the scanned root.
    pub failures: Vec<(PathBuf, Error)>,
}

/// Scans every template file under `root` and unions their placeholder
/// sets. File and directory names are scanned as well, since path segments
/// may themselves carry placeholder expressions.
///
/// # Errors
/// * `Error::NotFound` if the root is absent
/// * `Error::IoError` if the directory walk itself fails
pub fn scan_tree<P: AsRef<Path>>(root: P) -> Result<ScanReport> {
    let root = root.as_ref();
    if !root.exists() {
        return Err(Error::NotFound { path: root.to_path_buf() });
    }

    let mut report = ScanReport::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());

        // Path segments may themselves be templated.
        if let Some(relative_str) = relative.to_str() {
            match identify_placeholders(relative_str) {
                Ok(found) => report.placeholders.extend(found),
                Err(err) => {
                    warn!("skipping malformed path template '{}': {}", relative.display(), err);
                    report.failures.push((relative.to_path_buf(), err));
                    continue;
                }
            }
        }

        let is_template_file = entry.file_type().is_file()
            && entry.file_name().to_str().is_some_and(|name| name.ends_with(TEMPLATE_SUFFIX));
        if !is_template_file {
            continue;
        }

        debug!("Analyzing template file: {}", relative.display());
        match analyze_file(entry.path()) {
            Ok(found) => report.placeholders.extend(found),
            Err(err) => {
                warn!("skipping malformed template '{}': {}", relative.display(), err);
                report.failures.push((relative.to_path_buf(), err));
            }
        }
    }
    Ok(report)
}

fn collect_nodes(nodes: &[Node], placeholders: &mut BTreeSet<String>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Action(expr) => collect_expr(expr, placeholders),
            Node::If { cond, body, else_body } => {
                collect_expr(cond, placeholders);
                collect_nodes(body, placeholders);
                collect_nodes(else_body, placeholders);
            }
            Node::Range { over, body, else_body } => {
                collect_expr(over, placeholders);
                collect_nodes(body, placeholders);
                collect_nodes(else_body, placeholders);
            }
        }
    }
}

fn collect_expr(expr: &Expr, placeholders: &mut BTreeSet<String>) {
    match expr {
        // The bare implicit context `{{.}}` names no field.
        Expr::Field(chain) if chain.is_empty() => {}
        Expr::Field(chain) => {
            placeholders.insert(chain.join("."));
        }
        Expr::Call { arg, .. } => collect_expr(arg, placeholders),
        Expr::Str(_) => {}
    }
}
