//! Tree-walk orchestration for mold.
//!
//! Walks a template directory depth-first and materializes the output tree:
//! directories are created with their source permission bits, files carrying
//! the template suffix are rendered with the suffix stripped, and all other
//! files are copied verbatim. Placeholders embedded in file and directory
//! names are rendered while computing each destination path.
//!
//! The walk is fail-fast: the first error aborts remaining work and is
//! attributed to the relative path being processed. Already-completed
//! entries are left in place; there is no rollback.

use crate::constants::TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use crate::fsutils;
use crate::renderer::Renderer;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Orchestrates one apply run over a template tree.
pub struct Processor<'a> {
    renderer: &'a Renderer,
    template_root: &'a Path,
    output_root: &'a Path,
    data: &'a Value,
}

impl<'a> Processor<'a> {
    /// Creates a processor for a single apply run.
    ///
    /// # Arguments
    /// * `renderer` - Template execution engine
    /// * `template_root` - Root of the template tree to walk
    /// * `output_root` - Root of the output tree to populate
    /// * `data` - Read-only data context shared by every render
    pub fn new(
        renderer: &'a Renderer,
        template_root: &'a Path,
        output_root: &'a Path,
        data: &'a Value,
    ) -> Self {
        Self { renderer, template_root, output_root, data }
    }

    /// Walks the template tree and renders or copies every entry into the
    /// output tree. Sibling entries are visited in file-name order so runs
    /// are reproducible; directories are visited before their contents, so
    /// every parent exists before a file beneath it is written.
    ///
    /// # Errors
    /// * `Error::NotFound` if the template root is absent
    /// * `Error::ProcessError` wrapping the underlying parse, render or IO
    ///   failure together with the offending relative path
    pub fn apply(&self) -> Result<()> {
        if !self.template_root.exists() {
            return Err(Error::NotFound { path: self.template_root.to_path_buf() });
        }
        fs::create_dir_all(self.output_root)?;

        for dir_entry in WalkDir::new(self.template_root).sort_by_file_name() {
            let entry = dir_entry.map_err(|e| Error::IoError(e.into()))?;
            let relative = entry
                .path()
                .strip_prefix(self.template_root)
                .unwrap_or(entry.path())
                .to_path_buf();
            if relative.as_os_str().is_empty() {
                // The root itself; the output root is already created.
                continue;
            }
            self.process_entry(entry.path(), &relative)
                .map_err(|e| e.with_path(&relative))?;
        }
        Ok(())
    }

    /// Renders or copies a single tree entry into the output tree.
    fn process_entry(&self, source: &Path, relative: &Path) -> Result<()> {
        let dest = self.destination_for(relative)?;

        if source.is_dir() {
            return fsutils::create_dir_like(source, &dest);
        }

        let is_template = relative
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(TEMPLATE_SUFFIX));

        if is_template {
            debug!("Rendering: {} -> {}", relative.display(), dest.display());
            self.renderer.render_file(source, dest.as_path(), self.data)
        } else {
            fsutils::copy_file(source, &dest)
        }
    }

    /// Computes an entry's destination path: the relative path is rendered
    /// through the path placeholder renderer, and the template suffix is
    /// stripped from the final segment of marked files.
    fn destination_for(&self, relative: &Path) -> Result<PathBuf> {
        let relative_str = relative
            .to_str()
            .ok_or_else(|| Error::RenderError("path is not valid UTF-8".into()))?;

        let mut rendered = self.renderer.render_path(relative_str, self.data)?;
        if relative_str.ends_with(TEMPLATE_SUFFIX) {
            if let Some(stripped) = rendered.strip_suffix(TEMPLATE_SUFFIX) {
                rendered = stripped.to_string();
            }
        }
        Ok(self.output_root.join(rendered))
    }
}
