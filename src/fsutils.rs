//! Filesystem helpers for mold.
//! Byte-for-byte file copying and permission mirroring used by the tree
//! walk for non-template entries.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Copies a single file, preserving the source's permission bits on the
/// destination.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path
///
/// # Errors
/// * `Error::NotFound` if the source is absent
/// * `Error::IoError` on copy or permission failures
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    if !src.exists() {
        return Err(Error::NotFound { path: src.to_path_buf() });
    }

    debug!("Copying file: {} -> {}", src.display(), dest.display());
    // fs::copy preserves permission bits along with the content.
    fs::copy(src, dest)?;
    Ok(())
}

/// Sets the destination's permission bits equal to the source's.
pub fn copy_permissions<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<()> {
    let metadata = fs::metadata(src.as_ref())?;
    fs::set_permissions(dest.as_ref(), metadata.permissions())?;
    Ok(())
}

/// Creates a directory (with any missing ancestors) carrying the permission
/// bits of a source directory.
pub fn create_dir_like<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<()> {
    let dest = dest.as_ref();
    debug!("Creating directory: {}", dest.display());
    fs::create_dir_all(dest)?;
    copy_permissions(src.as_ref(), dest)
}
