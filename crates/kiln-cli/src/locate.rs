//! Recipe location resolution.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve a recipe location into an ordered list of recipe files.
///
/// A directory yields its immediate regular files in sorted order;
/// subdirectories are silently skipped and never recursed into. Any
/// other path yields a one-element list; whether the file exists is
/// the recipe loader's problem.
pub fn locate_recipes(location: &Path) -> io::Result<Vec<PathBuf>> {
    if !location.is_dir() {
        return Ok(vec![location.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(location)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
