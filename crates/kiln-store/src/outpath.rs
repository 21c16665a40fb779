//! Output-path derivation.
//!
//! Evaluated once per recipe, before execution, so a failed run never
//! leaves an ambiguous output target. Derivation is stateless: the
//! default directory is recomputed from each recipe's own path rather
//! than carried across batch iterations.

use std::path::{Path, PathBuf};

/// Compute the artifact path for one recipe.
///
/// Precedence: an explicit `output_file` wins verbatim; otherwise the
/// file name is the recipe's declared name plus `.json`, falling back to
/// the recipe file's own name, and the directory is the explicit
/// `output_dir` or the directory containing the recipe file.
pub fn output_path(
    recipe_path: &Path,
    recipe_name: Option<&str>,
    output_file: Option<&Path>,
    output_dir: Option<&Path>,
) -> PathBuf {
    if let Some(file) = output_file {
        return file.to_path_buf();
    }
    let file_name: PathBuf = match recipe_name {
        Some(name) => PathBuf::from(format!("{name}.json")),
        None => recipe_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("result.json")),
    };
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| recipe_path.parent().unwrap_or(Path::new("")).to_path_buf());
    dir.join(file_name)
}

/// The compressed artifact's path: the computed path with its final
/// extension segment replaced by `_compressed.json`.
pub fn compressed_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "result".to_string());
    path.with_file_name(format!("{stem}_compressed.json"))
}
