pub mod filesystem;

use crate::error::{AppError, Result};
use filesystem::list_files;
use std::path::{Path, PathBuf};

/// Rubric files to check: the path itself when it is a file, otherwise
/// every file under it with the given extension, in path order.
pub fn discover_rubrics(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(AppError::PathNotFound(path.display().to_string()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let rubrics: Vec<PathBuf> = list_files(path)
        .into_iter()
        .filter(|file| {
            file.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == extension)
        })
        .collect();
    tracing::debug!(root = %path.display(), found = rubrics.len(), "discovered rubric files");
    Ok(rubrics)
}
