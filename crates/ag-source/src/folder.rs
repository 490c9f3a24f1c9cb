use std::fs;
use std::path::{Path, PathBuf};

use ag_core::error::CoreError;

/// Extensions image reconnues.
pub const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// True if `path` has a recognised image extension (case-insensitive).
///
/// # Example
/// ```
/// use ag_source::folder::is_image_path;
/// use std::path::Path;
/// assert!(is_image_path(Path::new("a/B.JPG")));
/// assert!(!is_image_path(Path::new("notes.txt")));
/// ```
#[must_use]
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTS.contains(&ext.to_lowercase().as_str()))
}

/// Liste récursivement les images d'un dossier, triées.
///
/// `skip` names a directory (typically the batch output directory) that is
/// not descended into.
///
/// # Errors
/// Returns [`CoreError::Decode`] if `dir` is not a readable directory.
pub fn scan_images(dir: &Path, skip: Option<&Path>) -> Result<Vec<PathBuf>, CoreError> {
    if !dir.is_dir() {
        return Err(CoreError::Decode {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    let mut files = Vec::new();
    scan_dir(dir, skip, &mut files).map_err(|e| CoreError::Decode {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    files.sort();
    log::debug!("{} image(s) found in {}", files.len(), dir.display());
    Ok(files)
}

fn scan_dir(dir: &Path, skip: Option<&Path>, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if skip.is_some_and(|s| same_dir(s, &path)) {
                continue;
            }
            scan_dir(&path, skip, files)?;
        } else if is_image_path(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
