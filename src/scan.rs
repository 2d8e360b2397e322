//! Image discovery.
//!
//! Lists the images directly inside the source folder (subdirectories are
//! not descended into), keeping only files whose extension is configured.
//! Results are sorted by file name so ids and JSON key order are stable
//! between runs.
//!
//! ```text
//! photos/
//! ├── config.toml        # ignored (not an image)
//! ├── 01_farfar.jpg      # id 0
//! ├── 02_mormor.JPEG     # id 1 (extension match ignores case)
//! ├── 03_sommar.png      # id 2 (no readable capture date)
//! └── old/               # ignored (directory)
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Images folder not found: {0}")]
    NotFound(PathBuf),
    #[error("No images found in the source folder: {0}")]
    NoImages(PathBuf),
}

/// An image file picked up from the source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Bare file name, used as the key in answers files and in `images/<file>`.
    pub file_name: String,
    pub path: PathBuf,
}

pub fn scan_images(dir: &Path, extensions: &[String]) -> Result<Vec<ImageFile>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotFound(dir.to_path_buf()));
    }

    let mut images: Vec<ImageFile> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_extension(p, extensions))
        .filter_map(|path| {
            let file_name = path.file_name()?.to_string_lossy().to_string();
            Some(ImageFile { file_name, path })
        })
        .collect();

    if images.is_empty() {
        return Err(ScanError::NoImages(dir.to_path_buf()));
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(images)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}
