//! Display labels derived from image file names.
//!
//! When the answers file has no description for an image, the game shows a
//! label built from the file name instead:
//! - `beach_day-2019.jpg` → "beach day 2019"
//! - `__mormor--och--morfar__.jpeg` → "mormor och morfar"
//! - `IMG_0042.JPG` → "IMG 0042"

use std::path::Path;

/// File stem with every run of `_`/`-` collapsed to one space, trimmed.
pub fn default_label(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    let mut label = String::with_capacity(stem.len());
    let mut in_separator = false;
    for c in stem.chars() {
        if c == '_' || c == '-' {
            if !in_separator {
                label.push(' ');
            }
            in_separator = true;
        } else {
            label.push(c);
            in_separator = false;
        }
    }

    label.trim().to_string()
}
