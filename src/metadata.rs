//! Capture-date resolution across sources.
//!
//! Each image can get its date from two independent sources:
//!
//! - **Embedded**: EXIF DateTimeOriginal, read from the JPEG bytes by
//!   [`crate::exif`]. Only JPEGs carry it here.
//! - **Annotated**: the `correct_date` typed into an answers file by whoever
//!   curates the game. Free text, normalized by [`crate::date`].
//!
//! ## Resolution priority
//!
//! The first non-empty value wins, then gets normalized:
//!
//! ```text
//! date: resolve(&[exif_date, annotated_date]) → to_iso_date
//! ```
//!
//! An extracted date beats a hand-written one even when both exist. EXIF
//! dates can reflect a scanner or export run rather than the moment the
//! photo was taken, so this order is up for product review. Until then it
//! stays as is.

use crate::date::to_iso_date;

/// Return the first non-None, non-empty value from the given sources, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Pick the capture date for an image: extracted date first, annotation as fallback.
pub fn resolve_date(extracted: Option<&str>, annotated: Option<&str>) -> Option<String> {
    let picked = resolve(&[extracted, annotated])?;
    to_iso_date(Some(&picked))
}
