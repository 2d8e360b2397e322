//! # Snapdate
//!
//! Reads the capture date out of JPEG photos and turns a folder of them into
//! a "guess when this was taken" game.
//!
//! # Architecture: Three-Stage Extractor
//!
//! Date extraction is a chain of small stages, each working on the raw file
//! bytes and handing a position or a string to the next:
//!
//! ```text
//! 1. Segment scan   JPEG bytes      →  TIFF header offset  (APP1 "Exif\0\0")
//! 2. IFD walk       TIFF structure  →  DateTimeOriginal    ("2023:07:04 10:11:12")
//! 3. Normalize      date text       →  ISO date            ("2023-07-04")
//! ```
//!
//! Every read is bounds-checked. Malformed input of any kind ends in an
//! [`exif::ExifError`] internally and "no date" at the public surface; nothing
//! panics and nothing reads past the buffer.
//!
//! On top of the extractor, the [`game`] pipelines copy an image folder into
//! a game directory and write either an answers template to fill in by hand
//! or the final `data.json` the game UI loads.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`exif`] | JPEG segment scanner and TIFF/IFD walker for DateTimeOriginal |
//! | [`date`] | Free-text and EXIF date normalization to `YYYY-MM-DD` |
//! | [`metadata`] | Picks a date from the extracted and annotated sources |
//! | [`naming`] | Default image labels derived from file names |
//! | [`scan`] | Lists the images in the source folder |
//! | [`answers`] | Hand-curated answers file (object or array JSON) |
//! | [`config`] | `config.toml` loading, stock defaults, validation |
//! | [`game`] | Import and build pipelines |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Image Decoding
//!
//! Only the EXIF container is parsed. Pixel data is never decoded, so a
//! multi-megabyte photo costs a few hundred byte reads at most and no image
//! crate is needed.
//!
//! ## Errors Stay Inside
//!
//! The extractor has a precise error enum so tests can pin down why a file
//! was rejected. Callers only ever see `Option<String>`: a photo without a
//! date is normal, not a failure.

pub mod answers;
pub mod config;
pub mod date;
pub mod exif;
pub mod game;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
