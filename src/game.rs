//! Import and build pipelines.
//!
//! Both pipelines start from a flat folder of images and copy it into an
//! output directory next to a JSON file:
//!
//! ```text
//! import   photos/  →  staging/game/answers.template.json  (fill in by hand)
//!                      staging/game/images/*
//!
//! build    photos/ + answers.json  →  public/data/game/data.json
//!                                     public/data/game/images/*
//! ```
//!
//! Capture dates are extracted in parallel with [rayon](https://docs.rs/rayon).
//! An image whose date cannot be read simply gets none; only scan, copy and
//! write failures abort a run.

use crate::answers::{AnswerEntry, Answers, AnswersError, load_answers};
use crate::config::{GameConfig, GameSection};
use crate::exif::read_capture_date_from_file;
use crate::metadata::{resolve, resolve_date};
use crate::naming::default_label;
use crate::scan::{ImageFile, ScanError, scan_images};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TEMPLATE_FILE: &str = "answers.template.json";
pub const DATA_FILE: &str = "data.json";
const IMAGES_DIR: &str = "images";

const TEMPLATE_DATE_PLACEHOLDER: &str = "YYYY-MM-DD";
const TEMPLATE_QUESTION_HINT: &str =
    "This is the on-screen question for the image. Make it fun or specific.";
const TEMPLATE_DESCRIPTION_HINT: &str =
    "Short description shown in the results table (who/what is in the photo).";

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Answers(#[from] AnswersError),
    #[error("Failed to copy {0} to {1}: {2}")]
    Copy(PathBuf, PathBuf, std::io::Error),
}

/// One entry of `answers.template.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub correct_date: String,
    pub question: String,
    pub description: String,
}

/// The `data.json` document read by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub screen_name: String,
    pub session_password: String,
    pub images: Vec<GameImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameImage {
    pub id: usize,
    pub answer_type: String,
    /// Relative to the output directory, e.g. `images/beach.jpg`.
    pub image_path: String,
    pub image_description: String,
    /// Key spelled the way the game UI reads it.
    #[serde(rename = "image_quesiton")]
    pub image_question: String,
    /// `YYYY-MM-DD`, or empty when no date is known.
    pub correct_answer: String,
}

/// Options for [`build`] beyond what [`GameConfig`] carries.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub answers: Option<PathBuf>,
    /// Compute everything, copy and write nothing.
    pub dry_run: bool,
}

/// Capture date found (or not) for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDate {
    pub file_name: String,
    pub date: Option<String>,
}

#[derive(Debug)]
pub struct ImportReport {
    pub out_dir: PathBuf,
    pub template_path: PathBuf,
    pub images: Vec<ImageDate>,
}

#[derive(Debug)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    /// `None` on a dry run.
    pub data_path: Option<PathBuf>,
    pub payload: GamePayload,
}

/// Capture dates for many files, in input order.
pub fn read_dates(paths: &[PathBuf]) -> Vec<Option<String>> {
    paths
        .par_iter()
        .map(|path| read_capture_date_from_file(path))
        .collect()
}

/// Copy images to `out_dir/images/` and write an answers template.
pub fn import(
    images_dir: &Path,
    out_dir: &Path,
    config: &GameConfig,
) -> Result<ImportReport, GameError> {
    let images = scan_images(images_dir, &config.images.extensions)?;

    fs::create_dir_all(out_dir.join(IMAGES_DIR))?;
    copy_images(&images, out_dir)?;

    let dates = extract_dates(&images);
    let template = build_template(&images, &dates);

    let template_path = out_dir.join(TEMPLATE_FILE);
    write_json(&template_path, &template)?;

    Ok(ImportReport {
        out_dir: out_dir.to_path_buf(),
        template_path,
        images: images
            .into_iter()
            .zip(dates)
            .map(|(image, date)| ImageDate {
                file_name: image.file_name,
                date,
            })
            .collect(),
    })
}

/// Copy images to `out_dir/images/` and write the game's `data.json`.
pub fn build(
    images_dir: &Path,
    out_dir: &Path,
    options: &BuildOptions,
    config: &GameConfig,
) -> Result<BuildReport, GameError> {
    let images = scan_images(images_dir, &config.images.extensions)?;
    let answers = match &options.answers {
        Some(path) => load_answers(path)?,
        None => Answers::default(),
    };

    if !options.dry_run {
        fs::create_dir_all(out_dir.join(IMAGES_DIR))?;
        copy_images(&images, out_dir)?;
    }

    let dates = extract_dates(&images);
    let payload = assemble_payload(&images, &dates, &answers, &config.game);

    let data_path = if options.dry_run {
        None
    } else {
        let path = out_dir.join(DATA_FILE);
        write_json(&path, &payload)?;
        Some(path)
    };

    Ok(BuildReport {
        out_dir: out_dir.to_path_buf(),
        data_path,
        payload,
    })
}

/// Template entries keyed by file name. The first entry carries hints for
/// whoever fills the file in; the rest start out blank.
pub fn build_template(
    images: &[ImageFile],
    dates: &[Option<String>],
) -> BTreeMap<String, TemplateEntry> {
    images
        .iter()
        .zip(dates)
        .enumerate()
        .map(|(index, (image, date))| {
            let entry = if index == 0 {
                TemplateEntry {
                    correct_date: date
                        .clone()
                        .unwrap_or_else(|| TEMPLATE_DATE_PLACEHOLDER.to_string()),
                    question: TEMPLATE_QUESTION_HINT.to_string(),
                    description: TEMPLATE_DESCRIPTION_HINT.to_string(),
                }
            } else {
                TemplateEntry {
                    correct_date: date.clone().unwrap_or_default(),
                    question: String::new(),
                    description: String::new(),
                }
            };
            (image.file_name.clone(), entry)
        })
        .collect()
}

/// Combine extracted dates and annotations into the game document.
pub fn assemble_payload(
    images: &[ImageFile],
    dates: &[Option<String>],
    answers: &Answers,
    game: &GameSection,
) -> GamePayload {
    let no_entry = AnswerEntry::default();
    let images = images
        .iter()
        .zip(dates)
        .enumerate()
        .map(|(id, (image, date))| {
            let entry = answers.get(&image.file_name).unwrap_or(&no_entry);
            let label = default_label(&image.file_name);
            GameImage {
                id,
                answer_type: "date".to_string(),
                image_path: format!("{IMAGES_DIR}/{}", image.file_name),
                image_description: resolve(&[entry.description.as_deref(), Some(label.as_str())])
                    .unwrap_or_default(),
                image_question: resolve(&[
                    entry.question.as_deref(),
                    Some(game.default_question.as_str()),
                ])
                .unwrap_or_default(),
                correct_answer: resolve_date(date.as_deref(), entry.correct_date.as_deref())
                    .unwrap_or_default(),
            }
        })
        .collect();

    GamePayload {
        kind: "game".to_string(),
        name: game.name.clone(),
        screen_name: game.effective_screen_name().to_string(),
        session_password: game.session_password.clone(),
        images,
    }
}

fn extract_dates(images: &[ImageFile]) -> Vec<Option<String>> {
    let paths: Vec<PathBuf> = images.iter().map(|i| i.path.clone()).collect();
    read_dates(&paths)
}

fn copy_images(images: &[ImageFile], out_dir: &Path) -> Result<(), GameError> {
    let target_dir = out_dir.join(IMAGES_DIR);
    for image in images {
        let target = target_dir.join(&image.file_name);
        fs::copy(&image.path, &target)
            .map_err(|e| GameError::Copy(image.path.clone(), target.clone(), e))?;
        log::debug!("copied {} → {}", image.path.display(), target.display());
    }
    Ok(())
}

/// Pretty-printed JSON with a trailing newline.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), GameError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
