//! CLI output formatting for every command.
//!
//! Output leads with the image's position and name. Dates, questions and
//! paths follow as indented context lines, so the listing reads as an
//! inventory of the game rather than a file log.
//!
//! # Output Format
//!
//! ## Date
//!
//! ```text
//! photos/01_farfar.jpg	1987-03-09
//! photos/02_mormor.png	-
//! ```
//!
//! ## Import
//!
//! ```text
//! Images
//! 001 01_farfar.jpg
//!     Date: 1987-03-09
//! 002 02_mormor.png
//!     Date: (none)
//!
//! Template → staging/game/answers.template.json
//! Imported 2 images, 1 with a capture date
//! ```
//!
//! ## Build
//!
//! ```text
//! Game jul (Julspelet)
//! 001 01 farfar
//!     Source: images/01_farfar.jpg
//!     Question: När togs bilden?
//!     Answer: 1987-03-09
//! 002 02 mormor
//!     Source: images/02_mormor.png
//!     Question: När togs bilden?
//!     Answer: (missing)
//!
//! Wrote public/data/game/data.json
//! Built 2 images, 1 without an answer
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::game::{BuildReport, ImportReport};
use std::path::PathBuf;

const QUESTION_PREVIEW_LEN: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Labelled images show the label, unlabelled ones the file name in parens.
///
/// ```text
/// 001 beach day         // labelled
/// 001 (_.jpg)           // label came out empty
/// ```
fn image_line(index: usize, label: &str, file_name: &str) -> String {
    if label.is_empty() {
        format!("{} ({})", format_index(index), file_name)
    } else {
        format!("{} {}", format_index(index), label)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// date
// ============================================================================

pub fn format_dates(results: &[(PathBuf, Option<String>)]) -> Vec<String> {
    results
        .iter()
        .map(|(path, date)| {
            format!("{}\t{}", path.display(), date.as_deref().unwrap_or("-"))
        })
        .collect()
}

pub fn print_dates(results: &[(PathBuf, Option<String>)]) {
    for line in format_dates(results) {
        println!("{}", line);
    }
}

// ============================================================================
// import
// ============================================================================

pub fn format_import_output(report: &ImportReport) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];

    for (i, image) in report.images.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), image.file_name));
        lines.push(format!(
            "{}Date: {}",
            indent(1),
            image.date.as_deref().unwrap_or("(none)")
        ));
    }

    let dated = report.images.iter().filter(|i| i.date.is_some()).count();
    lines.push(String::new());
    lines.push(format!("Template → {}", report.template_path.display()));
    lines.push(format!(
        "Imported {}, {} with a capture date",
        plural(report.images.len(), "image"),
        dated
    ));
    lines
}

pub fn print_import_output(report: &ImportReport) {
    for line in format_import_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let payload = &report.payload;
    let mut lines = Vec::new();

    if payload.screen_name == payload.name {
        lines.push(format!("Game {}", payload.name));
    } else {
        lines.push(format!("Game {} ({})", payload.name, payload.screen_name));
    }

    for image in &payload.images {
        let file_name = image
            .image_path
            .rsplit('/')
            .next()
            .unwrap_or(&image.image_path);
        lines.push(image_line(image.id + 1, &image.image_description, file_name));
        lines.push(format!("{}Source: {}", indent(1), image.image_path));
        lines.push(format!(
            "{}Question: {}",
            indent(1),
            truncate_text(&image.image_question, QUESTION_PREVIEW_LEN)
        ));
        let answer = if image.correct_answer.is_empty() {
            "(missing)"
        } else {
            &image.correct_answer
        };
        lines.push(format!("{}Answer: {}", indent(1), answer));
    }

    lines.push(String::new());
    match &report.data_path {
        Some(path) => lines.push(format!("Wrote {}", path.display())),
        None => lines.push(format!(
            "Dry run: nothing written to {}",
            report.out_dir.display()
        )),
    }

    let missing = payload
        .images
        .iter()
        .filter(|i| i.correct_answer.is_empty())
        .count();
    lines.push(format!(
        "Built {}, {} without an answer",
        plural(payload.images.len(), "image"),
        missing
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
