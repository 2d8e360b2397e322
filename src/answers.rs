//! Hand-curated answers file.
//!
//! The answers file gives each image a date, question and description where
//! the embedded metadata is missing or not wanted. Two JSON shapes are
//! accepted:
//!
//! ```json
//! {
//!   "beach.jpg": { "correct_date": "1998-07-12", "question": "Vilket år?" },
//!   "party.jpg": "2004:12:24"
//! }
//! ```
//!
//! ```json
//! [
//!   { "file": "beach.jpg", "correct_date": "1998-07-12" },
//!   { "file": "party.jpg", "description": "Julafton" }
//! ]
//! ```
//!
//! In the object form a bare string is a shorthand for `correct_date`, and
//! `null` means "no annotation". In the array form, elements without a `file`
//! key are skipped. A later duplicate overrides an earlier one.
//!
//! A curated file is hand-edited, so one bad entry never rejects the rest:
//! elements that are not objects with a string `file` are skipped, and
//! fields that are not strings are dropped from their entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnswersError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid answers file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Answers file must be a JSON object or array, found {0}")]
    NotACollection(&'static str),
}

/// Annotation for a single image. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerEntry {
    pub correct_date: Option<String>,
    pub question: Option<String>,
    pub description: Option<String>,
}

impl AnswerEntry {
    /// String fields of a JSON object; fields of any other type are dropped.
    fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| match object.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => {
                log::warn!("ignoring non-string {key} in answers file: {other}");
                None
            }
        };
        Self {
            correct_date: field("correct_date"),
            question: field("question"),
            description: field("description"),
        }
    }
}

/// Answers keyed by image file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    entries: BTreeMap<String, AnswerEntry>,
}

impl Answers {
    pub fn get(&self, file_name: &str) -> Option<&AnswerEntry> {
        self.entries.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse either answers shape. Only malformed JSON or a top level that
    /// is neither an object nor an array is an error; unusable entries are
    /// skipped or emptied one by one.
    pub fn from_json_str(json: &str) -> Result<Self, AnswersError> {
        let entries = match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => map
                .into_iter()
                .map(|(file, value)| {
                    let entry = by_name_entry(&file, &value);
                    (file, entry)
                })
                .collect(),
            Value::Array(items) => items.iter().filter_map(list_entry).collect(),
            other => return Err(AnswersError::NotACollection(json_kind(&other))),
        };
        Ok(Self { entries })
    }
}

/// Load and parse an answers file.
pub fn load_answers(path: &Path) -> Result<Answers, AnswersError> {
    let content = std::fs::read_to_string(path)?;
    Answers::from_json_str(&content)
}

/// Object form: a bare string is the date, an object is an entry,
/// anything else annotates nothing.
fn by_name_entry(file: &str, value: &Value) -> AnswerEntry {
    match value {
        Value::String(date) => AnswerEntry {
            correct_date: Some(date.clone()),
            ..AnswerEntry::default()
        },
        Value::Object(object) => AnswerEntry::from_object(object),
        Value::Null => AnswerEntry::default(),
        other => {
            log::warn!("ignoring {} answer for {file}", json_kind(other));
            AnswerEntry::default()
        }
    }
}

/// Array form: only objects with a string `file` count.
fn list_entry(item: &Value) -> Option<(String, AnswerEntry)> {
    let object = item.as_object()?;
    match object.get("file") {
        Some(Value::String(file)) => Some((file.clone(), AnswerEntry::from_object(object))),
        _ => {
            log::debug!("skipping answers element without a file name: {item}");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn object_form_with_entries() {
        let answers = Answers::from_json_str(
            r#"{
                "a.jpg": { "correct_date": "1998-07-12", "question": "Vilket år?" },
                "b.jpg": { "description": "Julafton" }
            }"#,
        )
        .unwrap();

        assert_eq!(answers.len(), 2);
        let a = answers.get("a.jpg").unwrap();
        assert_eq!(a.correct_date.as_deref(), Some("1998-07-12"));
        assert_eq!(a.question.as_deref(), Some("Vilket år?"));
        assert_eq!(a.description, None);
        assert_eq!(
            answers.get("b.jpg").unwrap().description.as_deref(),
            Some("Julafton")
        );
    }

    #[test]
    fn bare_string_is_a_date() {
        let answers = Answers::from_json_str(r#"{ "party.jpg": "2004:12:24" }"#).unwrap();
        assert_eq!(
            answers.get("party.jpg"),
            Some(&AnswerEntry {
                correct_date: Some("2004:12:24".into()),
                ..AnswerEntry::default()
            })
        );
    }

    #[test]
    fn null_value_is_an_empty_entry() {
        let answers = Answers::from_json_str(r#"{ "x.jpg": null }"#).unwrap();
        assert_eq!(answers.get("x.jpg"), Some(&AnswerEntry::default()));
    }

    #[test]
    fn array_form_keyed_by_file() {
        let answers = Answers::from_json_str(
            r#"[
                { "file": "a.jpg", "correct_date": "1998-07-12" },
                { "correct_date": "2000-01-01" },
                null,
                { "file": "b.jpg", "description": "Julafton" }
            ]"#,
        )
        .unwrap();

        assert_eq!(answers.len(), 2);
        assert_eq!(
            answers.get("a.jpg").unwrap().correct_date.as_deref(),
            Some("1998-07-12")
        );
        assert_eq!(
            answers.get("b.jpg").unwrap().description.as_deref(),
            Some("Julafton")
        );
    }

    #[test]
    fn array_duplicates_keep_last() {
        let answers = Answers::from_json_str(
            r#"[
                { "file": "a.jpg", "correct_date": "1998-07-12" },
                { "file": "a.jpg", "correct_date": "1999-01-01" }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            answers.get("a.jpg").unwrap().correct_date.as_deref(),
            Some("1999-01-01")
        );
    }

    #[test]
    fn unknown_file_is_none() {
        let answers = Answers::from_json_str("{}").unwrap();
        assert!(answers.is_empty());
        assert_eq!(answers.get("missing.jpg"), None);
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(
            Answers::from_json_str("{ not json"),
            Err(AnswersError::Json(_))
        ));
        assert!(matches!(
            Answers::from_json_str("42"),
            Err(AnswersError::NotACollection("a number"))
        ));
        assert!(matches!(
            Answers::from_json_str(r#""a.jpg""#),
            Err(AnswersError::NotACollection("a string"))
        ));
    }

    // =========================================================================
    // Unusable entries
    // =========================================================================

    #[test]
    fn array_skips_elements_that_are_not_file_objects() {
        let answers = Answers::from_json_str(
            r#"[
                { "file": "a.jpg", "correct_date": "2001-01-01" },
                "junk",
                42,
                true,
                [1, 2],
                { "file": 7, "correct_date": "2002-02-02" },
                { "file": "b.jpg", "description": "Julafton" }
            ]"#,
        )
        .unwrap();

        assert_eq!(answers.len(), 2);
        assert_eq!(
            answers.get("a.jpg").unwrap().correct_date.as_deref(),
            Some("2001-01-01")
        );
        assert_eq!(
            answers.get("b.jpg").unwrap().description.as_deref(),
            Some("Julafton")
        );
    }

    #[test]
    fn non_string_fields_are_dropped_not_fatal() {
        let answers = Answers::from_json_str(
            r#"{
                "a.jpg": { "correct_date": 1985, "question": "Vilket år?" },
                "b.jpg": { "correct_date": "1999-01-01", "description": ["x"] }
            }"#,
        )
        .unwrap();

        assert_eq!(
            answers.get("a.jpg"),
            Some(&AnswerEntry {
                question: Some("Vilket år?".into()),
                ..AnswerEntry::default()
            })
        );
        assert_eq!(
            answers.get("b.jpg"),
            Some(&AnswerEntry {
                correct_date: Some("1999-01-01".into()),
                ..AnswerEntry::default()
            })
        );
    }

    #[test]
    fn array_element_with_numeric_date_keeps_other_fields() {
        let answers = Answers::from_json_str(
            r#"[{ "file": "a.jpg", "correct_date": 1985, "description": "Farfar" }]"#,
        )
        .unwrap();
        let a = answers.get("a.jpg").unwrap();
        assert_eq!(a.correct_date, None);
        assert_eq!(a.description.as_deref(), Some("Farfar"));
    }

    #[test]
    fn object_values_of_other_types_become_empty_entries() {
        let answers =
            Answers::from_json_str(r#"{ "a.jpg": 1985, "b.jpg": [1], "c.jpg": false }"#).unwrap();
        assert_eq!(answers.len(), 3);
        for file in ["a.jpg", "b.jpg", "c.jpg"] {
            assert_eq!(answers.get(file), Some(&AnswerEntry::default()), "{file}");
        }
    }

    #[test]
    fn load_answers_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("answers.json");
        std::fs::write(&path, r#"{ "a.jpg": "1985-06-01" }"#).unwrap();
        let answers = load_answers(&path).unwrap();
        assert_eq!(
            answers.get("a.jpg").unwrap().correct_date.as_deref(),
            Some("1985-06-01")
        );
    }

    #[test]
    fn load_answers_missing_file_is_io_error() {
        assert!(matches!(
            load_answers(Path::new("/nonexistent/answers.json")),
            Err(AnswersError::Io(_))
        ));
    }
}
