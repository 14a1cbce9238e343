//! Blob encoding for the storage slot and for import/export files.
//!
//! Decoding is staged so callers can tell syntax errors from shape errors:
//! JSON syntax first, then top-level shape, then typed records.

use super::{StoreError, StoreResult};
use crate::model::database::Database;
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENTS_KEY: &str = "students";
const EVALUATIONS_KEY: &str = "evaluations";

#[derive(Debug)]
pub enum DecodeError {
    /// Content is not valid JSON.
    Parse(serde_json::Error),
    /// Valid JSON, but `students`/`evaluations` are missing or not arrays.
    Shape(&'static str),
    /// Shape is right but a record does not match the typed model.
    Record(serde_json::Error),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid JSON: {err}"),
            Self::Shape(details) => write!(f, "invalid database shape: {details}"),
            Self::Record(err) => write!(f, "invalid database record: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) | Self::Record(err) => Some(err),
            Self::Shape(_) => None,
        }
    }
}

impl DecodeError {
    /// Short metadata-only reason for log lines.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse_error",
            Self::Shape(_) => "shape_error",
            Self::Record(_) => "record_error",
        }
    }
}

/// Decodes a serialized database, validating the top-level shape.
pub fn decode_database(raw: &str) -> Result<Database, DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(DecodeError::Parse)?;
    check_shape(&value)?;
    serde_json::from_value(value).map_err(DecodeError::Record)
}

/// Compact encoding used for the storage slot.
pub fn encode_database(db: &Database) -> Result<String, serde_json::Error> {
    serde_json::to_string(db)
}

/// Human-readable encoding (two-space indent) used for export files.
pub fn encode_database_pretty(db: &Database) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(db)
}

/// Decodes slot content, falling back to the empty database.
///
/// `None` means the slot was never written.
pub(crate) fn decode_or_empty(raw: Option<&str>, backend: &'static str) -> Database {
    let Some(raw) = raw else {
        return Database::default();
    };

    match decode_database(raw) {
        Ok(db) => db,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback backend={backend} reason={}",
                err.reason()
            );
            Database::default()
        }
    }
}

/// Fails when `raw` is well-shaped but its records do not decode.
///
/// Unparseable or misshapen content already loads as empty and may be
/// overwritten.
pub(crate) fn ensure_overwritable(raw: Option<&str>, backend: &'static str) -> StoreResult<()> {
    let Some(raw) = raw else {
        return Ok(());
    };

    match decode_database(raw) {
        Err(DecodeError::Record(err)) => {
            warn!(
                "event=store_save module=store status=rejected backend={backend} reason=record_error"
            );
            Err(StoreError::UnreadableSlot(err))
        }
        _ => Ok(()),
    }
}

fn check_shape(value: &Value) -> Result<(), DecodeError> {
    let Some(object) = value.as_object() else {
        return Err(DecodeError::Shape("top-level value is not an object"));
    };
    if !object.get(STUDENTS_KEY).is_some_and(Value::is_array) {
        return Err(DecodeError::Shape("`students` must be an array"));
    }
    if !object.get(EVALUATIONS_KEY).is_some_and(Value::is_array) {
        return Err(DecodeError::Shape("`evaluations` must be an array"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_database, decode_or_empty, ensure_overwritable, DecodeError};
    use crate::model::database::Database;
    use crate::store::StoreError;

    #[test]
    fn decode_distinguishes_syntax_from_shape_errors() {
        assert!(matches!(
            decode_database("{not json"),
            Err(DecodeError::Parse(_))
        ));
        assert!(matches!(
            decode_database(r#"{"students": []}"#),
            Err(DecodeError::Shape(_))
        ));
        assert!(matches!(
            decode_database(r#"{"students": {}, "evaluations": []}"#),
            Err(DecodeError::Shape(_))
        ));
        assert!(matches!(
            decode_database("[1, 2]"),
            Err(DecodeError::Shape(_))
        ));
    }

    #[test]
    fn decode_rejects_unknown_revision_tags() {
        let raw = r#"{
            "students": [],
            "evaluations": [{
                "id": "e1", "studentId": "s1", "date": "2024-01-01",
                "hifzScore": 8, "revisionStatus": "average", "behaviorRating": 4
            }]
        }"#;
        assert!(matches!(decode_database(raw), Err(DecodeError::Record(_))));
    }

    #[test]
    fn decode_reads_legacy_blob() {
        let raw = r#"{
            "students": [{
                "id": "k2x9", "name": "Omar", "phone": "", "parentName": "",
                "parentPhone": "", "createdAt": 1700000000000
            }],
            "evaluations": [{
                "id": "p0q1", "studentId": "k2x9", "date": "2024-01-01",
                "hifzScore": 7.5, "revisionStatus": "ممتاز", "behaviorRating": 5
            }]
        }"#;
        let db = decode_database(raw).unwrap();
        assert_eq!(db.students.len(), 1);
        assert_eq!(db.evaluations[0].hifz_score, 7.5);
    }

    #[test]
    fn missing_or_broken_slot_yields_empty_database() {
        assert_eq!(decode_or_empty(None, "test"), Database::default());
        assert_eq!(decode_or_empty(Some("garbage"), "test"), Database::default());
        assert_eq!(decode_or_empty(Some("null"), "test"), Database::default());
    }

    #[test]
    fn only_undecodable_records_block_overwrite() {
        assert!(ensure_overwritable(None, "test").is_ok());
        assert!(ensure_overwritable(Some("garbage"), "test").is_ok());
        assert!(ensure_overwritable(Some(r#"{"students": 1}"#), "test").is_ok());
        assert!(ensure_overwritable(Some(r#"{"students": [], "evaluations": []}"#), "test").is_ok());
        assert!(matches!(
            ensure_overwritable(
                Some(r#"{"students": [{"id": "s", "name": 3}], "evaluations": []}"#),
                "test"
            ),
            Err(StoreError::UnreadableSlot(_))
        ));
    }
}
