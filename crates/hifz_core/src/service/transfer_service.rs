//! Whole-database import and export.
//!
//! # Invariants
//! - Import either replaces the entire slot or changes nothing.
//! - Syntax errors and shape errors are reported as distinct variants.
//! - Imported data is validated strictly (taxonomy, ranges, per-day
//!   uniqueness) before the overwrite.

use crate::model::locale::Locale;
use crate::model::ValidationError;
use crate::store::codec::{decode_database, encode_database_pretty, DecodeError};
use crate::store::{DatabaseStore, StoreError};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EXPORT_FILE_PREFIX: &str = "madrassa-data";

/// Counts of records written by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub students: usize,
    pub evaluations: usize,
}

#[derive(Debug)]
pub enum ImportError {
    /// File is not valid JSON.
    Parse(serde_json::Error),
    /// JSON lacks `students`/`evaluations` arrays.
    Shape(String),
    /// A record does not match the typed model.
    InvalidRecord(serde_json::Error),
    /// Records parse but break a domain rule.
    Validation(ValidationError),
    Store(StoreError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "import file is not valid JSON: {err}"),
            Self::Shape(details) => write!(f, "import file has the wrong shape: {details}"),
            Self::InvalidRecord(err) => write!(f, "import file has an invalid record: {err}"),
            Self::Validation(err) => write!(f, "import file breaks a data rule: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) | Self::InvalidRecord(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Shape(_) => None,
        }
    }
}

impl From<DecodeError> for ImportError {
    fn from(value: DecodeError) -> Self {
        match value {
            DecodeError::Parse(err) => Self::Parse(err),
            DecodeError::Shape(details) => Self::Shape(details.to_string()),
            DecodeError::Record(err) => Self::InvalidRecord(err),
        }
    }
}

impl ImportError {
    /// Blocking message for the import dialog.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Parse(_), Locale::Arabic) => {
                "حدث خطأ أثناء استيراد الملف. تأكد أنه ملف JSON صالح."
            }
            (Self::Parse(_), Locale::English) => {
                "The file could not be read. Make sure it is a valid JSON file."
            }
            (Self::Store(_), Locale::Arabic) => "تعذر حفظ البيانات المستوردة.",
            (Self::Store(_), Locale::English) => "The imported data could not be saved.",
            (_, Locale::Arabic) => "الملف لا يحتوي على بنية قاعدة بيانات صحيحة.",
            (_, Locale::English) => "The file does not contain a valid database structure.",
        }
    }
}

pub struct TransferService<'s, S: DatabaseStore> {
    store: &'s S,
}

impl<'s, S: DatabaseStore> TransferService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Serializes the current database for download.
    pub fn export_json(&self) -> Result<String, StoreError> {
        let db = self.store.load();
        let encoded = encode_database_pretty(&db)?;
        info!(
            "event=db_export module=service status=ok students={} evaluations={}",
            db.students.len(),
            db.evaluations.len()
        );
        Ok(encoded)
    }

    /// Replaces the whole database with the file content (last write wins).
    pub fn import_json(&self, raw: &str) -> Result<ImportSummary, ImportError> {
        let db = decode_database(raw).map_err(|err| {
            warn!(
                "event=db_import module=service status=rejected reason={}",
                err.reason()
            );
            ImportError::from(err)
        })?;
        db.validate().map_err(|err| {
            warn!("event=db_import module=service status=rejected reason=validation_error");
            ImportError::Validation(err)
        })?;

        self.store.replace(&db).map_err(ImportError::Store)?;

        let summary = ImportSummary {
            students: db.students.len(),
            evaluations: db.evaluations.len(),
        };
        info!(
            "event=db_import module=service status=ok students={} evaluations={}",
            summary.students, summary.evaluations
        );
        Ok(summary)
    }
}

/// Download file name embedding the export date.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.json", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, ImportError};
    use crate::model::locale::Locale;
    use chrono::NaiveDate;

    #[test]
    fn export_file_name_embeds_date() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 3).unwrap();
        assert_eq!(export_file_name(today), "madrassa-data-2024-07-03.json");
    }

    #[test]
    fn parse_and_shape_failures_have_distinct_messages() {
        let parse = ImportError::Parse(serde_json::from_str::<u8>("x").unwrap_err());
        let shape = ImportError::Shape("`students` must be an array".to_string());
        assert_ne!(
            parse.user_message(Locale::English),
            shape.user_message(Locale::English)
        );
        assert_ne!(
            parse.user_message(Locale::Arabic),
            shape.user_message(Locale::Arabic)
        );
    }
}
