//! Student domain model.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `name` is non-empty after trimming.
//! - Contact fields use the empty string for "not provided".

use super::{StudentId, ValidationError};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub parent_phone: String,
    /// Unix epoch milliseconds; `0` when an older blob omitted it.
    #[serde(default)]
    pub created_at: i64,
}

/// Shallow-merge update for an existing student.
///
/// `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

impl Student {
    /// Creates a student with a generated id and the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(StudentId::generate(), name, now_epoch_ms())
    }

    /// Creates a student with caller-provided identity.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: StudentId, name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            name: name.into(),
            phone: String::new(),
            parent_name: String::new(),
            parent_phone: String::new(),
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyStudentName(self.id.clone()));
        }
        Ok(())
    }

    /// Applies every `Some` field of `patch`; identity fields are untouched.
    /// The name is trimmed the same way creation trims it.
    pub fn apply(&mut self, patch: &StudentPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(parent_name) = &patch.parent_name {
            self.parent_name = parent_name.clone();
        }
        if let Some(parent_phone) = &patch.parent_phone {
            self.parent_phone = parent_phone.clone();
        }
    }
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.parent_name.is_none()
            && self.parent_phone.is_none()
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{Student, StudentPatch};
    use crate::model::{StudentId, ValidationError};

    #[test]
    fn blank_name_is_rejected() {
        let student = Student::with_id(StudentId::from("s1"), "   ", 1);
        assert_eq!(
            student.validate(),
            Err(ValidationError::EmptyStudentName(StudentId::from("s1")))
        );
    }

    #[test]
    fn patch_only_overwrites_provided_fields() {
        let mut student = Student::with_id(StudentId::from("s1"), "Yusuf Ali", 42);
        student.phone = "0100".to_string();

        student.apply(&StudentPatch {
            parent_name: Some("Ali".to_string()),
            ..StudentPatch::default()
        });

        assert_eq!(student.name, "Yusuf Ali");
        assert_eq!(student.phone, "0100");
        assert_eq!(student.parent_name, "Ali");
        assert_eq!(student.created_at, 42);
    }

    #[test]
    fn missing_contact_fields_default_to_empty() {
        let student: Student =
            serde_json::from_str(r#"{"id":"a1","name":"Maryam","createdAt":7}"#).unwrap();
        assert_eq!(student.phone, "");
        assert_eq!(student.parent_phone, "");
    }

    #[test]
    fn missing_created_at_defaults_to_zero() {
        let student: Student = serde_json::from_str(r#"{"id":"b2","name":"Bilal"}"#).unwrap();
        assert_eq!(student.created_at, 0);
    }

    #[test]
    fn patched_name_is_trimmed() {
        let mut student = Student::with_id(StudentId::from("s1"), "Yusuf", 1);
        student.apply(&StudentPatch {
            name: Some("  Yusuf Ali \n".to_string()),
            ..StudentPatch::default()
        });
        assert_eq!(student.name, "Yusuf Ali");
    }
}
