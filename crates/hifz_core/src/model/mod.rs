//! Domain model for the memorization tracker.
//!
//! # Responsibility
//! - Define the persisted records (`Student`, `Evaluation`) and the
//!   `Database` aggregate root that owns them.
//! - Keep field validation next to the data it guards.
//!
//! # Invariants
//! - Identifiers are opaque strings; new ones are random UUID v4 values.
//! - At most one evaluation exists per `(student_id, date)` pair.
//! - Stored enumeration values are language-neutral tags; display strings
//!   live in `locale`.

pub mod database;
pub mod evaluation;
pub mod locale;
pub mod student;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Declares an opaque string identifier newtype.
///
/// Legacy exports carry short random ids, so the wrapped value is not
/// required to be a UUID; freshly generated ids always are.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a collision-resistant identifier (random UUID v4).
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Stable identifier of a student.
    StudentId
);
opaque_id!(
    /// Stable identifier of one evaluation record.
    EvaluationId
);

/// Field-level validation failure for domain records.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Student name is empty after trimming.
    EmptyStudentName(StudentId),
    /// Two students share the same id.
    DuplicateStudentId(StudentId),
    /// Memorization score is outside `[0, 10]` or not finite.
    ScoreOutOfRange(f64),
    /// Memorization score is not a multiple of 0.5.
    ScoreNotHalfStep(f64),
    /// Behavior rating is outside `[1, 5]`.
    BehaviorOutOfRange(u8),
    /// More than one evaluation for the same student and day.
    DuplicateEvaluation {
        student_id: StudentId,
        date: chrono::NaiveDate,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStudentName(id) => write!(f, "student `{id}` has an empty name"),
            Self::DuplicateStudentId(id) => write!(f, "duplicate student id `{id}`"),
            Self::ScoreOutOfRange(score) => {
                write!(f, "hifz score {score} is outside the 0..=10 range")
            }
            Self::ScoreNotHalfStep(score) => {
                write!(f, "hifz score {score} is not a multiple of 0.5")
            }
            Self::BehaviorOutOfRange(rating) => {
                write!(f, "behavior rating {rating} is outside the 1..=5 range")
            }
            Self::DuplicateEvaluation { student_id, date } => write!(
                f,
                "student `{student_id}` has more than one evaluation on {date}"
            ),
        }
    }
}

impl Error for ValidationError {}
