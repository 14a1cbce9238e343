//! Evaluation domain model.
//!
//! # Responsibility
//! - Define the daily evaluation record and its revision taxonomy.
//! - Validate score and rating domains before persistence.
//!
//! # Invariants
//! - `hifz_score` is finite, within `[0, 10]`, and a multiple of 0.5.
//! - `behavior_rating` is within `[1, 5]`.
//! - `(student_id, date)` is the natural key; uniqueness is enforced by the
//!   repository and by `Database::validate`.

use super::locale::Locale;
use super::{EvaluationId, StudentId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_HIFZ_SCORE: f64 = 0.0;
pub const MAX_HIFZ_SCORE: f64 = 10.0;
pub const MIN_BEHAVIOR_RATING: u8 = 1;
pub const MAX_BEHAVIOR_RATING: u8 = 5;

/// Quality of the student's revision of previously memorized material.
///
/// Stored as a language-neutral tag. Legacy blobs stored the Arabic display
/// label, which is still accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionStatus {
    #[serde(alias = "ممتاز")]
    Excellent,
    #[serde(alias = "جيد")]
    Fair,
    #[serde(alias = "ضعيف")]
    Poor,
}

impl RevisionStatus {
    pub const ALL: [RevisionStatus; 3] = [Self::Excellent, Self::Fair, Self::Poor];

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Excellent, Locale::Arabic) => "ممتاز",
            (Self::Fair, Locale::Arabic) => "جيد",
            (Self::Poor, Locale::Arabic) => "ضعيف",
            (Self::Excellent, Locale::English) => "Excellent",
            (Self::Fair, Locale::English) => "Fair",
            (Self::Poor, Locale::English) => "Poor",
        }
    }
}

/// One dated evaluation of a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: EvaluationId,
    pub student_id: StudentId,
    /// Calendar day, persisted as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub hifz_score: f64,
    pub revision_status: RevisionStatus,
    pub behavior_rating: u8,
}

/// Single-field change applied to a day's evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationEdit {
    HifzScore(f64),
    Revision(RevisionStatus),
    Behavior(u8),
}

impl Evaluation {
    /// Starting record for a day that has no evaluation yet: full score,
    /// excellent revision, top behavior.
    pub fn for_day(student_id: StudentId, date: NaiveDate) -> Self {
        Self {
            id: EvaluationId::generate(),
            student_id,
            date,
            hifz_score: MAX_HIFZ_SCORE,
            revision_status: RevisionStatus::Excellent,
            behavior_rating: MAX_BEHAVIOR_RATING,
        }
    }

    /// Copies this evaluation onto another day under a fresh id.
    pub fn repeated_on(&self, date: NaiveDate) -> Self {
        Self {
            id: EvaluationId::generate(),
            date,
            ..self.clone()
        }
    }

    pub fn apply(&mut self, edit: EvaluationEdit) {
        match edit {
            EvaluationEdit::HifzScore(score) => self.hifz_score = score,
            EvaluationEdit::Revision(status) => self.revision_status = status,
            EvaluationEdit::Behavior(rating) => self.behavior_rating = rating,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let score = self.hifz_score;
        if !score.is_finite() || !(MIN_HIFZ_SCORE..=MAX_HIFZ_SCORE).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange(score));
        }
        if (score * 2.0).fract() != 0.0 {
            return Err(ValidationError::ScoreNotHalfStep(score));
        }
        if !(MIN_BEHAVIOR_RATING..=MAX_BEHAVIOR_RATING).contains(&self.behavior_rating) {
            return Err(ValidationError::BehaviorOutOfRange(self.behavior_rating));
        }
        Ok(())
    }

    /// Whether `other` occupies the same `(student_id, date)` slot.
    pub fn same_slot(&self, other: &Evaluation) -> bool {
        self.student_id == other.student_id && self.date == other.date
    }
}
