//! Aggregate root holding every persisted record.
//!
//! # Invariants
//! - `students` order is display order.
//! - Every evaluation references a student in `students`, except inside a
//!   cascading delete before it completes.
//! - No two evaluations share a `(student_id, date)` pair.

use super::evaluation::Evaluation;
use super::student::Student;
use super::{StudentId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub students: Vec<Student>,
    pub evaluations: Vec<Evaluation>,
}

impl Database {
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.evaluations.is_empty()
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|student| &student.id == id)
    }

    pub(crate) fn student_mut(&mut self, id: &StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|student| &student.id == id)
    }

    /// Storage position of the evaluation for `student_id` on `date`.
    pub fn evaluation_position(&self, student_id: &StudentId, date: NaiveDate) -> Option<usize> {
        self.evaluations
            .iter()
            .position(|evaluation| &evaluation.student_id == student_id && evaluation.date == date)
    }

    /// Evaluations of one student, in storage order.
    pub fn evaluations_of<'a>(
        &'a self,
        student_id: &'a StudentId,
    ) -> impl Iterator<Item = &'a Evaluation> + 'a {
        self.evaluations
            .iter()
            .filter(move |evaluation| &evaluation.student_id == student_id)
    }

    /// Checks every record plus cross-record invariants.
    ///
    /// Orphaned evaluations are tolerated: the store never produces them, but
    /// hand-edited blobs may, and they are harmless to aggregation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut student_ids = HashSet::with_capacity(self.students.len());
        for student in &self.students {
            student.validate()?;
            if !student_ids.insert(&student.id) {
                return Err(ValidationError::DuplicateStudentId(student.id.clone()));
            }
        }

        let mut slots = HashSet::with_capacity(self.evaluations.len());
        for evaluation in &self.evaluations {
            evaluation.validate()?;
            if !slots.insert((&evaluation.student_id, evaluation.date)) {
                return Err(ValidationError::DuplicateEvaluation {
                    student_id: evaluation.student_id.clone(),
                    date: evaluation.date,
                });
            }
        }

        Ok(())
    }
}
