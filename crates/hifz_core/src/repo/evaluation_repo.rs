//! Evaluation persistence operations.
//!
//! # Invariants
//! - `upsert_evaluation` keeps at most one record per `(student_id, date)`.
//! - A replaced record keeps its original storage position.

use super::RepoResult;
use crate::model::evaluation::Evaluation;
use crate::model::StudentId;
use crate::store::DatabaseStore;
use chrono::NaiveDate;
use log::info;

/// How an upsert landed in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertMode {
    Inserted,
    Replaced,
}

impl UpsertMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "insert",
            Self::Replaced => "replace",
        }
    }
}

/// Evaluation repository bound to one store handle.
pub struct EvaluationRepository<'s, S: DatabaseStore> {
    store: &'s S,
}

impl<'s, S: DatabaseStore> EvaluationRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Inserts or replaces the evaluation keyed by `(student_id, date)`.
    pub fn upsert_evaluation(&self, evaluation: &Evaluation) -> RepoResult<UpsertMode> {
        evaluation.validate()?;

        let mut db = self.store.load();
        let mode = match db.evaluation_position(&evaluation.student_id, evaluation.date) {
            Some(position) => {
                db.evaluations[position] = evaluation.clone();
                UpsertMode::Replaced
            }
            None => {
                db.evaluations.push(evaluation.clone());
                UpsertMode::Inserted
            }
        };
        self.store.save(&db)?;

        info!(
            "event=evaluation_upsert module=repo status=ok mode={} evaluations={}",
            mode.as_str(),
            db.evaluations.len()
        );
        Ok(mode)
    }

    /// Evaluations recorded on exactly `date`, in storage order.
    pub fn get_evaluations_by_date(&self, date: NaiveDate) -> Vec<Evaluation> {
        let mut evaluations = self.store.load().evaluations;
        evaluations.retain(|evaluation| evaluation.date == date);
        evaluations
    }

    /// The student's evaluation with the latest date, if any.
    pub fn get_last_evaluation(&self, student_id: &StudentId) -> Option<Evaluation> {
        let db = self.store.load();
        db.evaluations_of(student_id)
            .max_by_key(|evaluation| evaluation.date)
            .cloned()
    }

    /// The evaluation occupying `(student_id, date)`, if any.
    pub fn get_evaluation(&self, student_id: &StudentId, date: NaiveDate) -> Option<Evaluation> {
        let mut db = self.store.load();
        db.evaluation_position(student_id, date)
            .map(|position| db.evaluations.swap_remove(position))
    }

    /// All evaluations of one student, in storage order.
    pub fn evaluations_for_student(&self, student_id: &StudentId) -> Vec<Evaluation> {
        let db = self.store.load();
        db.evaluations_of(student_id).cloned().collect()
    }

    /// Every stored evaluation, in storage order.
    pub fn list_evaluations(&self) -> Vec<Evaluation> {
        self.store.load().evaluations
    }
}
