//! Daily evaluation use-cases.
//!
//! # Invariants
//! - Every write goes through `EvaluationRepository::upsert_evaluation`, so
//!   the one-per-day rule holds for all paths.
//! - `repeat_last` without a prior evaluation writes nothing.

use crate::model::evaluation::{Evaluation, EvaluationEdit};
use crate::model::StudentId;
use crate::repo::evaluation_repo::EvaluationRepository;
use crate::repo::RepoResult;
use crate::store::DatabaseStore;
use chrono::NaiveDate;
use log::info;

/// Result of copying a student's latest evaluation onto a new day.
#[derive(Debug, Clone, PartialEq)]
pub enum RepeatOutcome {
    Repeated(Evaluation),
    /// The student has no evaluation to copy; nothing was written.
    NoPriorEvaluation,
}

pub struct EvaluationService<'s, S: DatabaseStore> {
    repo: EvaluationRepository<'s, S>,
}

impl<'s, S: DatabaseStore> EvaluationService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            repo: EvaluationRepository::new(store),
        }
    }

    /// Changes one field of the day's evaluation, starting from the default
    /// record when the day has none yet, and saves it immediately.
    pub fn edit_for_day(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
        edit: EvaluationEdit,
    ) -> RepoResult<Evaluation> {
        let mut evaluation = self
            .repo
            .get_evaluation(student_id, date)
            .unwrap_or_else(|| Evaluation::for_day(student_id.clone(), date));
        evaluation.apply(edit);

        self.repo.upsert_evaluation(&evaluation)?;
        Ok(evaluation)
    }

    /// Copies the student's latest evaluation onto `date` with a fresh id.
    pub fn repeat_last(&self, student_id: &StudentId, date: NaiveDate) -> RepoResult<RepeatOutcome> {
        let Some(last) = self.repo.get_last_evaluation(student_id) else {
            info!("event=evaluation_repeat module=service status=noop reason=no_prior");
            return Ok(RepeatOutcome::NoPriorEvaluation);
        };

        let repeated = last.repeated_on(date);
        self.repo.upsert_evaluation(&repeated)?;
        Ok(RepeatOutcome::Repeated(repeated))
    }

    /// The day's evaluations in storage order.
    pub fn evaluations_on(&self, date: NaiveDate) -> Vec<Evaluation> {
        self.repo.get_evaluations_by_date(date)
    }

    pub fn history(&self, student_id: &StudentId) -> Vec<Evaluation> {
        self.repo.evaluations_for_student(student_id)
    }
}
