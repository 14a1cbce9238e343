//! Daily session sheet: who was evaluated on one date.

use crate::model::database::Database;
use crate::model::evaluation::Evaluation;
use crate::model::StudentId;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub student_id: StudentId,
    pub student_name: String,
    /// `None` while the student is still pending for the day.
    pub evaluation: Option<Evaluation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub date: NaiveDate,
    pub rows: Vec<SessionRow>,
}

impl SessionReport {
    pub fn evaluated_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.evaluation.is_some())
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.rows.len() - self.evaluated_count()
    }
}

/// One row per student in display order with that day's evaluation.
pub fn session_report(db: &Database, date: NaiveDate) -> SessionReport {
    let rows = db
        .students
        .iter()
        .map(|student| SessionRow {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            evaluation: db
                .evaluation_position(&student.id, date)
                .map(|position| db.evaluations[position].clone()),
        })
        .collect();

    SessionReport { date, rows }
}
