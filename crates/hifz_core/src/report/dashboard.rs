//! Headline counts and recent activity for the landing view.

use crate::model::database::Database;
use crate::model::evaluation::Evaluation;

const RECENT_ACTIVITY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RecentActivity {
    pub evaluation: Evaluation,
    /// `None` for an evaluation whose student no longer exists.
    pub student_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub student_count: usize,
    pub evaluation_count: usize,
    /// Latest stored entries first.
    pub recent: Vec<RecentActivity>,
}

/// Counts plus the last few evaluations in reverse storage order.
pub fn dashboard_summary(db: &Database) -> DashboardSummary {
    let recent = db
        .evaluations
        .iter()
        .rev()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|evaluation| RecentActivity {
            evaluation: evaluation.clone(),
            student_name: db
                .student(&evaluation.student_id)
                .map(|student| student.name.clone()),
        })
        .collect();

    DashboardSummary {
        student_count: db.students.len(),
        evaluation_count: db.evaluations.len(),
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::dashboard_summary;
    use crate::model::database::Database;
    use crate::model::evaluation::Evaluation;
    use crate::model::student::Student;
    use crate::model::StudentId;
    use chrono::NaiveDate;

    #[test]
    fn recent_activity_is_newest_first_and_capped() {
        let student = Student::with_id(StudentId::from("s"), "Sumayya", 1);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let evaluations = start
            .iter_days()
            .take(5)
            .map(|day| Evaluation::for_day(student.id.clone(), day))
            .collect::<Vec<_>>();
        let db = Database {
            students: vec![student],
            evaluations: evaluations.clone(),
        };

        let summary = dashboard_summary(&db);
        assert_eq!(summary.student_count, 1);
        assert_eq!(summary.evaluation_count, 5);
        assert_eq!(summary.recent.len(), 3);
        assert_eq!(summary.recent[0].evaluation, evaluations[4]);
        assert_eq!(summary.recent[2].evaluation, evaluations[2]);
        assert_eq!(summary.recent[0].student_name.as_deref(), Some("Sumayya"));
    }
}
