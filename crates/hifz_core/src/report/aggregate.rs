//! Per-student averages over a window of evaluations.

use super::window::ReportWindow;
use crate::model::database::Database;
use crate::model::evaluation::Evaluation;
use crate::model::StudentId;
use chrono::NaiveDate;

/// Means and count for one student. Means are unrounded; use the
/// `display_*` accessors for one-decimal presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StudentAggregate {
    pub mean_hifz: f64,
    pub mean_behavior: f64,
    pub count: usize,
}

impl StudentAggregate {
    pub fn has_data(&self) -> bool {
        self.count > 0
    }

    pub fn display_hifz(&self) -> f64 {
        round_one_decimal(self.mean_hifz)
    }

    pub fn display_behavior(&self) -> f64 {
        round_one_decimal(self.mean_behavior)
    }
}

/// One row of a windowed class report, in student display order.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReportRow {
    pub student_id: StudentId,
    pub student_name: String,
    pub aggregate: StudentAggregate,
}

/// Windowed report over every student.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    pub window: ReportWindow,
    pub rows: Vec<StudentReportRow>,
    /// Evaluations that fell inside the window, across all students.
    pub evaluation_count: usize,
}

/// Bar-chart input: short student label and rounded mean score.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub mean_hifz: f64,
}

/// Averages the evaluations in `evaluations` that belong to `student_id`.
pub fn aggregate<'a, I>(evaluations: I, student_id: &StudentId) -> StudentAggregate
where
    I: IntoIterator<Item = &'a Evaluation>,
{
    let mut hifz_sum = 0.0;
    let mut behavior_sum = 0.0;
    let mut count = 0usize;

    for evaluation in evaluations {
        if &evaluation.student_id != student_id {
            continue;
        }
        hifz_sum += evaluation.hifz_score;
        behavior_sum += f64::from(evaluation.behavior_rating);
        count += 1;
    }

    if count == 0 {
        return StudentAggregate::default();
    }

    let denominator = count as f64;
    StudentAggregate {
        mean_hifz: hifz_sum / denominator,
        mean_behavior: behavior_sum / denominator,
        count,
    }
}

/// Filters by `window` once, then aggregates per student.
pub fn window_report(db: &Database, window: ReportWindow, today: NaiveDate) -> WindowReport {
    let in_window = window.filter(&db.evaluations, today);
    let rows = db
        .students
        .iter()
        .map(|student| StudentReportRow {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            aggregate: aggregate(in_window.iter().copied(), &student.id),
        })
        .collect();

    WindowReport {
        window,
        rows,
        evaluation_count: in_window.len(),
    }
}

impl WindowReport {
    pub fn is_empty(&self) -> bool {
        self.evaluation_count == 0
    }

    /// Chart series labelled by the first word of each student's name.
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.rows
            .iter()
            .map(|row| ChartPoint {
                label: row
                    .student_name
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                mean_hifz: row.aggregate.display_hifz(),
            })
            .collect()
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::{aggregate, round_one_decimal, window_report};
    use crate::model::database::Database;
    use crate::model::evaluation::{Evaluation, EvaluationEdit};
    use crate::model::student::Student;
    use crate::model::StudentId;
    use crate::report::window::ReportWindow;
    use chrono::NaiveDate;

    fn scored(student: &str, date: &str, score: f64, behavior: u8) -> Evaluation {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let mut evaluation = Evaluation::for_day(StudentId::from(student), date);
        evaluation.apply(EvaluationEdit::HifzScore(score));
        evaluation.apply(EvaluationEdit::Behavior(behavior));
        evaluation
    }

    #[test]
    fn mean_of_six_eight_ten_is_eight() {
        let evaluations = vec![
            scored("a", "2024-01-01", 6.0, 3),
            scored("a", "2024-01-02", 8.0, 4),
            scored("b", "2024-01-02", 1.0, 1),
            scored("a", "2024-01-03", 10.0, 4),
        ];

        let result = aggregate(&evaluations, &StudentId::from("a"));
        assert_eq!(result.mean_hifz, 8.0);
        assert_eq!(result.count, 3);
        assert_eq!(result.display_behavior(), 3.7);
    }

    #[test]
    fn student_without_evaluations_gets_zero_result() {
        let evaluations = vec![scored("a", "2024-01-01", 6.0, 3)];
        let result = aggregate(&evaluations, &StudentId::from("nobody"));
        assert!(!result.has_data());
        assert_eq!(result.mean_hifz, 0.0);
        assert_eq!(result.mean_behavior, 0.0);
    }

    #[test]
    fn window_report_keeps_student_order_and_labels_chart() {
        let db = Database {
            students: vec![
                Student::with_id(StudentId::from("b"), "Bilal Ahmed", 1),
                Student::with_id(StudentId::from("a"), "Amina", 2),
            ],
            evaluations: vec![
                scored("a", "2024-05-20", 7.0, 5),
                scored("a", "2024-03-01", 1.0, 1),
                scored("b", "2024-06-01", 9.5, 4),
            ],
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let report = window_report(&db, ReportWindow::LastMonths(1), today);
        assert_eq!(report.evaluation_count, 2);
        assert_eq!(report.rows[0].student_id, StudentId::from("b"));
        assert_eq!(report.rows[1].aggregate.count, 1);

        let chart = report.chart_series();
        assert_eq!(chart[0].label, "Bilal");
        assert_eq!(chart[0].mean_hifz, 9.5);
        assert_eq!(chart[1].mean_hifz, 7.0);
    }

    #[test]
    fn rounding_matches_one_decimal_display() {
        assert_eq!(round_one_decimal(4.96), 5.0);
        assert_eq!(round_one_decimal(4.94), 4.9);
        assert_eq!(round_one_decimal(8.0), 8.0);
    }
}
