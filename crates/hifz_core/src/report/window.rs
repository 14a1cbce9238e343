//! Time windows used to pre-filter evaluations.
//!
//! Look-back windows end today and include the boundary day. Month/year
//! subtraction clamps to the last valid day of the target month, so
//! 31 March minus one month is the last day of February.

use crate::model::evaluation::Evaluation;
use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static MONTH_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})-(\d{1,2})\s*$").expect("valid month key regex"));

/// Evaluation selection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    /// From `today - n months` through today, inclusive.
    LastMonths(u32),
    /// From `today - n years` through today, inclusive.
    LastYears(u32),
    /// Every day of one calendar month.
    CalendarMonth { year: i32, month: u32 },
}

/// Report tabs offered by the reporting view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Monthly,
    ThreeMonths,
    NineMonths,
    Yearly,
    Custom { year: i32, month: u32 },
}

impl ReportPeriod {
    /// Custom period preselected for the month containing `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        Self::Custom {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn window(self) -> ReportWindow {
        match self {
            Self::Monthly => ReportWindow::LastMonths(1),
            Self::ThreeMonths => ReportWindow::LastMonths(3),
            Self::NineMonths => ReportWindow::LastMonths(9),
            Self::Yearly => ReportWindow::LastYears(1),
            Self::Custom { year, month } => ReportWindow::CalendarMonth { year, month },
        }
    }
}

impl ReportWindow {
    /// Inclusive `(first, last)` days covered, or `None` for an invalid
    /// calendar month.
    pub fn bounds(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::LastMonths(months) => Some((months_before(today, months), today)),
            Self::LastYears(years) => {
                Some((months_before(today, years.saturating_mul(12)), today))
            }
            Self::CalendarMonth { year, month } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                Some((first, last))
            }
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.bounds(today)
            .is_some_and(|(first, last)| first <= date && date <= last)
    }

    /// Evaluations inside the window, in storage order.
    pub fn filter<'a>(self, evaluations: &'a [Evaluation], today: NaiveDate) -> Vec<&'a Evaluation> {
        let Some((first, last)) = self.bounds(today) else {
            return Vec::new();
        };
        evaluations
            .iter()
            .filter(|evaluation| first <= evaluation.date && evaluation.date <= last)
            .collect()
    }
}

/// Parses a `YYYY-MM` month key into a calendar-month window.
pub fn parse_month_key(value: &str) -> Option<ReportWindow> {
    let captures = MONTH_KEY_RE.captures(value)?;
    let year = captures[1].parse::<i32>().ok()?;
    let month = captures[2].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(ReportWindow::CalendarMonth { year, month })
}

fn months_before(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
