//! Guidance heuristic over the most recent evaluations.
//!
//! # Invariants
//! - Pure over a `Database` snapshot; no persistence, no clock.
//! - Categories are checked in priority order: onboarding, insufficient
//!   data, needs intervention, on track.
//! - "Most recent" means the trailing `recent_window` entries after a stable
//!   sort by date; entries on the same date keep storage order.
//! - The average is rounded to one decimal before it is compared with the
//!   threshold, so the message never contradicts the number it shows.

use crate::config::InsightConfig;
use crate::model::database::Database;
use crate::model::evaluation::Evaluation;
use crate::model::locale::Locale;
use crate::report::aggregate::round_one_decimal;

/// Guidance category with the figures its message quotes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guidance {
    /// No students yet.
    Onboarding,
    /// Students exist but nothing has been evaluated.
    InsufficientData,
    /// Recent average is below the intervention threshold.
    NeedsIntervention { average: f64, low_score_count: usize },
    /// Recent average is at or above the threshold.
    OnTrack { average: f64 },
}

/// Summarizes `db` with the default thresholds.
pub fn summarize(db: &Database) -> Guidance {
    summarize_with(db, &InsightConfig::default())
}

pub fn summarize_with(db: &Database, config: &InsightConfig) -> Guidance {
    if db.students.is_empty() {
        return Guidance::Onboarding;
    }

    let recent = most_recent(&db.evaluations, config.recent_window);
    if recent.is_empty() {
        return Guidance::InsufficientData;
    }

    let total: f64 = recent.iter().map(|evaluation| evaluation.hifz_score).sum();
    let average = round_one_decimal(total / recent.len() as f64);

    if average < config.intervention_threshold {
        let low_score_count = recent
            .iter()
            .filter(|evaluation| evaluation.hifz_score <= config.low_score_threshold)
            .count();
        Guidance::NeedsIntervention {
            average,
            low_score_count,
        }
    } else {
        Guidance::OnTrack { average }
    }
}

fn most_recent(evaluations: &[Evaluation], limit: usize) -> Vec<&Evaluation> {
    let mut ordered: Vec<&Evaluation> = evaluations.iter().collect();
    ordered.sort_by_key(|evaluation| evaluation.date);
    let skip = ordered.len().saturating_sub(limit);
    ordered.split_off(skip)
}

impl Guidance {
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::Onboarding, Locale::Arabic) => {
                "ابدأ بإضافة الطلاب لبناء خطة تحفيظ متميزة.".to_string()
            }
            (Self::Onboarding, Locale::English) => {
                "Start by adding students to build a strong memorization plan.".to_string()
            }
            (Self::InsufficientData, Locale::Arabic) => {
                "لا توجد بيانات كافية، استمر بتسجيل التقييمات اليومية.".to_string()
            }
            (Self::InsufficientData, Locale::English) => {
                "Not enough data yet; keep recording daily evaluations.".to_string()
            }
            (
                Self::NeedsIntervention {
                    average,
                    low_score_count,
                },
                Locale::Arabic,
            ) => format!(
                "متوسط الحفظ {average:.1}: ركز على مراجعات قصيرة ومكثفة للطلاب الأضعف ({low_score_count} حالات أخيرة)."
            ),
            (
                Self::NeedsIntervention {
                    average,
                    low_score_count,
                },
                Locale::English,
            ) => format!(
                "Memorization average {average:.1}: focus on short, intensive revision for the weakest students ({low_score_count} recent cases)."
            ),
            (Self::OnTrack { average }, Locale::Arabic) => format!(
                "متوسط الحفظ {average:.1}: استمر في النظام الحالي مع تعزيز المراجعة الدورية."
            ),
            (Self::OnTrack { average }, Locale::English) => format!(
                "Memorization average {average:.1}: keep the current routine and reinforce regular revision."
            ),
        }
    }
}
