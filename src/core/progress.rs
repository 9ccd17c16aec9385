use serde::Serialize;

use crate::core::features::FeatureDraft;

const EXCELLENT_PERCENT: f64 = 80.0;
const GOOD_PERCENT: f64 = 50.0;

const CONSISTENCY_WINDOW_DAYS: f64 = 7.0;
const TARGET_MINUTES_PER_MODULE: f64 = 60.0;
const TARGET_ACTIVE_DAYS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorKind {
    Completion,
    Consistency,
    StudyTime,
    ActiveDays,
    NightStudy,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Consistency => "consistency",
            Self::StudyTime => "studyTime",
            Self::ActiveDays => "activeDays",
            Self::NightStudy => "nightStudy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Completion => "Completion Velocity",
            Self::Consistency => "Login Consistency",
            Self::StudyTime => "Avg Minutes/Module",
            Self::ActiveDays => "Active Days",
            Self::NightStudy => "Night Study Ratio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorTier {
    Excellent,
    Good,
    NeedsAttention,
}

impl IndicatorTier {
    /// Uniform three-tier split on the normalized percent.
    pub fn for_percent(percent: f64) -> Self {
        if percent >= EXCELLENT_PERCENT {
            Self::Excellent
        } else if percent >= GOOD_PERCENT {
            Self::Good
        } else {
            Self::NeedsAttention
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsAttention => "needs_attention",
        }
    }
}

/// One normalized 0-100 progress value derived from a single raw feature.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressIndicator {
    pub kind: IndicatorKind,
    pub raw_value: f64,
    pub percent: f64,
    pub tier: IndicatorTier,
}

impl ProgressIndicator {
    fn new(kind: IndicatorKind, raw_value: f64, percent: f64) -> Self {
        let percent = percent.clamp(0.0, 100.0);
        Self {
            kind,
            raw_value,
            percent,
            tier: IndicatorTier::for_percent(percent),
        }
    }

    pub fn tier_message(&self) -> &'static str {
        match (self.kind, self.tier) {
            (IndicatorKind::Completion, IndicatorTier::Excellent) => "Excellent completion rate!",
            (IndicatorKind::Completion, IndicatorTier::Good) => "Good progress, keep it up!",
            (IndicatorKind::Completion, IndicatorTier::NeedsAttention) => {
                "Focus on completing more tasks"
            }
            (IndicatorKind::Consistency, IndicatorTier::Excellent) => {
                "Very consistent login pattern!"
            }
            (IndicatorKind::Consistency, IndicatorTier::Good) => "Good consistency!",
            (IndicatorKind::Consistency, IndicatorTier::NeedsAttention) => {
                "Work on regular login habits"
            }
            (IndicatorKind::StudyTime, IndicatorTier::Excellent) => "Deep learning approach!",
            (IndicatorKind::StudyTime, IndicatorTier::Good) => "Balanced study time",
            (IndicatorKind::StudyTime, IndicatorTier::NeedsAttention) => {
                "Quick learner or needs more focus?"
            }
            (IndicatorKind::ActiveDays, IndicatorTier::Excellent) => "Active almost every day!",
            (IndicatorKind::ActiveDays, IndicatorTier::Good) => "Solid attendance this month",
            (IndicatorKind::ActiveDays, IndicatorTier::NeedsAttention) => {
                "Try to log in more days"
            }
            (IndicatorKind::NightStudy, IndicatorTier::Excellent) => "Night owl learner!",
            (IndicatorKind::NightStudy, IndicatorTier::Good) => "Balanced schedule",
            (IndicatorKind::NightStudy, IndicatorTier::NeedsAttention) => "Day time focused!",
        }
    }
}

/// Derive the five progress indicators from a feature draft.
///
/// Returns `None` while `login_gap_std` or `completion_velocity` is still
/// absent; the caller should render nothing rather than a partial set.
/// Other missing fields behave as 0.
pub fn normalize(draft: &FeatureDraft) -> Option<Vec<ProgressIndicator>> {
    let completion_velocity = draft.completion_velocity?;
    let login_gap_std = draft.login_gap_std?;

    let avg_minutes = draft.avg_minutes_per_module.unwrap_or(0.0);
    let active_days = draft.total_active_days.unwrap_or(0.0);
    let night_ratio = draft.night_study_ratio.unwrap_or(0.0);

    Some(vec![
        ProgressIndicator::new(
            IndicatorKind::Completion,
            completion_velocity,
            completion_velocity * 100.0,
        ),
        ProgressIndicator::new(
            IndicatorKind::Consistency,
            login_gap_std,
            (CONSISTENCY_WINDOW_DAYS - login_gap_std) / CONSISTENCY_WINDOW_DAYS * 100.0,
        ),
        ProgressIndicator::new(
            IndicatorKind::StudyTime,
            avg_minutes,
            avg_minutes / TARGET_MINUTES_PER_MODULE * 100.0,
        ),
        ProgressIndicator::new(
            IndicatorKind::ActiveDays,
            active_days,
            active_days / TARGET_ACTIVE_DAYS * 100.0,
        ),
        ProgressIndicator::new(IndicatorKind::NightStudy, night_ratio, night_ratio * 100.0),
    ])
}
