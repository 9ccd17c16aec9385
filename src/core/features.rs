use serde::{Deserialize, Serialize};

/// Full feature set sent to the performance model. Field names are the wire
/// contract and must match the backend bit-exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceFeatures {
    pub completion_velocity: f64,
    pub avg_minutes_per_module: f64,
    pub login_gap_std: f64,
    pub weekend_ratio: f64,
    pub night_study_ratio: f64,
    pub study_time_category: f64,
    pub total_active_days: f64,
}

/// Five-field subset sent to the clustering model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringFeatures {
    pub completion_velocity: f64,
    pub avg_minutes_per_module: f64,
    pub login_gap_std: f64,
    pub weekend_ratio: f64,
    pub night_study_ratio: f64,
}

impl From<&PerformanceFeatures> for ClusteringFeatures {
    fn from(features: &PerformanceFeatures) -> Self {
        Self {
            completion_velocity: features.completion_velocity,
            avg_minutes_per_module: features.avg_minutes_per_module,
            login_gap_std: features.login_gap_std,
            weekend_ratio: features.weekend_ratio,
            night_study_ratio: features.night_study_ratio,
        }
    }
}

/// A partially filled feature form. Empty or unparseable entries stay absent,
/// which is a valid state while the user is still typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureDraft {
    pub completion_velocity: Option<f64>,
    pub avg_minutes_per_module: Option<f64>,
    pub login_gap_std: Option<f64>,
    pub weekend_ratio: Option<f64>,
    pub night_study_ratio: Option<f64>,
    pub study_time_category: Option<f64>,
    pub total_active_days: Option<f64>,
}

impl FeatureDraft {
    /// Assign one named field from raw text. Unknown names are ignored so a
    /// form with extra inputs does not break the draft.
    pub fn set(&mut self, name: &str, raw: &str) {
        let value = parse_decimal(raw);
        match name {
            "completion_velocity" => self.completion_velocity = value,
            "avg_minutes_per_module" => self.avg_minutes_per_module = value,
            "login_gap_std" => self.login_gap_std = value,
            "weekend_ratio" => self.weekend_ratio = value,
            "night_study_ratio" => self.night_study_ratio = value,
            "study_time_category" => self.study_time_category = value,
            "total_active_days" => self.total_active_days = value,
            _ => {}
        }
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut draft = Self::default();
        for (name, raw) in entries {
            draft.set(name, raw);
        }
        draft
    }
}

impl From<&PerformanceFeatures> for FeatureDraft {
    fn from(features: &PerformanceFeatures) -> Self {
        Self {
            completion_velocity: Some(features.completion_velocity),
            avg_minutes_per_module: Some(features.avg_minutes_per_module),
            login_gap_std: Some(features.login_gap_std),
            weekend_ratio: Some(features.weekend_ratio),
            night_study_ratio: Some(features.night_study_ratio),
            study_time_category: Some(features.study_time_category),
            total_active_days: Some(features.total_active_days),
        }
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_parses_decimal_fields() {
        let mut draft = FeatureDraft::default();
        draft.set("completion_velocity", "0.8");
        draft.set("login_gap_std", " 1.5 ");
        assert_eq!(draft.completion_velocity, Some(0.8));
        assert_eq!(draft.login_gap_std, Some(1.5));
    }

    #[test]
    fn test_set_keeps_unparseable_absent() {
        let mut draft = FeatureDraft::default();
        draft.set("completion_velocity", "");
        draft.set("login_gap_std", "abc");
        assert_eq!(draft.completion_velocity, None);
        assert_eq!(draft.login_gap_std, None);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut draft = FeatureDraft::default();
        draft.set("quiz_average", "4.2");
        assert_eq!(draft, FeatureDraft::default());
    }

    #[test]
    fn test_from_entries_collects_form_state() {
        let draft = FeatureDraft::from_entries([
            ("completion_velocity", "0.75"),
            ("avg_minutes_per_module", "20"),
            ("login_gap_std", ""),
            ("night_study_ratio", "0.25"),
        ]);
        assert_eq!(draft.completion_velocity, Some(0.75));
        assert_eq!(draft.avg_minutes_per_module, Some(20.0));
        assert_eq!(draft.login_gap_std, None);
        assert_eq!(draft.night_study_ratio, Some(0.25));
    }

    #[test]
    fn test_draft_from_full_features_is_complete() {
        let features = PerformanceFeatures {
            completion_velocity: 0.75,
            avg_minutes_per_module: 20.0,
            login_gap_std: 2.5,
            weekend_ratio: 0.3,
            night_study_ratio: 0.25,
            study_time_category: 2.0,
            total_active_days: 15.0,
        };
        let draft = FeatureDraft::from(&features);
        assert_eq!(draft.completion_velocity, Some(0.75));
        assert_eq!(draft.total_active_days, Some(15.0));
    }
}
