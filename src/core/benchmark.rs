use serde::{Deserialize, Serialize};

/// Band inside which a user score counts as equal to a benchmark, so
/// floating-point noise never flips the direction arrow.
pub const SCORE_EPSILON: f64 = 0.01;

/// A persona's average profile used as a comparison baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaBenchmark {
    pub persona: String,
    pub benchmark_score: f64,
    pub avg_activities: f64,
    pub avg_minutes_per_module: f64,
    pub avg_consistency: f64,
    pub avg_weekend_ratio: f64,
}

impl PersonaBenchmark {
    /// Benchmark known only by its score, as delivered on the comparison
    /// payload where the auxiliary averages are not included.
    pub fn scored(persona: impl Into<String>, benchmark_score: f64) -> Self {
        Self {
            persona: persona.into(),
            benchmark_score,
            avg_activities: 0.0,
            avg_minutes_per_module: 0.0,
            avg_consistency: 0.0,
            avg_weekend_ratio: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Higher,
    Lower,
    Equal,
}

impl Standing {
    pub fn classify(delta: f64) -> Self {
        if delta.abs() < SCORE_EPSILON {
            Self::Equal
        } else if delta > SCORE_EPSILON {
            Self::Higher
        } else {
            Self::Lower
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Higher => "higher",
            Self::Lower => "lower",
            Self::Equal => "equal",
        }
    }
}

/// Directional comparison of the user's score against one persona benchmark.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub persona: String,
    pub user_score: f64,
    pub benchmark_score: f64,
    pub delta: f64,
    pub percent_delta: f64,
    pub standing: Standing,
}

impl ComparisonResult {
    pub fn against(user_score: f64, benchmark: &PersonaBenchmark) -> Self {
        let delta = user_score - benchmark.benchmark_score;
        let percent_delta = if benchmark.benchmark_score != 0.0 {
            delta / benchmark.benchmark_score * 100.0
        } else {
            0.0
        };

        Self {
            persona: benchmark.persona.clone(),
            user_score,
            benchmark_score: benchmark.benchmark_score,
            delta,
            percent_delta,
            standing: Standing::classify(delta),
        }
    }

    /// Headline shown next to the direction arrow. The magnitude is always
    /// non-negative regardless of direction.
    pub fn summary_text(&self) -> String {
        match self.standing {
            Standing::Higher => format!("Lebih tinggi {:.0}%", self.percent_delta.abs()),
            Standing::Lower => format!("Masih {:.0}% di bawah", self.percent_delta.abs()),
            Standing::Equal => "Setara dengan benchmark".to_string(),
        }
    }

    pub fn detail_text(&self) -> Option<String> {
        match self.standing {
            Standing::Higher => Some(format!("Kamu lebih baik dari {}!", self.persona)),
            Standing::Lower => Some("Ikuti rekomendasi untuk mencapai level ini".to_string()),
            Standing::Equal => None,
        }
    }
}

/// Compare the user's score against every benchmark, preserving input order.
/// Benchmarks are independent of each other; no ranking is applied.
pub fn compare(user_score: f64, benchmarks: &[PersonaBenchmark]) -> Vec<ComparisonResult> {
    benchmarks
        .iter()
        .map(|benchmark| ComparisonResult::against(user_score, benchmark))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_equal() {
        let results = compare(3.2, &[PersonaBenchmark::scored("The Consistent", 3.2)]);
        assert_eq!(results[0].standing, Standing::Equal);
        assert_eq!(results[0].summary_text(), "Setara dengan benchmark");
    }

    #[test]
    fn test_epsilon_band_is_equal() {
        let results = compare(3.205, &[PersonaBenchmark::scored("The Sprinter", 3.2)]);
        assert_eq!(results[0].standing, Standing::Equal);
    }

    #[test]
    fn test_just_outside_epsilon_classifies_directionally() {
        let higher = compare(3.22, &[PersonaBenchmark::scored("The Warrior", 3.2)]);
        assert_eq!(higher[0].standing, Standing::Higher);

        let lower = compare(3.18, &[PersonaBenchmark::scored("The Warrior", 3.2)]);
        assert_eq!(lower[0].standing, Standing::Lower);
    }

    #[test]
    fn test_reference_scenario() {
        let results = compare(3.0, &[PersonaBenchmark::scored("The Consistent", 2.5)]);
        let result = &results[0];
        assert!((result.delta - 0.5).abs() < 1e-9);
        assert!((result.percent_delta - 20.0).abs() < 1e-9);
        assert_eq!(result.standing, Standing::Higher);
        assert_eq!(result.summary_text(), "Lebih tinggi 20%");
        assert_eq!(
            result.detail_text().as_deref(),
            Some("Kamu lebih baik dari The Consistent!")
        );
    }

    #[test]
    fn test_lower_reports_positive_magnitude() {
        let results = compare(2.0, &[PersonaBenchmark::scored("The Consistent", 2.5)]);
        let result = &results[0];
        assert!(result.delta < 0.0);
        assert!(result.percent_delta < 0.0);
        assert_eq!(result.summary_text(), "Masih 20% di bawah");
    }

    #[test]
    fn test_zero_benchmark_has_zero_percent_delta() {
        let results = compare(1.0, &[PersonaBenchmark::scored("Unknown", 0.0)]);
        assert_eq!(results[0].percent_delta, 0.0);
        assert_eq!(results[0].standing, Standing::Higher);
    }

    #[test]
    fn test_aux_metrics_do_not_affect_standing() {
        let benchmark = PersonaBenchmark {
            persona: "The Consistent".to_string(),
            benchmark_score: 2.5,
            avg_activities: 120.0,
            avg_minutes_per_module: 22.0,
            avg_consistency: 7.8,
            avg_weekend_ratio: 0.3,
        };
        let results = compare(3.0, &[benchmark]);
        assert_eq!(results[0].standing, Standing::Higher);
        assert!((results[0].percent_delta - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_input_order_is_preserved() {
        let benchmarks = vec![
            PersonaBenchmark::scored("The Warrior", 3.4),
            PersonaBenchmark::scored("The Consistent", 2.5),
            PersonaBenchmark::scored("The Sprinter", 2.9),
        ];
        let results = compare(3.0, &benchmarks);
        let personas: Vec<&str> = results.iter().map(|r| r.persona.as_str()).collect();
        assert_eq!(
            personas,
            vec!["The Warrior", "The Consistent", "The Sprinter"]
        );
    }
}
