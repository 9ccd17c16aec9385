use serde::{Deserialize, Serialize};

/// Priority bucket carried on each recommendation record. The wire value is a
/// free-form string from an external service, so anything unrecognized lands
/// in `Other` instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other,
}

impl Priority {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other => "other",
        }
    }

    pub fn badge_label(&self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Medium => "Medium",
            Self::Low => "Low Priority",
            Self::Other => "General",
        }
    }

    /// Display color token for the badge; renderers map it to their palette.
    pub fn accent(&self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Medium => "yellow",
            Self::Low => "green",
            Self::Other => "gray",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Other
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// One actionable recommendation as delivered by the insight payload. The
/// core never invents field values; missing ones default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub expected_impact: String,
}

/// Glyph shown beside the category name, with a generic fallback for
/// categories this build does not know about.
pub fn category_glyph(category: &str) -> char {
    match category {
        "Completion Rate" => '◆',
        "Consistency" => '●',
        "Study Time" => '◔',
        "Schedule" => '▦',
        "Persona" => '◉',
        "Overall" => '▲',
        _ => '▸',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationSummary {
    pub total_count: usize,
    pub high_priority_count: usize,
}

impl RecommendationSummary {
    pub fn text(&self) -> String {
        format!(
            "Kamu mendapat {} rekomendasi personalized. Fokus pada {} rekomendasi \
             prioritas tinggi untuk hasil maksimal dalam 2-4 minggu ke depan!",
            self.total_count, self.high_priority_count
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PrioritizedRecommendations {
    pub grouped: Vec<Recommendation>,
    pub summary: RecommendationSummary,
}

/// Classify recommendations into their priority buckets and derive the
/// summary counts. The input order is kept as received; rendering iterates
/// in that order.
pub fn prioritize(recommendations: &[Recommendation]) -> PrioritizedRecommendations {
    let summary = RecommendationSummary {
        total_count: recommendations.len(),
        high_priority_count: recommendations
            .iter()
            .filter(|r| r.priority.is_high())
            .count(),
    };

    PrioritizedRecommendations {
        grouped: recommendations.to_vec(),
        summary,
    }
}
