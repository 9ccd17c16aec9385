use serde::Serialize;

/// Upper bound of the backend's performance score scale.
pub const PERFORMANCE_SCALE_MAX: f64 = 5.0;

const OUTSTANDING_SCORE: f64 = 3.5;
const SOLID_SCORE: f64 = 2.5;

/// Narrative copy for the performance card, tiered on the predicted score.
pub fn performance_narrative(score: f64) -> &'static str {
    if score > OUTSTANDING_SCORE {
        "Outstanding performance with consistent high-quality learning patterns. \
         You're excelling across all metrics."
    } else if score > SOLID_SCORE {
        "Solid performance showing good learning habits. There's room to push \
         yourself to the next level."
    } else {
        "Your learning journey is just beginning. Focus on building consistent \
         study habits for better results."
    }
}

/// Fixed copy per known persona label; anything else gets the generic line.
pub fn persona_narrative(persona: &str) -> &'static str {
    match persona {
        "The Consistent" => {
            "You demonstrate remarkable consistency in your learning patterns, \
             building a solid foundation through regular practice."
        }
        "The Sprinter" => {
            "You're a fast learner who quickly grasps new concepts. Your speed is \
             impressive, focus on depth for even better results."
        }
        "The Warrior" => {
            "You tackle challenges head-on with high energy and determination. \
             Your persistence in difficult materials sets you apart."
        }
        _ => "Your unique learning style shows potential for growth across multiple dimensions.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
}

/// A colored quick-status band shown beside the key insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStatus {
    pub label: &'static str,
    pub color: StatusColor,
}

/// Login-gap band: a tighter gap between logins is better.
pub fn login_gap_status(login_gap_std: f64) -> QuickStatus {
    if login_gap_std <= 1.5 {
        QuickStatus {
            label: "Excellent",
            color: StatusColor::Green,
        }
    } else if login_gap_std <= 2.5 {
        QuickStatus {
            label: "Good",
            color: StatusColor::Yellow,
        }
    } else {
        QuickStatus {
            label: "Needs Work",
            color: StatusColor::Red,
        }
    }
}

pub fn completion_status(completion_velocity: f64) -> QuickStatus {
    if completion_velocity >= 0.8 {
        QuickStatus {
            label: "High",
            color: StatusColor::Green,
        }
    } else if completion_velocity >= 0.6 {
        QuickStatus {
            label: "Medium",
            color: StatusColor::Yellow,
        }
    } else {
        QuickStatus {
            label: "Low",
            color: StatusColor::Red,
        }
    }
}

/// Fill percent of the score meter under the performance card.
pub fn score_meter_percent(score: f64) -> f64 {
    (score / PERFORMANCE_SCALE_MAX * 100.0).clamp(0.0, 100.0)
}
