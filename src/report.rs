//! Terminal rendering of the derived analysis structures. Formatting only;
//! every threshold and classification lives in the core.

use std::fmt::Write;

use crate::core::benchmark::Standing;
use crate::core::narrative::{self, StatusColor};
use crate::core::progress::ProgressIndicator;
use crate::core::recommendation::category_glyph;
use crate::services::analysis::AnalysisReport;
use crate::services::backend::BenchmarkStatsResponse;

const BAR_WIDTH: usize = 24;

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn status_marker(color: StatusColor) -> char {
    match color {
        StatusColor::Green => '+',
        StatusColor::Yellow => '~',
        StatusColor::Red => '!',
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "== {title} ==");
}

pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI Analysis (generated at {})", report.generated_at);

    if let Some(indicators) = &report.indicators {
        section(&mut out, "Learning Progress Overview");
        for indicator in indicators {
            render_indicator(&mut out, indicator);
        }
    }

    section(&mut out, "Performance Intelligence");
    let _ = writeln!(
        out,
        "{}",
        narrative::performance_narrative(report.predicted_performance)
    );
    let meter = narrative::score_meter_percent(report.predicted_performance);
    let _ = writeln!(
        out,
        "Performance Score  {}  {:.2} / {:.0}",
        bar(meter),
        report.predicted_performance,
        narrative::PERFORMANCE_SCALE_MAX
    );

    section(&mut out, "Learner Persona");
    let _ = writeln!(out, "{} (Cluster ID: {})", report.persona, report.cluster);
    let _ = writeln!(out, "{}", narrative::persona_narrative(&report.persona));

    section(&mut out, "Key Insight");
    let _ = writeln!(
        out,
        "{}",
        report
            .performance_insight
            .as_deref()
            .unwrap_or("No insights available")
    );
    let gap_status = narrative::login_gap_status(report.input.performance.login_gap_std);
    let _ = writeln!(
        out,
        "  {} Login Consistency: {}",
        status_marker(gap_status.color),
        gap_status.label
    );
    let completion_status =
        narrative::completion_status(report.input.performance.completion_velocity);
    let _ = writeln!(
        out,
        "  {} Completion Rate: {}",
        status_marker(completion_status.color),
        completion_status.label
    );

    if !report.persona_insights.is_empty() {
        section(&mut out, "Personalized Insights");
        for (index, insight) in report.persona_insights.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", index + 1, insight);
        }
    }

    section(&mut out, "Your Learning Stats");
    let features = &report.input.performance;
    let _ = writeln!(
        out,
        "Completion Rate {:.0}%  |  Avg Min/Module {:.0}  |  Login Gap {:.1} days  |  \
         Active Days {:.0}  |  Night Study {:.0}%",
        features.completion_velocity * 100.0,
        features.avg_minutes_per_module,
        features.login_gap_std,
        features.total_active_days,
        features.night_study_ratio * 100.0
    );

    section(&mut out, "Performance Comparison");
    let _ = writeln!(
        out,
        "Your Percentile Rank: {}%  ({})",
        report.percentile, report.performance_level
    );
    if !report.comparison_insights.is_empty() {
        for insight in &report.comparison_insights {
            let _ = writeln!(out, "  - {insight}");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Comparison vs Each Persona:");
    for comparison in &report.comparisons {
        let arrow = match comparison.standing {
            Standing::Higher => '▲',
            Standing::Lower => '▼',
            Standing::Equal => '=',
        };
        let _ = writeln!(
            out,
            "  {} {:<16} benchmark {:.2} vs your {:.2}  {}",
            arrow,
            comparison.persona,
            comparison.benchmark_score,
            comparison.user_score,
            comparison.summary_text()
        );
        if let Some(detail) = comparison.detail_text() {
            let _ = writeln!(out, "      {detail}");
        }
    }

    if !report.recommendations.grouped.is_empty() {
        section(&mut out, "Rekomendasi Actionable");
        let _ = writeln!(
            out,
            "Ikuti rekomendasi di bawah untuk meningkatkan performa belajar kamu"
        );
        for recommendation in &report.recommendations.grouped {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} {} [{}]",
                category_glyph(&recommendation.category),
                recommendation.title,
                recommendation.priority.badge_label()
            );
            if !recommendation.category.is_empty() {
                let _ = writeln!(out, "    Category: {}", recommendation.category);
            }
            if !recommendation.description.is_empty() {
                let _ = writeln!(out, "    {}", recommendation.description);
            }
            if !recommendation.action.is_empty() {
                let _ = writeln!(out, "    Action Plan: {}", recommendation.action);
            }
            if !recommendation.expected_impact.is_empty() {
                let _ = writeln!(out, "    Expected Impact: {}", recommendation.expected_impact);
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Quick Summary: {}", report.recommendations.summary.text());
    }

    out
}

fn render_indicator(out: &mut String, indicator: &ProgressIndicator) {
    let _ = writeln!(
        out,
        "{:<20} {}  {:>5.1}%  {}",
        indicator.kind.label(),
        bar(indicator.percent),
        indicator.percent,
        indicator.tier_message()
    );
}

pub fn render_dashboard(stats: &BenchmarkStatsResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard Overview");

    section(&mut out, "Overall Average Benchmark");
    let _ = writeln!(out, "Across all {} personas", stats.total_personas);
    let average = &stats.overall_average;
    let _ = writeln!(
        out,
        "Avg Activities {:.0}  |  Avg Min/Module {:.0}m  |  Avg Consistency {:.1}/10  |  \
         Weekend Ratio {:.0}%",
        average.avg_activities,
        average.avg_minutes_per_module,
        average.avg_consistency,
        average.avg_weekend_ratio * 100.0
    );

    section(&mut out, "Benchmark by Persona");
    for persona in &stats.benchmark_by_persona {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} (Cluster {})", persona.persona, persona.cluster_id);
        let _ = writeln!(
            out,
            "    Activities {:.0}  |  Minutes/Module {:.0}m  |  Consistency {:.1}/10  |  \
             Weekend Ratio {:.0}%",
            persona.avg_activities,
            persona.avg_minutes_per_module,
            persona.avg_consistency,
            persona.avg_weekend_ratio * 100.0
        );
    }

    out
}
