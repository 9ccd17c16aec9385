//! End-to-end report assembly from already-deserialized backend payloads.
//! Exercises the wire contract (exact field names) and the derived values
//! the renderer consumes, without any network.

use persona_insight::core::benchmark::Standing;
use persona_insight::core::features::PerformanceFeatures;
use persona_insight::core::progress::{IndicatorKind, IndicatorTier};
use persona_insight::core::recommendation::Priority;
use persona_insight::services::analysis::{build_report, AnalysisBundle, AnalysisInput};
use persona_insight::services::backend::{
    ComparisonResponse, InsightResponse, PerformancePrediction, PersonaPrediction,
};

fn reference_features() -> PerformanceFeatures {
    PerformanceFeatures {
        completion_velocity: 0.8,
        avg_minutes_per_module: 30.0,
        login_gap_std: 1.5,
        weekend_ratio: 0.3,
        night_study_ratio: 0.2,
        study_time_category: 2.0,
        total_active_days: 20.0,
    }
}

fn reference_bundle() -> AnalysisBundle {
    let performance: PerformancePrediction =
        serde_json::from_str(r#"{"predicted_performance": 3.0}"#).unwrap();

    let persona: PersonaPrediction =
        serde_json::from_str(r#"{"persona": "The Consistent", "cluster": 0}"#).unwrap();

    let insight: InsightResponse = serde_json::from_str(
        r#"{
            "insights": {
                "performance_based": "Performa belajar kamu sangat baik.",
                "persona_based": [
                    "Kamu memiliki pola belajar yang sangat stabil dan teratur.",
                    "Kedisiplinan kamu adalah kekuatan utama dalam pembelajaran."
                ]
            },
            "recommendations": [
                {
                    "category": "Completion Rate",
                    "priority": "high",
                    "title": "Tingkatkan Kecepatan Penyelesaian",
                    "description": "Kecepatan penyelesaian tugas masih rendah.",
                    "action": "Buat target harian untuk menyelesaikan minimal 2-3 modul per hari",
                    "expected_impact": "Dapat meningkatkan completion velocity hingga 40%"
                },
                {
                    "category": "Schedule",
                    "priority": "low",
                    "title": "Pola Waktu Belajar Baik",
                    "description": "Kamu belajar di waktu yang optimal untuk fokus.",
                    "action": "Pertahankan pola ini dan manfaatkan peak energy hours",
                    "expected_impact": "Mempertahankan produktivitas optimal"
                },
                {
                    "category": "Overall",
                    "priority": "high",
                    "title": "Action Plan untuk Improvement",
                    "description": "Performa kamu perlu ditingkatkan secara menyeluruh.",
                    "action": "Fokus pada 2-3 rekomendasi prioritas tinggi di atas",
                    "expected_impact": "Peningkatan performa hingga 50% dalam 1 bulan"
                }
            ]
        }"#,
    )
    .unwrap();

    let comparison: ComparisonResponse = serde_json::from_str(
        r#"{
            "user_performance": 3.0,
            "percentile": 66.7,
            "performance_level": "Above Average",
            "comparison_insights": ["Konsistensi login kamu sangat baik, di atas rata-rata."],
            "benchmark_comparison": [
                {"persona": "The Consistent", "benchmark_performance": 2.5, "difference": 0.5},
                {"persona": "The Sprinter", "benchmark_performance": 3.0, "difference": 0.0},
                {"persona": "The Warrior", "benchmark_performance": 3.4, "difference": -0.4}
            ]
        }"#,
    )
    .unwrap();

    AnalysisBundle {
        performance,
        persona,
        insight,
        comparison,
    }
}

#[test]
fn report_derives_reference_indicators() {
    let input = AnalysisInput::from_performance(reference_features());
    let report = build_report(&input, &reference_bundle());

    let indicators = report.indicators.expect("required fields are present");
    assert_eq!(indicators.len(), 5);

    let percent = |kind: IndicatorKind| {
        indicators
            .iter()
            .find(|i| i.kind == kind)
            .map(|i| i.percent)
            .unwrap()
    };

    assert_eq!(percent(IndicatorKind::Completion), 80.0);
    assert!((percent(IndicatorKind::Consistency) - 78.5714).abs() < 0.001);
    assert_eq!(percent(IndicatorKind::StudyTime), 50.0);
    assert!((percent(IndicatorKind::ActiveDays) - 66.6667).abs() < 0.001);
    assert_eq!(percent(IndicatorKind::NightStudy), 20.0);

    let completion = indicators
        .iter()
        .find(|i| i.kind == IndicatorKind::Completion)
        .unwrap();
    assert_eq!(completion.tier, IndicatorTier::Excellent);
}

#[test]
fn report_compares_against_every_persona_in_order() {
    let input = AnalysisInput::from_performance(reference_features());
    let report = build_report(&input, &reference_bundle());

    assert_eq!(report.comparisons.len(), 3);

    let consistent = &report.comparisons[0];
    assert_eq!(consistent.persona, "The Consistent");
    assert_eq!(consistent.standing, Standing::Higher);
    assert_eq!(consistent.summary_text(), "Lebih tinggi 20%");

    let sprinter = &report.comparisons[1];
    assert_eq!(sprinter.standing, Standing::Equal);
    assert_eq!(sprinter.summary_text(), "Setara dengan benchmark");

    let warrior = &report.comparisons[2];
    assert_eq!(warrior.standing, Standing::Lower);
    assert!(warrior.delta < 0.0);
}

#[test]
fn report_passes_backend_fields_through_verbatim() {
    let input = AnalysisInput::from_performance(reference_features());
    let report = build_report(&input, &reference_bundle());

    assert_eq!(report.predicted_performance, 3.0);
    assert_eq!(report.persona, "The Consistent");
    assert_eq!(report.cluster, 0);
    assert_eq!(report.percentile, 66.7);
    assert_eq!(report.performance_level, "Above Average");
    assert_eq!(
        report.performance_insight.as_deref(),
        Some("Performa belajar kamu sangat baik.")
    );
    assert_eq!(report.persona_insights.len(), 2);
    assert_eq!(report.comparison_insights.len(), 1);
}

#[test]
fn report_summarizes_recommendations_in_received_order() {
    let input = AnalysisInput::from_performance(reference_features());
    let report = build_report(&input, &reference_bundle());

    let recommendations = &report.recommendations;
    assert_eq!(recommendations.summary.total_count, 3);
    assert_eq!(recommendations.summary.high_priority_count, 2);

    let priorities: Vec<Priority> = recommendations
        .grouped
        .iter()
        .map(|r| r.priority)
        .collect();
    assert_eq!(
        priorities,
        vec![Priority::High, Priority::Low, Priority::High]
    );
    assert_eq!(
        recommendations.grouped[0].title,
        "Tingkatkan Kecepatan Penyelesaian"
    );
}

#[test]
fn report_tolerates_sparse_insight_payload() {
    let input = AnalysisInput::from_performance(reference_features());
    let mut bundle = reference_bundle();
    bundle.insight = serde_json::from_str(r#"{"insights": {}, "recommendations": []}"#).unwrap();

    let report = build_report(&input, &bundle);
    assert!(report.performance_insight.is_none());
    assert!(report.persona_insights.is_empty());
    assert_eq!(report.recommendations.summary.total_count, 0);
}

#[test]
fn clustering_subset_is_derived_from_performance() {
    let input = AnalysisInput::from_performance(reference_features());
    assert_eq!(input.clustering.completion_velocity, 0.8);
    assert_eq!(input.clustering.login_gap_std, 1.5);
    assert_eq!(input.clustering.night_study_ratio, 0.2);
}
