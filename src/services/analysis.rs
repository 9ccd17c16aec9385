use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::benchmark::{self, ComparisonResult, PersonaBenchmark};
use crate::core::features::{ClusteringFeatures, FeatureDraft, PerformanceFeatures};
use crate::core::progress::{self, ProgressIndicator};
use crate::core::recommendation::{self, PrioritizedRecommendations};
use crate::services::backend::{
    BackendError, ComparisonResponse, InsightBackend, InsightResponse,
    PerformancePrediction, PersonaPrediction,
};

/// Both request bodies for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub performance: PerformanceFeatures,
    pub clustering: ClusteringFeatures,
}

impl AnalysisInput {
    /// Derive the clustering subset from a full performance feature set.
    pub fn from_performance(performance: PerformanceFeatures) -> Self {
        let clustering = ClusteringFeatures::from(&performance);
        Self {
            performance,
            clustering,
        }
    }
}

/// The four backend payloads an analysis run is built from.
#[derive(Debug, Clone)]
pub struct AnalysisBundle {
    pub performance: PerformancePrediction,
    pub persona: PersonaPrediction,
    pub insight: InsightResponse,
    pub comparison: ComparisonResponse,
}

/// Fan out to the four prediction endpoints concurrently and fan in on the
/// first failure. All four must succeed before anything is rendered; a
/// single failure fails the whole run.
pub async fn fetch_bundle(
    backend: &InsightBackend,
    input: &AnalysisInput,
) -> Result<AnalysisBundle, BackendError> {
    let (performance, persona, insight, comparison) = tokio::try_join!(
        backend.predict_performance(&input.performance),
        backend.predict_persona(&input.clustering),
        backend.predict_insight(&input.performance, &input.clustering),
        backend.compare_performance(&input.performance),
    )?;

    Ok(AnalysisBundle {
        performance,
        persona,
        insight,
        comparison,
    })
}

/// Everything the presentation layer needs for one analysis run. Derived
/// fields come from the core; backend-owned fields (percentile, level,
/// insight copy) are passed through verbatim.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub input: AnalysisInput,
    pub indicators: Option<Vec<ProgressIndicator>>,
    pub predicted_performance: f64,
    pub persona: String,
    pub cluster: i64,
    pub performance_insight: Option<String>,
    pub persona_insights: Vec<String>,
    pub percentile: f64,
    pub performance_level: String,
    pub comparison_insights: Vec<String>,
    pub comparisons: Vec<ComparisonResult>,
    pub recommendations: PrioritizedRecommendations,
}

pub fn build_report(input: &AnalysisInput, bundle: &AnalysisBundle) -> AnalysisReport {
    let draft = FeatureDraft::from(&input.performance);
    let indicators = progress::normalize(&draft);

    let benchmarks: Vec<PersonaBenchmark> = bundle
        .comparison
        .benchmark_comparison
        .iter()
        .map(|entry| PersonaBenchmark::scored(entry.persona.clone(), entry.benchmark_performance))
        .collect();
    let comparisons = benchmark::compare(bundle.comparison.user_performance, &benchmarks);

    let recommendations = recommendation::prioritize(&bundle.insight.recommendations);

    AnalysisReport {
        generated_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        input: input.clone(),
        indicators,
        predicted_performance: bundle.performance.predicted_performance,
        persona: bundle.persona.persona.clone(),
        cluster: bundle.persona.cluster,
        performance_insight: bundle.insight.insights.performance_based.clone(),
        persona_insights: bundle
            .insight
            .insights
            .persona_based
            .clone()
            .unwrap_or_default(),
        percentile: bundle.comparison.percentile,
        performance_level: bundle.comparison.performance_level.clone(),
        comparison_insights: bundle.comparison.comparison_insights.clone(),
        comparisons,
        recommendations,
    }
}

/// One full analysis run: gather, then derive.
pub async fn run_analysis(
    backend: &InsightBackend,
    input: &AnalysisInput,
) -> Result<AnalysisReport, BackendError> {
    let bundle = fetch_bundle(backend, input).await?;
    Ok(build_report(input, &bundle))
}
