use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::core::features::{ClusteringFeatures, PerformanceFeatures};
use crate::core::recommendation::Recommendation;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformancePrediction {
    pub predicted_performance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaPrediction {
    pub persona: String,
    pub cluster: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightMessages {
    #[serde(default)]
    pub performance_based: Option<String>,
    #[serde(default)]
    pub persona_based: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightResponse {
    #[serde(default)]
    pub insights: InsightMessages,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkComparisonEntry {
    pub persona: String,
    pub benchmark_performance: f64,
    /// Pre-rounded by the backend; the comparator recomputes its own delta.
    #[serde(default)]
    pub difference: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonResponse {
    pub user_performance: f64,
    pub percentile: f64,
    pub performance_level: String,
    #[serde(default)]
    pub comparison_insights: Vec<String>,
    pub benchmark_comparison: Vec<BenchmarkComparisonEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkAverages {
    #[serde(default)]
    pub avg_activities: f64,
    #[serde(default)]
    pub avg_minutes_per_module: f64,
    #[serde(default)]
    pub avg_consistency: f64,
    #[serde(default)]
    pub avg_weekend_ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaBenchmarkEntry {
    pub cluster_id: i64,
    pub persona: String,
    #[serde(default)]
    pub avg_activities: f64,
    #[serde(default)]
    pub avg_minutes_per_module: f64,
    #[serde(default)]
    pub avg_consistency: f64,
    #[serde(default)]
    pub avg_weekend_ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkStatsResponse {
    pub total_personas: i64,
    #[serde(default)]
    pub overall_average: BenchmarkAverages,
    pub benchmark_by_persona: Vec<PersonaBenchmarkEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleDataResponse {
    pub performance: PerformanceFeatures,
    pub clustering: ClusteringFeatures,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaSample {
    pub cluster_id: i64,
    pub persona_label: String,
    pub performance: PerformanceFeatures,
    pub clustering: ClusteringFeatures,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaSamplesResponse {
    pub samples: Vec<PersonaSample>,
    #[serde(default)]
    pub total_personas: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
struct InsightRequest<'a> {
    perf: &'a PerformanceFeatures,
    cluster: &'a ClusteringFeatures,
}

/// Typed client for the external model-serving backend. One shared
/// connection pool; the request timeout comes from config. Failures are
/// surfaced as-is, retrying is left to the user re-running the analysis.
#[derive(Clone)]
pub struct InsightBackend {
    base_url: String,
    client: reqwest::Client,
}

impl InsightBackend {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub async fn predict_performance(
        &self,
        features: &PerformanceFeatures,
    ) -> Result<PerformancePrediction, BackendError> {
        self.post("/predict/performance", features).await
    }

    pub async fn predict_persona(
        &self,
        features: &ClusteringFeatures,
    ) -> Result<PersonaPrediction, BackendError> {
        self.post("/predict/persona", features).await
    }

    pub async fn predict_insight(
        &self,
        perf: &PerformanceFeatures,
        cluster: &ClusteringFeatures,
    ) -> Result<InsightResponse, BackendError> {
        self.post("/predict/insight", &InsightRequest { perf, cluster })
            .await
    }

    pub async fn compare_performance(
        &self,
        features: &PerformanceFeatures,
    ) -> Result<ComparisonResponse, BackendError> {
        self.post("/compare/performance", features).await
    }

    pub async fn benchmark_stats(&self) -> Result<BenchmarkStatsResponse, BackendError> {
        self.get("/benchmark/stats").await
    }

    pub async fn sample_data(&self) -> Result<SampleDataResponse, BackendError> {
        self.get("/sample-data").await
    }

    pub async fn persona_samples(&self) -> Result<PersonaSamplesResponse, BackendError> {
        self.get("/persona-samples").await
    }

    pub async fn health(&self) -> Result<HealthResponse, BackendError> {
        self.get("/health").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::HttpStatus { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base: &str) -> Config {
        Config {
            api_base_url: base.to_string(),
            request_timeout: Duration::from_millis(100),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let backend = InsightBackend::new(&config("http://localhost:8000/"));
        assert_eq!(
            backend.url("/predict/performance"),
            "http://localhost:8000/predict/performance"
        );
    }

    #[test]
    fn test_comparison_payload_decodes() {
        let payload: ComparisonResponse = serde_json::from_str(
            r#"{
                "user_performance": 3.0,
                "percentile": 66.7,
                "benchmark_source": "kmeans_centroids",
                "performance_level": "Above Average",
                "comparison_insights": ["Konsistensi login kamu sangat baik, di atas rata-rata."],
                "benchmark_comparison": [
                    {"persona": "The Consistent", "benchmark_performance": 2.5, "difference": 0.5}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.performance_level, "Above Average");
        assert_eq!(payload.benchmark_comparison.len(), 1);
        assert_eq!(payload.benchmark_comparison[0].persona, "The Consistent");
    }

    #[test]
    fn test_insight_payload_tolerates_missing_sections() {
        let payload: InsightResponse = serde_json::from_str(r#"{"insights": {}}"#).unwrap();
        assert!(payload.insights.performance_based.is_none());
        assert!(payload.recommendations.is_empty());
    }
}
