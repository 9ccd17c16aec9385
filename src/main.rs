use persona_insight::config::Config;
use persona_insight::logging;
use persona_insight::report;
use persona_insight::services::analysis::{self, AnalysisInput};
use persona_insight::services::backend::InsightBackend;

const CONNECT_ERROR: &str = "Failed to connect to API. Please make sure the backend is running.";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let backend = InsightBackend::new(&config);

    let exit_code = match std::env::args().nth(1).as_deref() {
        Some("dashboard") => show_dashboard(&backend).await,
        Some("health") => check_health(&backend).await,
        Some("personas") => list_personas(&backend).await,
        Some("persona") => match std::env::args().nth(2) {
            Some(label) => analyze_persona(&backend, &label).await,
            None => {
                eprintln!("usage: persona-insight persona <label>");
                2
            }
        },
        Some(path) => analyze_from_file(&backend, path).await,
        None => analyze_sample(&backend).await,
    };

    std::process::exit(exit_code);
}

async fn show_dashboard(backend: &InsightBackend) -> i32 {
    match backend.benchmark_stats().await {
        Ok(stats) => {
            print!("{}", report::render_dashboard(&stats));
            0
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load benchmark stats");
            eprintln!("Failed to load benchmark data");
            1
        }
    }
}

async fn check_health(backend: &InsightBackend) -> i32 {
    match backend.health().await {
        Ok(health) => {
            println!("backend status: {}", health.status);
            0
        }
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            eprintln!("{CONNECT_ERROR}");
            1
        }
    }
}

async fn list_personas(backend: &InsightBackend) -> i32 {
    match backend.persona_samples().await {
        Ok(samples) => {
            println!("{} personas:", samples.total_personas);
            for sample in &samples.samples {
                println!(
                    "  {} (cluster {}): velocity {:.2}, gap {:.2} days, {:.0} min/module",
                    sample.persona_label,
                    sample.cluster_id,
                    sample.performance.completion_velocity,
                    sample.performance.login_gap_std,
                    sample.performance.avg_minutes_per_module
                );
            }
            0
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load persona samples");
            eprintln!("{CONNECT_ERROR}");
            1
        }
    }
}

/// Run the analysis with a named persona's sample inputs, the same flow the
/// dashboard's per-persona auto-fill buttons use.
async fn analyze_persona(backend: &InsightBackend, label: &str) -> i32 {
    let samples = match backend.persona_samples().await {
        Ok(samples) => samples,
        Err(err) => {
            tracing::error!(error = %err, "failed to load persona samples");
            eprintln!("{CONNECT_ERROR}");
            return 1;
        }
    };

    let Some(sample) = samples
        .samples
        .iter()
        .find(|s| s.persona_label.eq_ignore_ascii_case(label))
    else {
        let known: Vec<&str> = samples
            .samples
            .iter()
            .map(|s| s.persona_label.as_str())
            .collect();
        eprintln!("unknown persona {label:?}; known personas: {}", known.join(", "));
        return 1;
    };

    let input = AnalysisInput {
        performance: sample.performance.clone(),
        clustering: sample.clustering.clone(),
    };
    analyze(backend, &input).await
}

/// No input file given: auto-fill from the backend's sample data, the same
/// flow the dashboard's auto-fill button uses.
async fn analyze_sample(backend: &InsightBackend) -> i32 {
    let input = match backend.sample_data().await {
        Ok(sample) => AnalysisInput {
            performance: sample.performance,
            clustering: sample.clustering,
        },
        Err(err) => {
            tracing::error!(error = %err, "failed to load sample data");
            eprintln!("Failed to load sample data. Please check if backend is running.");
            return 1;
        }
    };

    analyze(backend, &input).await
}

/// Load features from a JSON file: either a full `{performance, clustering}`
/// input or a bare performance feature set, from which the clustering subset
/// is derived.
async fn analyze_from_file(backend: &InsightBackend, path: &str) -> i32 {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return 1;
        }
    };

    let input = match serde_json::from_str::<AnalysisInput>(&raw) {
        Ok(input) => input,
        Err(_) => match serde_json::from_str(&raw) {
            Ok(performance) => AnalysisInput::from_performance(performance),
            Err(err) => {
                eprintln!("failed to parse {path}: {err}");
                return 1;
            }
        },
    };

    analyze(backend, &input).await
}

async fn analyze(backend: &InsightBackend, input: &AnalysisInput) -> i32 {
    match analysis::run_analysis(backend, input).await {
        Ok(report) => {
            print!("{}", report::render_report(&report));
            0
        }
        Err(err) => {
            tracing::error!(error = %err, "analysis run failed");
            eprintln!("{CONNECT_ERROR}");
            1
        }
    }
}
