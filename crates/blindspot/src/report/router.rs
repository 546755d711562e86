use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::engine::ScoredReport;
use super::insights::SectionInsight;
use super::normalizer::ScoreVector;
use super::rubric::Rubric;
use super::service::{ReportScoringService, ScoringServiceError};
use super::threshold::Threshold;

/// Router builder exposing normalization and report scoring endpoints.
pub fn report_router(service: Arc<ReportScoringService>) -> Router {
    Router::new()
        .route("/api/v1/scores/normalize", post(normalize_handler))
        .route("/api/v1/reports/score", post(score_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub scores: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub scores: ScoreVector,
}

#[derive(Debug, Deserialize)]
pub struct ScoreReportRequest {
    pub report: Rubric,
    #[serde(default)]
    pub scores: serde_json::Value,
    /// Replaces the report's own thresholds when present.
    #[serde(default)]
    pub thresholds: Option<Vec<Threshold>>,
    #[serde(default)]
    pub top_blindspots: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScoreReportResponse {
    pub report_name: String,
    pub sections: ScoredReport,
    pub insights: Vec<SectionInsight>,
}

pub(crate) async fn normalize_handler(
    State(service): State<Arc<ReportScoringService>>,
    axum::Json(request): axum::Json<NormalizeRequest>,
) -> Response {
    let outcome = service
        .parse_payload(request.scores)
        .and_then(|raw| service.normalize(&raw));

    match outcome {
        Ok(scores) => (StatusCode::OK, axum::Json(NormalizeResponse { scores })).into_response(),
        Err(error) => unusable_scores(error),
    }
}

pub(crate) async fn score_handler(
    State(service): State<Arc<ReportScoringService>>,
    axum::Json(request): axum::Json<ScoreReportRequest>,
) -> Response {
    let ScoreReportRequest {
        report,
        scores,
        thresholds,
        top_blindspots,
    } = request;

    let outcome = service
        .parse_payload(scores)
        .and_then(|raw| service.score(&report, &raw, thresholds.as_deref()));

    match outcome {
        Ok(sections) => {
            let insights = service.insights(&report, &sections, top_blindspots);
            let body = ScoreReportResponse {
                report_name: report.name,
                sections,
                insights,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => unusable_scores(error),
    }
}

fn unusable_scores(error: ScoringServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
