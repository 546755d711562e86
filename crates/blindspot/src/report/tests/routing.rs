use super::common::*;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::report::router::{normalize_handler, score_handler, NormalizeRequest, ScoreReportRequest};

fn post_json(uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn normalize_handler_returns_bounded_scores() {
    let response = normalize_handler(
        State(Arc::new(service())),
        axum::Json(NormalizeRequest {
            scores: json!("25,-10,150"),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "scores": [25.0, 50.0, 50.0] }));
}

#[tokio::test]
async fn normalize_handler_rejects_wrong_length() {
    let response = normalize_handler(
        State(Arc::new(service())),
        axum::Json(NormalizeRequest {
            scores: json!([25, 50]),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("3 catalog scales"));
}

#[tokio::test]
async fn score_handler_rejects_unsupported_payload_shape() {
    let response = score_handler(
        State(Arc::new(service())),
        axum::Json(ScoreReportRequest {
            report: rubric(),
            scores: json!({ "foo": "bar" }),
            thresholds: None,
            top_blindspots: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn score_route_returns_sections_and_insights() {
    let request = json!({
        "report": serde_json::to_value(rubric()).expect("rubric serializes"),
        "scores": [80, 60, 40],
        "top_blindspots": 1,
    });

    let response = router()
        .oneshot(post_json("/api/v1/reports/score", request))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["report_name"], "Test Report");

    let section = body["sections"]["Section 1"]
        .as_array()
        .expect("section array");
    assert_eq!(section.len(), 2);
    assert_eq!(section[0]["traitName"], "Trait 1");
    assert_eq!(section[0]["score"], 66.09);
    assert_eq!(section[0]["thresholdId"], "mid");
    assert_eq!(section[1]["thresholdColor"], "yellow");

    let insights = body["insights"].as_array().expect("insights array");
    assert_eq!(insights[0]["top_blindspots"].as_array().map(Vec::len), Some(1));
    assert_eq!(insights[0]["top_blindspots"][0]["trait_name"], "Trait 1");
}

#[tokio::test]
async fn score_route_prefers_request_thresholds() {
    let request = json!({
        "report": serde_json::to_value(rubric()).expect("rubric serializes"),
        "scores": "80,60,40",
        "thresholds": [],
    });

    let response = router()
        .oneshot(post_json("/api/v1/reports/score", request))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let first = &body["sections"]["Section 1"][0];
    assert!(first["thresholdId"].is_null());
    assert_eq!(first["thresholdColor"], "transparent");
}

#[tokio::test]
async fn score_route_requires_scores() {
    let request = json!({
        "report": serde_json::to_value(rubric()).expect("rubric serializes"),
    });

    let response = router()
        .oneshot(post_json("/api/v1/reports/score", request))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
