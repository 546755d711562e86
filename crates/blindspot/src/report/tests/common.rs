use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::report::catalog::ScaleCatalog;
use crate::report::engine::ReportScoringEngine;
use crate::report::rubric::{
    OverrideAction, Rubric, Section, Trait, TraitLine, ThresholdOverride,
};
use crate::report::service::ReportScoringService;
use crate::report::threshold::Threshold;
use crate::report::report_router;

pub(super) fn catalog() -> ScaleCatalog {
    ScaleCatalog::new(["scale1", "scale2", "scale3"]).expect("catalog builds")
}

pub(super) fn engine() -> ReportScoringEngine {
    ReportScoringEngine::new(catalog())
}

pub(super) fn service() -> ReportScoringService {
    ReportScoringService::new(catalog())
}

pub(super) fn thresholds() -> Vec<Threshold> {
    vec![
        threshold("low", "Low", 0.0, 33.0, Some("red")),
        threshold("mid", "Mid", 34.0, 66.0, Some("yellow")),
        threshold("high", "High", 67.0, 100.0, Some("green")),
    ]
}

pub(super) fn threshold(
    id: &str,
    label: &str,
    min: f64,
    max: f64,
    color: Option<&str>,
) -> Threshold {
    Threshold {
        id: id.to_string(),
        label: label.to_string(),
        color: color.map(str::to_string),
        min,
        max,
    }
}

pub(super) fn line(scale: &str, direction: &str, strength: &str) -> TraitLine {
    TraitLine {
        scale: scale.to_string(),
        strength: Some(strength.to_string()),
        direction: Some(direction.to_string()),
        notes: String::new(),
    }
}

pub(super) fn trait_with(name: &str, lines: Vec<TraitLine>) -> Trait {
    Trait {
        name: name.to_string(),
        description: format!("{name} description"),
        lines,
        threshold_overrides: BTreeMap::new(),
    }
}

pub(super) fn high_override() -> ThresholdOverride {
    ThresholdOverride {
        content: "High override content".to_string(),
        actions: vec![
            OverrideAction {
                label: "Action 1".to_string(),
                description: "Slow down before deciding".to_string(),
            },
            OverrideAction {
                label: "Action 2".to_string(),
                description: "Invite dissent".to_string(),
            },
        ],
    }
}

/// Two traits in one section, weighted 1.5 strong / 0.8 moderate.
pub(super) fn rubric() -> Rubric {
    let mut first = trait_with(
        "Trait 1",
        vec![
            line("scale1", "Positive", "Strong"),
            line("scale2", "Negative", "Moderate"),
        ],
    );
    first
        .threshold_overrides
        .insert("high".to_string(), high_override());

    let second = trait_with("Trait 2", vec![line("scale3", "Positive", "Strong")]);

    Rubric {
        uuid: "1".to_string(),
        name: "Test Report".to_string(),
        description: "Test Report".to_string(),
        is_active: true,
        is_test: false,
        strong_weight: Some(1.5),
        moderate_weight: Some(0.8),
        sections: vec![Section {
            name: "Section 1".to_string(),
            description: "Section 1 Description".to_string(),
            traits: vec![first, second],
        }],
        thresholds: thresholds(),
    }
}

pub(super) fn router() -> axum::Router {
    report_router(Arc::new(service()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
