use std::sync::Arc;

use tracing::{debug, warn};

use super::catalog::ScaleCatalog;
use super::engine::{ReportScoringEngine, ScoredReport};
use super::import::SurveyResult;
use super::insights::{section_insights, SectionInsight};
use super::normalizer::{normalize, RawScores, ScoreVector};
use super::rubric::Rubric;
use super::threshold::Threshold;

/// Service pairing the configured scale catalog with the scoring engine.
#[derive(Debug, Clone)]
pub struct ReportScoringService {
    engine: Arc<ReportScoringEngine>,
}

impl ReportScoringService {
    pub fn new(catalog: ScaleCatalog) -> Self {
        Self {
            engine: Arc::new(ReportScoringEngine::new(catalog)),
        }
    }

    pub fn catalog(&self) -> &ScaleCatalog {
        self.engine.catalog()
    }

    /// Accepts a JSON payload only when it is an array or a delimited string.
    pub fn parse_payload(
        &self,
        payload: serde_json::Value,
    ) -> Result<RawScores, ScoringServiceError> {
        RawScores::from_json(payload).ok_or_else(|| {
            warn!("survey payload is neither an array nor a delimited string");
            ScoringServiceError::UnsupportedPayload
        })
    }

    pub fn normalize(&self, raw: &RawScores) -> Result<ScoreVector, ScoringServiceError> {
        let expected = self.catalog().len();
        normalize(raw, expected).ok_or_else(|| {
            warn!(expected, "survey scores do not match the scale catalog");
            ScoringServiceError::UnusableScores { expected }
        })
    }

    /// Normalizes `raw` and scores it; `thresholds` default to the rubric's own.
    pub fn score(
        &self,
        rubric: &Rubric,
        raw: &RawScores,
        thresholds: Option<&[Threshold]>,
    ) -> Result<ScoredReport, ScoringServiceError> {
        let scores = self.normalize(raw)?;
        let thresholds = thresholds.unwrap_or(rubric.thresholds.as_slice());
        let report = self.engine.score(rubric, scores.as_slice(), thresholds);

        debug!(
            report = %rubric.name,
            sections = report.len(),
            thresholds = thresholds.len(),
            "scored report"
        );

        Ok(report)
    }

    pub fn insights(
        &self,
        rubric: &Rubric,
        report: &ScoredReport,
        limit: Option<usize>,
    ) -> Vec<SectionInsight> {
        section_insights(rubric, report, limit)
    }

    /// Scores each respondent independently; one bad row never aborts the batch.
    pub fn score_batch(&self, rubric: &Rubric, results: &[SurveyResult]) -> Vec<RespondentReport> {
        results
            .iter()
            .map(|result| RespondentReport {
                respondent_id: result.respondent_id.clone(),
                outcome: self.score(rubric, &result.scores, None),
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct RespondentReport {
    pub respondent_id: String,
    pub outcome: Result<ScoredReport, ScoringServiceError>,
}

/// Error raised when survey input cannot produce a report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("survey scores must be an array of values or a comma-separated string")]
    UnsupportedPayload,
    #[error("survey scores could not be normalized against {expected} catalog scales")]
    UnusableScores { expected: usize },
}
